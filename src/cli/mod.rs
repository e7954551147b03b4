//! Command Line Interface (CLI) layer for RADIOCHROME.
//!
//! This module defines argument parsing (`args`), error types (`errors`),
//! and the orchestration logic (`runner`) for single-file and batch
//! processing flows. It wires user-provided options to the underlying
//! library functionality exposed via `radiochrome::api`.
//!
//! If you are embedding RADIOCHROME into another application, prefer using
//! the high-level `radiochrome::api` module instead of calling the CLI code.
pub mod args;
pub mod errors;
pub mod runner;

pub use args::CliArgs;
pub use errors::user_message;
pub use runner::run;
