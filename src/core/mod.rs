//! Core building blocks: the decoded pixel buffer, enhancement parameters, the
//! processing stages and the session history. These are the primitives consumed by the
//! high-level `api` module.
pub mod history;
pub mod image;
pub mod params;
pub mod processing;
