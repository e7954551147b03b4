//! Pixel-level stages of the enhancement pipeline: gray coercion and remap, adaptive
//! equalization, band pseudocolor, statistics, legend rendering and resizing.
pub mod colorize;
pub mod equalize;
pub mod grayscale;
pub mod interchange;
pub mod legend;
pub mod pipeline;
pub mod resize;
pub mod schemes;
pub mod stats;
