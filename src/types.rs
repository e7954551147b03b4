//! Shared types used across RADIOCHROME.
//! Includes the ndarray buffer aliases (`GrayImage`, `ColorImage`), the `Histogram`
//! alias, the native `Bgr` color triple, `OutputFormat` and `ImageShape`.
use clap::ValueEnum;
use ndarray::{Array2, Array3};
use serde::{Deserialize, Serialize};

/// Single-channel 8-bit intensity buffer, indexed `(row, col)`.
pub type GrayImage = Array2<u8>;

/// Three-channel 8-bit buffer in native BGR order, indexed `(row, col, channel)`.
pub type ColorImage = Array3<u8>;

/// 256-bin intensity histogram; index is the intensity value.
pub type Histogram = [u64; 256];

/// Color triple in native channel order (blue, green, red).
pub type Bgr = [u8; 3];

#[derive(
    Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, ValueEnum, Serialize, Deserialize,
)]
pub enum OutputFormat {
    JPEG, // Lossy, preview only
    TIFF,
    PNG,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::JPEG => "jpg",
            OutputFormat::TIFF => "tiff",
            OutputFormat::PNG => "png",
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::JPEG => write!(f, "JPEG"),
            OutputFormat::TIFF => write!(f, "TIFF"),
            OutputFormat::PNG => write!(f, "PNG"),
        }
    }
}

/// Buffer shape as recorded in history entries.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct ImageShape {
    pub height: usize,
    pub width: usize,
    pub channels: usize,
}

impl ImageShape {
    pub fn new(height: usize, width: usize, channels: usize) -> Self {
        Self {
            height,
            width,
            channels,
        }
    }
}

impl std::fmt::Display for ImageShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}x{}", self.width, self.height, self.channels)
    }
}
