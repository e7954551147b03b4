use ndarray::{Array3, ArrayView3, Axis};

use crate::error::{Error, Result};
use crate::types::{ColorImage, GrayImage, ImageShape};

/// Upper bound on `rows * cols * channels` accepted by the pipeline (16384 x 16384).
pub const MAX_PIXELS: usize = 1 << 28;

/// Decoded pixel buffer handed to the pipeline: 1 channel (intensity) or
/// 3 channels in native BGR order, shaped `(rows, cols, channels)`.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelImage {
    data: Array3<u8>,
}

/// Reject sizes that overflow or exceed [`MAX_PIXELS`] before anything is allocated.
pub fn check_buffer_size(rows: usize, cols: usize, channels: usize) -> Result<usize> {
    let total = rows
        .checked_mul(cols)
        .and_then(|n| n.checked_mul(channels))
        .ok_or_else(|| Error::ResourceExhausted {
            detail: format!("{}x{}x{} overflows the address space", cols, rows, channels),
        })?;
    if total > MAX_PIXELS {
        return Err(Error::ResourceExhausted {
            detail: format!(
                "{}x{}x{} = {} samples exceeds limit of {}",
                cols, rows, channels, total, MAX_PIXELS
            ),
        });
    }
    Ok(total)
}

impl PixelImage {
    /// Build from interleaved row-major bytes.
    pub fn from_raw(width: usize, height: usize, channels: usize, data: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::invalid_image(format!(
                "zero-sized buffer {}x{}",
                width, height
            )));
        }
        if channels != 1 && channels != 3 {
            return Err(Error::invalid_image(format!(
                "unsupported channel count {}",
                channels
            )));
        }
        let expected = check_buffer_size(height, width, channels)?;
        if data.len() != expected {
            return Err(Error::invalid_image(format!(
                "buffer holds {} bytes, expected {} for {}x{}x{}",
                data.len(),
                expected,
                width,
                height,
                channels
            )));
        }
        let data = Array3::from_shape_vec((height, width, channels), data)
            .map_err(|e| Error::processing("buffer reshape", e))?;
        Ok(Self { data })
    }

    /// Wrap an existing `(rows, cols, channels)` array, validating its shape.
    pub fn from_array(data: Array3<u8>) -> Result<Self> {
        let (rows, cols, channels) = data.dim();
        if rows == 0 || cols == 0 {
            return Err(Error::invalid_image(format!(
                "zero-sized buffer {}x{}",
                cols, rows
            )));
        }
        if channels != 1 && channels != 3 {
            return Err(Error::invalid_image(format!(
                "unsupported channel count {}",
                channels
            )));
        }
        check_buffer_size(rows, cols, channels)?;
        Ok(Self { data })
    }

    pub fn from_gray(gray: GrayImage) -> Result<Self> {
        Self::from_array(gray.insert_axis(Axis(2)))
    }

    pub fn from_bgr(color: ColorImage) -> Result<Self> {
        Self::from_array(color)
    }

    pub fn width(&self) -> usize {
        self.data.dim().1
    }

    pub fn height(&self) -> usize {
        self.data.dim().0
    }

    pub fn channels(&self) -> usize {
        self.data.dim().2
    }

    pub fn shape(&self) -> ImageShape {
        ImageShape::new(self.height(), self.width(), self.channels())
    }

    pub fn is_gray(&self) -> bool {
        self.channels() == 1
    }

    pub fn view(&self) -> ArrayView3<'_, u8> {
        self.data.view()
    }

    pub fn into_array(self) -> Array3<u8> {
        self.data
    }

    /// Interleaved row-major bytes.
    pub fn to_raw(&self) -> Vec<u8> {
        self.data.iter().copied().collect()
    }
}
