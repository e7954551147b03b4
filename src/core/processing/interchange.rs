//! Native (gray / BGR) to interchange (RGB) conversion for encoders and viewers.
use ndarray::{Array3, ArrayView3, Axis, Zip};

use crate::core::image::PixelImage;
use crate::error::{Error, Result};
use crate::types::ColorImage;

/// Interleaved RGB buffer, shaped `(rows, cols, 3)`.
#[derive(Debug, Clone, PartialEq)]
pub struct InterchangeImage {
    pixels: Array3<u8>,
}

impl InterchangeImage {
    pub fn width(&self) -> usize {
        self.pixels.dim().1
    }

    pub fn height(&self) -> usize {
        self.pixels.dim().0
    }

    /// Row-major RGB bytes.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        self.pixels.iter().copied().collect()
    }

    pub fn into_rgb_image(self) -> Result<image::RgbImage> {
        let (w, h) = (self.width() as u32, self.height() as u32);
        image::RgbImage::from_raw(w, h, self.to_rgb_bytes())
            .ok_or_else(|| Error::Processing(format!("RGB buffer does not fit {}x{}", w, h)))
    }
}

fn swap_bgr(view: ArrayView3<'_, u8>) -> Array3<u8> {
    let (rows, cols, _) = view.dim();
    let mut rgb = Array3::<u8>::zeros((rows, cols, 3));
    Zip::from(rgb.lanes_mut(Axis(2)))
        .and(view.lanes(Axis(2)))
        .for_each(|mut dst, src| {
            dst[0] = src[2];
            dst[1] = src[1];
            dst[2] = src[0];
        });
    rgb
}

/// Convert a decoded buffer to RGB. Gray input is replicated into three channels first.
pub fn to_interchange(image: &PixelImage) -> InterchangeImage {
    let view = image.view();
    let pixels = if image.is_gray() {
        let plane = view.index_axis(Axis(2), 0);
        let mut rgb = Array3::<u8>::zeros((image.height(), image.width(), 3));
        Zip::from(rgb.lanes_mut(Axis(2)))
            .and(&plane)
            .for_each(|mut dst, &v| dst.fill(v));
        rgb
    } else {
        swap_bgr(view)
    };
    InterchangeImage { pixels }
}

/// Convert a pipeline color image (BGR) to RGB.
pub fn color_to_interchange(color: &ColorImage) -> InterchangeImage {
    InterchangeImage {
        pixels: swap_bgr(color.view()),
    }
}
