use fast_image_resize::{FilterType, PixelType, ResizeAlg, ResizeOptions, Resizer, images::Image};
use ndarray::Array3;
use tracing::{debug, info};

use crate::core::image::PixelImage;
use crate::error::{Error, Result};

/// Dimensions `(cols, rows)` that fit inside a `max_side` square while keeping the aspect
/// ratio. The short side is floored; images already within bounds keep their size and no
/// side drops below 1.
pub fn calculate_fit_dimensions(cols: usize, rows: usize, max_side: usize) -> (usize, usize) {
    let long_side = cols.max(rows);
    if max_side == 0 || long_side <= max_side {
        return (cols, rows);
    }

    let scale = max_side as f64 / long_side as f64;
    let scaled = |side: usize| ((side as f64 * scale).floor() as usize).clamp(1, max_side);

    if cols >= rows {
        (max_side, scaled(rows))
    } else {
        (scaled(cols), max_side)
    }
}

fn pixel_type(channels: usize) -> Result<PixelType> {
    match channels {
        1 => Ok(PixelType::U8),
        3 => Ok(PixelType::U8x3),
        other => Err(Error::invalid_image(format!(
            "unsupported channel count {}",
            other
        ))),
    }
}

/// Downscale `image` so its long side is at most `max_side`, area-averaging the pixels.
/// Returns a copy when no resize is needed.
pub fn fit_within(image: &PixelImage, max_side: usize) -> Result<PixelImage> {
    let (cols, rows, channels) = (image.width(), image.height(), image.channels());
    let (new_cols, new_rows) = calculate_fit_dimensions(cols, rows, max_side);
    if (new_cols, new_rows) == (cols, rows) {
        debug!("Image {}x{} already fits within {}", cols, rows, max_side);
        return Ok(image.clone());
    }

    info!(
        "Original size: {}x{}, New size: {}x{}",
        cols, rows, new_cols, new_rows
    );

    let pixel_type = pixel_type(channels)?;
    let src = Image::from_vec_u8(cols as u32, rows as u32, image.to_raw(), pixel_type)
        .map_err(|e| Error::processing("resize", e))?;
    let mut dst = Image::new(new_cols as u32, new_rows as u32, pixel_type);

    let options = ResizeOptions::new().resize_alg(ResizeAlg::Convolution(FilterType::Box));
    let mut resizer = Resizer::new();
    resizer
        .resize(&src, &mut dst, &options)
        .map_err(|e| Error::processing("resize", e))?;

    let data = Array3::from_shape_vec((new_rows, new_cols, channels), dst.into_vec())
        .map_err(|e| Error::processing("resize", e))?;
    PixelImage::from_array(data)
}
