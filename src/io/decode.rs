use std::fs;
use std::io::Cursor;
use std::path::Path;

use image::{DynamicImage, ImageError, ImageReader, Limits};
use tracing::debug;

use crate::core::image::{MAX_PIXELS, PixelImage, check_buffer_size};
use crate::error::{Error, Result};

/// File extensions accepted for decoding, lower-case.
pub const ALLOWED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "tif", "tiff"];

/// Whether `path` carries one of [`ALLOWED_EXTENSIONS`] (case-insensitive).
pub fn has_allowed_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| {
            let e = e.to_ascii_lowercase();
            ALLOWED_EXTENSIONS.contains(&e.as_str())
        })
        .unwrap_or(false)
}

fn decode_limits() -> Limits {
    let mut limits = Limits::default();
    limits.max_image_width = Some(1 << 16);
    limits.max_image_height = Some(1 << 16);
    // Worst case is 16-bit RGBA straight out of the decoder
    limits.max_alloc = Some(MAX_PIXELS as u64 * 8);
    limits
}

fn map_decode_error(e: ImageError) -> Error {
    match e {
        ImageError::Limits(limit) => Error::ResourceExhausted {
            detail: limit.to_string(),
        },
        other => Error::Decode(other),
    }
}

/// Decode an encoded image into a pipeline buffer.
///
/// Gray sources (8 or 16 bit) become 1 channel; color sources become 3-channel BGR with any
/// alpha dropped.
pub fn decode_image(bytes: &[u8]) -> Result<PixelImage> {
    let mut reader = ImageReader::new(Cursor::new(bytes)).with_guessed_format()?;
    reader.limits(decode_limits());
    let decoded = reader.decode().map_err(map_decode_error)?;

    let (width, height) = (decoded.width() as usize, decoded.height() as usize);
    let channels = if decoded.color().has_color() { 3 } else { 1 };
    check_buffer_size(height, width, channels)?;
    debug!(
        "Decoded {}x{} {:?} image ({} channel output)",
        width,
        height,
        decoded.color(),
        channels
    );

    if channels == 1 {
        let gray = decoded.into_luma8();
        PixelImage::from_raw(width, height, 1, gray.into_raw())
    } else {
        PixelImage::from_raw(width, height, 3, rgb_to_bgr(decoded))
    }
}

fn rgb_to_bgr(decoded: DynamicImage) -> Vec<u8> {
    let mut data = decoded.into_rgb8().into_raw();
    for px in data.chunks_exact_mut(3) {
        px.swap(0, 2);
    }
    data
}

/// Read and decode an image file.
pub fn read_image(path: &Path) -> Result<PixelImage> {
    let bytes = fs::read(path)?;
    decode_image(&bytes)
}
