//! Gray-level normalization: luma coercion, optional adaptive equalization and the
//! saturating contrast/brightness remap.
use ndarray::{Array2, Axis, Zip};
use tracing::debug;

use crate::core::image::PixelImage;
use crate::core::params::EqualizerConfig;
use crate::core::processing::equalize::cached_equalizer;
use crate::error::{Error, Result};
use crate::types::GrayImage;

// BT.601 luma weights in 14-bit fixed point; they sum to 1 << 14.
const LUMA_SHIFT: u32 = 14;
const LUMA_R: u32 = 4899;
const LUMA_G: u32 = 9617;
const LUMA_B: u32 = 1868;

#[inline]
fn luma(b: u8, g: u8, r: u8) -> u8 {
    let y = (r as u32) * LUMA_R + (g as u32) * LUMA_G + (b as u32) * LUMA_B;
    ((y + (1 << (LUMA_SHIFT - 1))) >> LUMA_SHIFT) as u8
}

/// Reduce an image to single-channel intensity. Gray input is copied as-is,
/// BGR input goes through the weighted luma conversion.
pub fn to_gray(image: &PixelImage) -> Result<GrayImage> {
    let view = image.view();
    match image.channels() {
        1 => Ok(view.index_axis(Axis(2), 0).to_owned()),
        3 => {
            let mut gray = Array2::<u8>::zeros((image.height(), image.width()));
            Zip::from(&mut gray)
                .and(view.lanes(Axis(2)))
                .for_each(|g, px| *g = luma(px[0], px[1], px[2]));
            Ok(gray)
        }
        n => Err(Error::invalid_image(format!(
            "unsupported channel count {}",
            n
        ))),
    }
}

/// Lookup table for `clamp(round(v * gain + offset), 0, 255)`.
pub fn remap_lut(contrast_gain: f64, brightness_offset: i32) -> [u8; 256] {
    let mut lut = [0u8; 256];
    for (v, slot) in lut.iter_mut().enumerate() {
        let mapped = (v as f64 * contrast_gain + brightness_offset as f64).round();
        *slot = mapped.clamp(0.0, 255.0) as u8;
    }
    lut
}

/// Saturating affine remap applied in place. Only call on a buffer you own.
pub fn remap_in_place(gray: &mut GrayImage, contrast_gain: f64, brightness_offset: i32) {
    let lut = remap_lut(contrast_gain, brightness_offset);
    gray.par_mapv_inplace(|v| lut[v as usize]);
}

/// Saturating affine remap returning a new buffer.
pub fn remap(gray: &GrayImage, contrast_gain: f64, brightness_offset: i32) -> GrayImage {
    let mut out = gray.clone();
    remap_in_place(&mut out, contrast_gain, brightness_offset);
    out
}

/// Normalize with the default equalizer configuration (8x8 tiles, clip limit 2.0).
pub fn normalize(
    image: &PixelImage,
    apply_adaptive_equalization: bool,
    contrast_gain: f64,
    brightness_offset: i32,
) -> Result<GrayImage> {
    let equalizer = apply_adaptive_equalization.then(EqualizerConfig::default);
    normalize_with(image, equalizer, contrast_gain, brightness_offset)
}

/// Normalize: gray coercion, optional CLAHE with the given configuration, then the remap.
pub fn normalize_with(
    image: &PixelImage,
    equalizer: Option<EqualizerConfig>,
    contrast_gain: f64,
    brightness_offset: i32,
) -> Result<GrayImage> {
    if !contrast_gain.is_finite() {
        return Err(Error::InvalidArgument {
            arg: "contrast_gain",
            value: contrast_gain.to_string(),
        });
    }

    let mut gray = to_gray(image)?;

    if let Some(config) = equalizer {
        let clahe = cached_equalizer(config)?;
        gray = clahe.apply(&gray)?;
    }

    remap_in_place(&mut gray, contrast_gain, brightness_offset);

    debug!(
        "Normalized {}x{} image: equalized={}, gain={:.2}, offset={}",
        image.width(),
        image.height(),
        equalizer.is_some(),
        contrast_gain,
        brightness_offset
    );
    Ok(gray)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array3, array};

    #[test]
    fn luma_uses_weighted_channels() {
        // Pure red, green and blue in BGR order.
        let bgr = Array3::from_shape_vec(
            (1, 3, 3),
            vec![0, 0, 255, 0, 255, 0, 255, 0, 0],
        )
        .unwrap();
        let gray = to_gray(&PixelImage::from_bgr(bgr).unwrap()).unwrap();
        assert_eq!(gray, array![[76u8, 150, 29]]);
    }

    #[test]
    fn luma_preserves_neutral_gray() {
        for v in [0u8, 1, 127, 128, 254, 255] {
            assert_eq!(luma(v, v, v), v);
        }
    }

    #[test]
    fn remap_saturates_high() {
        let img = PixelImage::from_gray(array![[250u8]]).unwrap();
        let out = normalize(&img, false, 2.0, 50).unwrap();
        assert_eq!(out[[0, 0]], 255);
    }

    #[test]
    fn remap_saturates_low() {
        let img = PixelImage::from_gray(array![[10u8, 60]]).unwrap();
        let out = normalize(&img, false, 0.5, -50).unwrap();
        assert_eq!(out, array![[0u8, 0]]);
    }

    #[test]
    fn identity_remap_is_noop() {
        let gray = array![[0u8, 17, 128], [200, 254, 255]];
        assert_eq!(remap(&gray, 1.0, 0), gray);
    }

    #[test]
    fn remap_rounds() {
        let lut = remap_lut(1.5, 0);
        assert_eq!(lut[1], 2); // 1.5 rounds away from zero
        assert_eq!(lut[3], 5); // 4.5 rounds away from zero
        assert_eq!(lut[100], 150);
    }

    #[test]
    fn non_finite_gain_is_rejected() {
        let img = PixelImage::from_gray(array![[1u8]]).unwrap();
        let err = normalize(&img, false, f64::NAN, 0).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { .. }));
    }

    #[test]
    fn equalized_output_keeps_shape() {
        let gray = Array2::from_shape_fn((37, 53), |(r, c)| ((r * 3 + c) % 256) as u8);
        let img = PixelImage::from_gray(gray).unwrap();
        let out = normalize(&img, true, 1.0, 0).unwrap();
        assert_eq!(out.dim(), (37, 53));
    }
}
