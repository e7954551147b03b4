use ndarray::{Array3, Axis, Zip};
use tracing::debug;

use crate::core::processing::schemes::{ColorScheme, resolve_scheme};
use crate::error::{Error, Result};
use crate::types::{ColorImage, GrayImage};

/// Band pseudocolor by registry name. Unknown names use the fallback scheme.
pub fn colorize(gray: &GrayImage, scheme_name: &str) -> Result<ColorImage> {
    colorize_with_scheme(gray, resolve_scheme(scheme_name))
}

/// Band pseudocolor with an explicit scheme.
///
/// Every pixel with `lo <= v < hi` takes the band color; bands are applied in declaration
/// order so later bands win on overlap, and pixels outside every band stay black. The
/// bands are folded into a 256-entry table first, so the cost is one pass over the pixels
/// regardless of band count.
pub fn colorize_with_scheme(gray: &GrayImage, scheme: &ColorScheme) -> Result<ColorImage> {
    let (rows, cols) = gray.dim();
    if rows == 0 || cols == 0 {
        return Err(Error::Processing(format!(
            "pseudocolor needs a non-empty 2-D intensity buffer, got {}x{}",
            cols, rows
        )));
    }

    let lut = scheme.lookup_table();
    let mut out = Array3::<u8>::zeros((rows, cols, 3));
    Zip::from(out.lanes_mut(Axis(2)))
        .and(gray)
        .par_for_each(|mut px, &v| {
            let color = lut[v as usize];
            px[0] = color[0];
            px[1] = color[1];
            px[2] = color[2];
        });

    debug!(
        "Pseudocolor applied: {}x{}, scheme={}, bands={}",
        cols,
        rows,
        scheme.name,
        scheme.bands.len()
    );
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::processing::schemes::Band;
    use ndarray::{Array2, array};

    const RED: [u8; 3] = [0, 0, 255];
    const BLUE: [u8; 3] = [255, 0, 0];

    fn pixel(img: &ColorImage, r: usize, c: usize) -> [u8; 3] {
        [img[[r, c, 0]], img[[r, c, 1]], img[[r, c, 2]]]
    }

    fn ramp() -> GrayImage {
        Array2::from_shape_fn((16, 16), |(r, c)| (r * 16 + c) as u8)
    }

    #[test]
    fn later_band_overrides_earlier() {
        let scheme = ColorScheme::new(
            "override",
            vec![
                Band::new("all", 0, 256, RED),
                Band::new("window", 100, 150, BLUE),
            ],
        );
        let gray = ramp();
        let out = colorize_with_scheme(&gray, &scheme).unwrap();
        for ((r, c), &v) in gray.indexed_iter() {
            let expected = if (100..150).contains(&v) { BLUE } else { RED };
            assert_eq!(pixel(&out, r, c), expected, "intensity {}", v);
        }
    }

    #[test]
    fn unknown_scheme_matches_standard() {
        let gray = ramp();
        let fallback = colorize(&gray, "nonexistent_scheme").unwrap();
        let standard = colorize(&gray, "standard").unwrap();
        assert_eq!(fallback, standard);
    }

    #[test]
    fn uncovered_pixels_are_black() {
        let scheme = ColorScheme::new("narrow", vec![Band::new("mid", 10, 20, RED)]);
        let out = colorize_with_scheme(&array![[5u8, 15, 25]], &scheme).unwrap();
        assert_eq!(pixel(&out, 0, 0), [0, 0, 0]);
        assert_eq!(pixel(&out, 0, 1), RED);
        assert_eq!(pixel(&out, 0, 2), [0, 0, 0]);
    }

    #[test]
    fn output_keeps_dimensions() {
        let gray = Array2::from_elem((7, 11), 128u8);
        let out = colorize(&gray, "soft").unwrap();
        assert_eq!(out.dim(), (7, 11, 3));
    }

    #[test]
    fn empty_input_is_processing_error() {
        let gray = Array2::<u8>::zeros((0, 4));
        let err = colorize(&gray, "standard").unwrap_err();
        assert!(matches!(err, Error::Processing(_)));
    }
}
