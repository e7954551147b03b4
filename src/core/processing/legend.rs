use ndarray::{Array3, s};
use tracing::debug;

use crate::core::processing::schemes::{ColorScheme, resolve_scheme};
use crate::types::ColorImage;

pub const LEGEND_HEIGHT: usize = 40;
pub const LEGEND_WIDTH: usize = 256;

/// Color key for a registry scheme; unknown names use the fallback scheme.
pub fn generate_legend(scheme_name: &str) -> ColorImage {
    generate_legend_for(resolve_scheme(scheme_name))
}

/// 40 x 256 strip where column `i` shows the color intensity `i` maps to.
/// Uncovered columns stay black; later bands override earlier ones.
pub fn generate_legend_for(scheme: &ColorScheme) -> ColorImage {
    let mut legend = Array3::<u8>::zeros((LEGEND_HEIGHT, LEGEND_WIDTH, 3));
    for band in scheme.bands.iter() {
        let span = band.span();
        if span.is_empty() {
            continue;
        }
        for (channel, &value) in band.color.iter().enumerate() {
            legend
                .slice_mut(s![.., span.start..span.end, channel])
                .fill(value);
        }
    }
    debug!("Legend generated for scheme {}", scheme.name);
    legend
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::processing::schemes::{Band, registered_schemes};

    #[test]
    fn legend_shape_is_fixed() {
        for scheme in registered_schemes() {
            assert_eq!(generate_legend(scheme.name).dim(), (40, 256, 3));
        }
        assert_eq!(generate_legend("no_such_scheme").dim(), (40, 256, 3));
    }

    #[test]
    fn columns_follow_bands_with_override() {
        let scheme = ColorScheme::new(
            "override",
            vec![
                Band::new("all", 0, 256, [0, 0, 255]),
                Band::new("window", 100, 150, [255, 0, 0]),
                Band::new("beyond", 250, 400, [1, 2, 3]),
            ],
        );
        let legend = generate_legend_for(&scheme);
        for row in [0, 39] {
            assert_eq!(legend[[row, 99, 2]], 255);
            assert_eq!(legend[[row, 100, 0]], 255);
            assert_eq!(legend[[row, 100, 2]], 0);
            assert_eq!(legend[[row, 150, 2]], 255);
            assert_eq!(
                [legend[[row, 255, 0]], legend[[row, 255, 1]], legend[[row, 255, 2]]],
                [1, 2, 3]
            );
        }
    }

    #[test]
    fn legend_matches_colorized_ramp() {
        use crate::core::processing::colorize::colorize;
        use ndarray::Array2;

        let ramp = Array2::from_shape_fn((1, 256), |(_, c)| c as u8);
        let colored = colorize(&ramp, "high_contrast").unwrap();
        let legend = generate_legend("high_contrast");
        assert_eq!(colored.slice(s![0, .., ..]), legend.slice(s![7, .., ..]));
    }
}
