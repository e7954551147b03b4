use tracing::{debug, info};

use crate::core::image::PixelImage;
use crate::core::params::EnhanceParams;
use crate::core::processing::colorize::colorize_with_scheme;
use crate::core::processing::grayscale::normalize_with;
use crate::core::processing::legend::generate_legend_for;
use crate::core::processing::resize::fit_within;
use crate::core::processing::schemes::resolve_scheme;
use crate::core::processing::stats::{ImageStats, compute_histogram, stats_from_histogram};
use crate::error::Result;
use crate::types::{ColorImage, GrayImage, Histogram};

/// Everything one enhancement run produces.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// Equalized and remapped intensity buffer the pseudocolor was derived from
    pub normalized: GrayImage,
    /// Band pseudocolor in native BGR order
    pub enhanced: ColorImage,
    /// Statistics of `normalized`
    pub stats: ImageStats,
    /// Histogram of `normalized`
    pub histogram: Histogram,
    /// Color key for the applied scheme
    pub legend: ColorImage,
    /// Name of the scheme actually applied, after fallback
    pub scheme: &'static str,
}

/// Full run: optional downscale, normalize, pseudocolor, then statistics and legend.
///
/// Statistics and the histogram describe the normalized buffer, so they match what the
/// pseudocolor bands were applied to.
pub fn run_pipeline(image: &PixelImage, params: &EnhanceParams) -> Result<PipelineOutput> {
    params.validate()?;

    let resized;
    let source = match params.max_size {
        Some(max_side) => {
            resized = fit_within(image, max_side)?;
            &resized
        }
        None => image,
    };

    info!(
        "Enhancing {} image (scheme={}, equalize={}, gain={:.2}, offset={})",
        source.shape(),
        params.color_scheme,
        params.apply_adaptive_equalization,
        params.contrast_gain,
        params.brightness_offset
    );

    let normalized = normalize_with(
        source,
        params.equalizer(),
        params.contrast_gain,
        params.brightness_offset,
    )?;

    let scheme = resolve_scheme(&params.color_scheme);
    let enhanced = colorize_with_scheme(&normalized, scheme)?;

    let (rows, cols) = normalized.dim();
    let histogram = compute_histogram(&normalized);
    let stats = stats_from_histogram(&histogram, cols, rows);
    let legend = generate_legend_for(scheme);

    debug!(
        "Pipeline complete: {}x{}, scheme={}, mean={:.2}",
        cols, rows, scheme.name, stats.mean
    );

    Ok(PipelineOutput {
        normalized,
        enhanced,
        stats,
        histogram,
        legend,
        scheme: scheme.name,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use ndarray::Array2;

    fn gradient(rows: usize, cols: usize) -> PixelImage {
        PixelImage::from_gray(Array2::from_shape_fn((rows, cols), |(r, c)| {
            ((r * 3 + c * 5) % 256) as u8
        }))
        .unwrap()
    }

    #[test]
    fn outputs_share_dimensions() {
        let out = run_pipeline(&gradient(24, 40), &EnhanceParams::default()).unwrap();
        assert_eq!(out.normalized.dim(), (24, 40));
        assert_eq!(out.enhanced.dim(), (24, 40, 3));
        assert_eq!(out.legend.dim(), (40, 256, 3));
        assert_eq!((out.stats.width, out.stats.height), (40, 24));
        assert_eq!(out.histogram.iter().sum::<u64>(), 24 * 40);
        assert_eq!(out.scheme, "standard");
    }

    #[test]
    fn unknown_scheme_reports_fallback_name() {
        let params = EnhanceParams {
            color_scheme: "does_not_exist".into(),
            ..Default::default()
        };
        let out = run_pipeline(&gradient(8, 8), &params).unwrap();
        assert_eq!(out.scheme, "standard");
    }

    #[test]
    fn max_size_downscales_before_processing() {
        let params = EnhanceParams {
            max_size: Some(10),
            ..Default::default()
        };
        let out = run_pipeline(&gradient(20, 40), &params).unwrap();
        assert_eq!(out.normalized.dim(), (5, 10));
        assert_eq!(out.enhanced.dim(), (5, 10, 3));
    }

    #[test]
    fn invalid_params_are_rejected_before_work() {
        let params = EnhanceParams {
            contrast_gain: 9.0,
            ..Default::default()
        };
        assert!(matches!(
            run_pipeline(&gradient(4, 4), &params),
            Err(Error::InvalidArgument { .. })
        ));
    }
}
