use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::params::EnhanceParams;
use crate::core::processing::pipeline::PipelineOutput;
use crate::core::processing::stats::ImageStats;
use crate::error::Result;
use crate::types::ImageShape;

/// Contents of the JSON sidecar written next to an enhanced image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SidecarMetadata {
    pub source: String,
    /// Scheme actually applied, after fallback
    pub color_scheme: String,
    pub params: EnhanceParams,
    pub original_shape: ImageShape,
    pub enhanced_shape: ImageShape,
    pub stats: ImageStats,
    /// 256 bins of the normalized buffer
    pub histogram: Vec<u64>,
    /// RFC 3339, UTC
    pub generated_at: String,
}

impl SidecarMetadata {
    pub fn from_output(
        source: impl Into<String>,
        params: &EnhanceParams,
        original_shape: ImageShape,
        output: &PipelineOutput,
    ) -> Self {
        let (rows, cols, channels) = output.enhanced.dim();
        Self {
            source: source.into(),
            color_scheme: output.scheme.to_string(),
            params: params.clone(),
            original_shape,
            enhanced_shape: ImageShape::new(rows, cols, channels),
            stats: output.stats,
            histogram: output.histogram.to_vec(),
            generated_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Sidecar location for an output image: same stem, `.json` extension.
pub fn sidecar_path(output_path: &Path) -> PathBuf {
    output_path.with_extension("json")
}

/// Write `meta` as pretty JSON beside `output_path`, returning the sidecar path.
pub fn write_stats_sidecar(output_path: &Path, meta: &SidecarMetadata) -> Result<PathBuf> {
    let path = sidecar_path(output_path);
    let json_string = serde_json::to_string_pretty(meta)?;
    std::fs::write(&path, json_string)?;
    info!("Created metadata sidecar: {:?}", path);
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::image::PixelImage;
    use crate::core::processing::pipeline::run_pipeline;
    use ndarray::Array2;

    #[test]
    fn sidecar_lands_beside_output() {
        assert_eq!(
            sidecar_path(Path::new("/out/enhanced_scan.jpg")),
            PathBuf::from("/out/enhanced_scan.json")
        );
    }

    #[test]
    fn written_sidecar_reads_back() {
        let img = PixelImage::from_gray(Array2::from_shape_fn((6, 9), |(r, c)| (r * 30 + c) as u8))
            .unwrap();
        let params = EnhanceParams::default();
        let out = run_pipeline(&img, &params).unwrap();
        let meta = SidecarMetadata::from_output("scan.png", &params, img.shape(), &out);

        let dir = tempfile::tempdir().unwrap();
        let path = write_stats_sidecar(&dir.path().join("enhanced_scan.png"), &meta).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();

        assert_eq!(value["source"], "scan.png");
        assert_eq!(value["color_scheme"], "standard");
        assert_eq!(value["histogram"].as_array().unwrap().len(), 256);
        assert_eq!(value["enhanced_shape"]["channels"], 3);
        assert_eq!(value["stats"]["width"], 9);
    }
}
