//! Encoders for enhanced images (JPEG, TIFF, PNG) and the JSON statistics sidecar.
pub mod jpeg;
pub mod metadata;
pub mod png;
pub mod tiff;

use std::path::Path;

use tracing::info;

use crate::core::processing::interchange::InterchangeImage;
use crate::error::Result;
use crate::types::OutputFormat;

/// Write an RGB image in the requested format.
pub fn write_output(output: &Path, image: &InterchangeImage, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::JPEG => jpeg::write_rgb_jpeg(output, image)?,
        OutputFormat::TIFF => tiff::write_rgb_tiff(output, image)?,
        OutputFormat::PNG => png::write_rgb_png(output, image)?,
    }
    info!(
        "Wrote {} {}x{} to {:?}",
        format,
        image.width(),
        image.height(),
        output
    );
    Ok(())
}
