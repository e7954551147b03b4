//! High-level, ergonomic library API: enhance decoded buffers or encoded bytes in memory,
//! process files and whole directories to disk, and save scheme legends. Prefer these
//! entrypoints over the low-level processing modules when integrating RADIOCHROME.
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::core::history::HistoryEntry;
use crate::core::image::PixelImage;
use crate::core::params::EnhanceParams;
use crate::core::processing::interchange::{InterchangeImage, color_to_interchange};
use crate::core::processing::legend::generate_legend;
use crate::core::processing::pipeline::{PipelineOutput, run_pipeline};
use crate::error::{Error, Result};
use crate::io::decode::{decode_image, has_allowed_extension, read_image};
use crate::io::writers::jpeg::encode_rgb_jpeg;
use crate::io::writers::metadata::{SidecarMetadata, write_stats_sidecar};
use crate::io::writers::write_output;
use crate::types::{ImageShape, OutputFormat};

/// Prefix given to every enhanced output file name.
pub const OUTPUT_PREFIX: &str = "enhanced_";

/// Result of in-memory processing
#[derive(Debug, Clone)]
pub struct ProcessedImage {
    pub filename: String,
    pub original_shape: ImageShape,
    pub output: PipelineOutput,
    /// Record suitable for a [`crate::HistoryLog`]
    pub entry: HistoryEntry,
}

impl ProcessedImage {
    /// Enhanced image in RGB order, ready for display or encoding.
    pub fn to_interchange(&self) -> InterchangeImage {
        color_to_interchange(&self.output.enhanced)
    }

    /// Enhanced image as JPEG bytes.
    pub fn encode_jpeg(&self) -> Result<Vec<u8>> {
        encode_rgb_jpeg(&self.to_interchange())
    }
}

fn history_entry(filename: &str, original: ImageShape, output: &PipelineOutput) -> HistoryEntry {
    let (rows, cols, channels) = output.enhanced.dim();
    HistoryEntry::new(
        filename,
        output.scheme,
        output.stats,
        original,
        ImageShape::new(rows, cols, channels),
    )
}

/// Run the enhancement pipeline on an already decoded buffer (no I/O).
pub fn process_image(image: &PixelImage, params: &EnhanceParams) -> Result<PipelineOutput> {
    run_pipeline(image, params)
}

/// Decode `bytes` and enhance them. `filename` is only used for the history record.
pub fn process_bytes(bytes: &[u8], filename: &str, params: &EnhanceParams) -> Result<ProcessedImage> {
    params.validate()?;
    let image = decode_image(bytes)?;
    let original_shape = image.shape();
    let output = run_pipeline(&image, params)?;
    let entry = history_entry(filename, original_shape, &output);
    Ok(ProcessedImage {
        filename: filename.to_string(),
        original_shape,
        output,
        entry,
    })
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

/// Process one image file to `output` in `format`. With `sidecar`, a JSON file with the
/// parameters, statistics and histogram is written next to it.
pub fn process_file_to_path(
    input: &Path,
    output: &Path,
    params: &EnhanceParams,
    format: OutputFormat,
    sidecar: bool,
) -> Result<HistoryEntry> {
    params.validate()?;
    info!("Processing {:?} -> {:?}", input, output);

    let image = read_image(input)?;
    let original_shape = image.shape();
    let result = run_pipeline(&image, params)?;

    write_output(output, &color_to_interchange(&result.enhanced), format)?;

    let label = file_label(input);
    if sidecar {
        let meta = SidecarMetadata::from_output(label.clone(), params, original_shape, &result);
        write_stats_sidecar(output, &meta)?;
    }

    Ok(history_entry(&label, original_shape, &result))
}

/// Batch processing report
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    pub processed: usize,
    pub skipped: usize,
    pub errors: usize,
    /// History records of the successfully processed files, in processing order
    pub entries: Vec<HistoryEntry>,
}

/// Regular files directly inside `input_dir`, sorted by name.
pub fn iterate_image_files(input_dir: &Path) -> Result<std::vec::IntoIter<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(input_dir)? {
        let path = entry?.path();
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files.into_iter())
}

/// Output path for `input` inside `output_dir`: `enhanced_<stem>.<ext>`.
pub fn batch_output_path(input: &Path, output_dir: &Path, format: OutputFormat) -> Result<PathBuf> {
    let stem = input
        .file_stem()
        .ok_or_else(|| Error::invalid_image(format!("no file name in {:?}", input)))?;
    Ok(output_dir.join(format!(
        "{}{}.{}",
        OUTPUT_PREFIX,
        stem.to_string_lossy(),
        format.extension()
    )))
}

/// Process every supported image directly inside `input_dir` into `output_dir`.
/// Files with other extensions are skipped. With `sidecar`, every output gets its JSON
/// statistics file. If `continue_on_error` is true, failures are counted in the report and
/// processing continues; otherwise the first error is returned.
pub fn process_directory_to_path(
    input_dir: &Path,
    output_dir: &Path,
    params: &EnhanceParams,
    format: OutputFormat,
    sidecar: bool,
    continue_on_error: bool,
) -> Result<BatchReport> {
    params.validate()?;
    std::fs::create_dir_all(output_dir)?;
    info!("Starting batch processing: {:?} -> {:?}", input_dir, output_dir);

    let mut report = BatchReport::default();

    for path in iterate_image_files(input_dir)? {
        if !has_allowed_extension(&path) {
            info!("Skipping unsupported file: {:?}", path);
            report.skipped += 1;
            continue;
        }

        let result = batch_output_path(&path, output_dir, format).and_then(|output_path| {
            process_file_to_path(&path, &output_path, params, format, sidecar)
        });

        match result {
            Ok(entry) => {
                report.processed += 1;
                report.entries.push(entry);
            }
            Err(e) => {
                report.errors += 1;
                warn!("Failed to process {:?}: {}", path, e);
                if !continue_on_error {
                    return Err(e);
                }
            }
        }
    }

    info!(
        "Batch complete: processed={} skipped={} errors={}",
        report.processed, report.skipped, report.errors
    );
    Ok(report)
}

/// Render the legend of `scheme_name` (with fallback) and write it in `format`.
pub fn save_legend(scheme_name: &str, output: &Path, format: OutputFormat) -> Result<()> {
    let legend = generate_legend(scheme_name);
    write_output(output, &color_to_interchange(&legend), format)
}
