use clap::Parser;
use std::path::PathBuf;

use radiochrome::types::OutputFormat;

#[derive(Parser)]
#[command(
    name = "radiochrome",
    version,
    about = "Band pseudocolor enhancement for radiographic images"
)]
pub struct CliArgs {
    /// Input image (single file mode)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Input directory containing images (batch mode)
    #[arg(long)]
    pub input_dir: Option<PathBuf>,

    /// Output filename (single file mode)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output directory for batch processing (batch mode)
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Output format (jpeg, tiff or png)
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::JPEG)]
    pub format: OutputFormat,

    /// Color scheme name; unknown names fall back to "standard"
    #[arg(short, long)]
    pub scheme: Option<String>,

    /// Adaptive histogram equalization (CLAHE) before colorizing [default: true]
    #[arg(long)]
    pub clahe: Option<bool>,

    /// Contrast gain, 0.5 to 2.0 [default: 1.0]
    #[arg(long)]
    pub contrast: Option<f64>,

    /// Brightness offset, -50 to 50 [default: 0]
    #[arg(long, allow_hyphen_values = true)]
    pub brightness: Option<i32>,

    /// Downscale so neither side exceeds this many pixels
    #[arg(long)]
    pub max_size: Option<usize>,

    /// JSON file with enhancement parameters; explicit flags override its values
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Write the color legend of the selected scheme to this path
    #[arg(long)]
    pub legend: Option<PathBuf>,

    /// JSON history file to append processed images to (created if missing)
    #[arg(long)]
    pub history: Option<PathBuf>,

    /// Write a JSON sidecar with parameters, statistics and histogram next to each output
    #[arg(long, default_value_t = false)]
    pub sidecar: bool,

    /// Batch mode: continue processing other files when one fails
    #[arg(long, default_value_t = false)]
    pub batch: bool,

    /// Enable logging
    #[arg(long, default_value_t = false)]
    pub log: bool,

    /// Print the registered color schemes and exit
    #[arg(long, default_value_t = false)]
    pub list_schemes: bool,
}
