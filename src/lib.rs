#![doc = r#"
RADIOCHROME — gray-level band pseudocolor enhancement for radiographic images.

This crate turns gray (or color) radiographs into false-color images in which each
intensity band gets its own solid color, making subtle density differences easier to see.
A run normalizes the image (luma conversion, optional adaptive histogram equalization,
saturating contrast/brightness remap), maps it through a named color scheme, and reports
statistics, a 256-bin histogram and a color legend. It powers the RADIOCHROME CLI and can
be embedded in your own Rust applications.

Stability
---------
The public library API is experimental in initial releases and may evolve as the crate
stabilizes. Breaking changes can occur.

Pixel layout
------------
Buffers are `ndarray` arrays of `u8` shaped `(rows, cols)` or `(rows, cols, channels)`.
Color buffers use native BGR channel order; convert with
[`crate::core::processing::interchange::to_interchange`] before handing them to RGB consumers.

Quick start: process a file to disk
-----------------------------------
```rust,no_run
use std::path::Path;
use radiochrome::{process_file_to_path, EnhanceParams, OutputFormat};

fn main() -> radiochrome::Result<()> {
    let params = EnhanceParams {
        color_scheme: "high_contrast".to_string(),
        contrast_gain: 1.2,
        brightness_offset: -10,
        max_size: Some(2048),
        ..Default::default()
    };

    let entry = process_file_to_path(
        Path::new("/data/chest.png"),
        Path::new("/out/enhanced_chest.jpg"),
        &params,
        OutputFormat::JPEG,
        true, // write /out/enhanced_chest.json with stats and histogram
    )?;
    println!("{} -> {}", entry.filename, entry.enhanced_shape);
    Ok(())
}
```

Process in memory
-----------------
```rust
use ndarray::array;
use radiochrome::{process_image, EnhanceParams, PixelImage};

fn main() -> radiochrome::Result<()> {
    let image = PixelImage::from_gray(array![[0u8, 100], [150, 255]])?;
    let params = EnhanceParams {
        apply_adaptive_equalization: false,
        ..Default::default()
    };

    let out = process_image(&image, &params)?;
    assert_eq!(out.enhanced.dim(), (2, 2, 3));
    assert_eq!(out.histogram.iter().sum::<u64>(), 4);
    assert_eq!(out.scheme, "standard");
    Ok(())
}
```

Custom schemes
--------------
```rust
use ndarray::array;
use radiochrome::{colorize_with_scheme, Band, ColorScheme};

let scheme = ColorScheme::new(
    "two-tone",
    vec![
        Band::new("soft", 0, 128, [255, 0, 0]),
        Band::new("dense", 128, 256, [0, 0, 255]),
    ],
);
let colored = colorize_with_scheme(&array![[10u8, 200]], &scheme).unwrap();
assert_eq!(colored[[0, 1, 2]], 255);
```

Batch helpers
-------------
```rust,no_run
use std::path::Path;
use radiochrome::{process_directory_to_path, EnhanceParams, HistoryLog, OutputFormat};

fn main() -> radiochrome::Result<()> {
    let report = process_directory_to_path(
        Path::new("/data/scans"),
        Path::new("/out"),
        &EnhanceParams::default(),
        OutputFormat::PNG,
        false, // sidecar
        true,  // continue_on_error
    )?;

    println!("processed={} skipped={} errors={}", report.processed, report.skipped, report.errors);

    let mut history = HistoryLog::load(Path::new("/out/history.json"))?;
    history.extend_batch(report.entries);
    history.save(Path::new("/out/history.json"))
}
```

Error handling
--------------
All public functions return `radiochrome::Result<T>`; match on `radiochrome::Error` to
handle specific cases, or call [`Error::user_message`] for a message safe to show to users.
An unknown scheme name is not an error: it falls back to `"standard"`.

```rust,no_run
use radiochrome::{process_bytes, EnhanceParams, Error};

fn main() {
    let bytes = std::fs::read("/data/scan.png").unwrap_or_default();
    match process_bytes(&bytes, "scan.png", &EnhanceParams::default()) {
        Ok(img) => println!("mean={:.1}", img.output.stats.mean),
        Err(Error::ResourceExhausted { detail }) => eprintln!("too large: {detail}"),
        Err(other) => eprintln!("{}", other.user_message()),
    }
}
```

Useful modules
--------------
- [`api`] — high-level, ergonomic entry points.
- [`core`](crate::core) — pixel buffer, parameters, processing stages and history.
- [`io`] — decoding and JPEG/TIFF/PNG/sidecar writers.
- [`types`] — buffer aliases, `OutputFormat`, `ImageShape`.
- [`error`] — crate-level `Error` and `Result`.
"#]

// Core modules (public)
pub mod api;
pub mod core;
pub mod error;
pub mod io;
pub mod types;

// Curated public API surface
// Types
pub use crate::core::history::{HistoryEntry, HistoryLog};
pub use crate::core::image::{MAX_PIXELS, PixelImage};
pub use crate::core::params::{EnhanceParams, EqualizerConfig};
pub use error::{Error, Result};
pub use types::{Bgr, ColorImage, GrayImage, Histogram, ImageShape, OutputFormat};

// Processing stages
pub use crate::core::processing::colorize::{colorize, colorize_with_scheme};
pub use crate::core::processing::grayscale::{normalize, normalize_with};
pub use crate::core::processing::interchange::{InterchangeImage, color_to_interchange, to_interchange};
pub use crate::core::processing::legend::{generate_legend, generate_legend_for};
pub use crate::core::processing::pipeline::PipelineOutput;
pub use crate::core::processing::schemes::{
    Band, ColorScheme, FALLBACK_SCHEME, lookup_scheme, resolve_scheme, scheme_names,
};
pub use crate::core::processing::stats::{ImageStats, compute_histogram, compute_stats};

// Decoding and sidecars
pub use io::decode::{decode_image, read_image};
pub use io::writers::metadata::{SidecarMetadata, write_stats_sidecar};

// High-level API re-exports
pub use api::{
    BatchReport, ProcessedImage, process_bytes, process_directory_to_path, process_file_to_path,
    process_image, save_legend,
};
