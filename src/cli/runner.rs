use std::fs;
use std::path::Path;

use tracing::info;
use tracing_subscriber::EnvFilter;

use radiochrome::api::{process_directory_to_path, process_file_to_path, save_legend};
use radiochrome::core::processing::schemes::registered_schemes;
use radiochrome::{EnhanceParams, HistoryEntry, HistoryLog};

use super::args::CliArgs;
use super::errors::AppError;

fn build_params(args: &CliArgs) -> Result<EnhanceParams, Box<dyn std::error::Error>> {
    let mut params = match &args.config {
        Some(path) => {
            info!("Loading parameters from {:?}", path);
            EnhanceParams::from_json(&fs::read_to_string(path)?)?
        }
        None => EnhanceParams::default(),
    };

    if let Some(scheme) = &args.scheme {
        params.color_scheme = scheme.clone();
    }
    if let Some(clahe) = args.clahe {
        params.apply_adaptive_equalization = clahe;
    }
    if let Some(contrast) = args.contrast {
        params.contrast_gain = contrast;
    }
    if let Some(brightness) = args.brightness {
        params.brightness_offset = brightness;
    }
    if let Some(size) = args.max_size {
        if size == 0 {
            return Err(AppError::ZeroSize { size }.into());
        }
        params.max_size = Some(size);
    }

    params.validate()?;
    Ok(params)
}

fn list_schemes() {
    for scheme in registered_schemes() {
        println!("{}", scheme.name);
        for band in scheme.bands.iter() {
            println!(
                "  {:>3}..{:<3} {:<18} BGR({}, {}, {})",
                band.lo, band.hi, band.label, band.color[0], band.color[1], band.color[2]
            );
        }
    }
}

fn record_history(path: &Path, entries: Vec<HistoryEntry>) -> Result<(), Box<dyn std::error::Error>> {
    let mut log = HistoryLog::load(path)?;
    log.extend_batch(entries);
    log.save(path)?;
    Ok(())
}

fn run_batch(
    args: &CliArgs,
    params: &EnhanceParams,
) -> Result<Vec<HistoryEntry>, Box<dyn std::error::Error>> {
    let input_dir = args.input_dir.as_ref().ok_or(AppError::MissingArgument {
        arg: "--input-dir".to_string(),
    })?;
    let output_dir = args.output_dir.as_ref().ok_or(AppError::MissingArgument {
        arg: "--output-dir".to_string(),
    })?;

    let report = process_directory_to_path(
        input_dir,
        output_dir,
        params,
        args.format,
        args.sidecar,
        args.batch,
    )?;

    info!("Batch processing complete!");
    info!("Processed: {}", report.processed);
    info!("Skipped: {}", report.skipped);
    info!("Errors: {}", report.errors);

    Ok(report.entries)
}

fn run_single(
    args: &CliArgs,
    params: &EnhanceParams,
) -> Result<HistoryEntry, Box<dyn std::error::Error>> {
    let input = args.input.as_ref().ok_or(AppError::MissingArgument {
        arg: "--input".to_string(),
    })?;
    let output = args.output.as_ref().ok_or(AppError::MissingArgument {
        arg: "--output".to_string(),
    })?;

    let entry = process_file_to_path(input, output, params, args.format, args.sidecar)?;
    info!("Successfully processed: {:?} -> {:?}", input, output);
    Ok(entry)
}

pub fn run(args: CliArgs) -> Result<(), Box<dyn std::error::Error>> {
    if args.log {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
            )
            .init();
    }

    if args.list_schemes {
        list_schemes();
        return Ok(());
    }

    let params = build_params(&args)?;

    if let Some(legend_path) = &args.legend {
        save_legend(&params.color_scheme, legend_path, args.format)?;
        info!("Legend for {:?} written to {:?}", params.color_scheme, legend_path);
    }

    let batch_mode = args.batch || args.input_dir.is_some();
    let entries = if batch_mode {
        run_batch(&args, &params)?
    } else if args.input.is_some() || args.output.is_some() {
        vec![run_single(&args, &params)?]
    } else if args.legend.is_some() {
        return Ok(());
    } else {
        return Err(AppError::NothingToDo.into());
    };

    if let Some(history_path) = &args.history {
        record_history(history_path, entries)?;
    }

    Ok(())
}
