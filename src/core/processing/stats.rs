use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::types::{GrayImage, Histogram};

/// Descriptive statistics of an intensity buffer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImageStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    /// Population standard deviation
    pub std: f64,
    /// Exact order statistic; mean of the two middle values for even pixel counts
    pub median: f64,
    pub width: usize,
    pub height: usize,
}

/// Count of pixels at each intensity. The bins sum to `width * height`.
pub fn compute_histogram(gray: &GrayImage) -> Histogram {
    let mut hist: Histogram = [0; 256];
    for &v in gray.iter() {
        hist[v as usize] += 1;
    }
    hist
}

/// Value of the `k`-th smallest sample (0-based) read off the cumulative histogram.
fn order_statistic(hist: &Histogram, k: u64) -> u8 {
    let mut cumulative: u64 = 0;
    for (value, &count) in hist.iter().enumerate() {
        cumulative += count;
        if cumulative > k {
            return value as u8;
        }
    }
    255
}

/// Full-buffer statistics. An 8-bit buffer is summarized exactly through its histogram,
/// so no sample is skipped and the median is a true order statistic.
pub fn compute_stats(gray: &GrayImage) -> Result<ImageStats> {
    let (rows, cols) = gray.dim();
    if rows == 0 || cols == 0 {
        return Err(Error::invalid_image(format!(
            "cannot compute statistics of an empty {}x{} buffer",
            cols, rows
        )));
    }
    Ok(stats_from_histogram(&compute_histogram(gray), cols, rows))
}

/// Statistics from an already computed histogram of a `width` x `height` buffer.
pub fn stats_from_histogram(hist: &Histogram, width: usize, height: usize) -> ImageStats {
    let count: u64 = hist.iter().sum();
    if count == 0 {
        return ImageStats {
            min: 0.0,
            max: 0.0,
            mean: 0.0,
            std: 0.0,
            median: 0.0,
            width,
            height,
        };
    }

    let min = hist.iter().position(|&h| h > 0).unwrap_or(0) as f64;
    let max = hist.iter().rposition(|&h| h > 0).unwrap_or(255) as f64;

    let sum: u64 = hist
        .iter()
        .enumerate()
        .map(|(v, &h)| v as u64 * h)
        .sum();
    let mean = sum as f64 / count as f64;

    let sq_dev: f64 = hist
        .iter()
        .enumerate()
        .filter(|(_, h)| **h > 0)
        .map(|(v, &h)| {
            let d = v as f64 - mean;
            d * d * h as f64
        })
        .sum();
    let std = (sq_dev / count as f64).sqrt();

    let median = if count % 2 == 1 {
        order_statistic(hist, count / 2) as f64
    } else {
        let lo = order_statistic(hist, count / 2 - 1) as f64;
        let hi = order_statistic(hist, count / 2) as f64;
        (lo + hi) / 2.0
    };

    debug!(
        "Image stats: {}x{}, min={}, max={}, mean={:.2}, std={:.2}, median={}",
        width, height, min, max, mean, std, median
    );

    ImageStats {
        min,
        max,
        mean,
        std,
        median,
        width,
        height,
    }
}
