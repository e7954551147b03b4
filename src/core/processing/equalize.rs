use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use ndarray::Array2;
use once_cell::sync::Lazy;
use tracing::debug;

use crate::core::params::EqualizerConfig;
use crate::error::{Error, Result};
use crate::types::GrayImage;

const NUM_BINS: usize = 256;

/// Contrast Limited Adaptive Histogram Equalization over 8-bit intensity.
/// - Splits the image into `tiles_x` x `tiles_y` near-equal tiles (fewer only along an
///   axis shorter than the grid)
/// - Builds a 256-bin histogram per tile and clips it at `clip_limit` times the
///   average bin count, redistributing the excess
/// - Turns each clipped histogram into a 0..255 lookup table
/// - Bilinearly interpolates the four neighbouring tile tables at every pixel
///
/// Holds configuration only; `apply` takes `&self`, so one instance can be shared freely.
#[derive(Debug, Clone, PartialEq)]
pub struct Clahe {
    clip_limit: f64,
    tiles_x: usize,
    tiles_y: usize,
}

impl Clahe {
    pub fn new(config: EqualizerConfig) -> Result<Self> {
        config.validate()?;
        let (tiles_x, tiles_y) = config.tile_grid;
        Ok(Self {
            clip_limit: config.clip_limit,
            tiles_x,
            tiles_y,
        })
    }

    pub fn clip_limit(&self) -> f64 {
        self.clip_limit
    }

    pub fn tile_grid(&self) -> (usize, usize) {
        (self.tiles_x, self.tiles_y)
    }

    /// Grid actually used on a `rows` x `cols` image: the configured one, reduced only
    /// along an axis that has fewer pixels than tiles.
    pub fn effective_grid(&self, rows: usize, cols: usize) -> (usize, usize) {
        (self.tiles_x.min(cols), self.tiles_y.min(rows))
    }

    pub fn apply(&self, src: &GrayImage) -> Result<GrayImage> {
        let (rows, cols) = src.dim();
        if rows == 0 || cols == 0 {
            return Err(Error::invalid_image("cannot equalize an empty image"));
        }

        let (tiles_x, tiles_y) = self.effective_grid(rows, cols);

        let mut luts: Vec<[u8; NUM_BINS]> = Vec::with_capacity(tiles_x * tiles_y);
        for ty in 0..tiles_y {
            let (r0, r1) = tile_span(ty, tiles_y, rows);
            for tx in 0..tiles_x {
                let (c0, c1) = tile_span(tx, tiles_x, cols);

                let mut hist = [0u32; NUM_BINS];
                for r in r0..r1 {
                    for c in c0..c1 {
                        hist[src[(r, c)] as usize] += 1;
                    }
                }
                let tile_pixels = ((r1 - r0) * (c1 - c0)) as u32;
                self.clip_histogram(&mut hist, tile_pixels);
                luts.push(histogram_lut(&hist, tile_pixels));
            }
        }

        // Tiles differ by at most one pixel; anchors sit at the mean tile size.
        let inv_th = tiles_y as f64 / rows as f64;
        let inv_tw = tiles_x as f64 / cols as f64;

        // Column interpolation weights do not depend on the row.
        let col_weights: Vec<(usize, usize, f64)> = (0..cols)
            .map(|c| {
                let txf = c as f64 * inv_tw - 0.5;
                let tx1 = txf.floor();
                let xa = txf - tx1;
                let tx1 = tx1 as isize;
                (
                    clamp_tile(tx1, tiles_x),
                    clamp_tile(tx1 + 1, tiles_x),
                    xa,
                )
            })
            .collect();

        let mut out = Array2::<u8>::zeros((rows, cols));
        for r in 0..rows {
            let tyf = r as f64 * inv_th - 0.5;
            let ty1 = tyf.floor();
            let ya = tyf - ty1;
            let ty1 = ty1 as isize;
            let (ty1, ty2) = (clamp_tile(ty1, tiles_y), clamp_tile(ty1 + 1, tiles_y));

            for c in 0..cols {
                let (tx1, tx2, xa) = col_weights[c];
                let v = src[(r, c)] as usize;

                let l11 = luts[ty1 * tiles_x + tx1][v] as f64;
                let l12 = luts[ty1 * tiles_x + tx2][v] as f64;
                let l21 = luts[ty2 * tiles_x + tx1][v] as f64;
                let l22 = luts[ty2 * tiles_x + tx2][v] as f64;

                let top = l11 * (1.0 - xa) + l12 * xa;
                let bottom = l21 * (1.0 - xa) + l22 * xa;
                let value = top * (1.0 - ya) + bottom * ya;
                out[(r, c)] = value.round().clamp(0.0, 255.0) as u8;
            }
        }

        Ok(out)
    }

    /// Clip at `max(floor(clip_limit * average bin count), 1)` and redistribute the excess:
    /// whole batches go to every bin, the residual is spread with a fixed stride.
    fn clip_histogram(&self, hist: &mut [u32; NUM_BINS], tile_pixels: u32) {
        let clip = ((self.clip_limit * tile_pixels as f64 / NUM_BINS as f64) as u32).max(1);

        let mut excess: u32 = 0;
        for h in hist.iter_mut() {
            if *h > clip {
                excess += *h - clip;
                *h = clip;
            }
        }

        let batch = excess / NUM_BINS as u32;
        let mut residual = (excess % NUM_BINS as u32) as usize;
        for h in hist.iter_mut() {
            *h += batch;
        }
        if residual > 0 {
            let step = (NUM_BINS / residual).max(1);
            let mut b = 0;
            while b < NUM_BINS && residual > 0 {
                hist[b] += 1;
                b += step;
                residual -= 1;
            }
        }
    }
}

/// Half-open pixel range of tile `index` when `len` pixels are split into `tiles` parts.
#[inline]
fn tile_span(index: usize, tiles: usize, len: usize) -> (usize, usize) {
    (index * len / tiles, (index + 1) * len / tiles)
}

#[inline]
fn clamp_tile(index: isize, tiles: usize) -> usize {
    index.clamp(0, tiles as isize - 1) as usize
}

fn histogram_lut(hist: &[u32; NUM_BINS], tile_pixels: u32) -> [u8; NUM_BINS] {
    let scale = 255.0 / tile_pixels.max(1) as f64;
    let mut lut = [0u8; NUM_BINS];
    let mut acc: u64 = 0;
    for (i, &h) in hist.iter().enumerate() {
        acc += h as u64;
        lut[i] = (acc as f64 * scale).round().clamp(0.0, 255.0) as u8;
    }
    lut
}

/// Cache key: clip limit by bit pattern plus the tile grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct EqualizerKey {
    clip_bits: u64,
    tile_grid: (usize, usize),
}

impl From<EqualizerConfig> for EqualizerKey {
    fn from(config: EqualizerConfig) -> Self {
        Self {
            clip_bits: config.clip_limit.to_bits(),
            tile_grid: config.tile_grid,
        }
    }
}

static EQUALIZER_CACHE: Lazy<RwLock<HashMap<EqualizerKey, Arc<Clahe>>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// Fetch (or build and memoize) the equalizer for `config`.
///
/// Entries are immutable, so a poisoned lock is recovered rather than propagated. Two
/// callers racing on a miss may both construct; the first insert wins.
pub fn cached_equalizer(config: EqualizerConfig) -> Result<Arc<Clahe>> {
    let key = EqualizerKey::from(config);
    {
        let cache = EQUALIZER_CACHE
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(clahe) = cache.get(&key) {
            return Ok(Arc::clone(clahe));
        }
    }

    let built = Arc::new(Clahe::new(config)?);
    let mut cache = EQUALIZER_CACHE
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    let entry = cache.entry(key).or_insert_with(|| {
        debug!(
            "Cached equalizer: clip_limit={}, tile_grid={:?}",
            config.clip_limit, config.tile_grid
        );
        built
    });
    Ok(Arc::clone(entry))
}
