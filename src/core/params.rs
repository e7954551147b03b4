use serde::{Deserialize, Serialize};

use crate::core::processing::schemes::FALLBACK_SCHEME;
use crate::error::{Error, Result};

pub const CONTRAST_GAIN_RANGE: (f64, f64) = (0.5, 2.0);
pub const BRIGHTNESS_OFFSET_RANGE: (i32, i32) = (-50, 50);

/// Shape of the adaptive equalization step. This pair is also the equalizer cache key.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EqualizerConfig {
    pub clip_limit: f64,
    /// Tile grid as (tiles_x, tiles_y)
    pub tile_grid: (usize, usize),
}

impl Default for EqualizerConfig {
    fn default() -> Self {
        Self {
            clip_limit: 2.0,
            tile_grid: (8, 8),
        }
    }
}

impl EqualizerConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.clip_limit.is_finite() || self.clip_limit <= 0.0 {
            return Err(Error::InvalidArgument {
                arg: "clip_limit",
                value: self.clip_limit.to_string(),
            });
        }
        if self.tile_grid.0 == 0 || self.tile_grid.1 == 0 {
            return Err(Error::InvalidArgument {
                arg: "tile_grid",
                value: format!("{}x{}", self.tile_grid.0, self.tile_grid.1),
            });
        }
        Ok(())
    }
}

/// Enhancement parameters suitable for config files and CLI presets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnhanceParams {
    pub apply_adaptive_equalization: bool,
    /// Linear gain, 0.5..=2.0
    pub contrast_gain: f64,
    /// Additive offset, -50..=50
    pub brightness_offset: i32,
    /// Registry name; unknown names fall back to "standard"
    pub color_scheme: String,
    pub equalizer: EqualizerConfig,
    /// Downscale the source so neither side exceeds this; None keeps the original size
    pub max_size: Option<usize>,
}

impl Default for EnhanceParams {
    fn default() -> Self {
        Self {
            apply_adaptive_equalization: true,
            contrast_gain: 1.0,
            brightness_offset: 0,
            color_scheme: FALLBACK_SCHEME.to_string(),
            equalizer: EqualizerConfig::default(),
            max_size: None,
        }
    }
}

impl EnhanceParams {
    pub fn validate(&self) -> Result<()> {
        let (lo, hi) = CONTRAST_GAIN_RANGE;
        if !(lo..=hi).contains(&self.contrast_gain) {
            return Err(Error::InvalidArgument {
                arg: "contrast_gain",
                value: self.contrast_gain.to_string(),
            });
        }
        let (lo, hi) = BRIGHTNESS_OFFSET_RANGE;
        if !(lo..=hi).contains(&self.brightness_offset) {
            return Err(Error::InvalidArgument {
                arg: "brightness_offset",
                value: self.brightness_offset.to_string(),
            });
        }
        if self.max_size == Some(0) {
            return Err(Error::InvalidArgument {
                arg: "max_size",
                value: "0".to_string(),
            });
        }
        self.equalizer.validate()
    }

    /// Equalizer configuration when adaptive equalization is enabled.
    pub fn equalizer(&self) -> Option<EqualizerConfig> {
        self.apply_adaptive_equalization.then_some(self.equalizer)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let params: Self = serde_json::from_str(json)?;
        params.validate()?;
        Ok(params)
    }
}
