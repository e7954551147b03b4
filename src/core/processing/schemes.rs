//! Static color-scheme registry.
//!
//! A scheme is an ordered list of half-open intensity bands `[lo, hi)`, each bound to a
//! color in native BGR order. Bands may overlap or leave gaps: later bands win where they
//! intersect, and uncovered intensities render black.
//!
//! Lookup by an unknown name is NOT an error. [`resolve_scheme`] maps it to
//! [`FALLBACK_SCHEME`] so that stale selections from a UI keep working. This is the only
//! place that fallback is applied.
use std::borrow::Cow;

use serde::Serialize;
use tracing::debug;

use crate::types::Bgr;

/// Scheme used when a requested name is not registered.
pub const FALLBACK_SCHEME: &str = "standard";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Band {
    pub label: &'static str,
    /// Inclusive lower bound
    pub lo: u16,
    /// Exclusive upper bound; 256 covers the top intensity
    pub hi: u16,
    pub color: Bgr,
}

impl Band {
    pub const fn new(label: &'static str, lo: u16, hi: u16, color: Bgr) -> Self {
        Self {
            label,
            lo,
            hi,
            color,
        }
    }

    #[inline]
    pub fn contains(&self, value: u8) -> bool {
        let v = value as u16;
        self.lo <= v && v < self.hi
    }

    /// Columns/intensities covered, clamped to `0..256`.
    pub fn span(&self) -> std::ops::Range<usize> {
        let lo = (self.lo as usize).min(256);
        let hi = (self.hi as usize).min(256);
        lo..hi.max(lo)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColorScheme {
    pub name: &'static str,
    pub bands: Cow<'static, [Band]>,
}

impl ColorScheme {
    pub fn new(name: &'static str, bands: Vec<Band>) -> Self {
        Self {
            name,
            bands: Cow::Owned(bands),
        }
    }

    /// Intensity -> color table with bands folded in declaration order.
    /// Intensities outside every band stay black.
    pub fn lookup_table(&self) -> [Bgr; 256] {
        let mut lut = [[0u8; 3]; 256];
        for band in self.bands.iter() {
            for slot in &mut lut[band.span()] {
                *slot = band.color;
            }
        }
        lut
    }

    /// True when the bands are pairwise disjoint and cover every intensity.
    pub fn is_partition(&self) -> bool {
        let mut covered = [0u8; 256];
        for band in self.bands.iter() {
            for c in &mut covered[band.span()] {
                *c += 1;
            }
        }
        covered.iter().all(|&c| c == 1)
    }
}

const STANDARD_BANDS: &[Band] = &[
    Band::new("air", 0, 40, [128, 0, 0]),
    Band::new("lung", 40, 80, [255, 0, 0]),
    Band::new("soft tissue low", 80, 120, [255, 255, 0]),
    Band::new("soft tissue high", 120, 160, [0, 255, 0]),
    Band::new("dense tissue", 160, 200, [0, 255, 255]),
    Band::new("bone", 200, 256, [0, 0, 255]),
];

const HIGH_CONTRAST_BANDS: &[Band] = &[
    Band::new("background", 0, 64, [0, 0, 0]),
    Band::new("low", 64, 128, [255, 0, 255]),
    Band::new("mid", 128, 192, [0, 255, 255]),
    Band::new("high", 192, 256, [255, 255, 255]),
];

const SOFT_BANDS: &[Band] = &[
    Band::new("darkest", 0, 51, [112, 64, 48]),
    Band::new("dark", 51, 102, [200, 160, 120]),
    Band::new("middle", 102, 153, [170, 210, 160]),
    Band::new("light", 153, 204, [150, 220, 240]),
    Band::new("lightest", 204, 256, [170, 170, 240]),
];

static REGISTRY: [ColorScheme; 3] = [
    ColorScheme {
        name: "standard",
        bands: Cow::Borrowed(STANDARD_BANDS),
    },
    ColorScheme {
        name: "high_contrast",
        bands: Cow::Borrowed(HIGH_CONTRAST_BANDS),
    },
    ColorScheme {
        name: "soft",
        bands: Cow::Borrowed(SOFT_BANDS),
    },
];

pub fn registered_schemes() -> &'static [ColorScheme] {
    &REGISTRY
}

pub fn scheme_names() -> impl Iterator<Item = &'static str> {
    REGISTRY.iter().map(|s| s.name)
}

/// Exact lookup; `None` for unregistered names.
pub fn lookup_scheme(name: &str) -> Option<&'static ColorScheme> {
    REGISTRY.iter().find(|s| s.name == name)
}

/// Lookup with the fallback rule applied: unknown names resolve to [`FALLBACK_SCHEME`].
pub fn resolve_scheme(name: &str) -> &'static ColorScheme {
    match lookup_scheme(name) {
        Some(scheme) => scheme,
        None => {
            debug!(
                "Unknown color scheme {:?}, using fallback {:?}",
                name, FALLBACK_SCHEME
            );
            &REGISTRY[0]
        }
    }
}
