//! Bounded, newest-first log of processed images.
//!
//! The log is an in-memory list persisted as a pretty JSON array. It never grows past
//! `max_entries`; the oldest records are dropped first.
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::processing::stats::ImageStats;
use crate::error::Result;
use crate::types::ImageShape;

pub const DEFAULT_MAX_ENTRIES: usize = 20;
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Summary of one processed image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Local time, `%Y-%m-%d %H:%M:%S`
    pub timestamp: String,
    pub filename: String,
    /// Scheme actually applied
    pub color_scheme: String,
    pub stats: ImageStats,
    pub original_shape: ImageShape,
    pub enhanced_shape: ImageShape,
}

impl HistoryEntry {
    /// New entry stamped with the current local time.
    pub fn new(
        filename: impl Into<String>,
        color_scheme: impl Into<String>,
        stats: ImageStats,
        original_shape: ImageShape,
        enhanced_shape: ImageShape,
    ) -> Self {
        Self {
            timestamp: chrono::Local::now().format(TIMESTAMP_FORMAT).to_string(),
            filename: filename.into(),
            color_scheme: color_scheme.into(),
            stats,
            original_shape,
            enhanced_shape,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HistoryLog {
    entries: Vec<HistoryEntry>,
    max_entries: usize,
}

impl Default for HistoryLog {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ENTRIES)
    }
}

impl HistoryLog {
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: Vec::new(),
            max_entries,
        }
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    /// Insert at the front, dropping the oldest entries past the limit.
    pub fn add(&mut self, entry: HistoryEntry) {
        debug!("History: adding {}", entry.filename);
        self.entries.insert(0, entry);
        self.entries.truncate(self.max_entries);
    }

    /// Prepend a whole batch, keeping the batch's own order.
    pub fn extend_batch(&mut self, batch: Vec<HistoryEntry>) {
        if batch.is_empty() {
            return;
        }
        debug!("History: adding batch of {}", batch.len());
        let older = std::mem::replace(&mut self.entries, batch);
        self.entries.extend(older);
        self.entries.truncate(self.max_entries);
    }

    /// Up to `count` newest entries.
    pub fn recent(&self, count: usize) -> &[HistoryEntry] {
        &self.entries[..count.min(self.entries.len())]
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.entries)?)
    }

    /// Parse a JSON array of entries. Anything past the default limit is dropped.
    pub fn from_json(json: &str) -> Result<Self> {
        let entries: Vec<HistoryEntry> = serde_json::from_str(json)?;
        let mut log = Self::default();
        log.entries = entries;
        log.entries.truncate(log.max_entries);
        Ok(log)
    }

    /// Read a log from disk. A missing file yields an empty log.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No history at {:?}, starting empty", path);
            return Ok(Self::default());
        }
        let log = Self::from_json(&fs::read_to_string(path)?)?;
        info!("Loaded {} history entries from {:?}", log.len(), path);
        Ok(log)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_json()?)?;
        info!("Saved {} history entries to {:?}", self.len(), path);
        Ok(())
    }
}
