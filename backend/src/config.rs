//! # Tracker Configuration
//!
//! Tunables for the store and analytics, read from an optional YAML file.
//!
//! ## YAML Format
//!
//! ```yaml
//! protocol_length_days: 14
//! weekly_window_days: 7
//! max_label_length: 40
//! max_notes_length: 2000
//! persist_retries: 1
//! ```
//!
//! Every field is optional; missing fields fall back to the defaults above.

use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Length of a newly started protocol
    pub protocol_length_days: u32,
    /// Number of days covered by the weekly summary, ending today
    pub weekly_window_days: u32,
    /// Maximum length of a custom vocabulary label
    pub max_label_length: usize,
    /// Maximum length of free-text notes on check-ins, flares and media
    pub max_notes_length: usize,
    /// How many times a failed snapshot save is retried before surfacing
    pub persist_retries: u32,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            protocol_length_days: 14,
            weekly_window_days: 7,
            max_label_length: 40,
            max_notes_length: 2000,
            persist_retries: 1,
        }
    }
}

impl TrackerConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: TrackerConfig = serde_yaml::from_str(yaml).context("Invalid tracker config")?;
        Ok(config.sanitized())
    }

    /// Load the config file at `path`, falling back to defaults when it does not exist
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!("No tracker config at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let yaml_content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read tracker config {:?}", path))?;
        let config = Self::from_yaml_str(&yaml_content)?;
        debug!("Loaded tracker config from {:?}: {:?}", path, config);
        Ok(config)
    }

    // A zero-length protocol or window has no meaningful day 1.
    pub fn sanitized(mut self) -> Self {
        self.protocol_length_days = self.protocol_length_days.max(1);
        self.weekly_window_days = self.weekly_window_days.max(1);
        self
    }
}
