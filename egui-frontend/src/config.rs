//! # App Configuration
//!
//! Optional YAML file combining the store tunables with the slider's. The
//! path is taken from `PET_ITCH_TRACKER_CONFIG`; without it the defaults apply.
//!
//! ```yaml
//! tracker:
//!   protocol_length_days: 14
//! slider:
//!   commit_channel_capacity: 16
//!   spring:
//!     stiffness: 100.0
//!     damping: 10.0
//! ```

use anyhow::{Context, Result};
use log::info;
use pet_itch_tracker_backend::TrackerConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::ui::components::itch_slider::ItchSliderConfig;

pub const CONFIG_ENV_VAR: &str = "PET_ITCH_TRACKER_CONFIG";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub tracker: TrackerConfig,
    pub slider: ItchSliderConfig,
}

impl AppConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let mut config: AppConfig = serde_yaml::from_str(yaml).context("Invalid app config")?;
        config.tracker = config.tracker.sanitized();
        Ok(config)
    }

    /// Load the file at `path`, falling back to defaults when it does not exist
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!("No app config at {:?}, using defaults", path);
            return Ok(Self::default());
        }
        let yaml_content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read app config {:?}", path))?;
        Self::from_yaml_str(&yaml_content)
    }

    /// Load from the path named by `PET_ITCH_TRACKER_CONFIG`, if set
    pub fn from_env() -> Result<Self> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => Self::load(Path::new(&path)),
            None => Ok(Self::default()),
        }
    }
}
