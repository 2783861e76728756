//! Game settings
//!
//! Read once at startup from an optional JSON file. Missing fields fall back
//! to the defaults below.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_ATTEMPTS, FEEDBACK_CLEAR_MS};
use crate::effects::BurstConfig;
use crate::error::ConfigError;
use crate::game::share_header;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Site name used in the share header
    pub site_name: String,
    /// Guesses per round
    pub attempts_allowed: u32,
    /// How long per-item correct/wrong markers stay visible
    pub feedback_clear_ms: u64,
    /// Enables the reset and auto-win shortcuts
    pub dev_mode: bool,
    /// Burst fired on a win
    pub celebration: BurstConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            site_name: "Alchemiz.ing".to_string(),
            attempts_allowed: DEFAULT_ATTEMPTS,
            feedback_clear_ms: FEEDBACK_CLEAR_MS,
            dev_mode: true,
            celebration: BurstConfig::default(),
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read settings from a JSON file
    pub fn read(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load settings, falling back to defaults on any problem
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            log::info!("Using default settings");
            return Self::default();
        };

        match Self::read(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(err) => {
                log::warn!("{err}; using default settings");
                Self::default()
            }
        }
    }

    /// First line of the share text
    pub fn share_header(&self) -> String {
        share_header(&self.site_name)
    }
}
