//! Application settings management
//!
//! Handles the optional settings file with device and transfer parameters.

use crate::device::{G600_CONTROL_INTERFACE, G600_PRODUCT_ID, LOGITECH_VENDOR_ID};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

/// Application settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Pause after each config write so the mouse can commit it
    pub settle_delay_ms: u64,

    /// HID interface carrying the config feature reports
    pub interface_number: i32,

    pub vendor_id: u16,

    pub product_id: u16,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            settle_delay_ms: 1100,
            interface_number: G600_CONTROL_INTERFACE,
            vendor_id: LOGITECH_VENDOR_ID,
            product_id: G600_PRODUCT_ID,
        }
    }
}

impl AppSettings {
    /// Get the default settings file path
    pub fn settings_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("g600linux");
        Ok(config_dir.join("settings.toml"))
    }

    /// Load settings from the default location (or use defaults)
    pub fn load() -> Result<Self> {
        match Self::settings_path() {
            Ok(path) => Self::load_from(&path),
            Err(e) => {
                debug!("{}, using default settings", e);
                Ok(Self::default())
            }
        }
    }

    /// Load settings from a file; a missing file yields defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No settings file at {:?}, using defaults", path);
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file {:?}", path))?;
        let settings: AppSettings = toml::from_str(&content)
            .with_context(|| format!("Failed to parse settings file {:?}", path))?;
        info!("Loaded settings from {:?}", path);
        Ok(settings)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }
}
