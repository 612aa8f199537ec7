// Copyright (c) 2026 rangewatch contributors
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/rangewatch/rangewatch-rs

//! Configuration module

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::notify::NotifierConfig;
use crate::telemetry::TelemetryConfig;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Log level
    pub log_level: String,

    /// Use a simulated ranging sensor instead of hardware
    pub demo_mode: bool,

    /// Device identity
    pub device: DeviceConfig,

    /// Ranging sensor binding
    pub sensor: SensorConfig,

    /// Detection parameters
    pub detection: DetectionConfig,

    /// Telemetry endpoint configuration
    pub telemetry: TelemetryConfig,

    /// Notifier configuration
    pub notifier: NotifierConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            demo_mode: true,
            device: DeviceConfig::default(),
            sensor: SensorConfig::default(),
            detection: DetectionConfig::default(),
            telemetry: TelemetryConfig::default(),
            notifier: NotifierConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Saved configuration to {:?}", path);
        Ok(())
    }

    /// Load or create default configuration
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            let config = Self::default();

            // Create parent directories
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }

            config.save(path)?;
            Ok(config)
        }
    }

    /// Get configuration directory
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join("rangewatch"))
            .unwrap_or_else(|| PathBuf::from("./config"))
    }

    /// Get default configuration path
    pub fn default_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }
}

/// Device identity configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceConfig {
    /// Thing name the shadow topics are derived from
    pub name: String,

    /// Detector identifier carried in reports and notifications
    pub id: Option<String>,

    /// Human-readable location label used in notification texts
    pub location: String,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        let name = hostname::get()
            .ok()
            .and_then(|h| h.into_string().ok())
            .unwrap_or_else(|| "rangewatch".to_string());

        Self {
            name,
            id: None,
            location: "unspecified".to_string(),
        }
    }
}

/// Ranging sensor configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensorConfig {
    /// Serial port the ranger is attached to (requires the `serial` feature)
    pub serial_port: Option<String>,

    /// Serial baud rate
    pub baud_rate: u32,

    /// Per-sample read timeout in milliseconds
    pub read_timeout_ms: u64,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            serial_port: None,
            baud_rate: 9600,
            read_timeout_ms: 500,
        }
    }
}

/// Detection parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionConfig {
    /// Samples at or below this distance count as "object present"
    pub threshold_cm: f64,

    /// Consecutive sub-threshold samples required to confirm a detection
    pub confirm_samples: u32,

    /// Sleep between polls while nothing is in range, in milliseconds
    pub scan_interval_ms: u64,

    /// Wait between connectivity re-checks while the link is down, in milliseconds
    pub offline_retry_ms: u64,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            threshold_cm: 50.0,
            confirm_samples: 9,
            scan_interval_ms: 3000,
            offline_retry_ms: 1000,
        }
    }
}
