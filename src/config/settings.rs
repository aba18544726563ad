//! Application configuration and saved gauge state

use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use speedo_types::{GaugeConfig, GaugeSnapshot};
use std::path::{Path, PathBuf};

/// Application-wide configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Version of the config format
    pub version: u32,
    /// Window dimensions
    #[serde(default)]
    pub window: WindowConfig,
    /// Gauge construction parameters
    #[serde(default)]
    pub gauge: GaugeConfig,
    /// Delta applied by the accelerate/decelerate buttons
    #[serde(default = "default_speed_step")]
    pub speed_step: f64,
}

fn default_speed_step() -> f64 {
    45.0
}

impl AppConfig {
    /// Load configuration from disk
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(config_path)?;
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration from a specific file path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    /// Get the configuration file path
    fn config_path() -> Result<PathBuf> {
        Ok(project_dirs()?.config_dir().join("config.json"))
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: 1,
            window: WindowConfig::default(),
            gauge: GaugeConfig::default(),
            speed_step: default_speed_step(),
        }
    }
}

/// Window configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    pub width: i32,
    pub height: i32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 720,
        }
    }
}

/// Persist the gauge snapshot so the next launch can restore it.
pub fn save_snapshot(snapshot: &GaugeSnapshot) -> Result<()> {
    let path = state_path()?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let content = serde_json::to_string_pretty(snapshot)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Load the saved gauge snapshot, if any.
///
/// Returned as a raw JSON value: the widget's restore path decides whether
/// it actually is a snapshot.
pub fn load_snapshot() -> Result<Option<Value>> {
    let path = state_path()?;

    if !path.exists() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(path)?;
    let value = serde_json::from_str(&content)?;
    Ok(Some(value))
}

fn state_path() -> Result<PathBuf> {
    Ok(project_dirs()?.config_dir().join("state.json"))
}

fn project_dirs() -> Result<directories::ProjectDirs> {
    directories::ProjectDirs::from("com", "github.speedo-gauge", "speedo")
        .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.version, 1);
        assert_eq!(config.speed_step, 45.0);
        assert_eq!(config.gauge.speed, 0.0);
        assert_eq!(config.gauge.max_speed, 150.0);
        assert_eq!(config.window.width, 640);
    }

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let config: AppConfig = serde_json::from_str(r#"{"version": 1}"#).unwrap();
        assert_eq!(config.speed_step, 45.0);
        assert_eq!(config.gauge.max_speed, 150.0);
    }

    #[test]
    fn test_round_trip() {
        let mut config = AppConfig::default();
        config.gauge.max_speed = 240.0;
        config.speed_step = 30.0;

        let json = serde_json::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.gauge.max_speed, 240.0);
        assert_eq!(parsed.speed_step, 30.0);
    }
}
