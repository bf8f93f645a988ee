//! System configuration for the owl CLI
//!
//! Stored as TOML under the user config directory
//! (`<config_dir>/researchowl/config.toml`). A missing file means
//! defaults; values are validated on load and before every save.

use anyhow::{Context, Result};
use autosave::SavePolicy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Top-level system configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    pub autosave: AutosaveConfig,
}

/// `[autosave]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutosaveConfig {
    /// Quiet period after the last edit before a save may fire (ms).
    pub debounce_ms: u64,

    /// Minimum interval between completed saves (ms).
    pub min_save_interval_ms: u64,

    /// Simulated save latency (ms).
    pub save_latency_ms: u64,

    /// Minimum spacing between "saved" confirmations (ms).
    pub notify_window_ms: u64,
}

impl Default for AutosaveConfig {
    fn default() -> Self {
        Self {
            debounce_ms: SavePolicy::DEFAULT_DEBOUNCE.as_millis() as u64,
            min_save_interval_ms: SavePolicy::DEFAULT_MIN_SAVE_INTERVAL.as_millis() as u64,
            save_latency_ms: SavePolicy::DEFAULT_SAVE_LATENCY.as_millis() as u64,
            notify_window_ms: SavePolicy::DEFAULT_NOTIFY_WINDOW.as_millis() as u64,
        }
    }
}

/// Configuration value outside its valid range.
#[derive(Debug, Error)]
#[error("{key} must be between {min} and {max} (got {value})")]
pub struct ConfigError {
    pub key: &'static str,
    pub min: u64,
    pub max: u64,
    pub value: u64,
}

fn check_range(key: &'static str, value: u64, min: u64, max: u64) -> Result<(), ConfigError> {
    if value < min || value > max {
        return Err(ConfigError {
            key,
            min,
            max,
            value,
        });
    }
    Ok(())
}

impl SystemConfig {
    /// Validate all values against their ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_range("autosave.debounce_ms", self.autosave.debounce_ms, 100, 60_000)?;
        check_range(
            "autosave.min_save_interval_ms",
            self.autosave.min_save_interval_ms,
            0,
            600_000,
        )?;
        check_range(
            "autosave.save_latency_ms",
            self.autosave.save_latency_ms,
            0,
            10_000,
        )?;
        check_range(
            "autosave.notify_window_ms",
            self.autosave.notify_window_ms,
            0,
            600_000,
        )?;
        Ok(())
    }

    /// Build the scheduler policy from this configuration.
    pub fn policy(&self) -> SavePolicy {
        SavePolicy::new()
            .with_debounce(Duration::from_millis(self.autosave.debounce_ms))
            .with_min_save_interval(Duration::from_millis(self.autosave.min_save_interval_ms))
            .with_save_latency(Duration::from_millis(self.autosave.save_latency_ms))
            .with_notify_window(Duration::from_millis(self.autosave.notify_window_ms))
    }
}

/// Path to the config file
pub fn config_file_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("researchowl").join("config.toml"))
}

/// Load the system configuration, falling back to defaults when the file
/// is missing
pub fn load() -> Result<SystemConfig> {
    match config_file_path() {
        Some(path) => load_from(&path),
        None => Ok(SystemConfig::default()),
    }
}

pub fn load_from(path: &Path) -> Result<SystemConfig> {
    if !path.exists() {
        return Ok(SystemConfig::default());
    }

    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config: SystemConfig = toml::from_str(&raw)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
    config.validate().context("Invalid configuration")?;
    Ok(config)
}

/// Save the system configuration
pub fn save(config: &SystemConfig) -> Result<()> {
    let path = config_file_path().context("Could not determine config file path")?;
    save_to(config, &path)
}

pub fn save_to(config: &SystemConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
    }

    let serialized = toml::to_string_pretty(config).context("Failed to serialize configuration")?;
    std::fs::write(path, serialized)
        .with_context(|| format!("Failed to write config file: {}", path.display()))?;
    Ok(())
}

/// Create the config file with defaults if it doesn't exist
pub fn init_if_missing() -> Result<()> {
    let path = config_file_path().context("Could not determine config file path")?;
    if !path.exists() {
        save_to(&SystemConfig::default(), &path)?;
    }
    Ok(())
}

/// Example configuration with comments
pub fn example_config() -> &'static str {
    r#"# ResearchOwl configuration

[autosave]
# Quiet period after the last edit before a save may fire (ms)
debounce_ms = 2000

# Minimum interval between completed saves (ms)
min_save_interval_ms = 5000

# Simulated save latency (ms)
save_latency_ms = 1500

# Minimum spacing between "saved" confirmations (ms)
notify_window_ms = 10000
"#
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_match_policy() {
        let config = SystemConfig::default();
        assert_eq!(config.autosave.debounce_ms, 2000);
        assert_eq!(config.autosave.min_save_interval_ms, 5000);
        assert_eq!(config.autosave.save_latency_ms, 1500);
        assert_eq!(config.autosave.notify_window_ms, 10_000);
        assert_eq!(config.policy(), SavePolicy::default());
    }

    #[test]
    fn test_defaults_are_valid() {
        assert!(SystemConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        let mut config = SystemConfig::default();
        config.autosave.debounce_ms = 50;
        let err = config.validate().unwrap_err();
        assert_eq!(err.key, "autosave.debounce_ms");

        config.autosave.debounce_ms = 2000;
        config.autosave.save_latency_ms = 60_000;
        let err = config.validate().unwrap_err();
        assert_eq!(err.key, "autosave.save_latency_ms");
    }

    #[test]
    fn test_save_load_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");

        let mut config = SystemConfig::default();
        config.autosave.debounce_ms = 250;
        config.autosave.min_save_interval_ms = 0;

        save_to(&config, &path).unwrap();
        let loaded = load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_file_loads_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("does-not-exist.toml");
        let loaded = load_from(&path).unwrap();
        assert_eq!(loaded, SystemConfig::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[autosave]\ndebounce_ms = 500\n").unwrap();

        let loaded = load_from(&path).unwrap();
        assert_eq!(loaded.autosave.debounce_ms, 500);
        assert_eq!(loaded.autosave.min_save_interval_ms, 5000);
    }

    #[test]
    fn test_invalid_file_rejected_on_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[autosave]\ndebounce_ms = 1\n").unwrap();
        assert!(load_from(&path).is_err());
    }

    #[test]
    fn test_example_config_parses() {
        let config: SystemConfig = toml::from_str(example_config()).unwrap();
        assert_eq!(config, SystemConfig::default());
    }
}
