//! Configuration management command
//!
//! Provides CLI interface to view and edit autosave settings.

use crate::system_config::{self, SystemConfig};
use anyhow::{Context, Result};
use owo_colors::OwoColorize;

/// List all configuration values
pub async fn run_list() -> Result<()> {
    let config = system_config::load()?;
    let config_path = system_config::config_file_path()
        .context("Could not determine config file path")?;

    println!("{}", "ResearchOwl Configuration".bold());
    println!("{}: {}\n", "Location".dimmed(), config_path.display().dimmed());

    println!("{}", "[autosave]".yellow());
    println!(
        "  {} = {} {}",
        "debounce_ms".cyan(),
        config.autosave.debounce_ms,
        format!("({:.1}s quiet period)", config.autosave.debounce_ms as f64 / 1000.0).dimmed()
    );
    println!(
        "  {} = {} {}",
        "min_save_interval_ms".cyan(),
        config.autosave.min_save_interval_ms,
        format!("({:.1}s cooldown)", config.autosave.min_save_interval_ms as f64 / 1000.0).dimmed()
    );
    println!(
        "  {} = {} {}",
        "save_latency_ms".cyan(),
        config.autosave.save_latency_ms,
        "(simulated)".dimmed()
    );
    println!(
        "  {} = {} {}",
        "notify_window_ms".cyan(),
        config.autosave.notify_window_ms,
        format!("({:.0}s between confirmations)", config.autosave.notify_window_ms as f64 / 1000.0).dimmed()
    );

    println!("\n{}", "Valid Ranges:".bold());
    println!("  debounce_ms: 100-60,000");
    println!("  min_save_interval_ms: 0-600,000");
    println!("  save_latency_ms: 0-10,000");
    println!("  notify_window_ms: 0-600,000");

    Ok(())
}

/// Get a single configuration value
pub async fn run_get(key: &str) -> Result<()> {
    let config = system_config::load()?;

    let value = match key {
        "autosave.debounce_ms" => config.autosave.debounce_ms.to_string(),
        "autosave.min_save_interval_ms" => config.autosave.min_save_interval_ms.to_string(),
        "autosave.save_latency_ms" => config.autosave.save_latency_ms.to_string(),
        "autosave.notify_window_ms" => config.autosave.notify_window_ms.to_string(),
        _ => anyhow::bail!(
            "Unknown config key: {}. Use 'owl config list' to see available keys.",
            key
        ),
    };

    println!("{}", value);
    Ok(())
}

/// Set a configuration value
pub async fn run_set(key: &str, value: &str) -> Result<()> {
    let mut config = system_config::load()?;

    set_key(&mut config, key, value)?;

    // Validate before saving
    config.validate().context("Invalid configuration value")?;

    system_config::save(&config)?;

    println!("{} {} = {}", "✓".green(), key.cyan(), value);
    println!(
        "{}",
        "Note: Open editor sessions keep their current timings until reopened.".yellow()
    );

    Ok(())
}

fn set_key(config: &mut SystemConfig, key: &str, value: &str) -> Result<()> {
    let parsed: u64 = value
        .parse()
        .context("Invalid value: must be a non-negative integer (milliseconds)")?;

    match key {
        "autosave.debounce_ms" => config.autosave.debounce_ms = parsed,
        "autosave.min_save_interval_ms" => config.autosave.min_save_interval_ms = parsed,
        "autosave.save_latency_ms" => config.autosave.save_latency_ms = parsed,
        "autosave.notify_window_ms" => config.autosave.notify_window_ms = parsed,
        _ => anyhow::bail!(
            "Unknown config key: {}. Use 'owl config list' to see available keys.",
            key
        ),
    }
    Ok(())
}

/// Show the config file path and optionally create it
pub async fn run_path(create: bool) -> Result<()> {
    let config_path = system_config::config_file_path()
        .context("Could not determine config file path")?;

    if create && !config_path.exists() {
        system_config::init_if_missing()?;
        println!("{} Created config file at: {}", "✓".green(), config_path.display());
    } else if config_path.exists() {
        println!("{}", config_path.display());
    } else {
        println!("{}", config_path.display());
        println!("{}", "File does not exist. Use --create to create it.".yellow());
    }

    Ok(())
}

/// Show example configuration
pub async fn run_example() -> Result<()> {
    println!("{}", system_config::example_config());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_key_updates_every_field() {
        let mut config = SystemConfig::default();
        set_key(&mut config, "autosave.debounce_ms", "300").unwrap();
        set_key(&mut config, "autosave.min_save_interval_ms", "1000").unwrap();
        set_key(&mut config, "autosave.save_latency_ms", "50").unwrap();
        set_key(&mut config, "autosave.notify_window_ms", "20000").unwrap();

        assert_eq!(config.autosave.debounce_ms, 300);
        assert_eq!(config.autosave.min_save_interval_ms, 1000);
        assert_eq!(config.autosave.save_latency_ms, 50);
        assert_eq!(config.autosave.notify_window_ms, 20_000);
    }

    #[test]
    fn test_set_key_rejects_unknown_key() {
        let mut config = SystemConfig::default();
        assert!(set_key(&mut config, "autosave.retries", "3").is_err());
    }

    #[test]
    fn test_set_key_rejects_non_numeric() {
        let mut config = SystemConfig::default();
        assert!(set_key(&mut config, "autosave.debounce_ms", "fast").is_err());
    }
}
