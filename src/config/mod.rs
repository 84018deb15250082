//! Configuration management for chatlens.
//!
//! Handles:
//! - Window paging and debounce settings
//! - Boundary watcher tuning
//! - Theme and display preferences

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{LensError, Result};
use crate::util::atomic_write;

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Window paging settings.
    #[serde(default)]
    pub window: WindowConfig,
    /// Boundary watcher settings.
    #[serde(default)]
    pub watcher: WatcherConfig,
    /// TUI theme.
    #[serde(default)]
    pub theme: ThemeConfig,
    /// Display options.
    #[serde(default)]
    pub display: DisplayConfig,
}

impl Config {
    /// Load configuration from the default location.
    pub fn load() -> Result<Self> {
        let config_path = default_config_path()?;
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            LensError::io(format!("Failed to read config file: {}", path.display()), e)
        })?;

        toml::from_str(&content).map_err(|e| LensError::InvalidConfig {
            message: e.to_string(),
        })
    }

    /// Save configuration to the default location.
    pub fn save(&self) -> Result<()> {
        let config_path = default_config_path()?;
        self.save_to(&config_path)
    }

    /// Save configuration to a specific path.
    ///
    /// Uses atomic file writes so a failed save never corrupts an existing
    /// configuration.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).map_err(|e| LensError::InvalidConfig {
            message: format!("Failed to serialize config: {e}"),
        })?;

        atomic_write(path, content.as_bytes())?;
        Ok(())
    }
}

/// Window paging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    /// Items revealed per growth step.
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// Debounce cool-down after a growth step, in milliseconds.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

impl WindowConfig {
    /// Debounce as a [`Duration`].
    #[must_use]
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            debounce_ms: default_debounce_ms(),
        }
    }
}

/// Boundary watcher settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatcherConfig {
    /// Early-trigger distance from the sentinel, in rows.
    #[serde(default = "default_proximity_rows")]
    pub proximity_rows: usize,
    /// Fraction of the sentinel that must be visible before triggering.
    #[serde(default = "default_threshold")]
    pub intersection_threshold: f64,
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self {
            proximity_rows: default_proximity_rows(),
            intersection_threshold: default_threshold(),
        }
    }
}

/// Theme configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeConfig {
    /// Theme name.
    #[serde(default = "default_theme")]
    pub name: String,
    /// Use color output.
    #[serde(default = "default_true")]
    pub color: bool,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            name: default_theme(),
            color: true,
        }
    }
}

/// Display configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Show timestamps next to messages.
    #[serde(default = "default_true")]
    pub timestamps: bool,
    /// Truncate long message bodies at this length (0 = no truncation).
    #[serde(default = "default_truncate")]
    pub truncate_at: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            timestamps: true,
            truncate_at: default_truncate(),
        }
    }
}

// Default value functions for serde
fn default_true() -> bool {
    true
}

fn default_page_size() -> usize {
    100
}

fn default_debounce_ms() -> u64 {
    100
}

fn default_proximity_rows() -> usize {
    8
}

fn default_threshold() -> f64 {
    0.1
}

fn default_theme() -> String {
    "dark".to_string()
}

fn default_truncate() -> usize {
    2000
}

/// Get the default configuration path.
pub fn default_config_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir().ok_or_else(|| LensError::Unsupported {
        feature: "config directory discovery".to_string(),
    })?;

    Ok(config_dir.join("chatlens").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.window.page_size, 100);
        assert_eq!(config.window.debounce_ms, 100);
        assert_eq!(config.watcher.proximity_rows, 8);
        assert!(config.theme.color);
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.window.page_size, config.window.page_size);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let parsed: Config = toml::from_str(
            r#"
[window]
page_size = 50
"#,
        )
        .unwrap();
        assert_eq!(parsed.window.page_size, 50);
        assert_eq!(parsed.window.debounce_ms, 100);
        assert_eq!(parsed.watcher.intersection_threshold, 0.1);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.window.page_size = 25;
        config.save_to(&path).unwrap();

        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(reloaded.window.page_size, 25);
    }
}
