//! Configuration management.
//!
//! TOML configuration with serde defaults for every section, so a partial
//! file (or none at all, via [`Config::default`]) still yields a working
//! setup:
//!
//! ```toml
//! [storage]
//! data_dir = "./data"
//!
//! [assets]
//! dir = "./assets"
//!
//! [audio]
//! enabled = true
//!
//! [logging]
//! level = "info"
//! ```

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub assets: AssetsConfig,
    #[serde(default)]
    pub audio: AudioConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the embedded database.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    /// Directory where `muster backup` writes archives.
    #[serde(default = "default_backup_dir")]
    pub backup_dir: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig {
            data_dir: default_data_dir(),
            backup_dir: default_backup_dir(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetsConfig {
    /// Root directory of bundled images and sounds.
    #[serde(default = "default_assets_dir")]
    pub dir: String,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        AssetsConfig {
            dir: default_assets_dir(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioConfig {
    /// Cue sound effects on domain operations. Requires the `playback`
    /// build feature to produce actual audio.
    #[serde(default = "default_audio_enabled")]
    pub enabled: bool,
}

impl Default for AudioConfig {
    fn default() -> Self {
        AudioConfig {
            enabled: default_audio_enabled(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// One of: error, warn, info, debug, trace.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: default_log_level(),
        }
    }
}

fn default_data_dir() -> String {
    "./data".to_string()
}

fn default_backup_dir() -> String {
    "./backups".to_string()
}

fn default_assets_dir() -> String {
    "./assets".to_string()
}

fn default_audio_enabled() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

const VALID_LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

impl Config {
    /// Load and validate configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|e| anyhow!("failed to read config file {}: {}", path.display(), e))?;
        let config: Config = toml::from_str(&contents)
            .map_err(|e| anyhow!("failed to parse config file {}: {}", path.display(), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Write a default configuration file. Refuses to overwrite.
    pub fn create_default<P: AsRef<Path>>(path: P) -> Result<Config> {
        let path = path.as_ref();
        if path.exists() {
            return Err(anyhow!("config file {} already exists", path.display()));
        }
        let config = Config::default();
        let contents = toml::to_string_pretty(&config)?;
        fs::write(path, contents)?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.storage.data_dir.trim().is_empty() {
            return Err(anyhow!("storage.data_dir must not be empty"));
        }
        if !VALID_LOG_LEVELS.contains(&self.logging.level.as_str()) {
            return Err(anyhow!(
                "logging.level must be one of {:?}, got '{}'",
                VALID_LOG_LEVELS,
                self.logging.level
            ));
        }
        Ok(())
    }
}
