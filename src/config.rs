//! Configuration for scrawl
//!
//! Handles loading and saving user preferences: the keypress read timeout
//! and what to do with the display when a session ends.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// scrawl configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Keypress read timeout in milliseconds. Values below 100 are raised
    /// to 100, the kernel's decisecond granularity.
    #[serde(default = "default_read_timeout_ms")]
    pub read_timeout_ms: u64,

    /// Wipe the inspector output from the screen when the session ends
    #[serde(default)]
    pub clear_on_exit: bool,
}

fn default_read_timeout_ms() -> u64 {
    100
}

impl Default for Config {
    fn default() -> Self {
        Self {
            read_timeout_ms: default_read_timeout_ms(),
            clear_on_exit: false,
        }
    }
}

impl Config {
    /// Config directory path (~/.scrawl)
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .expect("could not find home directory")
            .join(".scrawl")
    }

    /// Config file path (~/.scrawl/config.toml)
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Load the config, writing the defaults to disk on first run.
    pub fn load_or_init() -> Result<Self> {
        let path = Self::config_path();
        if !path.exists() {
            let config = Self::default();
            config.save_to(&path)?;
            return Ok(config);
        }
        Self::load_from(&path)
    }

    fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("read config from {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("parse config from {}", path.display()))
    }

    fn save_to(&self, path: &Path) -> Result<()> {
        let dir = path.parent().unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(dir)
            .with_context(|| format!("create config directory {}", dir.display()))?;

        let contents = toml::to_string_pretty(self).context("serialize config")?;

        // Atomic write: temp file then rename
        let tmp_path = path.with_extension("tmp");
        fs::write(&tmp_path, &contents)
            .with_context(|| format!("write config to {}", tmp_path.display()))?;
        fs::rename(&tmp_path, path)
            .with_context(|| format!("move config into place at {}", path.display()))?;

        Ok(())
    }
}
