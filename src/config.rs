use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Session-start settings. The length bounds here only seed the session;
/// bound edits during a session are never written back.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_min_word_length")]
    pub min_word_length: usize,
    #[serde(default = "default_max_word_length")]
    pub max_word_length: usize,
}

fn default_theme() -> String {
    "terminal-default".to_string()
}
fn default_min_word_length() -> usize {
    1
}
fn default_max_word_length() -> usize {
    10
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            min_word_length: default_min_word_length(),
            max_word_length: default_max_word_length(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            let mut config: Config = toml::from_str(&content)?;
            config.normalize();
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    #[allow(dead_code)]
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("retyp")
            .join("config.toml")
    }

    /// Repair hand-edited values that violate the bound ordering. Call after
    /// deserialization.
    pub fn normalize(&mut self) {
        if self.min_word_length > self.max_word_length {
            self.min_word_length = default_min_word_length();
            self.max_word_length = default_max_word_length();
        }
    }
}
