// ⚙️ Configuration - settings as data
// Every field has a default, so an empty JSON object is a valid config file.

use crate::agency::DEFAULT_EXTENSION;
use anyhow::{Context as AnyhowContext, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Recognized input/export extension, without the dot
    pub extension: String,

    /// Input that returns to the main menu from any prompt
    pub back_command: String,

    /// Tracing filter used when CONECTAR_LOG is not set
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            extension: DEFAULT_EXTENSION.to_string(),
            back_command: "**".to_string(),
            log_filter: "conectar=info".to_string(),
        }
    }
}

impl Config {
    /// Load config from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;

        let config: Config = serde_json::from_str(&content)
            .context("Failed to parse config JSON")?;

        Ok(config)
    }
}
