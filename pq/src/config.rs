//! Configuration for pacedqueue

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::queue::QueueConfig;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Queue pacing settings
    #[serde(default)]
    pub queue: QueueConfig,

    /// Shell used to run commands (invoked as `<shell> -c <command>`)
    #[serde(default = "default_shell")]
    pub shell: String,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
}

fn default_shell() -> String {
    crate::DEFAULT_SHELL.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            queue: QueueConfig::default(),
            shell: default_shell(),
            log_level: None,
        }
    }
}

impl Config {
    /// Load config from file, or use defaults
    pub fn load(path: Option<&PathBuf>) -> Result<Self> {
        if let Some(config_path) = path {
            return Self::load_from(config_path);
        }

        // Try default locations
        let default_paths = [
            dirs::config_dir().map(|p| p.join("pacedqueue").join("pacedqueue.yml")),
            Some(PathBuf::from("pacedqueue.yml")),
        ];

        for path in default_paths.iter().flatten() {
            if path.exists() {
                return Self::load_from(path);
            }
        }

        Ok(Config::default())
    }

    fn load_from(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).context(format!("Failed to read config file: {}", path.display()))?;
        let config: Config =
            serde_yaml::from_str(&content).context(format!("Failed to parse config file: {}", path.display()))?;
        debug!(path = %path.display(), ?config, "Config::load_from: loaded");
        Ok(config)
    }

    /// Save config to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
