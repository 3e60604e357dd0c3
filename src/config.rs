//! Server configuration loading.
//!
//! The on-disk document is JSON by default, or YAML when the file ends in
//! `.yaml`/`.yml`. Relative `webRoot` and `logDirectory` values are resolved
//! against the directory that holds the config file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServerConfig {
    /// TCP port to listen on (all interfaces).
    pub port: u16,
    /// Document root.
    pub web_root: PathBuf,
    /// Where request logs go. `None` means `<config dir>/logs`.
    pub log_directory: Option<PathBuf>,
    /// Compress responses for clients that accept gzip.
    pub enable_gzip: bool,
    /// Directory of the file this config was loaded from.
    #[serde(skip)]
    pub config_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            web_root: PathBuf::from("archivos-a-servir"),
            log_directory: Some(PathBuf::from("logs")),
            enable_gzip: true,
            config_dir: PathBuf::from("."),
        }
    }
}

impl ServerConfig {
    /// Reads and resolves the config at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.is_file() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        let mut config: ServerConfig = if is_yaml(path) {
            serde_yaml::from_str(&content)?
        } else {
            serde_json::from_str(&content)?
        };

        let config_dir = std::path::absolute(path)?
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        config.web_root = resolve_against(&config_dir, &config.web_root);
        config.log_directory = config
            .log_directory
            .filter(|dir| !dir.as_os_str().is_empty())
            .map(|dir| resolve_against(&config_dir, &dir));
        config.config_dir = config_dir;

        Ok(config)
    }

    /// Writes the default config document to `path`.
    pub fn write_default(path: &Path) -> Result<(), ConfigError> {
        let defaults = ServerConfig::default();
        let content = if is_yaml(path) {
            serde_yaml::to_string(&defaults)?
        } else {
            serde_json::to_string_pretty(&defaults)?
        };
        fs::write(path, content)?;
        Ok(())
    }

    /// Directory for request logs.
    pub fn log_dir(&self) -> PathBuf {
        self.log_directory
            .clone()
            .unwrap_or_else(|| self.config_dir.join("logs"))
    }
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    )
}

fn resolve_against(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
