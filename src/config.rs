//! Configuration loading and management
//!
//! The config file records where the task database lives:
//!
//! ```toml
//! [General]
//! database = "/home/alice/.alice_todo.json"
//! ```

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use directories::{BaseDirs, ProjectDirs};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Outcome, Result};

pub const APP_NAME: &str = "todo";

/// Name of the config file inside the config directory
pub const CONFIG_FILE: &str = "config.toml";

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(rename = "General")]
    pub general: GeneralConfig,
}

/// `[General]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Path to the task database
    pub database: PathBuf,
}

impl Config {
    pub fn new(database: impl Into<PathBuf>) -> Self {
        Self {
            general: GeneralConfig {
                database: database.into(),
            },
        }
    }

    pub fn database_path(&self) -> &Path {
        &self.general.database
    }

    /// Load configuration from a config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.general.database.as_os_str().is_empty() {
            return Err(Error::InvalidConfig(
                "General.database cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Platform config directory for the app, or `.todo` when there is no home.
pub fn default_config_dir() -> PathBuf {
    ProjectDirs::from("", "", APP_NAME)
        .map(|dirs| dirs.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(format!(".{APP_NAME}")))
}

/// `~/.<home dir name>_todo.json`, or `todo.json` when there is no home.
pub fn default_database_path() -> PathBuf {
    match BaseDirs::new() {
        Some(dirs) => {
            let home = dirs.home_dir();
            let stem = home
                .file_name()
                .and_then(|name| name.to_str())
                .unwrap_or(APP_NAME);
            home.join(format!(".{stem}_todo.json"))
        }
        None => PathBuf::from("todo.json"),
    }
}

pub fn config_file(config_dir: &Path) -> PathBuf {
    config_dir.join(CONFIG_FILE)
}

/// Create the config directory and record `db_path` in the config file.
pub fn init_app(config_dir: &Path, db_path: &Path) -> Outcome {
    if let Err(err) = fs::create_dir_all(config_dir) {
        tracing::debug!(dir = %config_dir.display(), error = %err, "config dir creation failed");
        return Outcome::DirectoryError;
    }

    let path = config_file(config_dir);
    if let Err(err) = OpenOptions::new().create(true).append(true).open(&path) {
        tracing::debug!(path = %path.display(), error = %err, "config file creation failed");
        return Outcome::ConfigFileError;
    }

    match Config::new(db_path).save(&path) {
        Ok(()) => {
            tracing::debug!(path = %path.display(), database = %db_path.display(), "config written");
            Outcome::Success
        }
        Err(err) => {
            tracing::debug!(path = %path.display(), error = %err, "config write failed");
            Outcome::ConfigFileError
        }
    }
}
