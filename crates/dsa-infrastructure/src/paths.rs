//! Path management for dsa-agent configuration files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/dsa-agent/         # Config directory (platform default via `dirs`)
//! ├── config.toml              # Optional application settings
//! └── secret.json              # API keys
//!
//! ./conf.env                   # Optional dotenv file in the working directory
//! ./problems/                  # Solution files and derived artifacts (default)
//! ```

use std::path::PathBuf;

const APP_DIR_NAME: &str = "dsa-agent";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find config directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Path resolution for dsa-agent.
pub struct DsaPaths;

impl DsaPaths {
    /// Returns the dsa-agent configuration directory (e.g., `~/.config/dsa-agent/`).
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR_NAME))
            .ok_or(PathError::ConfigDirNotFound)
    }

    /// Returns the path to config.toml.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the path to secret.json.
    ///
    /// The file should be readable by the user only (e.g., 600).
    pub fn secret_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("secret.json"))
    }

    /// Returns the dotenv file looked up in the working directory.
    pub fn env_file() -> PathBuf {
        PathBuf::from("conf.env")
    }

    /// Returns the default problems directory, relative to the working directory.
    pub fn default_problems_dir() -> PathBuf {
        PathBuf::from("problems")
    }
}
