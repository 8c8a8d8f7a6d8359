//! Secret configuration file storage.
//!
//! Loads API keys from ~/.config/dsa-agent/secret.json.

use crate::paths::DsaPaths;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

/// Root structure of secret.json.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SecretConfig {
    #[serde(default)]
    pub openai: Option<OpenAiSecret>,
}

/// OpenAI credentials.
#[derive(Debug, Clone, Deserialize)]
pub struct OpenAiSecret {
    pub api_key: String,
    #[serde(default)]
    pub model_name: Option<String>,
}

/// Why secret.json could not be used.
#[derive(Debug)]
pub enum SecretStorageError {
    NotFound(PathBuf),
    IoError(std::io::Error),
    ParseError(serde_json::Error),
    ConfigDirNotFound,
}

impl std::fmt::Display for SecretStorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(path) => write!(f, "no secret.json at {}", path.display()),
            Self::IoError(e) => write!(f, "cannot read secret.json: {}", e),
            Self::ParseError(e) => write!(f, "secret.json is not valid: {}", e),
            Self::ConfigDirNotFound => write!(f, "no home config directory on this platform"),
        }
    }
}

impl std::error::Error for SecretStorageError {}

impl From<std::io::Error> for SecretStorageError {
    fn from(e: std::io::Error) -> Self {
        Self::IoError(e)
    }
}

impl From<serde_json::Error> for SecretStorageError {
    fn from(e: serde_json::Error) -> Self {
        Self::ParseError(e)
    }
}

/// Read-only access to secret.json.
///
/// Does not validate the key; a bad key is only discovered when the model
/// backend rejects it.
pub struct SecretStorage {
    path: PathBuf,
}

impl SecretStorage {
    /// Uses the default path (~/.config/dsa-agent/secret.json).
    pub fn new() -> Result<Self, SecretStorageError> {
        let path = DsaPaths::secret_file().map_err(|_| SecretStorageError::ConfigDirNotFound)?;
        Ok(Self { path })
    }

    /// Uses a custom path (for testing).
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn load(&self) -> Result<SecretConfig, SecretStorageError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(SecretStorageError::NotFound(self.path.clone()));
            }
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_str(&content)?)
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_nonexistent_file() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("secret.json");
        let storage = SecretStorage::with_path(file_path.clone());

        match storage.load() {
            Err(SecretStorageError::NotFound(path)) => assert_eq!(path, file_path),
            _ => panic!("Expected NotFound error"),
        }
    }

    #[test]
    fn test_load_valid_json() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("secret.json");
        fs::write(
            &file_path,
            r#"{ "openai": { "api_key": "sk-test-123", "model_name": "gpt-4o" } }"#,
        )
        .unwrap();

        let config = SecretStorage::with_path(file_path).load().unwrap();
        let openai = config.openai.unwrap();
        assert_eq!(openai.api_key, "sk-test-123");
        assert_eq!(openai.model_name, Some("gpt-4o".to_string()));
    }

    #[test]
    fn test_load_empty_config() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("secret.json");
        fs::write(&file_path, "{}").unwrap();

        let config = SecretStorage::with_path(file_path).load().unwrap();
        assert!(config.openai.is_none());
    }

    #[test]
    fn test_load_invalid_json() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("secret.json");
        fs::write(&file_path, "{ invalid json").unwrap();

        let result = SecretStorage::with_path(file_path).load();
        assert!(matches!(result, Err(SecretStorageError::ParseError(_))));
    }
}
