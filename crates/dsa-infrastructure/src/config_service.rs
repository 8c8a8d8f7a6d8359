//! Application configuration.
//!
//! Settings are resolved once at startup. Precedence, highest first:
//! environment variables (including those loaded from `conf.env`),
//! secret.json for the credential, config.toml, then built-in defaults.
//!
//! A missing credential is not an error here; submissions fail later at the
//! connection step instead.

use crate::paths::DsaPaths;
use crate::storage::{OpenAiSecret, SecretStorage, SecretStorageError};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_MODEL: &str = "gpt-4";
/// Sampling temperature sent with every model call. Not read from any config source.
pub const DEFAULT_TEMPERATURE: f32 = 0.2;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Environment variables consulted for the API key, in order.
pub const API_KEY_VARS: [&str; 2] = ["OPEN_AI_KEY", "OPENAI_API_KEY"];

/// Resolved application settings.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub problems_dir: PathBuf,
    pub request_timeout: Duration,
    pub base_url: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            problems_dir: DsaPaths::default_problems_dir(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

/// Optional settings file (config.toml).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    pub model: Option<String>,
    pub problems_dir: Option<PathBuf>,
    pub request_timeout_secs: Option<u64>,
    pub base_url: Option<String>,
}

/// Loads [`AppConfig`] from the environment and the config files.
pub struct ConfigService {
    env_file: PathBuf,
    config_file: Option<PathBuf>,
    secret_storage: Option<SecretStorage>,
}

impl ConfigService {
    /// Uses `./conf.env` and the files under ~/.config/dsa-agent/.
    pub fn new() -> Self {
        Self {
            env_file: DsaPaths::env_file(),
            config_file: DsaPaths::config_file().ok(),
            secret_storage: SecretStorage::new().ok(),
        }
    }

    /// Uses explicit paths (for testing).
    pub fn with_paths(env_file: PathBuf, config_file: PathBuf, secret_file: PathBuf) -> Self {
        Self {
            env_file,
            config_file: Some(config_file),
            secret_storage: Some(SecretStorage::with_path(secret_file)),
        }
    }

    /// Loads the dotenv file into the process environment, then resolves settings.
    pub fn load(&self) -> AppConfig {
        match dotenvy::from_path(&self.env_file) {
            Ok(()) => tracing::debug!("[Config] Loaded {}", self.env_file.display()),
            Err(e) => tracing::debug!(
                "[Config] No {} loaded ({}), continuing with environment variables",
                self.env_file.display(),
                e
            ),
        }

        Self::resolve(
            |name| std::env::var(name).ok(),
            self.load_config_file(),
            self.load_secret(),
        )
    }

    /// Merges the sources into one [`AppConfig`]. `env` looks up an environment variable.
    pub fn resolve(
        env: impl Fn(&str) -> Option<String>,
        file: ConfigFile,
        secret: Option<OpenAiSecret>,
    ) -> AppConfig {
        let env = |name: &str| env(name).filter(|value| !value.trim().is_empty());
        let defaults = AppConfig::default();

        let api_key = API_KEY_VARS
            .iter()
            .find_map(|name| env(*name))
            .or_else(|| {
                secret
                    .as_ref()
                    .map(|s| s.api_key.clone())
                    .filter(|key| !key.trim().is_empty())
            });

        let model = env("OPENAI_MODEL_NAME")
            .or_else(|| secret.as_ref().and_then(|s| s.model_name.clone()))
            .or(file.model)
            .unwrap_or(defaults.model);

        let problems_dir = env("DSA_PROBLEMS_DIR")
            .map(PathBuf::from)
            .or(file.problems_dir)
            .unwrap_or(defaults.problems_dir);

        let request_timeout = env("DSA_REQUEST_TIMEOUT_SECS")
            .and_then(|value| match value.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Some(secs),
                _ => {
                    tracing::warn!("[Config] Ignoring invalid DSA_REQUEST_TIMEOUT_SECS={}", value);
                    None
                }
            })
            .or_else(|| match file.request_timeout_secs {
                Some(0) => {
                    tracing::warn!("[Config] Ignoring request_timeout_secs = 0");
                    None
                }
                secs => secs,
            })
            .map(Duration::from_secs)
            .unwrap_or(defaults.request_timeout);

        let base_url = env("OPENAI_BASE_URL")
            .or(file.base_url)
            .unwrap_or(defaults.base_url);

        AppConfig {
            api_key,
            model,
            problems_dir,
            request_timeout,
            base_url,
        }
    }

    fn load_config_file(&self) -> ConfigFile {
        let Some(path) = &self.config_file else {
            return ConfigFile::default();
        };
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!("[Config] Ignoring malformed {}: {}", path.display(), e);
                ConfigFile::default()
            }),
            Err(_) => ConfigFile::default(),
        }
    }

    fn load_secret(&self) -> Option<OpenAiSecret> {
        let storage = self.secret_storage.as_ref()?;
        match storage.load() {
            Ok(config) => config.openai,
            Err(SecretStorageError::NotFound(_)) => None,
            Err(e) => {
                tracing::warn!("[Config] Ignoring {}: {}", storage.path().display(), e);
                None
            }
        }
    }
}

impl Default for ConfigService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults_without_any_source() {
        let config = ConfigService::resolve(env_of(&[]), ConfigFile::default(), None);
        assert_eq!(config, AppConfig::default());
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_open_ai_key_takes_precedence() {
        let config = ConfigService::resolve(
            env_of(&[("OPEN_AI_KEY", "sk-a"), ("OPENAI_API_KEY", "sk-b")]),
            ConfigFile::default(),
            None,
        );
        assert_eq!(config.api_key.as_deref(), Some("sk-a"));
    }

    #[test]
    fn test_blank_key_falls_back_to_secret() {
        let secret = OpenAiSecret {
            api_key: "sk-secret".to_string(),
            model_name: Some("gpt-4o".to_string()),
        };
        let config = ConfigService::resolve(
            env_of(&[("OPEN_AI_KEY", "  ")]),
            ConfigFile::default(),
            Some(secret),
        );
        assert_eq!(config.api_key.as_deref(), Some("sk-secret"));
        assert_eq!(config.model, "gpt-4o");
    }

    #[test]
    fn test_env_overrides_file() {
        let file = ConfigFile {
            model: Some("gpt-4o-mini".to_string()),
            problems_dir: Some(PathBuf::from("from-file")),
            request_timeout_secs: Some(30),
            base_url: None,
        };
        let config = ConfigService::resolve(
            env_of(&[("DSA_PROBLEMS_DIR", "/tmp/problems"), ("DSA_REQUEST_TIMEOUT_SECS", "nope")]),
            file,
            None,
        );
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.problems_dir, PathBuf::from("/tmp/problems"));
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_load_reads_config_and_secret_files() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        let secret_file = temp_dir.path().join("secret.json");
        std::fs::write(
            &config_file,
            "problems_dir = \"solutions\"\nrequest_timeout_secs = 5\n",
        )
        .unwrap();
        std::fs::write(&secret_file, "{ invalid").unwrap();

        let service = ConfigService::with_paths(
            temp_dir.path().join("conf.env"),
            config_file,
            secret_file,
        );

        assert_eq!(
            service.load_config_file().problems_dir,
            Some(PathBuf::from("solutions"))
        );
        assert_eq!(service.load_config_file().request_timeout_secs, Some(5));
        assert!(service.load_secret().is_none());
    }

    #[test]
    fn test_malformed_config_file_is_ignored() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(&config_file, "model = [").unwrap();

        let service = ConfigService::with_paths(
            temp_dir.path().join("conf.env"),
            config_file,
            temp_dir.path().join("secret.json"),
        );
        assert!(service.load_config_file().model.is_none());
    }

    #[test]
    fn test_zero_timeout_falls_back() {
        let file = ConfigFile {
            request_timeout_secs: Some(0),
            ..ConfigFile::default()
        };
        let config = ConfigService::resolve(env_of(&[]), file, None);
        assert_eq!(config.request_timeout, AppConfig::default().request_timeout);

        let file = ConfigFile {
            request_timeout_secs: Some(45),
            ..ConfigFile::default()
        };
        let config =
            ConfigService::resolve(env_of(&[("DSA_REQUEST_TIMEOUT_SECS", "0")]), file, None);
        assert_eq!(config.request_timeout, Duration::from_secs(45));
    }

    #[test]
    fn test_temperature_is_not_configurable() {
        let file: ConfigFile = toml::from_str("temperature = 1.5\nmodel = \"gpt-4o\"\n").unwrap();
        let config = ConfigService::resolve(env_of(&[]), file, None);
        assert_eq!(
            config,
            AppConfig {
                model: "gpt-4o".to_string(),
                ..AppConfig::default()
            }
        );
    }
}
