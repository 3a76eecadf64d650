//! Application configuration.
//!
//! Configuration is stored in `<config dir>/backoffice/config.yaml` (or the
//! file named by `BACKOFFICE_CONFIG`) and includes:
//! - API base URL, bearer token and request timeout
//! - Default page size for list views
//!
//! `BACKOFFICE_API_URL` and `BACKOFFICE_TOKEN` override the file values.

use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::api::DEFAULT_TIMEOUT_SECS;
use crate::error::{BackofficeError, Result};
use crate::query::DEFAULT_PAGE_SIZE;

pub const CONFIG_PATH_ENV: &str = "BACKOFFICE_CONFIG";
pub const API_URL_ENV: &str = "BACKOFFICE_API_URL";
pub const TOKEN_ENV: &str = "BACKOFFICE_TOKEN";

/// Keys accepted by `config get` and `config set`.
pub const CONFIG_KEYS: &[&str] = &[
    "api.base_url",
    "api.token",
    "api.timeout_secs",
    "defaults.page_size",
];

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub defaults: DefaultsConfig,
}

#[derive(Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// Total request timeout in seconds (default: 60)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            token: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiConfig")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DefaultsConfig {
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
        }
    }
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

fn env_non_empty(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn io_context(e: std::io::Error, action: &str, path: &Path) -> BackofficeError {
    BackofficeError::Io(std::io::Error::new(
        e.kind(),
        format!("Failed to {action} config at {}: {e}", path.display()),
    ))
}

impl Config {
    /// Get the path to the config file
    pub fn config_path() -> Result<PathBuf> {
        if let Some(path) = env_non_empty(CONFIG_PATH_ENV) {
            return Ok(PathBuf::from(path));
        }
        let base = directories::BaseDirs::new().ok_or_else(|| {
            BackofficeError::Config("could not determine the user config directory".to_string())
        })?;
        Ok(base.config_dir().join("backoffice").join("config.yaml"))
    }

    /// Load configuration from the default location, or defaults if absent
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path).map_err(|e| io_context(e, "read", path))?;
        let config: Config = serde_yaml_ng::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| io_context(e, "create directory for", path))?;
        }

        let content = serde_yaml_ng::to_string(self)?;
        fs::write(path, content).map_err(|e| io_context(e, "write", path))?;

        // The file holds the API token
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = std::fs::Permissions::from_mode(0o600);
            fs::set_permissions(path, permissions)
                .map_err(|e| io_context(e, "set permissions on", path))?;
        }

        Ok(())
    }

    /// API base URL from the environment or the config file
    pub fn base_url(&self) -> Option<String> {
        env_non_empty(API_URL_ENV).or_else(|| self.api.base_url.clone())
    }

    /// API token from the environment or the config file
    pub fn token(&self) -> Option<String> {
        env_non_empty(TOKEN_ENV).or_else(|| self.api.token.clone().filter(|t| !t.is_empty()))
    }

    pub fn require_base_url(&self) -> Result<String> {
        self.base_url().ok_or_else(|| {
            BackofficeError::Config(format!(
                "API base URL not configured. Set {API_URL_ENV} or run: backoffice config set api.base_url <url>"
            ))
        })
    }

    pub fn page_size(&self) -> u32 {
        self.defaults.page_size.max(1)
    }

    /// Set a value by dotted key, validating it.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "api.base_url" => {
                url::Url::parse(value).map_err(|e| {
                    BackofficeError::Config(format!("invalid value '{value}' for api.base_url: {e}"))
                })?;
                self.api.base_url = Some(value.to_string());
            }
            "api.token" => {
                self.api.token = Some(value.to_string()).filter(|v| !v.is_empty());
            }
            "api.timeout_secs" => {
                self.api.timeout_secs = parse_positive(key, value)?;
            }
            "defaults.page_size" => {
                self.defaults.page_size = parse_positive(key, value)?;
            }
            _ => return Err(unknown_key(key)),
        }
        Ok(())
    }

    /// File value for a dotted key, without environment overrides.
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        match key {
            "api.base_url" => Ok(self.api.base_url.clone()),
            "api.token" => Ok(self.api.token.clone()),
            "api.timeout_secs" => Ok(Some(self.api.timeout_secs.to_string())),
            "defaults.page_size" => Ok(Some(self.defaults.page_size.to_string())),
            _ => Err(unknown_key(key)),
        }
    }
}

fn parse_positive<T: std::str::FromStr + PartialOrd + Default>(key: &str, value: &str) -> Result<T> {
    match value.trim().parse::<T>() {
        Ok(v) if v > T::default() => Ok(v),
        _ => Err(BackofficeError::Config(format!(
            "invalid value '{value}' for {key}. Expected a positive integer"
        ))),
    }
}

fn unknown_key(key: &str) -> BackofficeError {
    BackofficeError::Config(format!(
        "unknown config key '{key}'. Valid keys: {}",
        CONFIG_KEYS.join(", ")
    ))
}
