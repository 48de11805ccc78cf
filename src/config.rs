//! Configuration management for the Magazine Store reconciler
//!
//! Settings are layered: built-in defaults, then a TOML config file, then
//! environment variables, then CLI flags (applied by the command handlers).

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use url::Url;

use crate::app::{ClientConfig, EndpointTemplates, ReconcilerConfig};
use crate::constants::{api, config as config_files, env as env_constants, http};
use crate::errors::{ConfigError, ConfigResult};

/// Unified application configuration for TOML serialization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Catalog service location and endpoint templates
    pub api: ApiSettings,
    /// HTTP client settings
    pub client: ClientConfigToml,
}

/// Service root and the five endpoint templates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    pub base_url: String,
    pub token_path: String,
    pub categories_path: String,
    pub category_path: String,
    pub subscribers_path: String,
    pub answer_path: String,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: api::DEFAULT_BASE_URL.to_string(),
            token_path: api::TOKEN_PATH.to_string(),
            categories_path: api::CATEGORIES_PATH.to_string(),
            category_path: api::CATEGORY_PATH.to_string(),
            subscribers_path: api::SUBSCRIBERS_PATH.to_string(),
            answer_path: api::ANSWER_PATH.to_string(),
        }
    }
}

impl ApiSettings {
    pub fn endpoints(&self) -> EndpointTemplates {
        EndpointTemplates {
            token: self.token_path.clone(),
            categories: self.categories_path.clone(),
            category_detail: self.category_path.clone(),
            subscribers: self.subscribers_path.clone(),
            answer: self.answer_path.clone(),
        }
    }

    /// Parse the base URL, accepting only http and https
    pub fn parsed_base_url(&self) -> ConfigResult<Url> {
        let invalid = |reason: String| ConfigError::InvalidValue {
            field: "api.base_url".to_string(),
            value: self.base_url.clone(),
            reason,
        };

        let url = Url::parse(&self.base_url).map_err(|e| invalid(e.to_string()))?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(invalid(format!("Unsupported scheme '{}'", other))),
        }
    }
}

/// TOML-friendly client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfigToml {
    /// Request timeout in seconds
    pub request_timeout_secs: u64,
    /// Connect timeout in seconds
    pub connect_timeout_secs: u64,
    /// TCP keep-alive timeout in seconds (None = disabled)
    pub tcp_keepalive_secs: Option<u64>,
    /// TCP nodelay setting
    pub tcp_nodelay: bool,
    /// Connection pool idle timeout in seconds (None = no timeout)
    pub pool_idle_timeout_secs: Option<u64>,
    /// Maximum idle connections per host
    pub pool_max_per_host: usize,
}

impl Default for ClientConfigToml {
    fn default() -> Self {
        Self {
            request_timeout_secs: http::DEFAULT_TIMEOUT.as_secs(),
            connect_timeout_secs: http::CONNECT_TIMEOUT.as_secs(),
            tcp_keepalive_secs: Some(http::TCP_KEEPALIVE.as_secs()),
            tcp_nodelay: true,
            pool_idle_timeout_secs: Some(http::POOL_IDLE_TIMEOUT.as_secs()),
            pool_max_per_host: http::POOL_MAX_PER_HOST,
        }
    }
}

impl ClientConfigToml {
    /// Convert to runtime client configuration
    pub fn to_runtime_config(&self) -> ClientConfig {
        ClientConfig {
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            tcp_keepalive: self.tcp_keepalive_secs.map(Duration::from_secs),
            tcp_nodelay: self.tcp_nodelay,
            pool_idle_timeout: self.pool_idle_timeout_secs.map(Duration::from_secs),
            pool_max_per_host: self.pool_max_per_host,
        }
    }
}

impl AppConfig {
    /// Load configuration with multi-source precedence:
    /// 1. Default values
    /// 2. Config file (if exists)
    /// 3. Environment variables
    ///
    /// CLI overrides are applied afterwards by the caller.
    pub async fn load(config_file_override: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = Self::default();

        let config_path = match config_file_override {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::NotFound { path });
                }
                Some(path)
            }
            None => Self::find_config_file(),
        };

        if let Some(path) = config_path {
            debug!("Loading config from: {}", path.display());
            config = Self::load_from_file(&path).await?;
        }

        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Apply environment overrides using `lookup` to read variables
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(base_url) = lookup(env_constants::BASE_URL).filter(|v| !v.trim().is_empty()) {
            debug!("Base URL overridden by {}", env_constants::BASE_URL);
            self.api.base_url = base_url.trim().to_string();
        }
    }

    /// Check the configuration can drive a pass
    pub fn validate(&self) -> ConfigResult<()> {
        self.api.parsed_base_url()?;
        self.api.endpoints().validate()?;

        if self.client.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "client.request_timeout_secs".to_string(),
                value: "0".to_string(),
                reason: "Timeout must be greater than 0".to_string(),
            });
        }
        if self.client.connect_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "client.connect_timeout_secs".to_string(),
                value: "0".to_string(),
                reason: "Timeout must be greater than 0".to_string(),
            });
        }

        Ok(())
    }

    /// Validate and convert to the runtime configuration of the pipeline
    pub fn to_runtime_config(&self) -> ConfigResult<ReconcilerConfig> {
        self.validate()?;
        Ok(ReconcilerConfig {
            base_url: self.api.parsed_base_url()?,
            endpoints: self.api.endpoints(),
            client: self.client.to_runtime_config(),
        })
    }

    /// Render the effective configuration as TOML
    pub fn to_toml_string(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Write the commented default configuration to `path`
    ///
    /// Refuses to overwrite an existing file unless `force` is set.
    pub async fn write_default(path: &Path, force: bool) -> ConfigResult<()> {
        if path.exists() && !force {
            return Err(ConfigError::AlreadyExists {
                path: path.to_path_buf(),
            });
        }

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| ConfigError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }

        tokio::fs::write(path, Self::generate_default_config_content())
            .await
            .map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;

        info!("Wrote default configuration to {}", path.display());
        Ok(())
    }

    /// Find configuration file in standard locations
    fn find_config_file() -> Option<PathBuf> {
        let mut search_paths: Vec<PathBuf> = config_files::LOCAL_FILES
            .iter()
            .map(PathBuf::from)
            .collect();
        if let Ok(user_path) = Self::default_config_path() {
            search_paths.push(user_path);
        }

        let found = search_paths.into_iter().find(|path| path.exists());
        match &found {
            Some(path) => debug!("Found config file: {}", path.display()),
            None => debug!("No config file found in standard locations"),
        }
        found
    }

    /// Get the default config file path for the current user
    pub fn default_config_path() -> ConfigResult<PathBuf> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir
            .join(config_files::APP_DIR)
            .join(config_files::FILE_NAME))
    }

    /// Load configuration from a TOML file
    pub async fn load_from_file(path: &Path) -> ConfigResult<Self> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;

        let config: AppConfig =
            toml::from_str(&content).map_err(|source| ConfigError::InvalidFormat {
                path: path.to_path_buf(),
                source,
            })?;

        info!("Loaded configuration from: {}", path.display());
        Ok(config)
    }

    /// Generate default configuration content with helpful comments
    pub fn generate_default_config_content() -> String {
        let defaults = Self::default();
        format!(
            r#"# Magazine Store reconciler configuration
# {base_env} overrides base_url; {log_env} sets the log filter

[api]
# Root of the catalog service
base_url = "{base_url}"

# Endpoint templates; {{token}} and {{category}} are substituted per call
token_path = "{token_path}"
categories_path = "{categories_path}"
category_path = "{category_path}"
subscribers_path = "{subscribers_path}"
answer_path = "{answer_path}"

[client]
# HTTP client settings (seconds)
request_timeout_secs = {request_timeout}
connect_timeout_secs = {connect_timeout}
tcp_keepalive_secs = {keepalive}
tcp_nodelay = true
pool_idle_timeout_secs = {pool_idle}
pool_max_per_host = {pool_max}
"#,
            base_env = env_constants::BASE_URL,
            log_env = env_constants::LOG,
            base_url = defaults.api.base_url,
            token_path = defaults.api.token_path,
            categories_path = defaults.api.categories_path,
            category_path = defaults.api.category_path,
            subscribers_path = defaults.api.subscribers_path,
            answer_path = defaults.api.answer_path,
            request_timeout = defaults.client.request_timeout_secs,
            connect_timeout = defaults.client.connect_timeout_secs,
            keepalive = http::TCP_KEEPALIVE.as_secs(),
            pool_idle = http::POOL_IDLE_TIMEOUT.as_secs(),
            pool_max = defaults.client.pool_max_per_host,
        )
    }
}
