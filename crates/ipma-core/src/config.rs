use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

use crate::error::ConfigError;

/// Environment variable pointing at an explicit config file.
pub const CONFIG_PATH_ENV: &str = "IPMA_PROXY_CONFIG";

const ENV_BIND_ADDR: &str = "IPMA_PROXY_BIND_ADDR";
const ENV_BASE_URL: &str = "IPMA_PROXY_BASE_URL";
const ENV_TIMEOUT_SECS: &str = "IPMA_PROXY_TIMEOUT_SECS";
const ENV_TTL_LOCALITIES: &str = "IPMA_PROXY_TTL_LOCALITIES";
const ENV_TTL_WEATHER_TYPES: &str = "IPMA_PROXY_TTL_WEATHER_TYPES";
const ENV_TTL_FORECAST: &str = "IPMA_PROXY_TTL_FORECAST";

/// Upper bound for `upstream.timeout_secs`.
pub const MAX_TIMEOUT_SECS: u64 = 300;

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Get a single-line message summarizing all errors
    pub fn error_summary(&self) -> String {
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub upstream: UpstreamConfig,

    /// Cache TTLs, in seconds
    #[serde(default)]
    pub cache: CacheConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Socket address the HTTP server listens on
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
}

fn default_bind_addr() -> String {
    "0.0.0.0:8000".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Base URL of the IPMA open-data API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://api.ipma.pt/open-data".to_string()
}

fn default_timeout_secs() -> u64 {
    20
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Locality list changes rarely
    #[serde(default = "default_reference_ttl")]
    pub localities_ttl_secs: u64,

    #[serde(default = "default_reference_ttl")]
    pub weather_types_ttl_secs: u64,

    #[serde(default = "default_forecast_ttl")]
    pub forecast_ttl_secs: u64,
}

fn default_reference_ttl() -> u64 {
    12 * 60 * 60
}

fn default_forecast_ttl() -> u64 {
    30 * 60
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            localities_ttl_secs: default_reference_ttl(),
            weather_types_ttl_secs: default_reference_ttl(),
            forecast_ttl_secs: default_forecast_ttl(),
        }
    }
}

impl Config {
    /// Load configuration.
    ///
    /// Lookup order: the explicit `path`, then `$IPMA_PROXY_CONFIG`, then the
    /// per-user config file if it exists, then built-in defaults. Environment
    /// overrides are applied last.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let explicit = path
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from));

        let mut config = match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::NotFound(path.display().to_string()));
                }
                Self::from_file(&path)?
            }
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                _ => {
                    tracing::debug!("No config file found, using defaults");
                    Self::default()
                }
            },
        };

        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Load configuration and validate it
    ///
    /// Warnings are logged; errors abort the load.
    pub fn load_validated(path: Option<&Path>) -> Result<(Self, ValidationResult), ConfigError> {
        let config = Self::load(path)?;
        let validation = config.validate();

        if !validation.is_valid() {
            return Err(ConfigError::Invalid(validation.error_summary()));
        }

        for warning in &validation.warnings {
            tracing::warn!("Config warning: {}", warning);
        }

        Ok((config, validation))
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        tracing::info!("Loaded configuration from {}", path.display());
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Apply `IPMA_PROXY_*` overrides using `lookup` to read variables.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup(ENV_BIND_ADDR) {
            self.server.bind_addr = v;
        }
        if let Some(v) = lookup(ENV_BASE_URL) {
            self.upstream.base_url = v;
        }
        if let Some(v) = lookup(ENV_TIMEOUT_SECS) {
            self.upstream.timeout_secs = parse_secs(ENV_TIMEOUT_SECS, &v)?;
        }
        if let Some(v) = lookup(ENV_TTL_LOCALITIES) {
            self.cache.localities_ttl_secs = parse_secs(ENV_TTL_LOCALITIES, &v)?;
        }
        if let Some(v) = lookup(ENV_TTL_WEATHER_TYPES) {
            self.cache.weather_types_ttl_secs = parse_secs(ENV_TTL_WEATHER_TYPES, &v)?;
        }
        if let Some(v) = lookup(ENV_TTL_FORECAST) {
            self.cache.forecast_ttl_secs = parse_secs(ENV_TTL_FORECAST, &v)?;
        }
        Ok(())
    }

    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        self.validate_url(&self.upstream.base_url, "upstream.base_url", &mut result);

        if self.server.bind_addr.parse::<std::net::SocketAddr>().is_err() {
            result.add_error(
                "server.bind_addr",
                format!("Not a socket address: {}", self.server.bind_addr),
            );
        }

        if self.upstream.timeout_secs == 0 {
            result.add_error("upstream.timeout_secs", "Timeout must be greater than 0");
        } else if self.upstream.timeout_secs > MAX_TIMEOUT_SECS {
            result.add_error(
                "upstream.timeout_secs",
                format!(
                    "Timeout must be at most {MAX_TIMEOUT_SECS} seconds, got {}",
                    self.upstream.timeout_secs
                ),
            );
        }

        for (field, ttl) in [
            ("cache.localities_ttl_secs", self.cache.localities_ttl_secs),
            ("cache.weather_types_ttl_secs", self.cache.weather_types_ttl_secs),
            ("cache.forecast_ttl_secs", self.cache.forecast_ttl_secs),
        ] {
            if ttl == 0 {
                result.add_warning(field, "Caching disabled (0 seconds), every request hits IPMA");
            }
        }

        result
    }

    fn validate_url(&self, url_str: &str, field_name: &str, result: &mut ValidationResult) {
        match Url::parse(url_str) {
            Ok(url) => {
                if url.scheme() != "http" && url.scheme() != "https" {
                    result.add_error(
                        field_name,
                        format!("URL must use http or https scheme, got: {}", url.scheme()),
                    );
                }
                if url.host().is_none() {
                    result.add_error(field_name, "URL must have a host");
                }
            }
            Err(e) => {
                result.add_error(field_name, format!("Invalid URL: {}", e));
            }
        }
    }

    /// Per-user config file location, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("ipma-proxy").join("config.toml"))
    }
}

fn parse_secs(key: &str, value: &str) -> Result<u64, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid(format!("{key} must be a whole number of seconds, got {value:?}")))
}
