//! Shared error types for the IPMA proxy.
//!
//! Configuration and network failures live here so that both the weather
//! crate and the HTTP layer classify them the same way.

use thiserror::Error;

/// Network-related errors reaching the upstream provider.
#[derive(Debug, Clone, Error)]
pub enum NetworkError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Upstream returned {status} for {url}")]
    ServerError { status: u16, url: String },

    #[error("Invalid payload: {0}")]
    InvalidPayload(String),
}

impl NetworkError {
    pub fn user_message(&self) -> &'static str {
        match self {
            NetworkError::ConnectionFailed(_) => "Unable to reach the weather provider.",
            NetworkError::Timeout => "The weather provider did not answer in time.",
            NetworkError::ServerError { status, .. } if *status >= 500 => {
                "The weather provider is experiencing issues. Please try again later."
            }
            NetworkError::ServerError { .. } => "The weather provider rejected the request.",
            NetworkError::InvalidPayload(_) => {
                "The weather provider returned data that could not be read."
            }
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Configuration parse error: {0}")]
    ParseError(String),

    #[error("Failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
}

impl ConfigError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ConfigError::NotFound(_) => "Configuration file not found.",
            ConfigError::Invalid(_) => "Invalid configuration. Check your settings.",
            ConfigError::ParseError(_) => "Configuration file is malformed. Check your settings.",
            ConfigError::Io(_) => "Configuration file could not be read.",
        }
    }
}

/// Extension trait for converting reqwest errors to our error types.
pub trait ReqwestErrorExt {
    fn into_network_error(self) -> NetworkError;
}

impl ReqwestErrorExt for reqwest::Error {
    fn into_network_error(self) -> NetworkError {
        if self.is_timeout() {
            NetworkError::Timeout
        } else if self.is_decode() {
            NetworkError::InvalidPayload(self.to_string())
        } else if let Some(status) = self.status() {
            NetworkError::ServerError {
                status: status.as_u16(),
                url: self
                    .url()
                    .map(|u| u.to_string())
                    .unwrap_or_default(),
            }
        } else {
            NetworkError::ConnectionFailed(self.to_string())
        }
    }
}
