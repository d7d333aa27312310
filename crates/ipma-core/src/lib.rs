pub mod config;
pub mod error;

pub use config::{CacheConfig, Config, ServerConfig, UpstreamConfig, ValidationResult};
pub use error::{ConfigError, NetworkError, ReqwestErrorExt};

/// Initialize logging for the proxy process.
///
/// Honors `RUST_LOG`; falls back to `info` when it is unset or invalid.
pub fn init() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("IPMA proxy core initialized");
}
