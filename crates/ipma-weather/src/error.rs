//! Forecast lookup error types.

use chrono::NaiveDate;
use ipma_core::NetworkError;
use thiserror::Error;

use crate::types::Locality;

#[derive(Error, Debug, Clone)]
pub enum WeatherError {
    #[error("IPMA unavailable: {0}")]
    UpstreamUnavailable(#[from] NetworkError),

    #[error("Locality not found: {0}")]
    LocalityNotFound(String),

    #[error("Locality {query:?} matches {} localities", .candidates.len())]
    AmbiguousLocality {
        query: String,
        candidates: Vec<Locality>,
    },

    #[error("No forecast for {0} in the available window")]
    ForecastDateNotFound(NaiveDate),

    #[error("Provide global_id_local, locality or district_id")]
    MissingLocality,
}

impl WeatherError {
    /// Message suitable for API clients.
    pub fn user_message(&self) -> String {
        match self {
            Self::UpstreamUnavailable(e) => e.user_message().to_string(),
            Self::LocalityNotFound(q) => format!("No locality matches {q:?}"),
            Self::AmbiguousLocality { candidates, .. } => format!(
                "{} localities match. Narrow the query with district_id or global_id_local.",
                candidates.len()
            ),
            Self::ForecastDateNotFound(date) => {
                format!("{date} is outside the available forecast window")
            }
            Self::MissingLocality => {
                "Provide either global_id_local, locality or district_id".to_string()
            }
        }
    }

    /// Whether the request itself was at fault, as opposed to the provider.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::UpstreamUnavailable(_))
    }
}
