//! IPMA weather data for the proxy
//!
//! Fetches localities, weather-type labels and daily forecasts from the IPMA
//! open-data API, keeps them in per-dataset TTL caches, resolves free-text
//! locality queries to `globalIdLocal` identifiers and enriches forecasts
//! with human-readable labels.

pub mod cache;
pub mod client;
pub mod enrich;
pub mod error;
pub mod resolver;
pub mod service;
pub mod types;

#[cfg(test)]
mod fixtures;

pub use cache::{Clock, SystemClock, TtlCache};
pub use client::{CacheTtls, IpmaClient};
pub use error::WeatherError;
pub use resolver::{LocalityFilter, LocalitySelector};
pub use service::ForecastService;
pub use types::*;
