//! IPMA open-data client with per-dataset caching.
//!
//! Three resources are fetched, each behind its own TTL cache:
//! - `distrits-islands.json`: the locality list (long TTL)
//! - `weather-type-classe.json`: weather type labels (long TTL)
//! - `forecast/meteorology/cities/daily/{id}.json`: per-locality forecast (short TTL)
//!
//! A miss issues exactly one upstream request. Failures are not cached and
//! expired data is never served in their place.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use ipma_core::{CacheConfig, Config, NetworkError, ReqwestErrorExt};
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::instrument;

use crate::cache::TtlCache;
use crate::error::WeatherError;
use crate::resolver::{self, LocalityFilter};
use crate::types::{
    ApiEnvelope, ApiForecastDocument, ApiLocality, ApiWeatherType, DailyForecast, Locality,
    WeatherTypeLabel, WeatherTypeTable,
};

const LOCALITIES_KEY: &str = "localities";
const WEATHER_TYPES_KEY: &str = "weather_types";

/// Expiry for each cached dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheTtls {
    pub localities: Duration,
    pub weather_types: Duration,
    pub forecast: Duration,
}

impl Default for CacheTtls {
    fn default() -> Self {
        Self::from(&CacheConfig::default())
    }
}

impl From<&CacheConfig> for CacheTtls {
    fn from(config: &CacheConfig) -> Self {
        Self {
            localities: Duration::from_secs(config.localities_ttl_secs),
            weather_types: Duration::from_secs(config.weather_types_ttl_secs),
            forecast: Duration::from_secs(config.forecast_ttl_secs),
        }
    }
}

#[derive(Debug)]
pub struct IpmaClient {
    http: Client,
    base_url: String,
    ttls: CacheTtls,
    localities: TtlCache<Arc<Vec<Locality>>>,
    weather_types: TtlCache<Arc<WeatherTypeTable>>,
    forecasts: TtlCache<Arc<DailyForecast>>,
}

impl IpmaClient {
    pub fn new(base_url: &str, timeout: Duration, ttls: CacheTtls) -> Result<Self, WeatherError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ReqwestErrorExt::into_network_error)?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            ttls,
            localities: TtlCache::new(),
            weather_types: TtlCache::new(),
            forecasts: TtlCache::new(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, WeatherError> {
        Self::new(
            &config.upstream.base_url,
            Duration::from_secs(config.upstream.timeout_secs),
            CacheTtls::from(&config.cache),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn ttls(&self) -> CacheTtls {
        self.ttls
    }

    /// Full locality list in provider order.
    #[instrument(skip(self), level = "debug")]
    pub async fn all_localities(&self) -> Result<Arc<Vec<Locality>>, WeatherError> {
        if let Some(cached) = self.localities.get(LOCALITIES_KEY) {
            tracing::debug!("Locality list served from cache");
            return Ok(cached);
        }

        let envelope: ApiEnvelope<ApiLocality> = self.get_json("distrits-islands.json").await?;
        let localities = Arc::new(dedupe_by_id(
            envelope.data.into_iter().map(Locality::from).collect(),
        ));

        tracing::info!(count = localities.len(), "Fetched locality list");
        self.localities
            .set(LOCALITIES_KEY, localities.clone(), self.ttls.localities);
        Ok(localities)
    }

    /// Localities matching `filter`, filtered in-process after the fetch.
    pub async fn get_localities(&self, filter: &LocalityFilter) -> Result<Vec<Locality>, WeatherError> {
        let all = self.all_localities().await?;
        Ok(resolver::list_matches(&all, filter))
    }

    #[instrument(skip(self), level = "debug")]
    pub async fn get_weather_type_labels(&self) -> Result<Arc<WeatherTypeTable>, WeatherError> {
        if let Some(cached) = self.weather_types.get(WEATHER_TYPES_KEY) {
            tracing::debug!("Weather types served from cache");
            return Ok(cached);
        }

        let envelope: ApiEnvelope<ApiWeatherType> =
            self.get_json("weather-type-classe.json").await?;
        let table: Arc<WeatherTypeTable> = Arc::new(
            envelope
                .data
                .into_iter()
                .map(WeatherTypeLabel::from)
                .collect(),
        );

        tracing::info!(count = table.len(), "Fetched weather type labels");
        self.weather_types
            .set(WEATHER_TYPES_KEY, table.clone(), self.ttls.weather_types);
        Ok(table)
    }

    #[instrument(skip(self), level = "debug")]
    pub async fn get_daily_forecast(&self, global_id_local: i64) -> Result<Arc<DailyForecast>, WeatherError> {
        let key = format!("forecast:{global_id_local}");
        if let Some(cached) = self.forecasts.get(&key) {
            tracing::debug!(%key, "Forecast served from cache");
            return Ok(cached);
        }

        let document: ApiForecastDocument = self
            .get_json(&format!(
                "forecast/meteorology/cities/daily/{global_id_local}.json"
            ))
            .await?;
        let forecast = Arc::new(DailyForecast::from(document));

        tracing::info!(global_id_local, days = forecast.entries.len(), "Fetched daily forecast");
        self.forecasts.set(key, forecast.clone(), self.ttls.forecast);
        Ok(forecast)
    }

    /// Drop every cached dataset so the next call refetches.
    pub fn clear_caches(&self) {
        self.localities.clear();
        self.weather_types.clear();
        self.forecasts.clear();
        tracing::info!("IPMA caches cleared");
    }

    /// GET `{base_url}/{path}` and decode the JSON body.
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, WeatherError> {
        let url = format!("{}/{}", self.base_url, path);

        let response = self.http.get(&url).send().await.map_err(|e| {
            tracing::warn!(%url, error = %e, "IPMA request failed");
            e.into_network_error()
        })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%url, %status, "IPMA returned an error status");
            return Err(NetworkError::ServerError {
                status: status.as_u16(),
                url,
            }
            .into());
        }

        let body = response
            .bytes()
            .await
            .map_err(ReqwestErrorExt::into_network_error)?;

        serde_json::from_slice(&body).map_err(|e| {
            tracing::warn!(%url, error = %e, "IPMA payload did not match the expected schema");
            NetworkError::InvalidPayload(format!("{url}: {e}")).into()
        })
    }
}

/// Keep the first locality for each `globalIdLocal`.
fn dedupe_by_id(localities: Vec<Locality>) -> Vec<Locality> {
    let mut seen = HashSet::new();
    let before = localities.len();
    let unique: Vec<Locality> = localities
        .into_iter()
        .filter(|l| seen.insert(l.global_id_local))
        .collect();

    if unique.len() != before {
        tracing::warn!(
            dropped = before - unique.len(),
            "Locality list contained duplicate identifiers"
        );
    }
    unique
}
