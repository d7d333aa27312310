//! Request-level operations: resolve, fetch, enrich.
//!
//! `ForecastService` is constructed once at startup and shared by every
//! request handler; all cache state lives in the wrapped [`IpmaClient`].

use chrono::NaiveDate;
use tracing::instrument;

use crate::client::IpmaClient;
use crate::enrich;
use crate::error::WeatherError;
use crate::resolver::{self, LocalityFilter, LocalitySelector};
use crate::types::{EnrichedDailyForecast, EnrichedForecastEntry, Locality};

#[derive(Debug)]
pub struct ForecastService {
    client: IpmaClient,
}

impl ForecastService {
    pub fn new(client: IpmaClient) -> Self {
        Self { client }
    }

    /// Every locality matching the filter, in provider order.
    pub async fn list_localities(&self, filter: &LocalityFilter) -> Result<Vec<Locality>, WeatherError> {
        self.client.get_localities(filter).await
    }

    /// Turn a selector into one `globalIdLocal`.
    ///
    /// An explicit id is passed through without consulting the locality
    /// list at all.
    #[instrument(skip(self), level = "debug")]
    pub async fn resolve(&self, selector: &LocalitySelector) -> Result<i64, WeatherError> {
        if let Some(id) = selector.global_id_local {
            return Ok(id);
        }
        let name = selector
            .locality
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty());
        if name.is_none() && selector.district_id.is_none() {
            return Err(WeatherError::MissingLocality);
        }

        let localities = self.client.all_localities().await?;
        let found = resolver::resolve_one(&localities, name, selector.district_id)?;
        tracing::debug!(name = %found.name, id = found.global_id_local, "Resolved locality");
        Ok(found.global_id_local)
    }

    /// Full forecast window for one locality, with labels attached.
    pub async fn daily_forecast(&self, selector: &LocalitySelector) -> Result<EnrichedDailyForecast, WeatherError> {
        let id = self.resolve(selector).await?;
        let forecast = self.client.get_daily_forecast(id).await?;
        let labels = self.client.get_weather_type_labels().await?;

        let data = enrich::enrich_all(&forecast.entries, &labels);
        Ok(EnrichedDailyForecast {
            owner: forecast.owner.clone(),
            country: forecast.country.clone(),
            global_id_local: forecast.global_id_local,
            data_update: forecast.data_update.clone(),
            count: data.len(),
            data,
        })
    }

    /// Forecast for a single date inside the provider's window.
    pub async fn day_forecast(
        &self,
        selector: &LocalitySelector,
        date: NaiveDate,
    ) -> Result<EnrichedForecastEntry, WeatherError> {
        let id = self.resolve(selector).await?;
        let forecast = self.client.get_daily_forecast(id).await?;
        let entry = enrich::select_day(&forecast.entries, date)?;
        let labels = self.client.get_weather_type_labels().await?;

        Ok(enrich::enrich(entry, &labels))
    }
}
