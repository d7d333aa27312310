use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use chrono::NaiveDate;
use ipma_weather::{EnrichedDailyForecast, EnrichedForecastEntry, LocalitySelector};
use serde::Deserialize;

use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DailyForecastQuery {
    pub global_id_local: Option<i64>,
    pub locality: Option<String>,
    pub district_id: Option<i64>,
}

impl From<DailyForecastQuery> for LocalitySelector {
    fn from(query: DailyForecastQuery) -> Self {
        Self {
            global_id_local: query.global_id_local,
            locality: query.locality,
            district_id: query.district_id,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DayForecastQuery {
    pub forecast_date: NaiveDate,
    pub global_id_local: Option<i64>,
    pub locality: Option<String>,
    pub district_id: Option<i64>,
}

impl DayForecastQuery {
    fn selector(&self) -> LocalitySelector {
        LocalitySelector {
            global_id_local: self.global_id_local,
            locality: self.locality.clone(),
            district_id: self.district_id,
        }
    }
}

pub(crate) async fn daily_forecast(
    State(state): State<AppState>,
    query: Result<Query<DailyForecastQuery>, QueryRejection>,
) -> ApiResult<Json<EnrichedDailyForecast>> {
    let Query(query) = query?;
    let forecast = state.forecasts.daily_forecast(&query.into()).await?;
    Ok(Json(forecast))
}

pub(crate) async fn day_forecast(
    State(state): State<AppState>,
    query: Result<Query<DayForecastQuery>, QueryRejection>,
) -> ApiResult<Json<EnrichedForecastEntry>> {
    let Query(query) = query?;
    let entry = state
        .forecasts
        .day_forecast(&query.selector(), query.forecast_date)
        .await?;
    Ok(Json(entry))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/forecast/daily", get(daily_forecast))
        .route("/forecast/day", get(day_forecast))
}
