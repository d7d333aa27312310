use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use ipma_weather::{Locality, LocalityFilter};
use serde::{Deserialize, Serialize};

use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LocalitiesQuery {
    pub q: Option<String>,
    pub district_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LocalitiesResponse {
    pub count: usize,
    pub data: Vec<Locality>,
}

pub(crate) async fn list_localities(
    State(state): State<AppState>,
    query: Result<Query<LocalitiesQuery>, QueryRejection>,
) -> ApiResult<Json<LocalitiesResponse>> {
    let Query(query) = query?;
    let filter = LocalityFilter {
        query: query.q,
        district_id: query.district_id,
    };
    let data = state.forecasts.list_localities(&filter).await?;
    Ok(Json(LocalitiesResponse {
        count: data.len(),
        data,
    }))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/localities", get(list_localities))
}
