use axum::extract::rejection::QueryRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use ipma_weather::{Locality, WeatherError};
use serde::Serialize;

#[derive(Debug)]
pub enum ApiError {
    Weather(WeatherError),
    InvalidQuery(String),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
    detail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    candidates: Option<Vec<Locality>>,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Weather(err) => match err {
                WeatherError::UpstreamUnavailable(_) => StatusCode::BAD_GATEWAY,
                WeatherError::LocalityNotFound(_) => StatusCode::NOT_FOUND,
                WeatherError::AmbiguousLocality { .. } => StatusCode::CONFLICT,
                WeatherError::ForecastDateNotFound(_) => StatusCode::NOT_FOUND,
                WeatherError::MissingLocality => StatusCode::BAD_REQUEST,
            },
            Self::InvalidQuery(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Stable machine-readable code for the `error` field.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Weather(err) => match err {
                WeatherError::UpstreamUnavailable(_) => "upstream_unavailable",
                WeatherError::LocalityNotFound(_) => "locality_not_found",
                WeatherError::AmbiguousLocality { .. } => "ambiguous_locality",
                WeatherError::ForecastDateNotFound(_) => "forecast_date_not_found",
                WeatherError::MissingLocality => "missing_locality",
            },
            Self::InvalidQuery(_) => "invalid_query",
        }
    }

    fn into_body(self) -> ErrorBody {
        let error = self.code();
        match self {
            Self::Weather(err) => {
                let message = err.user_message();
                let detail = err.to_string();
                let candidates = match err {
                    WeatherError::AmbiguousLocality { candidates, .. } => Some(candidates),
                    _ => None,
                };
                ErrorBody {
                    error,
                    message,
                    detail,
                    candidates,
                }
            }
            Self::InvalidQuery(detail) => ErrorBody {
                error,
                message: "Invalid query parameters".to_string(),
                detail,
                candidates: None,
            },
        }
    }
}

impl From<WeatherError> for ApiError {
    fn from(err: WeatherError) -> Self {
        Self::Weather(err)
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::InvalidQuery(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::warn!(error = ?self, status = %status, "upstream error");
        } else {
            tracing::debug!(error = ?self, status = %status, "request rejected");
        }
        (status, Json(self.into_body())).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
