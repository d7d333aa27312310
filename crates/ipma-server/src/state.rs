use std::sync::Arc;

use ipma_weather::ForecastService;

/// Shared by every handler; the service owns the caches.
#[derive(Clone)]
pub struct AppState {
    pub forecasts: Arc<ForecastService>,
}

impl AppState {
    pub fn new(service: ForecastService) -> Self {
        Self {
            forecasts: Arc::new(service),
        }
    }
}
