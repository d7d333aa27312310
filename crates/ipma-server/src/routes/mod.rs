pub mod forecast;
pub mod health;
pub mod localities;

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(health::router())
        .nest(
            "/v1",
            Router::new()
                .merge(localities::router())
                .merge(forecast::router()),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
