use axum::{Router, routing::get};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use weather_proxy_core::CurrentWeather;

use crate::handler;

/// Provider shared across requests; immutable after startup.
pub type SharedProvider = Arc<dyn CurrentWeather>;

/// Build the application router. All origins are allowed; the payload is
/// public data.
pub fn router(provider: SharedProvider) -> Router {
    Router::new()
        .route("/weather", get(handler::get_weather))
        .route("/health", get(handler::health))
        .layer(CorsLayer::permissive())
        .with_state(provider)
}
