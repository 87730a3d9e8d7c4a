use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use weather_proxy_core::{ErrorBody, ProviderError, WeatherQuery};

use crate::routes::SharedProvider;

pub const MISSING_CITY: &str = "City parameter is required";
pub const FETCH_FAILED: &str = "Failed to fetch data from OpenWeatherMap";

#[derive(Debug, Deserialize)]
pub struct WeatherParams {
    city: Option<String>,
}

/// `GET /weather?city=<name>`
///
/// Relays the provider's current-weather payload verbatim, or maps the
/// failure to a `{"error": ...}` body:
/// - missing/empty city: 400
/// - upstream non-200: the upstream status
/// - transport or decode failure: 502
pub async fn get_weather(
    State(provider): State<SharedProvider>,
    Query(params): Query<WeatherParams>,
) -> Response {
    let Some(query) = params.city.and_then(WeatherQuery::new) else {
        return error_response(StatusCode::BAD_REQUEST, MISSING_CITY);
    };

    match provider.current(&query).await {
        Ok(payload) => (StatusCode::OK, Json(payload)).into_response(),
        Err(err) => {
            tracing::warn!(city = query.city(), %err, "upstream fetch failed");
            error_response(upstream_status(&err), FETCH_FAILED)
        }
    }
}

/// Liveness probe; no upstream call involved.
pub async fn health() -> &'static str {
    "ok"
}

fn upstream_status(err: &ProviderError) -> StatusCode {
    match err {
        ProviderError::Status { status } => {
            StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
        }
        ProviderError::Transport(_) | ProviderError::Decode(_) => StatusCode::BAD_GATEWAY,
    }
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(ErrorBody::new(message))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes;
    use async_trait::async_trait;
    use axum::Router;
    use axum::body::Body;
    use axum::http::{Request, header};
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use std::sync::Arc;
    use weather_proxy_core::CurrentWeather;

    use tower::ServiceExt;

    #[derive(Debug)]
    enum Stub {
        Payload(Value),
        Status(u16),
        BadBody,
        Unreachable,
    }

    #[async_trait]
    impl CurrentWeather for Stub {
        async fn current(&self, _query: &WeatherQuery) -> Result<Value, ProviderError> {
            match self {
                Stub::Payload(value) => Ok(value.clone()),
                Stub::Status(status) => Err(ProviderError::Status { status: *status }),
                Stub::BadBody => {
                    Err(serde_json::from_str::<Value>("<html>").unwrap_err().into())
                }
                Stub::Unreachable => {
                    // A real connect failure; nothing listens on port 1.
                    let err = reqwest::Client::new()
                        .get("http://127.0.0.1:1/weather")
                        .send()
                        .await
                        .unwrap_err();
                    Err(err.into())
                }
            }
        }
    }

    fn app(stub: Stub) -> Router {
        routes::router(Arc::new(stub))
    }

    async fn send(app: Router, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .uri(uri)
            .header(header::ORIGIN, "http://example.com")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn error_json(message: &str) -> Value {
        json!({"error": message})
    }

    #[tokio::test]
    async fn relays_upstream_payload_verbatim() {
        let payload = json!({"main": {"temp": 15.2}});
        let (status, body) = send(app(Stub::Payload(payload.clone())), "/weather?city=London").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, payload);
    }

    #[tokio::test]
    async fn missing_city_is_a_400() {
        let (status, body) = send(app(Stub::Payload(json!({}))), "/weather").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, error_json(MISSING_CITY));
    }

    #[tokio::test]
    async fn empty_city_is_a_400() {
        let (status, body) = send(app(Stub::Payload(json!({}))), "/weather?city=").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, error_json(MISSING_CITY));
    }

    #[tokio::test]
    async fn upstream_404_propagates_status_with_fixed_message() {
        let (status, body) = send(app(Stub::Status(404)), "/weather?city=Nowhereland").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, error_json(FETCH_FAILED));
    }

    #[tokio::test]
    async fn upstream_401_propagates_status() {
        let (status, body) = send(app(Stub::Status(401)), "/weather?city=London").await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, error_json(FETCH_FAILED));
    }

    #[tokio::test]
    async fn transport_failure_maps_to_502() {
        let (status, body) = send(app(Stub::Unreachable), "/weather?city=London").await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body, error_json(FETCH_FAILED));
    }

    #[tokio::test]
    async fn non_json_upstream_body_maps_to_502() {
        let (status, body) = send(app(Stub::BadBody), "/weather?city=London").await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body, error_json(FETCH_FAILED));
    }

    #[tokio::test]
    async fn identical_requests_get_identical_responses() {
        let app = app(Stub::Payload(json!({"main": {"temp": 15.2}})));

        let first = send(app.clone(), "/weather?city=London").await;
        let second = send(app, "/weather?city=London").await;

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn responses_allow_any_origin() {
        let request = Request::builder()
            .uri("/weather?city=London")
            .header(header::ORIGIN, "http://example.com")
            .body(Body::empty())
            .unwrap();
        let response = app(Stub::Payload(json!({}))).oneshot(request).await.unwrap();

        let allow_origin = response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .expect("CORS header must be present");
        assert_eq!(allow_origin, "*");
    }

    #[tokio::test]
    async fn health_answers_without_a_provider_call() {
        let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let response = app(Stub::Status(500)).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&bytes[..], b"ok");
    }
}
