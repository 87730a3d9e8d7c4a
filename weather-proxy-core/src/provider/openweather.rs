use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;

use crate::{error::ProviderError, model::WeatherQuery};

use super::CurrentWeather;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

/// Client-side cap on a single upstream call; there are no retries.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string())
    }

    /// Point the client at a different host. Tests use this to target a
    /// local mock server.
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            api_key,
            base_url,
            http: Client::new(),
        }
    }

    async fn fetch_current(&self, query: &WeatherQuery) -> Result<Value, ProviderError> {
        let url = format!("{}/weather", self.base_url);

        let res = self
            .http
            .get(&url)
            .query(&[
                ("q", query.city()),
                ("appid", self.api_key.as_str()),
                ("lang", "pt_br"),
                ("units", "metric"),
            ])
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;

        let status = res.status();
        if status != StatusCode::OK {
            return Err(ProviderError::Status { status: status.as_u16() });
        }

        let body = res.text().await?;
        let payload: Value = serde_json::from_str(&body)?;

        Ok(payload)
    }
}

#[async_trait]
impl CurrentWeather for OpenWeatherProvider {
    async fn current(&self, query: &WeatherQuery) -> Result<Value, ProviderError> {
        self.fetch_current(query).await
    }
}
