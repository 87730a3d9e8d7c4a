use crate::{error::ProviderError, model::WeatherQuery};
use async_trait::async_trait;
use serde_json::Value;
use std::fmt::Debug;

pub mod openweather;

/// Source of current-weather payloads, keyed by city name.
///
/// The HTTP handler depends only on this trait, so tests can substitute a
/// stub without a network.
#[async_trait]
pub trait CurrentWeather: Send + Sync + Debug {
    /// Fetch the current weather for `query`, returning the provider's JSON
    /// payload verbatim.
    async fn current(&self, query: &WeatherQuery) -> Result<Value, ProviderError>;
}
