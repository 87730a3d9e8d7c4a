use thiserror::Error;

/// Failures produced by a call to the upstream weather provider.
///
/// Exactly one variant per outcome the HTTP layer distinguishes: an upstream
/// status to propagate, or a failure that never yielded a status at all.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The provider answered with a non-200 status. Its body is discarded.
    #[error("OpenWeatherMap request failed with status {status}")]
    Status { status: u16 },

    /// The request never produced a status code (DNS failure, connection
    /// refused, timeout).
    #[error("failed to reach OpenWeatherMap: {0}")]
    Transport(#[from] reqwest::Error),

    /// The provider said 200 but the body was not valid JSON.
    #[error("failed to decode OpenWeatherMap response body: {0}")]
    Decode(#[from] serde_json::Error),
}
