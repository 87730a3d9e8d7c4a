use serde::{Deserialize, Serialize};

/// A single current-weather lookup, built per incoming request.
///
/// The city is guaranteed non-empty; construction fails otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherQuery {
    city: String,
}

impl WeatherQuery {
    pub fn new(city: String) -> Option<Self> {
        if city.is_empty() { None } else { Some(Self { city }) }
    }

    pub fn city(&self) -> &str {
        &self.city
    }
}

/// JSON error body returned to callers, serialized as `{"error": "..."}`.
///
/// The HTTP status code travels on the response itself, not in the body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self { error: message.into() }
    }
}
