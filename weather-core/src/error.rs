use serde::Serialize;
use thiserror::Error;

/// The closed set of failure categories a capability caller has to handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    CityNotFound,
    InvalidApiKey,
    UpstreamError,
    MalformedResponse,
    NetworkError,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::CityNotFound => "city_not_found",
            ErrorKind::InvalidApiKey => "invalid_api_key",
            ErrorKind::UpstreamError => "upstream_error",
            ErrorKind::MalformedResponse => "malformed_response",
            ErrorKind::NetworkError => "network_error",
        }
    }

    pub const fn all() -> &'static [ErrorKind] {
        &[
            ErrorKind::CityNotFound,
            ErrorKind::InvalidApiKey,
            ErrorKind::UpstreamError,
            ErrorKind::MalformedResponse,
            ErrorKind::NetworkError,
        ]
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Every failure of the fetch/extract pipeline, classified where it is detected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WeatherError {
    #[error("city '{city}' not found")]
    CityNotFound { city: String },

    #[error("invalid API key")]
    InvalidApiKey,

    #[error("weather service returned status {status} for city '{city}': {body}")]
    UpstreamError { city: String, status: u16, body: String },

    #[error("malformed response: {reason}")]
    MalformedResponse { reason: String },

    #[error("network error fetching weather for city '{city}': {message}")]
    NetworkError { city: String, message: String },
}

impl WeatherError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            WeatherError::CityNotFound { .. } => ErrorKind::CityNotFound,
            WeatherError::InvalidApiKey => ErrorKind::InvalidApiKey,
            WeatherError::UpstreamError { .. } => ErrorKind::UpstreamError,
            WeatherError::MalformedResponse { .. } => ErrorKind::MalformedResponse,
            WeatherError::NetworkError { .. } => ErrorKind::NetworkError,
        }
    }

    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        WeatherError::MalformedResponse { reason: reason.into() }
    }
}

pub type Result<T> = std::result::Result<T, WeatherError>;
