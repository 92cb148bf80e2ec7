use std::sync::Arc;

use reqwest::Url;
use serde_json::Value;
use tracing::{debug, error, warn};

use crate::{
    error::{Result, WeatherError},
    model::RawWeatherDocument,
    transport::{HttpReply, HttpTransport},
};

/// Where to send requests and which key to send. Fixed once the client exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub api_key: String,
}

/// Fetches the raw current-weather document for a city and classifies failures.
#[derive(Debug, Clone)]
pub struct WeatherClient {
    config: Arc<ClientConfig>,
    transport: Arc<dyn HttpTransport>,
}

impl WeatherClient {
    pub fn new(config: ClientConfig, transport: Arc<dyn HttpTransport>) -> Self {
        Self { config: Arc::new(config), transport }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// `<base_url>?q=<city>&units=metric&appid=<api_key>`, form-encoded.
    pub fn build_url(&self, city: &str) -> Result<Url> {
        Url::parse_with_params(
            &self.config.base_url,
            &[("q", city), ("units", "metric"), ("appid", self.config.api_key.as_str())],
        )
        .map_err(|e| WeatherError::NetworkError {
            city: city.to_string(),
            message: format!("invalid base URL '{}': {e}", self.config.base_url),
        })
    }

    /// One GET, no retry. The returned document is parsed but not validated.
    pub async fn fetch(&self, city: &str) -> Result<RawWeatherDocument> {
        if city.trim().is_empty() {
            return Err(WeatherError::malformed("city name must not be empty"));
        }

        let url = self.build_url(city)?;
        debug!(city, base_url = %self.config.base_url, "Requesting current weather");

        let reply = self.transport.get(&url).await.map_err(|e| {
            error!(city, error = %e, "Error fetching weather data");
            WeatherError::NetworkError { city: city.to_string(), message: e.message }
        })?;

        classify(city, reply)
    }
}

fn classify(city: &str, reply: HttpReply) -> Result<RawWeatherDocument> {
    match reply.status {
        200..=299 => parse_body(city, &reply.body),
        404 => {
            warn!(city, "City not found");
            Err(WeatherError::CityNotFound { city: city.to_string() })
        }
        401 => {
            error!("Invalid API key");
            Err(WeatherError::InvalidApiKey)
        }
        status => {
            let body = truncate_body(&reply.body);
            error!(city, status, body = %body, "Weather service returned an error status");
            Err(WeatherError::UpstreamError { city: city.to_string(), status, body })
        }
    }
}

fn parse_body(city: &str, body: &str) -> Result<RawWeatherDocument> {
    if body.trim().is_empty() {
        warn!(city, "Received empty body from weather service");
        return Err(WeatherError::malformed(format!(
            "received empty body from weather service for city '{city}'"
        )));
    }

    match serde_json::from_str::<Value>(body) {
        Ok(Value::Null) => {
            warn!(city, "Received null body from weather service");
            Err(WeatherError::malformed(format!(
                "received null body from weather service for city '{city}'"
            )))
        }
        Ok(value) => Ok(RawWeatherDocument::new(value)),
        Err(e) => {
            warn!(city, error = %e, body = %truncate_body(body), "Weather response is not JSON");
            Err(WeatherError::malformed(format!(
                "weather response for city '{city}' is not valid JSON: {e}"
            )))
        }
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
