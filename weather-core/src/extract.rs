//! Temperature extraction from an untrusted weather document.
//!
//! Only `main.temp` is looked at. Each lookup is a separate fallible step so
//! that the first anomaly decides the error message.

use serde_json::Value;
use tracing::warn;

use crate::{
    error::{Result, WeatherError},
    model::{RawWeatherDocument, TemperatureReading},
};

#[derive(Debug, Clone, Copy, Default)]
pub struct TemperatureExtractor;

impl TemperatureExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Pure: the same document and city always give the same outcome.
    pub fn extract(&self, document: &RawWeatherDocument, city: &str) -> Result<TemperatureReading> {
        let root = document.as_value();

        let main = field(root, "main").ok_or_else(|| {
            reject(city, root, format!("weather data for city '{city}' is missing 'main' object"))
        })?;

        let temp = field(main, "temp").ok_or_else(|| {
            reject(
                city,
                root,
                format!("weather data for city '{city}' is missing 'temp' field in 'main' object"),
            )
        })?;

        temp.as_f64()
            .and_then(TemperatureReading::new)
            .ok_or_else(|| {
                reject(city, root, format!("temperature field for city '{city}' is not a number"))
            })
    }
}

/// Present and not JSON `null`. Non-object parents simply have no fields.
fn field<'a>(node: &'a Value, name: &str) -> Option<&'a Value> {
    node.get(name).filter(|v| !v.is_null())
}

fn reject(city: &str, document: &Value, reason: String) -> WeatherError {
    warn!(city, response = %document, "{reason}");
    WeatherError::malformed(reason)
}
