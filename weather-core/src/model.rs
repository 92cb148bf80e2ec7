use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Result, WeatherError};

/// One request for a city's temperature.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherQuery {
    city: String,
    reference_time: Option<NaiveDateTime>,
}

impl WeatherQuery {
    pub fn new(city: impl Into<String>, reference_time: Option<NaiveDateTime>) -> Result<Self> {
        let city = city.into();
        if city.trim().is_empty() {
            return Err(WeatherError::malformed("city name must not be empty"));
        }

        Ok(Self { city, reference_time })
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    /// When the reading was asked for. Informational only: the upstream
    /// endpoint always answers with current conditions.
    pub fn reference_time(&self) -> Option<NaiveDateTime> {
        self.reference_time
    }
}

/// The upstream JSON exactly as received, before any schema checks.
#[derive(Debug, Clone, PartialEq)]
pub struct RawWeatherDocument(Value);

impl RawWeatherDocument {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

/// A temperature in degrees Celsius. Always finite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ReadingFields")]
pub struct TemperatureReading {
    celsius: f64,
}

#[derive(Deserialize)]
struct ReadingFields {
    celsius: f64,
}

impl TryFrom<ReadingFields> for TemperatureReading {
    type Error = String;

    fn try_from(fields: ReadingFields) -> std::result::Result<Self, Self::Error> {
        Self::new(fields.celsius)
            .ok_or_else(|| format!("temperature must be finite, got {}", fields.celsius))
    }
}

impl TemperatureReading {
    pub fn new(celsius: f64) -> Option<Self> {
        celsius.is_finite().then_some(Self { celsius })
    }

    pub fn celsius(&self) -> f64 {
        self.celsius
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_rejects_blank_city() {
        let err = WeatherQuery::new("   ", None).unwrap_err();
        assert!(err.to_string().contains("city name must not be empty"));
    }

    #[test]
    fn query_keeps_city_verbatim() {
        let q = WeatherQuery::new("New York", None).expect("valid query");
        assert_eq!(q.city(), "New York");
        assert!(q.reference_time().is_none());
    }

    #[test]
    fn reading_rejects_non_finite_values() {
        assert!(TemperatureReading::new(f64::NAN).is_none());
        assert!(TemperatureReading::new(f64::INFINITY).is_none());
        assert_eq!(TemperatureReading::new(-3.25).map(|r| r.celsius()), Some(-3.25));
    }

    #[test]
    fn deserialized_reading_must_be_finite() {
        for input in ["celsius = nan", "celsius = inf", "celsius = -inf"] {
            let err = toml::from_str::<TemperatureReading>(input).unwrap_err();
            assert!(err.to_string().contains("temperature must be finite"), "input {input}: {err}");
        }

        let reading: TemperatureReading = toml::from_str("celsius = 15.5").unwrap();
        assert_eq!(reading.celsius(), 15.5);
    }
}
