use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{info, warn};

use crate::{
    client::WeatherClient,
    error::{Result, WeatherError},
    extract::TemperatureExtractor,
    model::WeatherQuery,
};

pub const TOOL_NAME: &str = "weather_forecast";
pub const TOOL_DESCRIPTION: &str = "Returns the weather forecast for a given city";

/// How an agent framework advertises the capability to a model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub parameters: Value,
    pub returns: &'static str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ForecastArguments {
    city: String,
    local_date_time: NaiveDateTime,
}

/// The temperature lookup an agent may call mid-conversation.
///
/// Stateless: clones share the client's transport and configuration, and
/// nothing is remembered between calls.
#[derive(Debug, Clone)]
pub struct WeatherCapability {
    client: WeatherClient,
    extractor: TemperatureExtractor,
}

impl WeatherCapability {
    pub fn new(client: WeatherClient) -> Self {
        Self { client, extractor: TemperatureExtractor::new() }
    }

    /// Current temperature in Celsius for `city`.
    ///
    /// `reference_time` is only logged. The upstream endpoint reports current
    /// conditions, so asking for another time still yields "now".
    pub async fn invoke(&self, city: &str, reference_time: NaiveDateTime) -> Result<f64> {
        info!(city, %reference_time, "--> Getting weather forecast");

        let outcome = self
            .client
            .fetch(city)
            .await
            .and_then(|document| self.extractor.extract(&document, city));

        match &outcome {
            Ok(reading) => {
                info!(city, %reference_time, temperature = reading.celsius(), "<-- Weather forecast")
            }
            Err(e) => warn!(city, %reference_time, kind = %e.kind(), error = %e, "<-- Weather forecast failed"),
        }

        outcome.map(|reading| reading.celsius())
    }

    pub async fn invoke_query(&self, query: &WeatherQuery) -> Result<f64> {
        let when = query.reference_time().unwrap_or_else(|| Local::now().naive_local());
        self.invoke(query.city(), when).await
    }

    pub fn descriptor() -> ToolDescriptor {
        ToolDescriptor {
            name: TOOL_NAME,
            description: TOOL_DESCRIPTION,
            parameters: json!({
                "type": "object",
                "properties": {
                    "city": {
                        "type": "string",
                        "description": "Name of the city, e.g. \"New York\""
                    },
                    "localDateTime": {
                        "type": "string",
                        "format": "date-time",
                        "description": "Local date and time the forecast is wanted for, e.g. \"2024-05-14T12:00:00\""
                    }
                },
                "required": ["city", "localDateTime"]
            }),
            returns: "number",
        }
    }

    /// Tool-call entry point: `{"city": ..., "localDateTime": ...}` in, a JSON number out.
    pub async fn call(&self, arguments: Value) -> Result<Value> {
        let args: ForecastArguments = serde_json::from_value(arguments).map_err(|e| {
            WeatherError::MalformedResponse { reason: format!("invalid tool arguments: {e}") }
        })?;

        let query = WeatherQuery::new(args.city, Some(args.local_date_time))?;
        let celsius = self.invoke_query(&query).await?;
        Ok(json!(celsius))
    }
}
