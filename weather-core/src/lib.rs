//! Core library for the `weather` temperature capability.
//!
//! This crate defines:
//! - A client for the OpenWeatherMap current-weather endpoint that classifies
//!   every failure into a closed [`ErrorKind`] set
//! - Defensive extraction of `main.temp` from the untyped response
//! - [`WeatherCapability`], the tool an agent layer can invoke
//! - Configuration & credentials handling
//!
//! It is used by `weather-cli`, but can also be reused by other binaries or services.

pub mod capability;
pub mod client;
pub mod config;
pub mod error;
pub mod extract;
pub mod model;
pub mod transport;

pub use capability::{ToolDescriptor, WeatherCapability};
pub use client::{ClientConfig, WeatherClient};
pub use config::Config;
pub use error::{ErrorKind, WeatherError};
pub use extract::TemperatureExtractor;
pub use model::{RawWeatherDocument, TemperatureReading, WeatherQuery};
pub use transport::{HttpReply, HttpTransport, ReqwestTransport, TransportError};

use std::sync::Arc;

/// Construct a client from config, talking HTTP through reqwest.
pub fn client_from_config(config: &Config) -> anyhow::Result<WeatherClient> {
    let transport = ReqwestTransport::new(config.timeout())?;
    Ok(WeatherClient::new(config.client_config(), Arc::new(transport)))
}

/// Construct the capability from config.
pub fn capability_from_config(config: &Config) -> anyhow::Result<WeatherCapability> {
    Ok(WeatherCapability::new(client_from_config(config)?))
}
