use anyhow::{Context, anyhow};
use chrono::NaiveDateTime;
use clap::{Parser, Subcommand};
use inquire::{Password, Text};
use tracing::{info, warn};
use weather_core::{
    Config, WeatherCapability, WeatherError, WeatherQuery, client_from_config,
    config::API_KEY_ENV,
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Current temperature lookup backed by OpenWeatherMap")]
pub struct Cli {
    /// Enable debug logging (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeatherMap API key and endpoint.
    Configure,

    /// Show the temperature for a city.
    Show {
        /// City name, e.g. "London" or "New York".
        city: String,

        /// Local date/time the reading is for (e.g. 2024-05-14T12:00:00); if absent, means "now".
        #[arg(long, value_parser = parse_local_datetime)]
        date: Option<NaiveDateTime>,
    },

    /// Print the unvalidated JSON document returned for a city.
    Raw {
        /// City name.
        city: String,
    },

    /// Print the tool descriptor an agent framework would register.
    Tool,

    /// Invoke the tool with JSON arguments, e.g. '{"city":"Paris","localDateTime":"2024-05-14T12:00:00"}'.
    Call {
        /// JSON object with `city` and `localDateTime`.
        arguments: String,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure()?,
            Command::Show { city, date } => {
                let capability = WeatherCapability::new(client_from_config(&load_config()?)?);
                let query = WeatherQuery::new(city, date).map_err(classified)?;
                if query.reference_time().is_some() {
                    info!("Upstream reports current conditions; --date is recorded but not sent");
                }

                let celsius = capability.invoke_query(&query).await.map_err(classified)?;
                println!("{}: {celsius:.1} °C", query.city());
            }
            Command::Raw { city } => {
                let client = client_from_config(&load_config()?)?;
                let document = client.fetch(&city).await.map_err(classified)?;
                println!("{}", serde_json::to_string_pretty(document.as_value())?);
            }
            Command::Tool => {
                println!("{}", serde_json::to_string_pretty(&WeatherCapability::descriptor())?);
            }
            Command::Call { arguments } => {
                let arguments: serde_json::Value =
                    serde_json::from_str(&arguments).context("Tool arguments must be JSON")?;
                let capability = WeatherCapability::new(client_from_config(&load_config()?)?);
                let result = capability.call(arguments).await.map_err(classified)?;
                println!("{result}");
            }
        }

        Ok(())
    }
}

fn load_config() -> anyhow::Result<Config> {
    let mut config = Config::load()?;
    config.apply_env(|key| std::env::var(key).ok());

    if !config.is_configured() {
        warn!(
            "No API key configured. Hint: run `weather configure` or set {API_KEY_ENV}; \
             the request will be rejected as unauthorized."
        );
    }

    Ok(config)
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeatherMap API key:")
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;
    if api_key.trim().is_empty() {
        return Err(anyhow!("API key must not be empty"));
    }

    let base_url = Text::new("Weather endpoint:")
        .with_default(&config.base_url)
        .prompt()
        .context("Failed to read endpoint")?;

    config.set_api_key(api_key.trim().to_string());
    config.base_url = base_url.trim().to_string();
    config.save()?;

    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

fn classified(err: WeatherError) -> anyhow::Error {
    anyhow!("[{}] {err}", err.kind())
}

fn parse_local_datetime(s: &str) -> Result<NaiveDateTime, String> {
    const FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"];

    FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .ok_or_else(|| format!("'{s}' is not a local date/time like 2024-05-14T12:00:00"))
}
