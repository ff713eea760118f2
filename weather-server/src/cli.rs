use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode, Select};
use std::sync::Arc;
use weather_core::{
    CacheBackend, Config, WeatherProvider, WeatherService, cache_from_config, provider_from_config,
};

use crate::{output, server};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Caching proxy for WeatherAPI.com")]
pub struct Cli {
    /// Print raw JSON instead of human-readable text.
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP proxy.
    Serve {
        /// Address to bind, e.g. "127.0.0.1:8000". Overrides the config file.
        #[arg(long)]
        listen: Option<String>,
    },

    /// Store the WeatherAPI.com API key and cache backend in the config file.
    Configure,

    /// Show current weather for a city name or "lat,lon".
    Current { location: String },

    /// Show the daily forecast for a location.
    Forecast {
        location: String,

        /// Number of days: 1, 3 or 7.
        #[arg(long, default_value_t = 3)]
        days: u32,
    },

    /// Suggest city names matching free text.
    Suggest { query: String },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Serve { listen } => {
                let mut config = Config::load()?;
                if let Some(addr) = listen {
                    config.server.listen_addr = addr;
                }
                server::serve(&config).await
            }
            Command::Current { location } => {
                let service = build_service(&Config::load()?)?;
                let obs = service.current_weather(&location).await?;
                if self.json {
                    println!("{}", serde_json::to_string_pretty(&obs)?);
                } else {
                    println!("{}", output::observation(&obs));
                }
                Ok(())
            }
            Command::Forecast { location, days } => {
                let service = build_service(&Config::load()?)?;
                let forecast = service.forecast(&location, days).await?;
                if self.json {
                    println!("{}", serde_json::to_string_pretty(&forecast)?);
                } else {
                    println!("{}", output::forecast(&forecast));
                }
                Ok(())
            }
            Command::Suggest { query } => {
                let service = build_service(&Config::load()?)?;
                let suggestions = service.suggestions(&query).await?;
                if self.json {
                    println!("{}", serde_json::to_string_pretty(&suggestions)?);
                } else {
                    println!("{}", output::suggestions(&suggestions));
                }
                Ok(())
            }
        }
    }
}

/// Build the provider and cache once and hand them to the service.
pub fn build_service(config: &Config) -> Result<WeatherService> {
    let provider: Arc<dyn WeatherProvider> = Arc::from(provider_from_config(config)?);
    let cache = cache_from_config(&config.cache).context("Failed to set up cache")?;

    tracing::debug!(?provider, ?cache, "Weather service ready");
    Ok(WeatherService::new(provider, cache))
}

fn configure() -> Result<()> {
    // Only the file is rewritten; environment overrides stay out of it.
    let mut config = Config::load_file()?;

    let api_key = Password::new("WeatherAPI.com API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;
    config.set_api_key(api_key.trim().to_string());

    let backends = vec![CacheBackend::Redis, CacheBackend::Memory, CacheBackend::None];
    let current = backends
        .iter()
        .position(|b| *b == config.cache.backend)
        .unwrap_or(0);
    let backend = Select::new("Cache backend:", backends)
        .with_starting_cursor(current)
        .prompt()
        .context("Failed to read cache backend")?;
    config.cache.backend = backend;

    config.save()?;
    println!("Configuration saved to {}", Config::config_file_path()?.display());
    Ok(())
}
