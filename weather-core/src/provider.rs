use crate::{Config, error::WeatherError, model::ForecastDays};
use async_trait::async_trait;
use serde_json::Value;
use std::fmt::Debug;

pub mod weatherapi;

pub use weatherapi::WeatherApiProvider;

/// Remote weather data source.
///
/// Implementations only report transport problems; the returned payload is
/// raw provider JSON and is validated by [`crate::normalize`].
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Current conditions for a city name or `"lat,lon"`.
    async fn current(&self, location: &str) -> Result<Value, WeatherError>;

    async fn forecast(&self, location: &str, days: ForecastDays) -> Result<Value, WeatherError>;

    /// Free-text location search.
    async fn search(&self, query: &str) -> Result<Value, WeatherError>;
}

/// Construct the WeatherAPI.com provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let api_key = config.require_api_key()?;
    let provider = WeatherApiProvider::new(api_key.to_owned(), config.provider.base_url.clone());
    Ok(Box::new(provider))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_from_config_errors_when_missing_api_key() {
        let cfg = Config::default();
        let err = provider_from_config(&cfg).unwrap_err();
        assert!(err.to_string().contains("No WeatherAPI.com API key configured"));
    }

    #[test]
    fn provider_from_config_works_when_key_set() {
        let mut cfg = Config::default();
        cfg.set_api_key("KEY".to_string());

        assert!(provider_from_config(&cfg).is_ok());
    }
}
