//! Cache, fetch, normalize, cache-write.

use serde::{Serialize, de::DeserializeOwned};
use std::sync::Arc;

use crate::{
    cache::{self, CacheStore},
    error::WeatherError,
    model::{CitySuggestion, ForecastDays, WeatherObservation},
    normalize,
    provider::WeatherProvider,
};

/// Request handler shared by the HTTP routes and the one-shot CLI commands.
///
/// Provider and cache are built once at startup and injected here.
#[derive(Debug, Clone)]
pub struct WeatherService {
    provider: Arc<dyn WeatherProvider>,
    cache: Arc<dyn CacheStore>,
}

impl WeatherService {
    pub fn new(provider: Arc<dyn WeatherProvider>, cache: Arc<dyn CacheStore>) -> Self {
        Self { provider, cache }
    }

    /// Current conditions for a city name or `"lat,lon"`.
    pub async fn current_weather(&self, location: &str) -> Result<WeatherObservation, WeatherError> {
        let key = cache::weather_key(location);

        if let Some(hit) = self.cached::<WeatherObservation>(&key).await {
            return Ok(hit);
        }

        let payload = self.provider.current(location).await.inspect_err(|e| {
            tracing::error!(%location, error = %e, "Error fetching weather data");
        })?;

        let observation = normalize::current_observation(&payload).inspect_err(|e| {
            tracing::error!(%location, error = %e, "Invalid data received from provider");
        })?;

        self.store(&key, &observation).await;
        Ok(observation)
    }

    /// Daily forecast; `days` must be 1, 3 or 7 and is checked before any I/O.
    pub async fn forecast(
        &self,
        location: &str,
        days: u32,
    ) -> Result<Vec<WeatherObservation>, WeatherError> {
        let days = ForecastDays::try_from(days)?;
        let key = cache::forecast_key(location, days);

        if let Some(hit) = self.cached::<Vec<WeatherObservation>>(&key).await {
            return Ok(hit);
        }

        let payload = self.provider.forecast(location, days).await.inspect_err(|e| {
            tracing::error!(%location, %days, error = %e, "Error fetching forecast data");
        })?;

        let forecast = normalize::forecast_observations(&payload).inspect_err(|e| {
            tracing::error!(%location, %days, error = %e, "Invalid forecast data received from provider");
        })?;

        self.store(&key, &forecast).await;
        Ok(forecast)
    }

    /// City-name suggestions for free text. Never cached.
    pub async fn suggestions(&self, query: &str) -> Result<Vec<CitySuggestion>, WeatherError> {
        let payload = self.provider.search(query).await.inspect_err(|e| {
            tracing::error!(%query, error = %e, "Error fetching city suggestions");
        })?;

        let suggestions = normalize::city_suggestions(&payload).inspect_err(|e| {
            tracing::error!(%query, error = %e, "Invalid search data received from provider");
        })?;

        if suggestions.is_empty() {
            tracing::warn!(%query, "No city suggestions found");
            return Err(WeatherError::NotFound("No suggestions found.".to_string()));
        }

        Ok(suggestions)
    }

    /// Read and decode a cache entry. Read failures and entries that no
    /// longer decode both count as a miss, so the caller re-fetches and
    /// overwrites the entry.
    async fn cached<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.cache.get(key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                tracing::debug!(%key, "Cache MISS");
                return None;
            }
            Err(e) => {
                let error = format!("{e:#}");
                tracing::warn!(%key, %error, "Error accessing cache");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => {
                tracing::debug!(%key, "Cache HIT");
                Some(value)
            }
            Err(e) => {
                tracing::warn!(%key, error = %e, "Discarding undecodable cache entry");
                None
            }
        }
    }

    async fn store<T: Serialize>(&self, key: &str, value: &T) {
        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(%key, error = %e, "Failed to serialize cache entry");
                return;
            }
        };

        if let Err(e) = self.cache.set(key, raw).await {
            let error = format!("{e:#}");
            tracing::warn!(%key, %error, "Error saving data to cache");
        }
    }
}
