//! Core library for the weather proxy.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The WeatherAPI.com provider client
//! - Normalization of provider payloads into fixed output shapes
//! - The expiring cache in front of the provider
//! - [`WeatherService`], which ties the above together per request
//!
//! It is used by `weather-server`, both for the HTTP proxy and the one-shot
//! CLI commands.

pub mod cache;
pub mod config;
pub mod error;
pub mod model;
pub mod normalize;
pub mod provider;
pub mod service;

#[cfg(test)]
mod test_support;

pub use cache::{CacheStore, MemoryCache, NoCache, RedisCache, cache_from_config};
pub use config::{CacheBackend, CacheConfig, Config, ProviderConfig, ServerConfig};
pub use error::{ErrorKind, WeatherError};
pub use model::{CitySuggestion, ForecastDays, WeatherObservation};
pub use provider::{WeatherApiProvider, WeatherProvider, provider_from_config};
pub use service::WeatherService;
