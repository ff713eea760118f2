//! Expiring key-value store used opportunistically in front of the provider.

use async_trait::async_trait;
use std::{fmt::Debug, sync::Arc, time::Duration};

use crate::{
    config::{CacheBackend, CacheConfig},
    model::ForecastDays,
};

pub mod memory;
pub mod redis;

pub use memory::MemoryCache;
pub use self::redis::RedisCache;

/// String store with a fixed, store-wide time-to-live.
///
/// Errors are reported to the caller, which is expected to log and ignore
/// them: nothing may depend on the cache for correctness.
#[async_trait]
pub trait CacheStore: Send + Sync + Debug {
    async fn get(&self, key: &str) -> anyhow::Result<Option<String>>;

    /// Insert or overwrite `key`; the entry expires after the store's TTL.
    async fn set(&self, key: &str, value: String) -> anyhow::Result<()>;
}

/// Store that never holds anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCache;

#[async_trait]
impl CacheStore for NoCache {
    async fn get(&self, _key: &str) -> anyhow::Result<Option<String>> {
        Ok(None)
    }

    async fn set(&self, _key: &str, _value: String) -> anyhow::Result<()> {
        Ok(())
    }
}

pub fn weather_key(location: &str) -> String {
    format!("weather:{location}")
}

pub fn forecast_key(location: &str, days: ForecastDays) -> String {
    format!("forecast:{location}:{days}")
}

/// Build the configured backend. Redis connects lazily, so this does not
/// fail when the server is down.
pub fn cache_from_config(config: &CacheConfig) -> anyhow::Result<Arc<dyn CacheStore>> {
    if config.ttl_secs == 0 && config.backend != CacheBackend::None {
        anyhow::bail!("cache.ttl_secs must be at least 1 second");
    }
    let ttl = Duration::from_secs(config.ttl_secs);

    let cache: Arc<dyn CacheStore> = match config.backend {
        CacheBackend::Redis => Arc::new(RedisCache::new(&config.redis_url, ttl)?),
        CacheBackend::Memory => Arc::new(MemoryCache::new(config.max_entries, ttl)),
        CacheBackend::None => Arc::new(NoCache),
    };

    Ok(cache)
}
