use async_trait::async_trait;
use moka::future::Cache;
use std::{fmt, time::Duration};

use super::CacheStore;

/// In-process cache for local runs without Redis.
#[derive(Clone)]
pub struct MemoryCache {
    cache: Cache<String, String>,
    ttl: Duration,
}

impl fmt::Debug for MemoryCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryCache")
            .field("entries", &self.cache.entry_count())
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl MemoryCache {
    pub fn new(max_entries: u64, ttl: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_entries)
            .time_to_live(ttl)
            .build();

        Self { cache, ttl }
    }
}

#[async_trait]
impl CacheStore for MemoryCache {
    async fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        Ok(self.cache.get(key).await)
    }

    async fn set(&self, key: &str, value: String) -> anyhow::Result<()> {
        self.cache.insert(key.to_string(), value).await;
        Ok(())
    }
}
