use anyhow::{Context, Result, anyhow, bail};
use async_trait::async_trait;
use parking_lot::Mutex;
use redis::{AsyncCommands, aio::ConnectionManager};
use std::{
    fmt,
    time::{Duration, Instant},
};

use super::CacheStore;

/// Upper bound on a single connection attempt.
pub const CONNECT_TIMEOUT: Duration = Duration::from_millis(500);

/// After a failed attempt, calls fail immediately for this long.
pub const RECONNECT_COOLDOWN: Duration = Duration::from_secs(5);

#[derive(Default)]
struct ConnState {
    conn: Option<ConnectionManager>,
    retry_after: Option<Instant>,
}

/// Redis-backed cache using `SETEX`.
///
/// The connection manager is created on first use with a single, bounded
/// attempt. While Redis is unreachable every call fails fast, and a new
/// attempt is made at most once per [`RECONNECT_COOLDOWN`].
pub struct RedisCache {
    client: redis::Client,
    state: Mutex<ConnState>,
    ttl: Duration,
}

impl fmt::Debug for RedisCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedisCache")
            .field("addr", &self.client.get_connection_info().addr)
            .field("ttl", &self.ttl)
            .field("conn", &"<ConnectionManager>")
            .finish()
    }
}

impl RedisCache {
    pub fn new(redis_url: &str, ttl: Duration) -> Result<Self> {
        let client = redis::Client::open(redis_url).context("Invalid Redis URL")?;
        Ok(Self {
            client,
            state: Mutex::new(ConnState::default()),
            ttl,
        })
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    // The lock is never held across an await.
    async fn connection(&self) -> Result<ConnectionManager> {
        {
            let state = self.state.lock();
            if let Some(conn) = state.conn.as_ref() {
                return Ok(conn.clone());
            }
            if let Some(until) = state.retry_after {
                let now = Instant::now();
                if now < until {
                    bail!(
                        "Redis unavailable, next connection attempt in {:?}",
                        until - now
                    );
                }
            }
        }

        // exponent base 2, factor 100ms, zero retries: one attempt only
        let attempt = tokio::time::timeout(
            CONNECT_TIMEOUT,
            ConnectionManager::new_with_backoff(self.client.clone(), 2, 100, 0),
        )
        .await;

        let mut state = self.state.lock();
        match attempt {
            Ok(Ok(conn)) => {
                tracing::info!(ttl_secs = self.ttl.as_secs(), "Redis connection established");
                state.retry_after = None;
                let conn = state.conn.get_or_insert(conn).clone();
                Ok(conn)
            }
            Ok(Err(e)) => {
                state.retry_after = Some(Instant::now() + RECONNECT_COOLDOWN);
                Err(anyhow!(e).context("Failed to connect to Redis"))
            }
            Err(_) => {
                state.retry_after = Some(Instant::now() + RECONNECT_COOLDOWN);
                Err(anyhow!("Timed out connecting to Redis after {CONNECT_TIMEOUT:?}"))
            }
        }
    }
}

#[async_trait]
impl CacheStore for RedisCache {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.connection().await?;
        conn.get::<_, Option<String>>(key)
            .await
            .with_context(|| format!("Redis GET failed for key {key}"))
    }

    async fn set(&self, key: &str, value: String) -> Result<()> {
        let mut conn = self.connection().await?;
        conn.set_ex::<_, _, ()>(key, value, self.ttl.as_secs())
            .await
            .with_context(|| format!("Redis SETEX failed for key {key}"))
    }
}
