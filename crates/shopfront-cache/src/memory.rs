//! In-memory query cache implementation using the moka crate.

use async_trait::async_trait;
use dashmap::DashSet;
use moka::future::Cache;
use std::time::Duration;
use tracing::debug;

use shopfront_core::config::CacheConfig;
use shopfront_core::result::AppResult;
use shopfront_core::traits::cache::QueryCache;

/// In-memory query cache provider using moka.
///
/// Cached values and staleness flags are tracked separately: marking a
/// key stale keeps its value available for display while signalling
/// consumers to refetch.
#[derive(Debug)]
pub struct MemoryQueryCache {
    /// The underlying moka cache.
    cache: Cache<String, String>,
    /// Keys currently flagged stale.
    stale: DashSet<String>,
}

impl MemoryQueryCache {
    /// Create a new in-memory query cache from configuration.
    pub fn new(config: &CacheConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(config.max_capacity)
            .time_to_live(Duration::from_secs(config.time_to_live_seconds))
            .build();

        Self {
            cache,
            stale: DashSet::new(),
        }
    }
}

#[async_trait]
impl QueryCache for MemoryQueryCache {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.cache.get(key).await)
    }

    async fn set(&self, key: &str, value: &str) -> AppResult<()> {
        self.cache.insert(key.to_string(), value.to_string()).await;
        self.stale.remove(key);
        Ok(())
    }

    async fn remove(&self, key: &str) -> AppResult<()> {
        self.cache.invalidate(key).await;
        self.stale.remove(key);
        Ok(())
    }

    async fn mark_stale(&self, key: &str) -> AppResult<()> {
        self.stale.insert(key.to_string());
        debug!(key, "Marked query cache stale");
        Ok(())
    }

    async fn is_stale(&self, key: &str) -> AppResult<bool> {
        Ok(self.stale.contains(key))
    }
}
