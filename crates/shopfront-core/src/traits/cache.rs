//! Query cache trait for screen-facing data caches.

use async_trait::async_trait;

use crate::result::AppResult;

/// Trait for the named query caches consumed by data-fetching code.
///
/// Entries carry an independent staleness flag: `mark_stale` never removes
/// the cached value, it only tells consumers they must refetch. `set`
/// clears the flag for the key it writes.
#[async_trait]
pub trait QueryCache: Send + Sync + std::fmt::Debug + 'static {
    /// Read a cached query result.
    async fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Store a query result and clear its staleness flag.
    async fn set(&self, key: &str, value: &str) -> AppResult<()>;

    /// Remove a cached entry and its staleness flag.
    async fn remove(&self, key: &str) -> AppResult<()>;

    /// Flag a key as stale so dependent consumers refetch.
    async fn mark_stale(&self, key: &str) -> AppResult<()>;

    /// Whether a key is currently flagged stale.
    async fn is_stale(&self, key: &str) -> AppResult<bool>;
}
