//! Device-local storage trait for pluggable persistence backends.

use async_trait::async_trait;

use crate::result::AppResult;

/// Trait for device-local key/value persistence.
///
/// Implementations exist for the local filesystem and for in-memory
/// storage (tests). The [`DeviceStorage`] trait is defined here in
/// `shopfront-core` and implemented in `shopfront-storage`.
///
/// Absence of a key is a normal outcome and is reported as `Ok(None)`,
/// never as an error.
#[async_trait]
pub trait DeviceStorage: Send + Sync + std::fmt::Debug + 'static {
    /// Return the provider type name (e.g., "file", "memory").
    fn provider_type(&self) -> &str;

    /// Read the value stored under a key.
    async fn read(&self, key: &str) -> AppResult<Option<String>>;

    /// Write a value under a key, replacing any previous value.
    async fn write(&self, key: &str, value: &str) -> AppResult<()>;

    /// Delete the value under a key. Deleting an absent key is not an error.
    async fn delete(&self, key: &str) -> AppResult<()>;
}
