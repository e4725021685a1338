//! In-memory device storage provider, used by tests and the `"memory"`
//! provider setting.

use async_trait::async_trait;
use dashmap::DashMap;

use shopfront_core::result::AppResult;
use shopfront_core::traits::storage::DeviceStorage;

/// Device storage held entirely in memory.
#[derive(Debug, Default)]
pub struct MemoryStorageProvider {
    entries: DashMap<String, String>,
}

impl MemoryStorageProvider {
    /// Create an empty in-memory provider.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DeviceStorage for MemoryStorageProvider {
    fn provider_type(&self) -> &str {
        "memory"
    }

    async fn read(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.entries.get(key).map(|v| v.clone()))
    }

    async fn write(&self, key: &str, value: &str) -> AppResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}
