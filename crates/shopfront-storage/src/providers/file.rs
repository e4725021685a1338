//! File-backed device storage provider.

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use shopfront_core::error::{AppError, ErrorKind};
use shopfront_core::result::AppResult;
use shopfront_core::traits::storage::DeviceStorage;

/// Device storage backed by one file per key under a data directory.
#[derive(Debug, Clone)]
pub struct FileStorageProvider {
    /// Root directory for all persisted values.
    root: PathBuf,
}

impl FileStorageProvider {
    /// Create a new file storage provider rooted at the given path.
    pub async fn new(data_dir: &str) -> AppResult<Self> {
        let root = PathBuf::from(data_dir);
        fs::create_dir_all(&root).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create storage root: {}", root.display()),
                e,
            )
        })?;
        Ok(Self { root })
    }

    /// Resolve a storage key to a file path within the root.
    ///
    /// Keys are dotted names like `auth.token`; path separators are
    /// rejected by replacement so a key can never escape the root.
    fn resolve(&self, key: &str) -> PathBuf {
        let clean: String = key
            .chars()
            .map(|c| if c == '/' || c == '\\' { '_' } else { c })
            .collect();
        self.root.join(clean)
    }
}

#[async_trait]
impl DeviceStorage for FileStorageProvider {
    fn provider_type(&self) -> &str {
        "file"
    }

    async fn read(&self, key: &str) -> AppResult<Option<String>> {
        let path = self.resolve(key);
        match fs::read_to_string(&path).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to read key: {key}"),
                e,
            )),
        }
    }

    async fn write(&self, key: &str, value: &str) -> AppResult<()> {
        let path = self.resolve(key);
        fs::write(&path, value).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to write key: {key}"),
                e,
            )
        })?;
        debug!(key, bytes = value.len(), "Wrote storage key");
        Ok(())
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        let path = self.resolve(key);
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to delete key: {key}"),
                e,
            )),
        }
    }
}
