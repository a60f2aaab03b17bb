//! Local filesystem storage provider.

use std::path::PathBuf;

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::StreamExt;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio_util::io::ReaderStream;
use tracing::debug;

use nexus_core::error::{AppError, ErrorKind};
use nexus_core::result::AppResult;
use nexus_core::traits::{ByteStream, StorageProvider};
use nexus_core::types::StoredRef;

use super::{is_safe_reference, new_reference};

/// Stores each upload as one file directly under a root directory.
#[derive(Debug, Clone)]
pub struct LocalStorageProvider {
    root: PathBuf,
}

impl LocalStorageProvider {
    /// Create a provider rooted at `root_path`, creating the directory.
    pub async fn new(root_path: &str) -> AppResult<Self> {
        let root = PathBuf::from(root_path);
        fs::create_dir_all(&root).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::StorageUnavailable,
                format!("Failed to create storage root: {}", root.display()),
                e,
            )
        })?;
        Ok(Self { root })
    }

    /// Resolve a reference to a path inside the root.
    fn resolve(&self, stored_ref: &StoredRef) -> AppResult<PathBuf> {
        if !is_safe_reference(stored_ref.as_str()) {
            return Err(AppError::not_found(format!(
                "Stored content not found: {stored_ref}"
            )));
        }
        Ok(self.root.join(stored_ref.as_str()))
    }
}

fn io_error(action: &str, stored_ref: &StoredRef, e: std::io::Error) -> AppError {
    if e.kind() == std::io::ErrorKind::NotFound {
        AppError::not_found(format!("Stored content not found: {stored_ref}"))
    } else {
        AppError::with_source(
            ErrorKind::StorageUnavailable,
            format!("Failed to {action} {stored_ref}"),
            e,
        )
    }
}

#[async_trait]
impl StorageProvider for LocalStorageProvider {
    fn provider_type(&self) -> &str {
        "local"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(fs::metadata(&self.root)
            .await
            .map(|m| m.is_dir())
            .unwrap_or(false))
    }

    async fn put(&self, name_hint: &str, data: Bytes) -> AppResult<StoredRef> {
        let stored_ref = StoredRef::new(new_reference(name_hint));
        let path = self.resolve(&stored_ref)?;

        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
            .map_err(|e| io_error("create", &stored_ref, e))?;
        file.write_all(&data)
            .await
            .map_err(|e| io_error("write", &stored_ref, e))?;
        file.sync_all()
            .await
            .map_err(|e| io_error("flush", &stored_ref, e))?;

        debug!(stored_ref = %stored_ref, bytes = data.len(), "Stored content");
        Ok(stored_ref)
    }

    async fn read(&self, stored_ref: &StoredRef) -> AppResult<ByteStream> {
        let path = self.resolve(stored_ref)?;
        let file = fs::File::open(&path)
            .await
            .map_err(|e| io_error("open", stored_ref, e))?;
        let stream = ReaderStream::new(file);
        Ok(Box::pin(stream.map(|r| r.map(Bytes::from))))
    }

    async fn read_bytes(&self, stored_ref: &StoredRef) -> AppResult<Bytes> {
        let path = self.resolve(stored_ref)?;
        let data = fs::read(&path)
            .await
            .map_err(|e| io_error("read", stored_ref, e))?;
        Ok(Bytes::from(data))
    }

    async fn exists(&self, stored_ref: &StoredRef) -> AppResult<bool> {
        if !is_safe_reference(stored_ref.as_str()) {
            return Ok(false);
        }
        fs::try_exists(self.root.join(stored_ref.as_str()))
            .await
            .map_err(|e| io_error("stat", stored_ref, e))
    }

    async fn delete(&self, stored_ref: &StoredRef) -> AppResult<bool> {
        let path = match self.resolve(stored_ref) {
            Ok(path) => path,
            Err(_) => return Ok(false),
        };
        match fs::remove_file(&path).await {
            Ok(()) => {
                debug!(stored_ref = %stored_ref, "Deleted content");
                Ok(true)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(io_error("delete", stored_ref, e)),
        }
    }
}
