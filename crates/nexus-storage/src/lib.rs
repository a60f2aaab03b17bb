//! # nexus-storage
//!
//! Implementations of [`nexus_core::traits::StorageProvider`] for uploaded
//! file content, plus construction of the configured provider.

pub mod mime;
pub mod providers;

use std::sync::Arc;

use tracing::info;

use nexus_core::config::{StorageBackend, StorageConfig};
use nexus_core::result::AppResult;
use nexus_core::traits::StorageProvider;

pub use providers::{LocalStorageProvider, MemoryStorageProvider};

/// Build the provider selected by `config.provider`.
pub async fn build_provider(config: &StorageConfig) -> AppResult<Arc<dyn StorageProvider>> {
    match config.provider {
        StorageBackend::Local => {
            info!(root = %config.local.root_path, "Using local storage provider");
            let provider = LocalStorageProvider::new(&config.local.root_path).await?;
            Ok(Arc::new(provider))
        }
        StorageBackend::Memory => {
            info!("Using in-memory storage provider");
            Ok(Arc::new(MemoryStorageProvider::new()))
        }
    }
}
