//! In-memory storage provider.

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use dashmap::DashMap;

use nexus_core::error::AppError;
use nexus_core::result::AppResult;
use nexus_core::traits::{ByteStream, StorageProvider};
use nexus_core::types::StoredRef;

use super::new_reference;

/// Keeps uploaded content in a concurrent map. Contents are lost on restart.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorageProvider {
    objects: Arc<DashMap<StoredRef, Bytes>>,
}

impl MemoryStorageProvider {
    /// Create an empty provider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    fn get(&self, stored_ref: &StoredRef) -> AppResult<Bytes> {
        self.objects
            .get(stored_ref)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| AppError::not_found(format!("Stored content not found: {stored_ref}")))
    }
}

#[async_trait]
impl StorageProvider for MemoryStorageProvider {
    fn provider_type(&self) -> &str {
        "memory"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }

    async fn put(&self, name_hint: &str, data: Bytes) -> AppResult<StoredRef> {
        let stored_ref = StoredRef::new(new_reference(name_hint));
        self.objects.insert(stored_ref.clone(), data);
        Ok(stored_ref)
    }

    async fn read(&self, stored_ref: &StoredRef) -> AppResult<ByteStream> {
        let data = self.get(stored_ref)?;
        Ok(Box::pin(futures::stream::once(async move { Ok(data) })))
    }

    async fn read_bytes(&self, stored_ref: &StoredRef) -> AppResult<Bytes> {
        self.get(stored_ref)
    }

    async fn exists(&self, stored_ref: &StoredRef) -> AppResult<bool> {
        Ok(self.objects.contains_key(stored_ref))
    }

    async fn delete(&self, stored_ref: &StoredRef) -> AppResult<bool> {
        Ok(self.objects.remove(stored_ref).is_some())
    }
}
