//! Shared fixtures for service tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;

use nexus_core::config::{AppConfig, ConsistencyConfig, DatabaseBackend, StorageBackend};
use nexus_core::error::AppError;
use nexus_core::result::AppResult;
use nexus_core::types::{Email, FileId, FolderId, GroupId, Principal};
use nexus_database::memory::MemoryDatabase;
use nexus_database::traits::{FileRepository, FolderDeletion, FolderRepository, Recount};
use nexus_database::Repositories;
use nexus_entity::file::{CreateFile, File};
use nexus_entity::folder::{CreateFolder, Folder, FolderPatch};
use nexus_entity::{AccessScope, NameQuery};
use nexus_storage::MemoryStorageProvider;

use crate::registry::Services;

/// Retry settings that keep tests fast.
pub(crate) fn fast_consistency() -> ConsistencyConfig {
    ConsistencyConfig {
        count_retry_attempts: 3,
        retry_backoff_ms: 1,
        reconcile_on_startup: false,
    }
}

/// Configuration selecting the in-memory backends.
pub(crate) fn memory_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.database.backend = DatabaseBackend::Memory;
    config.storage.provider = StorageBackend::Memory;
    config.consistency = fast_consistency();
    config
}

pub(crate) fn memory_repositories() -> Repositories {
    Repositories::memory(MemoryDatabase::shared())
}

/// Services over fresh in-memory tables, plus a handle on the stored blobs.
pub(crate) fn memory_services() -> (Services, MemoryStorageProvider) {
    memory_services_with(memory_repositories())
}

pub(crate) fn memory_services_with(repos: Repositories) -> (Services, MemoryStorageProvider) {
    let storage = MemoryStorageProvider::new();
    let services = Services::new(repos, Arc::new(storage.clone()), &memory_config());
    (services, storage)
}

pub(crate) fn principal(group: &str) -> Principal {
    Principal::new(GroupId::new(group), Email::new(format!("{group}-user@lab.edu")))
}

/// Fails count adjustments with `StorageUnavailable` a fixed number of times.
#[derive(Debug)]
pub(crate) struct FlakyFolderRepository {
    inner: Arc<dyn FolderRepository>,
    remaining: AtomicU32,
    injected: AtomicU32,
}

impl FlakyFolderRepository {
    pub(crate) fn new(inner: Arc<dyn FolderRepository>, failures: u32) -> Self {
        Self {
            inner,
            remaining: AtomicU32::new(failures),
            injected: AtomicU32::new(0),
        }
    }

    pub(crate) fn failures_injected(&self) -> u32 {
        self.injected.load(Ordering::SeqCst)
    }

    fn maybe_fail(&self) -> AppResult<()> {
        let took = self
            .remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if took {
            self.injected.fetch_add(1, Ordering::SeqCst);
            return Err(AppError::storage_unavailable("injected outage"));
        }
        Ok(())
    }
}

#[async_trait]
impl FolderRepository for FlakyFolderRepository {
    async fn insert(&self, data: CreateFolder) -> AppResult<Folder> {
        self.inner.insert(data).await
    }

    async fn find_by_id(&self, id: FolderId) -> AppResult<Option<Folder>> {
        self.inner.find_by_id(id).await
    }

    async fn list_all(&self) -> AppResult<Vec<Folder>> {
        self.inner.list_all().await
    }

    async fn list_visible(&self, scope: &AccessScope) -> AppResult<Vec<Folder>> {
        self.inner.list_visible(scope).await
    }

    async fn search_visible(
        &self,
        query: &NameQuery,
        scope: &AccessScope,
    ) -> AppResult<Vec<Folder>> {
        self.inner.search_visible(query, scope).await
    }

    async fn update(&self, id: FolderId, patch: &FolderPatch) -> AppResult<Option<Folder>> {
        self.inner.update(id, patch).await
    }

    async fn delete_if_empty(&self, id: FolderId) -> AppResult<FolderDeletion> {
        self.inner.delete_if_empty(id).await
    }

    async fn increment_file_count(&self, id: FolderId) -> AppResult<Option<i64>> {
        self.maybe_fail()?;
        self.inner.increment_file_count(id).await
    }

    async fn decrement_file_count(&self, id: FolderId) -> AppResult<Option<i64>> {
        self.maybe_fail()?;
        self.inner.decrement_file_count(id).await
    }

    async fn recount_files(&self, id: FolderId) -> AppResult<Option<Recount>> {
        self.inner.recount_files(id).await
    }
}

/// Rejects every file insert with `StorageUnavailable`.
#[derive(Debug)]
pub(crate) struct RejectingFileRepository {
    pub(crate) inner: Arc<dyn FileRepository>,
}

#[async_trait]
impl FileRepository for RejectingFileRepository {
    async fn insert(&self, _data: CreateFile) -> AppResult<File> {
        Err(AppError::storage_unavailable("injected insert failure"))
    }

    async fn find_by_id(&self, id: FileId) -> AppResult<Option<File>> {
        self.inner.find_by_id(id).await
    }

    async fn list_by_folder_visible(
        &self,
        folder_id: FolderId,
        scope: &AccessScope,
    ) -> AppResult<Vec<File>> {
        self.inner.list_by_folder_visible(folder_id, scope).await
    }

    async fn search_visible(&self, query: &NameQuery, scope: &AccessScope) -> AppResult<Vec<File>> {
        self.inner.search_visible(query, scope).await
    }

    async fn delete(&self, id: FileId) -> AppResult<Option<File>> {
        self.inner.delete(id).await
    }

    async fn count_by_folder(&self, folder_id: FolderId) -> AppResult<i64> {
        self.inner.count_by_folder(folder_id).await
    }
}
