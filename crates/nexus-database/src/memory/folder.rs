//! In-memory folder repository.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use nexus_core::result::AppResult;
use nexus_core::types::{FolderId, IdKind};
use nexus_entity::folder::{CreateFolder, Folder, FolderPatch};
use nexus_entity::{AccessScope, NameQuery};

use super::MemoryDatabase;
use crate::traits::{FolderDeletion, FolderRepository, Recount};

/// Folder repository over [`MemoryDatabase`].
#[derive(Debug, Clone)]
pub struct MemoryFolderRepository {
    db: Arc<MemoryDatabase>,
}

impl MemoryFolderRepository {
    /// Create a repository over the shared tables.
    pub fn new(db: Arc<MemoryDatabase>) -> Self {
        Self { db }
    }

    fn collect_sorted(&self, keep: impl Fn(&Folder) -> bool) -> Vec<Folder> {
        let mut folders: Vec<Folder> = self
            .db
            .folders
            .iter()
            .filter(|entry| keep(entry.value()))
            .map(|entry| entry.value().clone())
            .collect();
        folders.sort_by_key(|f| f.id);
        folders
    }
}

#[async_trait]
impl FolderRepository for MemoryFolderRepository {
    async fn insert(&self, data: CreateFolder) -> AppResult<Folder> {
        let now = Utc::now();
        let folder = Folder {
            id: data.id,
            name: data.name,
            file_count: 0,
            visibility: data.visibility,
            owner_group_id: data.owner_group_id,
            created_at: now,
            updated_at: now,
        };
        self.db.folders.insert(folder.id, folder.clone());
        self.db.observe_id(IdKind::Folder, folder.id.get());
        Ok(folder)
    }

    async fn find_by_id(&self, id: FolderId) -> AppResult<Option<Folder>> {
        Ok(self.db.folders.get(&id).map(|entry| entry.value().clone()))
    }

    async fn list_all(&self) -> AppResult<Vec<Folder>> {
        Ok(self.collect_sorted(|_| true))
    }

    async fn list_visible(&self, scope: &AccessScope) -> AppResult<Vec<Folder>> {
        Ok(self.collect_sorted(|f| scope.permits(f)))
    }

    async fn search_visible(
        &self,
        query: &NameQuery,
        scope: &AccessScope,
    ) -> AppResult<Vec<Folder>> {
        Ok(self.collect_sorted(|f| scope.permits(f) && query.matches(&f.name)))
    }

    async fn update(&self, id: FolderId, patch: &FolderPatch) -> AppResult<Option<Folder>> {
        Ok(self.db.folders.get_mut(&id).map(|mut entry| {
            patch.apply(entry.value_mut());
            entry.updated_at = Utc::now();
            entry.value().clone()
        }))
    }

    async fn delete_if_empty(&self, id: FolderId) -> AppResult<FolderDeletion> {
        // The predicate runs under the folder's shard write lock; file
        // inserts hold a read guard on the same entry, so no file can land
        // between the emptiness check and the removal.
        let removed = self
            .db
            .folders
            .remove_if(&id, |_, _| self.db.count_files(id) == 0);

        if removed.is_some() {
            Ok(FolderDeletion::Deleted)
        } else if self.db.folders.contains_key(&id) {
            Ok(FolderDeletion::NotEmpty)
        } else {
            Ok(FolderDeletion::NotFound)
        }
    }

    async fn increment_file_count(&self, id: FolderId) -> AppResult<Option<i64>> {
        Ok(self.db.folders.get_mut(&id).map(|mut entry| {
            entry.file_count += 1;
            entry.updated_at = Utc::now();
            entry.file_count
        }))
    }

    async fn decrement_file_count(&self, id: FolderId) -> AppResult<Option<i64>> {
        Ok(self.db.folders.get_mut(&id).map(|mut entry| {
            entry.file_count = (entry.file_count - 1).max(0);
            entry.updated_at = Utc::now();
            entry.file_count
        }))
    }

    async fn recount_files(&self, id: FolderId) -> AppResult<Option<Recount>> {
        Ok(self.db.folders.get_mut(&id).map(|mut entry| {
            let recorded = entry.file_count;
            let actual = self.db.count_files(id);
            entry.file_count = actual;
            entry.updated_at = Utc::now();
            Recount { recorded, actual }
        }))
    }
}
