//! In-memory file repository.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use nexus_core::error::AppError;
use nexus_core::result::AppResult;
use nexus_core::types::{FileId, FolderId, IdKind};
use nexus_entity::file::{CreateFile, File};
use nexus_entity::{AccessScope, NameQuery};

use super::MemoryDatabase;
use crate::traits::FileRepository;

/// File repository over [`MemoryDatabase`].
#[derive(Debug, Clone)]
pub struct MemoryFileRepository {
    db: Arc<MemoryDatabase>,
}

impl MemoryFileRepository {
    /// Create a repository over the shared tables.
    pub fn new(db: Arc<MemoryDatabase>) -> Self {
        Self { db }
    }

    fn collect_sorted(&self, keep: impl Fn(&File) -> bool) -> Vec<File> {
        let mut files: Vec<File> = self
            .db
            .files
            .iter()
            .filter(|entry| keep(entry.value()))
            .map(|entry| entry.value().clone())
            .collect();
        files.sort_by_key(|f| f.id);
        files
    }
}

#[async_trait]
impl FileRepository for MemoryFileRepository {
    async fn insert(&self, data: CreateFile) -> AppResult<File> {
        // Holding the folder guard keeps a concurrent delete_if_empty from
        // removing the folder until this row is visible.
        let Some(_folder) = self.db.folders.get(&data.folder_id) else {
            return Err(AppError::not_found(format!(
                "Folder {} not found",
                data.folder_id
            )));
        };

        let file = File {
            id: data.id,
            folder_id: data.folder_id,
            name: data.name,
            visibility: data.visibility,
            owner_group_id: data.owner_group_id,
            uploaded_by: data.uploaded_by,
            stored_ref: data.stored_ref,
            size_bytes: data.size_bytes,
            created_at: Utc::now(),
        };
        self.db.files.insert(file.id, file.clone());
        self.db.observe_id(IdKind::File, file.id.get());
        Ok(file)
    }

    async fn find_by_id(&self, id: FileId) -> AppResult<Option<File>> {
        Ok(self.db.files.get(&id).map(|entry| entry.value().clone()))
    }

    async fn list_by_folder_visible(
        &self,
        folder_id: FolderId,
        scope: &AccessScope,
    ) -> AppResult<Vec<File>> {
        Ok(self.collect_sorted(|f| f.folder_id == folder_id && scope.permits(f)))
    }

    async fn search_visible(&self, query: &NameQuery, scope: &AccessScope) -> AppResult<Vec<File>> {
        Ok(self.collect_sorted(|f| scope.permits(f) && query.matches(&f.name)))
    }

    async fn delete(&self, id: FileId) -> AppResult<Option<File>> {
        Ok(self.db.files.remove(&id).map(|(_, file)| file))
    }

    async fn count_by_folder(&self, folder_id: FolderId) -> AppResult<i64> {
        Ok(self.db.count_files(folder_id))
    }
}
