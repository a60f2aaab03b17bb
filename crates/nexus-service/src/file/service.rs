//! File queries and deletion.

use std::sync::Arc;

use tracing::{info, warn};

use nexus_core::error::AppError;
use nexus_core::result::AppResult;
use nexus_core::traits::StorageProvider;
use nexus_core::types::{FileId, FolderId, GroupId};
use nexus_database::traits::{FileRepository, FolderRepository};
use nexus_entity::file::File;
use nexus_entity::{AccessScope, NameQuery};

use crate::consistency::CountCoordinator;
use crate::deadline::Deadline;

/// File listing, search, and deletion.
#[derive(Debug, Clone)]
pub struct FileService {
    files: Arc<dyn FileRepository>,
    folders: Arc<dyn FolderRepository>,
    storage: Arc<dyn StorageProvider>,
    coordinator: CountCoordinator,
    deadline: Deadline,
}

impl FileService {
    /// Creates a new file service.
    pub fn new(
        files: Arc<dyn FileRepository>,
        folders: Arc<dyn FolderRepository>,
        storage: Arc<dyn StorageProvider>,
        coordinator: CountCoordinator,
        deadline: Deadline,
    ) -> Self {
        Self {
            files,
            folders,
            storage,
            coordinator,
            deadline,
        }
    }

    /// Gets a file by id without visibility filtering.
    pub async fn get_file(&self, id: FileId) -> AppResult<File> {
        self.deadline
            .run("find file", self.files.find_by_id(id))
            .await?
            .ok_or_else(|| AppError::not_found(format!("File {id} not found")))
    }

    /// Files in `folder_id` the caller's group owns or that are public.
    pub async fn list_files_by_folder(
        &self,
        folder_id: FolderId,
        caller_group: &GroupId,
    ) -> AppResult<Vec<File>> {
        self.deadline
            .run("find folder", self.folders.find_by_id(folder_id))
            .await?
            .ok_or_else(|| AppError::not_found(format!("Folder {folder_id} not found")))?;

        let scope = AccessScope::for_group(caller_group.clone());
        self.deadline
            .run(
                "list files",
                self.files.list_by_folder_visible(folder_id, &scope),
            )
            .await
    }

    /// Visible files whose name contains `query`, ignoring case.
    pub async fn search_files(&self, query: &str, caller_group: &GroupId) -> AppResult<Vec<File>> {
        let scope = AccessScope::for_group(caller_group.clone());
        let query = NameQuery::new(query);
        self.deadline
            .run("search files", self.files.search_visible(&query, &scope))
            .await
    }

    /// Deletes a file: stored content first (best-effort), then the row,
    /// then the folder count.
    ///
    /// A crash between the row delete and the decrement leaves an
    /// over-count that reconciliation corrects.
    pub async fn delete_file(&self, id: FileId) -> AppResult<File> {
        let file = self.get_file(id).await?;

        match self
            .deadline
            .run("delete content", self.storage.delete(&file.stored_ref))
            .await
        {
            Ok(true) => {}
            Ok(false) => warn!(
                file_id = %id,
                stored_ref = %file.stored_ref,
                "Stored content already missing"
            ),
            Err(e) => warn!(
                file_id = %id,
                stored_ref = %file.stored_ref,
                error = %e,
                "Failed to delete stored content, continuing"
            ),
        }

        let removed = self
            .deadline
            .run("delete file", self.files.delete(id))
            .await?
            .ok_or_else(|| AppError::not_found(format!("File {id} not found")))?;

        if let Err(e) = self.coordinator.on_file_deleted(removed.folder_id).await {
            warn!(
                file_id = %id,
                folder_id = %removed.folder_id,
                error = %e,
                "File count not decremented; reconcile will correct it"
            );
        }

        info!(file_id = %id, folder_id = %removed.folder_id, "File deleted");
        Ok(removed)
    }
}
