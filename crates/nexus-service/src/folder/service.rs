//! Folder CRUD with visibility-scoped reads.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use nexus_core::error::AppError;
use nexus_core::result::AppResult;
use nexus_core::types::{FolderId, GroupId};
use nexus_database::traits::{FolderDeletion, FolderRepository};
use nexus_entity::folder::{CreateFolder, Folder, FolderPatch};
use nexus_entity::{AccessScope, NameQuery};

use crate::deadline::Deadline;
use crate::identity::IdAllocator;

/// Caller-supplied fields of a new folder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFolderParams {
    /// Folder name.
    pub name: String,
    /// Whether every group may read the folder.
    pub visibility: bool,
}

/// Manages folder records.
#[derive(Debug, Clone)]
pub struct FolderService {
    folders: Arc<dyn FolderRepository>,
    ids: IdAllocator,
    deadline: Deadline,
}

impl FolderService {
    /// Creates a new folder service.
    pub fn new(folders: Arc<dyn FolderRepository>, ids: IdAllocator, deadline: Deadline) -> Self {
        Self {
            folders,
            ids,
            deadline,
        }
    }

    /// Creates a folder owned by `owner_group_id` with a zero file count.
    pub async fn create_folder(
        &self,
        owner_group_id: &GroupId,
        params: CreateFolderParams,
    ) -> AppResult<Folder> {
        let name = params.name.trim();
        if name.is_empty() {
            return Err(AppError::validation("Folder name cannot be empty"));
        }
        if owner_group_id.is_empty() {
            return Err(AppError::validation("Owner group id is required"));
        }

        let id = self.ids.next_folder_id().await?;
        let folder = self
            .deadline
            .run(
                "create folder",
                self.folders.insert(CreateFolder {
                    id,
                    name: name.to_string(),
                    visibility: params.visibility,
                    owner_group_id: owner_group_id.clone(),
                }),
            )
            .await?;

        info!(
            folder_id = %folder.id,
            owner_group_id = %folder.owner_group_id,
            visibility = folder.visibility,
            "Folder created"
        );
        Ok(folder)
    }

    /// Gets a folder by id without visibility filtering.
    pub async fn get_folder(&self, id: FolderId) -> AppResult<Folder> {
        self.deadline
            .run("find folder", self.folders.find_by_id(id))
            .await?
            .ok_or_else(|| AppError::not_found(format!("Folder {id} not found")))
    }

    /// Folders the caller's group owns or that are public, ordered by id.
    pub async fn list_folders(&self, caller_group: &GroupId) -> AppResult<Vec<Folder>> {
        let scope = AccessScope::for_group(caller_group.clone());
        self.deadline
            .run("list folders", self.folders.list_visible(&scope))
            .await
    }

    /// Every folder regardless of visibility.
    pub async fn list_all_folders(&self) -> AppResult<Vec<Folder>> {
        self.deadline
            .run("list all folders", self.folders.list_all())
            .await
    }

    /// Visible folders whose name contains `query`, ignoring case.
    pub async fn search_folders(&self, query: &str, caller_group: &GroupId) -> AppResult<Vec<Folder>> {
        let scope = AccessScope::for_group(caller_group.clone());
        let query = NameQuery::new(query);
        self.deadline
            .run("search folders", self.folders.search_visible(&query, &scope))
            .await
    }

    /// Changes name and/or visibility. Owner and file count are untouched.
    pub async fn update_folder(&self, id: FolderId, mut patch: FolderPatch) -> AppResult<Folder> {
        if let Some(name) = patch.name.take() {
            let name = name.trim();
            if name.is_empty() {
                return Err(AppError::validation("Folder name cannot be empty"));
            }
            patch.name = Some(name.to_string());
        }

        let folder = self
            .deadline
            .run("update folder", self.folders.update(id, &patch))
            .await?
            .ok_or_else(|| AppError::not_found(format!("Folder {id} not found")))?;

        info!(folder_id = %id, "Folder updated");
        Ok(folder)
    }

    /// Deletes an empty folder. A folder that still holds files is rejected.
    pub async fn delete_folder(&self, id: FolderId) -> AppResult<()> {
        match self
            .deadline
            .run("delete folder", self.folders.delete_if_empty(id))
            .await?
        {
            FolderDeletion::Deleted => {
                info!(folder_id = %id, "Folder deleted");
                Ok(())
            }
            FolderDeletion::NotFound => Err(AppError::not_found(format!("Folder {id} not found"))),
            FolderDeletion::NotEmpty => Err(AppError::validation(format!(
                "Folder {id} is not empty; delete its files first"
            ))),
        }
    }
}
