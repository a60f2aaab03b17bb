//! File upload and registration.

use std::sync::Arc;

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use nexus_core::config::StorageConfig;
use nexus_core::error::AppError;
use nexus_core::result::AppResult;
use nexus_core::traits::StorageProvider;
use nexus_core::types::{FolderId, Principal, StoredRef};
use nexus_database::traits::{FileRepository, FolderRepository};
use nexus_entity::file::{CreateFile, File};

use crate::consistency::CountCoordinator;
use crate::deadline::Deadline;
use crate::identity::IdAllocator;

/// Upload parameters with the full file body.
#[derive(Debug, Clone)]
pub struct UploadParams {
    /// File name.
    pub name: String,
    /// Target folder.
    pub folder_id: FolderId,
    /// Whether every group may read the file.
    pub visibility: bool,
    /// File content.
    pub content: Bytes,
}

/// Metadata of content that is already stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterFile {
    pub name: String,
    pub folder_id: FolderId,
    pub visibility: bool,
    pub stored_ref: StoredRef,
    pub size_bytes: i64,
}

/// Stores uploaded content and registers the file record.
#[derive(Debug, Clone)]
pub struct UploadService {
    files: Arc<dyn FileRepository>,
    folders: Arc<dyn FolderRepository>,
    storage: Arc<dyn StorageProvider>,
    ids: IdAllocator,
    coordinator: CountCoordinator,
    deadline: Deadline,
    max_upload_size_bytes: u64,
}

impl UploadService {
    /// Creates a new upload service.
    pub fn new(
        files: Arc<dyn FileRepository>,
        folders: Arc<dyn FolderRepository>,
        storage: Arc<dyn StorageProvider>,
        ids: IdAllocator,
        coordinator: CountCoordinator,
        deadline: Deadline,
        config: &StorageConfig,
    ) -> Self {
        Self {
            files,
            folders,
            storage,
            ids,
            coordinator,
            deadline,
            max_upload_size_bytes: config.max_upload_size_bytes,
        }
    }

    /// Largest accepted body, in bytes.
    pub fn max_upload_size_bytes(&self) -> u64 {
        self.max_upload_size_bytes
    }

    /// Stores `params.content` and registers it as a file of the caller.
    ///
    /// The stored content is removed again if the record cannot be written.
    pub async fn upload_file(&self, owner: &Principal, params: UploadParams) -> AppResult<File> {
        if params.content.len() as u64 > self.max_upload_size_bytes {
            return Err(AppError::validation(format!(
                "File exceeds maximum upload size of {} bytes",
                self.max_upload_size_bytes
            )));
        }
        let name = validate_name(&params.name)?;
        owner.validate()?;
        self.require_folder(params.folder_id).await?;

        let size_bytes = params.content.len() as i64;
        let stored_ref = self
            .deadline
            .run("store content", self.storage.put(&name, params.content))
            .await?;

        let registered = self
            .register_file(
                owner,
                RegisterFile {
                    name,
                    folder_id: params.folder_id,
                    visibility: params.visibility,
                    stored_ref: stored_ref.clone(),
                    size_bytes,
                },
            )
            .await;

        if registered.is_err() {
            match self
                .deadline
                .run("delete content", self.storage.delete(&stored_ref))
                .await
            {
                Ok(_) => warn!(stored_ref = %stored_ref, "Removed content of failed upload"),
                Err(e) => error!(
                    stored_ref = %stored_ref,
                    error = %e,
                    "Failed to remove content of failed upload"
                ),
            }
        }
        registered
    }

    /// Records a file whose content is already stored, then bumps the
    /// folder count.
    ///
    /// If the count cannot be adjusted after all retries the file is still
    /// returned; the folder is left under-counted until reconciled.
    pub async fn register_file(&self, owner: &Principal, data: RegisterFile) -> AppResult<File> {
        let name = validate_name(&data.name)?;
        owner.validate()?;
        if data.size_bytes < 0 {
            return Err(AppError::validation("File size cannot be negative"));
        }
        self.require_folder(data.folder_id).await?;

        let id = self.ids.next_file_id().await?;
        let file = self
            .deadline
            .run(
                "create file",
                self.files.insert(CreateFile {
                    id,
                    folder_id: data.folder_id,
                    name,
                    visibility: data.visibility,
                    owner_group_id: owner.group_id.clone(),
                    uploaded_by: owner.email.clone(),
                    stored_ref: data.stored_ref,
                    size_bytes: data.size_bytes,
                }),
            )
            .await?;

        if let Err(e) = self.coordinator.on_file_created(file.folder_id).await {
            error!(
                file_id = %file.id,
                folder_id = %file.folder_id,
                error = %e,
                "File count not incremented; reconcile will correct it"
            );
        }

        info!(
            file_id = %file.id,
            folder_id = %file.folder_id,
            owner_group_id = %file.owner_group_id,
            size = file.size_bytes,
            "File uploaded"
        );
        Ok(file)
    }

    async fn require_folder(&self, folder_id: FolderId) -> AppResult<()> {
        self.deadline
            .run("find folder", self.folders.find_by_id(folder_id))
            .await?
            .map(|_| ())
            .ok_or_else(|| AppError::not_found(format!("Folder {folder_id} not found")))
    }
}

fn validate_name(name: &str) -> AppResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::validation("File name cannot be empty"));
    }
    Ok(name.to_string())
}
