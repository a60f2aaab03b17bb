//! File download.

use std::sync::Arc;

use tracing::warn;

use nexus_core::error::AppError;
use nexus_core::result::AppResult;
use nexus_core::traits::{ByteStream, StorageProvider};
use nexus_core::types::FileId;
use nexus_database::traits::FileRepository;
use nexus_entity::file::File;

use crate::deadline::Deadline;

/// A file record with its content stream.
pub struct Download {
    pub file: File,
    pub content: ByteStream,
}

impl std::fmt::Debug for Download {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Download").field("file", &self.file).finish()
    }
}

/// Resolves a file id to its stored content.
#[derive(Debug, Clone)]
pub struct DownloadService {
    files: Arc<dyn FileRepository>,
    storage: Arc<dyn StorageProvider>,
    deadline: Deadline,
}

impl DownloadService {
    /// Creates a new download service.
    pub fn new(
        files: Arc<dyn FileRepository>,
        storage: Arc<dyn StorageProvider>,
        deadline: Deadline,
    ) -> Self {
        Self {
            files,
            storage,
            deadline,
        }
    }

    /// Opens the content of `id`. `NotFound` when the record or its
    /// content is missing.
    pub async fn download_file(&self, id: FileId) -> AppResult<Download> {
        let file = self
            .deadline
            .run("find file", self.files.find_by_id(id))
            .await?
            .ok_or_else(|| AppError::not_found(format!("File {id} not found")))?;

        let content = match self
            .deadline
            .run("open content", self.storage.read(&file.stored_ref))
            .await
        {
            Ok(content) => content,
            Err(e) if e.is_not_found() => {
                warn!(file_id = %id, stored_ref = %file.stored_ref, "Stored content is missing");
                return Err(AppError::not_found(format!("Content of file {id} is missing")));
            }
            Err(e) => return Err(e),
        };

        Ok(Download { file, content })
    }
}
