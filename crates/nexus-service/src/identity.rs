//! Identity allocator for folder and file ids.

use std::sync::Arc;

use tracing::error;

use nexus_core::error::AppError;
use nexus_core::result::AppResult;
use nexus_core::traits::IdSequence;
use nexus_core::types::{FileId, FolderId, IdKind};

use crate::deadline::Deadline;

/// Hands out positive, never-repeated ids per kind.
#[derive(Debug, Clone)]
pub struct IdAllocator {
    sequence: Arc<dyn IdSequence>,
    deadline: Deadline,
}

impl IdAllocator {
    /// Creates a new allocator over an atomic sequence.
    pub fn new(sequence: Arc<dyn IdSequence>, deadline: Deadline) -> Self {
        Self { sequence, deadline }
    }

    /// Next value for `kind`.
    pub async fn next_id(&self, kind: IdKind) -> AppResult<i64> {
        let value = self
            .deadline
            .run("id allocation", self.sequence.next_value(kind))
            .await?;
        if value <= 0 {
            error!(kind = %kind, value, "Id sequence returned a non-positive value");
            return Err(AppError::storage_unavailable(format!(
                "Id sequence for {kind} returned invalid value {value}"
            )));
        }
        Ok(value)
    }

    /// Next folder id.
    pub async fn next_folder_id(&self) -> AppResult<FolderId> {
        self.next_id(IdKind::Folder).await.map(FolderId)
    }

    /// Next file id.
    pub async fn next_file_id(&self) -> AppResult<FileId> {
        self.next_id(IdKind::File).await.map(FileId)
    }
}
