//! File entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use nexus_core::types::{Email, FileId, FolderId, GroupId, StoredRef};

use crate::access::Scoped;

/// A named reference to externally stored content inside one folder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct File {
    /// Unique file identifier.
    pub id: FileId,
    /// The folder containing this file. Immutable.
    pub folder_id: FolderId,
    /// The file name (including extension).
    pub name: String,
    /// `true` when readable by every group.
    pub visibility: bool,
    /// Group of the uploading principal; the visibility-scoping key.
    pub owner_group_id: GroupId,
    /// Email of the uploading principal.
    pub uploaded_by: Email,
    /// Storage provider reference for the content.
    pub stored_ref: StoredRef,
    /// Content length in bytes.
    pub size_bytes: i64,
    /// When the file was uploaded.
    pub created_at: DateTime<Utc>,
}

impl Scoped for File {
    fn owner_group_id(&self) -> &GroupId {
        &self.owner_group_id
    }

    fn is_public(&self) -> bool {
        self.visibility
    }
}

/// Data required to create a new file record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFile {
    /// Pre-allocated file id.
    pub id: FileId,
    /// The folder to place the file in.
    pub folder_id: FolderId,
    /// The file name.
    pub name: String,
    /// Visibility flag.
    pub visibility: bool,
    /// Owning group.
    pub owner_group_id: GroupId,
    /// Uploader identity.
    pub uploaded_by: Email,
    /// Storage provider reference.
    pub stored_ref: StoredRef,
    /// Content length in bytes.
    pub size_bytes: i64,
}
