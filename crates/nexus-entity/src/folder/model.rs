//! Folder entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use nexus_core::types::{FolderId, GroupId};

use crate::access::Scoped;

/// A flat, single-level container of files owned by one group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Folder {
    /// Unique folder identifier.
    pub id: FolderId,
    /// Folder name.
    pub name: String,
    /// Number of files in this folder. Only the count coordinator writes it.
    pub file_count: i64,
    /// `true` when readable by every group.
    pub visibility: bool,
    /// The owning group.
    pub owner_group_id: GroupId,
    /// When the folder was created.
    pub created_at: DateTime<Utc>,
    /// When the folder was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Scoped for Folder {
    fn owner_group_id(&self) -> &GroupId {
        &self.owner_group_id
    }

    fn is_public(&self) -> bool {
        self.visibility
    }
}

/// Data required to create a new folder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFolder {
    /// Pre-allocated folder id.
    pub id: FolderId,
    /// Folder name.
    pub name: String,
    /// Visibility flag.
    pub visibility: bool,
    /// The owning group.
    pub owner_group_id: GroupId,
}

/// Partial update of the caller-settable folder fields.
///
/// Owner and file count are deliberately absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderPatch {
    /// New name, if changing.
    pub name: Option<String>,
    /// New visibility, if changing.
    pub visibility: Option<bool>,
}

impl FolderPatch {
    /// Whether the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.visibility.is_none()
    }

    /// Apply the patch to an in-memory folder record.
    pub fn apply(&self, folder: &mut Folder) {
        if let Some(name) = &self.name {
            folder.name = name.clone();
        }
        if let Some(visibility) = self.visibility {
            folder.visibility = visibility;
        }
    }
}
