//! The caller identity supplied by the authentication collaborator.

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::result::AppResult;
use crate::types::id::{Email, GroupId};

/// An already-verified caller.
///
/// The core trusts both fields as-is; it performs no credential checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// The caller's group, used for ownership and visibility scoping.
    pub group_id: GroupId,
    /// The caller's email, recorded as the uploader of files.
    pub email: Email,
}

impl Principal {
    /// Creates a principal.
    pub fn new(group_id: impl Into<GroupId>, email: impl Into<Email>) -> Self {
        Self {
            group_id: group_id.into(),
            email: email.into(),
        }
    }

    /// Rejects principals with an empty group or email.
    pub fn validate(&self) -> AppResult<()> {
        if self.group_id.is_empty() {
            return Err(AppError::validation("Owner group id is required"));
        }
        if self.email.is_empty() {
            return Err(AppError::validation("Owner identity is required"));
        }
        Ok(())
    }
}
