//! Visibility-scoped access filter.
//!
//! A record is visible to a caller when the caller's group owns it or the
//! record is public. This is the only place the rule is written down; the
//! in-memory backend calls [`AccessScope::permits`] and the PostgreSQL
//! backend binds [`AccessScope::group_id`] into the equivalent
//! `owner_group_id = $n OR visibility` clause.
//!
//! Internal by-id fetches (count coordination, delete paths) never go
//! through this filter.

use serde::{Deserialize, Serialize};

use nexus_core::types::GroupId;

/// A record owned by a group and carrying a public flag.
pub trait Scoped {
    /// The owning group.
    fn owner_group_id(&self) -> &GroupId;

    /// Whether the record is readable by every group.
    fn is_public(&self) -> bool;

    /// `owner_group_id == group || is_public`.
    fn is_visible_to(&self, group: &GroupId) -> bool {
        self.is_public() || self.owner_group_id() == group
    }
}

/// The read scope of one caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessScope {
    group_id: GroupId,
}

impl AccessScope {
    /// Scope reads to what `group_id` may see.
    pub fn for_group(group_id: GroupId) -> Self {
        Self { group_id }
    }

    /// The caller's group.
    pub fn group_id(&self) -> &GroupId {
        &self.group_id
    }

    /// Whether the caller may see `record`.
    pub fn permits<T: Scoped>(&self, record: &T) -> bool {
        record.is_visible_to(&self.group_id)
    }

    /// Drop every record the caller may not see, preserving order.
    pub fn retain<T: Scoped>(&self, mut records: Vec<T>) -> Vec<T> {
        records.retain(|r| self.permits(r));
        records
    }
}
