//! Repository traits implemented by every backend.
//!
//! Visibility-scoped reads take an [`AccessScope`]; by-id lookups do not.
//! Count mutations are single atomic steps in every implementation.

use async_trait::async_trait;
use chrono::NaiveDate;

use nexus_core::result::AppResult;
use nexus_core::types::{Email, FileId, FolderId};
use nexus_entity::file::{CreateFile, File};
use nexus_entity::folder::{CreateFolder, Folder, FolderPatch};
use nexus_entity::student::{DailyActivity, EnrollStudent, Student};
use nexus_entity::{AccessScope, NameQuery};

/// Outcome of a folder delete attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FolderDeletion {
    /// The folder row was removed.
    Deleted,
    /// No folder with that id exists.
    NotFound,
    /// The folder still has file rows and was left in place.
    NotEmpty,
}

/// Recorded and recomputed file counts of one folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Recount {
    /// The count stored before the recount.
    pub recorded: i64,
    /// The number of file rows, now also the stored count.
    pub actual: i64,
}

/// Folder persistence.
#[async_trait]
pub trait FolderRepository: Send + Sync + std::fmt::Debug + 'static {
    /// Insert a folder with `file_count = 0`.
    async fn insert(&self, data: CreateFolder) -> AppResult<Folder>;

    /// Privileged lookup by id.
    async fn find_by_id(&self, id: FolderId) -> AppResult<Option<Folder>>;

    /// Every folder ordered by id, unfiltered.
    async fn list_all(&self) -> AppResult<Vec<Folder>>;

    /// Folders visible to `scope`, ordered by id.
    async fn list_visible(&self, scope: &AccessScope) -> AppResult<Vec<Folder>>;

    /// Folders visible to `scope` whose name matches `query`, ordered by id.
    async fn search_visible(&self, query: &NameQuery, scope: &AccessScope)
    -> AppResult<Vec<Folder>>;

    /// Apply `patch`; `None` when the folder does not exist.
    async fn update(&self, id: FolderId, patch: &FolderPatch) -> AppResult<Option<Folder>>;

    /// Remove the folder only if no file row references it.
    async fn delete_if_empty(&self, id: FolderId) -> AppResult<FolderDeletion>;

    /// Atomically add one; returns the new count or `None` if absent.
    async fn increment_file_count(&self, id: FolderId) -> AppResult<Option<i64>>;

    /// Atomically subtract one, floored at zero; returns the new count or
    /// `None` if absent.
    async fn decrement_file_count(&self, id: FolderId) -> AppResult<Option<i64>>;

    /// Overwrite the stored count with the number of file rows.
    async fn recount_files(&self, id: FolderId) -> AppResult<Option<Recount>>;
}

/// File persistence.
#[async_trait]
pub trait FileRepository: Send + Sync + std::fmt::Debug + 'static {
    /// Insert a file row. Fails with `NotFound` when the folder is gone.
    async fn insert(&self, data: CreateFile) -> AppResult<File>;

    /// Privileged lookup by id.
    async fn find_by_id(&self, id: FileId) -> AppResult<Option<File>>;

    /// Files of one folder visible to `scope`, ordered by id.
    async fn list_by_folder_visible(
        &self,
        folder_id: FolderId,
        scope: &AccessScope,
    ) -> AppResult<Vec<File>>;

    /// Files visible to `scope` whose name matches `query`, ordered by id.
    async fn search_visible(&self, query: &NameQuery, scope: &AccessScope) -> AppResult<Vec<File>>;

    /// Remove the row and return it; `None` when absent.
    async fn delete(&self, id: FileId) -> AppResult<Option<File>>;

    /// Number of file rows in a folder.
    async fn count_by_folder(&self, folder_id: FolderId) -> AppResult<i64>;
}

/// Student activity persistence.
#[async_trait]
pub trait ActivityRepository: Send + Sync + std::fmt::Debug + 'static {
    /// Create the student if absent and return the stored record.
    async fn enroll(&self, data: EnrollStudent) -> AppResult<Student>;

    /// Look up a student.
    async fn find_student(&self, email: &Email) -> AppResult<Option<Student>>;

    /// Add `minutes` to the entry for `date`, appending one if none exists.
    /// Returns the full history in insertion order. `NotFound` for an
    /// unknown student.
    async fn add_minutes(
        &self,
        email: &Email,
        date: NaiveDate,
        minutes: i64,
    ) -> AppResult<Vec<DailyActivity>>;

    /// The full history in insertion order.
    async fn history(&self, email: &Email) -> AppResult<Vec<DailyActivity>>;

    /// Persist the cached weekly sum. Returns `false` for an unknown student.
    async fn store_weekly_summary(&self, email: &Email, total: i64) -> AppResult<bool>;
}
