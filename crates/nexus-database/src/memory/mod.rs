//! In-memory backend for single-node deployments and tests.
//!
//! All tables live in one [`MemoryDatabase`] shared by the repositories.
//! Each map is lock-striped by `dashmap`; an operation that must be atomic
//! holds the shard guard of the entry it mutates for its whole duration.
//! When both maps are involved the folder shard is always taken first.

pub mod activity;
pub mod file;
pub mod folder;
pub mod sequence;

use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use dashmap::DashMap;

use nexus_core::types::{Email, FileId, FolderId, IdKind};
use nexus_entity::file::File;
use nexus_entity::folder::Folder;
use nexus_entity::student::{DailyActivity, Student};

pub use activity::MemoryActivityRepository;
pub use file::MemoryFileRepository;
pub use folder::MemoryFolderRepository;
pub use sequence::MemoryIdSequence;

/// A student row together with its insertion-ordered history.
#[derive(Debug, Clone)]
pub(crate) struct StudentRecord {
    pub(crate) student: Student,
    pub(crate) daily_activity: Vec<DailyActivity>,
}

/// Shared in-memory tables.
#[derive(Debug, Default)]
pub struct MemoryDatabase {
    pub(crate) folders: DashMap<FolderId, Folder>,
    pub(crate) files: DashMap<FileId, File>,
    pub(crate) students: DashMap<Email, StudentRecord>,
    folder_seq: AtomicI64,
    file_seq: AtomicI64,
}

impl MemoryDatabase {
    /// Create an empty database behind an `Arc`.
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub(crate) fn sequence(&self, kind: IdKind) -> &AtomicI64 {
        match kind {
            IdKind::Folder => &self.folder_seq,
            IdKind::File => &self.file_seq,
        }
    }

    /// Raise the sequence so it never hands out `id` again.
    pub(crate) fn observe_id(&self, kind: IdKind, id: i64) {
        self.sequence(kind).fetch_max(id, Ordering::SeqCst);
    }

    /// Number of file rows in a folder.
    pub(crate) fn count_files(&self, folder_id: FolderId) -> i64 {
        self.files
            .iter()
            .filter(|entry| entry.folder_id == folder_id)
            .count() as i64
    }

    /// Number of folder rows.
    pub fn folder_count(&self) -> usize {
        self.folders.len()
    }

    /// Number of file rows.
    pub fn file_count(&self) -> usize {
        self.files.len()
    }
}
