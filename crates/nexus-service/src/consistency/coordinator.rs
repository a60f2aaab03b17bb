//! The sole writer of `Folder.file_count`.
//!
//! The count is a materialized view over the file rows. Incremental
//! updates keep it current on the happy path; [`CountCoordinator::reconcile`]
//! recomputes it from the rows when a crash or an exhausted retry left it
//! behind.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use nexus_core::config::ConsistencyConfig;
use nexus_core::error::{AppError, ErrorKind};
use nexus_core::result::AppResult;
use nexus_core::types::FolderId;
use nexus_database::traits::FolderRepository;

use super::retry::RetryPolicy;
use crate::deadline::Deadline;

/// Outcome of reconciling one folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconcileReport {
    pub folder_id: FolderId,
    /// Count stored before reconciliation.
    pub recorded: i64,
    /// Number of file rows, now also the stored count.
    pub actual: i64,
    /// Whether `recorded` disagreed with `actual`.
    pub drifted: bool,
}

/// Applies count adjustments with bounded retry and repairs drift.
#[derive(Debug, Clone)]
pub struct CountCoordinator {
    folders: Arc<dyn FolderRepository>,
    retry: RetryPolicy,
    deadline: Deadline,
}

impl CountCoordinator {
    /// Creates a new coordinator.
    pub fn new(
        folders: Arc<dyn FolderRepository>,
        config: &ConsistencyConfig,
        deadline: Deadline,
    ) -> Self {
        Self {
            folders,
            retry: RetryPolicy::from_config(config),
            deadline,
        }
    }

    /// A file row was added to `folder_id`.
    pub async fn on_file_created(&self, folder_id: FolderId) -> AppResult<i64> {
        let count = self
            .retry
            .run("increment file count", || {
                self.deadline
                    .run("increment file count", self.folders.increment_file_count(folder_id))
            })
            .await?
            .ok_or_else(|| AppError::not_found(format!("Folder {folder_id} not found")))?;

        debug!(folder_id = %folder_id, file_count = count, "Incremented file count");
        Ok(count)
    }

    /// A file row was removed from `folder_id`. The count never drops
    /// below zero.
    pub async fn on_file_deleted(&self, folder_id: FolderId) -> AppResult<i64> {
        let count = self
            .retry
            .run("decrement file count", || {
                self.deadline
                    .run("decrement file count", self.folders.decrement_file_count(folder_id))
            })
            .await?
            .ok_or_else(|| AppError::not_found(format!("Folder {folder_id} not found")))?;

        debug!(folder_id = %folder_id, file_count = count, "Decremented file count");
        Ok(count)
    }

    /// Recompute the count of one folder from its file rows and store it.
    ///
    /// Idempotent: a second call reports no drift.
    pub async fn reconcile(&self, folder_id: FolderId) -> AppResult<ReconcileReport> {
        let recount = self
            .deadline
            .run("reconcile file count", self.folders.recount_files(folder_id))
            .await?
            .ok_or_else(|| AppError::not_found(format!("Folder {folder_id} not found")))?;

        let report = ReconcileReport {
            folder_id,
            recorded: recount.recorded,
            actual: recount.actual,
            drifted: recount.recorded != recount.actual,
        };

        if report.drifted {
            warn!(
                kind = %ErrorKind::ConsistencyDrift,
                folder_id = %folder_id,
                recorded = report.recorded,
                actual = report.actual,
                delta = report.recorded - report.actual,
                "Folder file count drifted, corrected"
            );
        }

        Ok(report)
    }

    /// Reconcile every folder. Folders deleted mid-pass are skipped.
    pub async fn reconcile_all(&self) -> AppResult<Vec<ReconcileReport>> {
        let folders = self
            .deadline
            .run("list folders", self.folders.list_all())
            .await?;

        let mut reports = Vec::with_capacity(folders.len());
        for folder in folders {
            match self.reconcile(folder.id).await {
                Ok(report) => reports.push(report),
                Err(e) if e.is_not_found() => continue,
                Err(e) => return Err(e),
            }
        }

        let drifted = reports.iter().filter(|r| r.drifted).count();
        info!(folders = reports.len(), drifted, "Reconciled folder file counts");
        Ok(reports)
    }
}

#[cfg(test)]
mod tests {
    use nexus_core::types::GroupId;
    use nexus_entity::folder::CreateFolder;

    use super::*;
    use crate::testing::{FlakyFolderRepository, fast_consistency, memory_repositories};

    async fn seed_folder(folders: &Arc<dyn FolderRepository>, id: i64) {
        folders
            .insert(CreateFolder {
                id: FolderId(id),
                name: format!("folder-{id}"),
                visibility: false,
                owner_group_id: GroupId::new("g1"),
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_increment_and_floored_decrement() {
        let repos = memory_repositories();
        seed_folder(&repos.folders, 1).await;
        let coordinator =
            CountCoordinator::new(repos.folders.clone(), &fast_consistency(), Deadline::default());

        assert_eq!(coordinator.on_file_created(FolderId(1)).await.unwrap(), 1);
        assert_eq!(coordinator.on_file_deleted(FolderId(1)).await.unwrap(), 0);
        assert_eq!(coordinator.on_file_deleted(FolderId(1)).await.unwrap(), 0);
        assert!(coordinator.on_file_created(FolderId(2)).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_transient_failures_are_retried() {
        let repos = memory_repositories();
        seed_folder(&repos.folders, 1).await;
        let flaky = Arc::new(FlakyFolderRepository::new(repos.folders.clone(), 2));
        let coordinator =
            CountCoordinator::new(flaky.clone(), &fast_consistency(), Deadline::default());

        assert_eq!(coordinator.on_file_created(FolderId(1)).await.unwrap(), 1);
        assert_eq!(flaky.failures_injected(), 2);
    }

    #[tokio::test]
    async fn test_exhausted_retries_surface_storage_unavailable() {
        let repos = memory_repositories();
        seed_folder(&repos.folders, 1).await;
        let flaky = Arc::new(FlakyFolderRepository::new(repos.folders.clone(), 10));
        let coordinator =
            CountCoordinator::new(flaky, &fast_consistency(), Deadline::default());

        let err = coordinator.on_file_created(FolderId(1)).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::StorageUnavailable);
        let folder = repos.folders.find_by_id(FolderId(1)).await.unwrap().unwrap();
        assert_eq!(folder.file_count, 0);
    }

    #[tokio::test]
    async fn test_reconcile_reports_and_repairs_drift() {
        let repos = memory_repositories();
        seed_folder(&repos.folders, 1).await;
        let coordinator =
            CountCoordinator::new(repos.folders.clone(), &fast_consistency(), Deadline::default());
        coordinator.on_file_created(FolderId(1)).await.unwrap();
        coordinator.on_file_created(FolderId(1)).await.unwrap();

        let report = coordinator.reconcile(FolderId(1)).await.unwrap();
        assert_eq!(
            report,
            ReconcileReport {
                folder_id: FolderId(1),
                recorded: 2,
                actual: 0,
                drifted: true,
            }
        );

        let again = coordinator.reconcile(FolderId(1)).await.unwrap();
        assert!(!again.drifted);
        assert_eq!(again.recorded, 0);

        assert!(coordinator.reconcile(FolderId(9)).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_reconcile_all_covers_every_folder() {
        let repos = memory_repositories();
        seed_folder(&repos.folders, 1).await;
        seed_folder(&repos.folders, 2).await;
        let coordinator =
            CountCoordinator::new(repos.folders.clone(), &fast_consistency(), Deadline::default());
        coordinator.on_file_created(FolderId(2)).await.unwrap();

        let reports = coordinator.reconcile_all().await.unwrap();
        assert_eq!(reports.len(), 2);
        assert!(!reports[0].drifted);
        assert!(reports[1].drifted);
    }
}
