//! Wiring of all services from configuration.

use std::sync::Arc;

use nexus_core::config::AppConfig;
use nexus_core::traits::StorageProvider;
use nexus_database::Repositories;

use crate::activity::ActivityService;
use crate::consistency::CountCoordinator;
use crate::deadline::Deadline;
use crate::file::{DownloadService, FileService, UploadService};
use crate::folder::FolderService;
use crate::identity::IdAllocator;

/// Every service, built over one backend and one storage provider.
#[derive(Debug, Clone)]
pub struct Services {
    pub repositories: Repositories,
    pub storage: Arc<dyn StorageProvider>,
    pub ids: IdAllocator,
    pub coordinator: CountCoordinator,
    pub folders: FolderService,
    pub files: FileService,
    pub uploads: UploadService,
    pub downloads: DownloadService,
    pub activity: ActivityService,
}

impl Services {
    /// Wire the services.
    pub fn new(
        repositories: Repositories,
        storage: Arc<dyn StorageProvider>,
        config: &AppConfig,
    ) -> Self {
        let deadline = Deadline::from_config(&config.database);
        let ids = IdAllocator::new(repositories.sequence.clone(), deadline);
        let coordinator =
            CountCoordinator::new(repositories.folders.clone(), &config.consistency, deadline);

        let folders = FolderService::new(repositories.folders.clone(), ids.clone(), deadline);
        let files = FileService::new(
            repositories.files.clone(),
            repositories.folders.clone(),
            storage.clone(),
            coordinator.clone(),
            deadline,
        );
        let uploads = UploadService::new(
            repositories.files.clone(),
            repositories.folders.clone(),
            storage.clone(),
            ids.clone(),
            coordinator.clone(),
            deadline,
            &config.storage,
        );
        let downloads = DownloadService::new(repositories.files.clone(), storage.clone(), deadline);
        let activity = ActivityService::new(repositories.activity.clone(), deadline);

        Self {
            repositories,
            storage,
            ids,
            coordinator,
            folders,
            files,
            uploads,
            downloads,
            activity,
        }
    }

    /// Check backend and storage health.
    pub async fn health_check(&self) -> (bool, bool) {
        let database = self.repositories.health_check().await.unwrap_or(false);
        let storage = self.storage.health_check().await.unwrap_or(false);
        (database, storage)
    }
}
