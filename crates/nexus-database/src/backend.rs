//! Backend selection.

use std::sync::Arc;

use tracing::info;

use nexus_core::config::{DatabaseBackend, DatabaseConfig};
use nexus_core::result::AppResult;
use nexus_core::traits::IdSequence;

use crate::connection::DatabasePool;
use crate::memory::{
    MemoryActivityRepository, MemoryDatabase, MemoryFileRepository, MemoryFolderRepository,
    MemoryIdSequence,
};
use crate::repositories::{
    PgActivityRepository, PgFileRepository, PgFolderRepository, PgIdSequence,
};
use crate::traits::{ActivityRepository, FileRepository, FolderRepository};

/// The repository set of one backend.
#[derive(Debug, Clone)]
pub struct Repositories {
    /// Folder rows.
    pub folders: Arc<dyn FolderRepository>,
    /// File rows.
    pub files: Arc<dyn FileRepository>,
    /// Student activity rows.
    pub activity: Arc<dyn ActivityRepository>,
    /// Folder and file id sequences.
    pub sequence: Arc<dyn IdSequence>,
    backend: DatabaseBackend,
    pool: Option<DatabasePool>,
}

impl Repositories {
    /// Build the configured backend, running migrations for PostgreSQL.
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        match config.backend {
            DatabaseBackend::Postgres => {
                let pool = DatabasePool::connect(config).await?;
                pool.migrate().await?;
                Ok(Self::postgres(pool))
            }
            DatabaseBackend::Memory => {
                info!("Using in-memory database backend");
                Ok(Self::memory(MemoryDatabase::shared()))
            }
        }
    }

    /// PostgreSQL repositories sharing one pool.
    pub fn postgres(pool: DatabasePool) -> Self {
        let pg = pool.pool().clone();
        Self {
            folders: Arc::new(PgFolderRepository::new(pg.clone())),
            files: Arc::new(PgFileRepository::new(pg.clone())),
            activity: Arc::new(PgActivityRepository::new(pg.clone())),
            sequence: Arc::new(PgIdSequence::new(pg)),
            backend: DatabaseBackend::Postgres,
            pool: Some(pool),
        }
    }

    /// In-memory repositories sharing one set of tables.
    pub fn memory(db: Arc<MemoryDatabase>) -> Self {
        Self {
            folders: Arc::new(MemoryFolderRepository::new(Arc::clone(&db))),
            files: Arc::new(MemoryFileRepository::new(Arc::clone(&db))),
            activity: Arc::new(MemoryActivityRepository::new(Arc::clone(&db))),
            sequence: Arc::new(MemoryIdSequence::new(db)),
            backend: DatabaseBackend::Memory,
            pool: None,
        }
    }

    /// Which backend these repositories use.
    pub fn backend(&self) -> DatabaseBackend {
        self.backend
    }

    /// Check backend connectivity.
    pub async fn health_check(&self) -> AppResult<bool> {
        match &self.pool {
            Some(pool) => pool.health_check().await,
            None => Ok(true),
        }
    }

    /// Release backend resources.
    pub async fn close(&self) {
        if let Some(pool) = &self.pool {
            pool.close().await;
        }
    }
}
