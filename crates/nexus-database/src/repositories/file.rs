//! File repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use nexus_core::error::AppError;
use nexus_core::result::AppResult;
use nexus_core::types::{FileId, FolderId};
use nexus_entity::file::{CreateFile, File};
use nexus_entity::{AccessScope, NameQuery};

use super::{is_foreign_key_violation, storage_error};
use crate::traits::FileRepository;

/// PostgreSQL-backed file repository.
#[derive(Debug, Clone)]
pub struct PgFileRepository {
    pool: PgPool,
}

impl PgFileRepository {
    /// Create a new file repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FileRepository for PgFileRepository {
    async fn insert(&self, data: CreateFile) -> AppResult<File> {
        sqlx::query_as::<_, File>(
            "INSERT INTO files (id, folder_id, name, visibility, owner_group_id, \
             uploaded_by, stored_ref, size_bytes) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING *",
        )
        .bind(data.id)
        .bind(data.folder_id)
        .bind(&data.name)
        .bind(data.visibility)
        .bind(&data.owner_group_id)
        .bind(&data.uploaded_by)
        .bind(&data.stored_ref)
        .bind(data.size_bytes)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_foreign_key_violation(&e) {
                AppError::not_found(format!("Folder {} not found", data.folder_id))
            } else {
                storage_error("Failed to create file")(e)
            }
        })
    }

    async fn find_by_id(&self, id: FileId) -> AppResult<Option<File>> {
        sqlx::query_as::<_, File>("SELECT * FROM files WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_error("Failed to find file"))
    }

    async fn list_by_folder_visible(
        &self,
        folder_id: FolderId,
        scope: &AccessScope,
    ) -> AppResult<Vec<File>> {
        sqlx::query_as::<_, File>(
            "SELECT * FROM files \
             WHERE folder_id = $1 AND (owner_group_id = $2 OR visibility) \
             ORDER BY id ASC",
        )
        .bind(folder_id)
        .bind(scope.group_id())
        .fetch_all(&self.pool)
        .await
        .map_err(storage_error("Failed to list files"))
    }

    async fn search_visible(&self, query: &NameQuery, scope: &AccessScope) -> AppResult<Vec<File>> {
        sqlx::query_as::<_, File>(
            "SELECT * FROM files \
             WHERE (owner_group_id = $1 OR visibility) AND name ILIKE $2 ESCAPE '\\' \
             ORDER BY id ASC",
        )
        .bind(scope.group_id())
        .bind(query.like_pattern())
        .fetch_all(&self.pool)
        .await
        .map_err(storage_error("Failed to search files"))
    }

    async fn delete(&self, id: FileId) -> AppResult<Option<File>> {
        sqlx::query_as::<_, File>("DELETE FROM files WHERE id = $1 RETURNING *")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_error("Failed to delete file"))
    }

    async fn count_by_folder(&self, folder_id: FolderId) -> AppResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM files WHERE folder_id = $1")
            .bind(folder_id)
            .fetch_one(&self.pool)
            .await
            .map_err(storage_error("Failed to count files"))
    }
}
