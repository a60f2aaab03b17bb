//! Folder repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use nexus_core::result::AppResult;
use nexus_core::types::FolderId;
use nexus_entity::folder::{CreateFolder, Folder, FolderPatch};
use nexus_entity::{AccessScope, NameQuery};

use super::{is_foreign_key_violation, storage_error};
use crate::traits::{FolderDeletion, FolderRepository, Recount};

/// PostgreSQL-backed folder repository.
#[derive(Debug, Clone)]
pub struct PgFolderRepository {
    pool: PgPool,
}

impl PgFolderRepository {
    /// Create a new folder repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FolderRepository for PgFolderRepository {
    async fn insert(&self, data: CreateFolder) -> AppResult<Folder> {
        sqlx::query_as::<_, Folder>(
            "INSERT INTO folders (id, name, file_count, visibility, owner_group_id) \
             VALUES ($1, $2, 0, $3, $4) RETURNING *",
        )
        .bind(data.id)
        .bind(&data.name)
        .bind(data.visibility)
        .bind(&data.owner_group_id)
        .fetch_one(&self.pool)
        .await
        .map_err(storage_error("Failed to create folder"))
    }

    async fn find_by_id(&self, id: FolderId) -> AppResult<Option<Folder>> {
        sqlx::query_as::<_, Folder>("SELECT * FROM folders WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_error("Failed to find folder"))
    }

    async fn list_all(&self) -> AppResult<Vec<Folder>> {
        sqlx::query_as::<_, Folder>("SELECT * FROM folders ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(storage_error("Failed to list folders"))
    }

    async fn list_visible(&self, scope: &AccessScope) -> AppResult<Vec<Folder>> {
        sqlx::query_as::<_, Folder>(
            "SELECT * FROM folders WHERE (owner_group_id = $1 OR visibility) ORDER BY id ASC",
        )
        .bind(scope.group_id())
        .fetch_all(&self.pool)
        .await
        .map_err(storage_error("Failed to list folders"))
    }

    async fn search_visible(
        &self,
        query: &NameQuery,
        scope: &AccessScope,
    ) -> AppResult<Vec<Folder>> {
        sqlx::query_as::<_, Folder>(
            "SELECT * FROM folders \
             WHERE (owner_group_id = $1 OR visibility) AND name ILIKE $2 ESCAPE '\\' \
             ORDER BY id ASC",
        )
        .bind(scope.group_id())
        .bind(query.like_pattern())
        .fetch_all(&self.pool)
        .await
        .map_err(storage_error("Failed to search folders"))
    }

    async fn update(&self, id: FolderId, patch: &FolderPatch) -> AppResult<Option<Folder>> {
        sqlx::query_as::<_, Folder>(
            "UPDATE folders SET name = COALESCE($2, name), \
             visibility = COALESCE($3, visibility), updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(patch.name.as_deref())
        .bind(patch.visibility)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_error("Failed to update folder"))
    }

    async fn delete_if_empty(&self, id: FolderId) -> AppResult<FolderDeletion> {
        // files.folder_id is ON DELETE RESTRICT, so a non-empty folder
        // surfaces as a foreign key violation.
        match sqlx::query("DELETE FROM folders WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
        {
            Ok(result) if result.rows_affected() > 0 => Ok(FolderDeletion::Deleted),
            Ok(_) => Ok(FolderDeletion::NotFound),
            Err(e) if is_foreign_key_violation(&e) => Ok(FolderDeletion::NotEmpty),
            Err(e) => Err(storage_error("Failed to delete folder")(e)),
        }
    }

    async fn increment_file_count(&self, id: FolderId) -> AppResult<Option<i64>> {
        sqlx::query_scalar::<_, i64>(
            "UPDATE folders SET file_count = file_count + 1, updated_at = NOW() \
             WHERE id = $1 RETURNING file_count",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_error("Failed to increment file count"))
    }

    async fn decrement_file_count(&self, id: FolderId) -> AppResult<Option<i64>> {
        sqlx::query_scalar::<_, i64>(
            "UPDATE folders SET file_count = GREATEST(file_count - 1, 0), updated_at = NOW() \
             WHERE id = $1 RETURNING file_count",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_error("Failed to decrement file count"))
    }

    async fn recount_files(&self, id: FolderId) -> AppResult<Option<Recount>> {
        let row = sqlx::query_as::<_, (i64, i64)>(
            "WITH previous AS ( \
                SELECT id, file_count FROM folders WHERE id = $1 FOR UPDATE \
             ) \
             UPDATE folders f \
             SET file_count = (SELECT COUNT(*) FROM files WHERE folder_id = $1), \
                 updated_at = NOW() \
             FROM previous WHERE f.id = previous.id \
             RETURNING previous.file_count, f.file_count",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_error("Failed to recount folder files"))?;

        Ok(row.map(|(recorded, actual)| Recount { recorded, actual }))
    }
}
