//! Id sequence backed by the `id_sequences` table.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use nexus_core::result::AppResult;
use nexus_core::traits::IdSequence;
use nexus_core::types::IdKind;

use super::storage_error;

/// Per-kind counters advanced by a single atomic upsert.
///
/// The first call for a kind seeds the counter from the largest id already
/// stored in the kind's table, and every later call takes the greater of
/// the counter and that maximum, so rows inserted outside the allocator
/// can never be handed out again.
#[derive(Debug, Clone)]
pub struct PgIdSequence {
    pool: PgPool,
}

impl PgIdSequence {
    /// Create a new sequence over the given pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn next_value_sql(kind: IdKind) -> &'static str {
    match kind {
        IdKind::Folder => {
            "INSERT INTO id_sequences (kind, value) \
             VALUES ($1, (SELECT COALESCE(MAX(id), 0) FROM folders) + 1) \
             ON CONFLICT (kind) DO UPDATE SET value = \
             GREATEST(id_sequences.value, (SELECT COALESCE(MAX(id), 0) FROM folders)) + 1 \
             RETURNING value"
        }
        IdKind::File => {
            "INSERT INTO id_sequences (kind, value) \
             VALUES ($1, (SELECT COALESCE(MAX(id), 0) FROM files) + 1) \
             ON CONFLICT (kind) DO UPDATE SET value = \
             GREATEST(id_sequences.value, (SELECT COALESCE(MAX(id), 0) FROM files)) + 1 \
             RETURNING value"
        }
    }
}

#[async_trait]
impl IdSequence for PgIdSequence {
    async fn next_value(&self, kind: IdKind) -> AppResult<i64> {
        let value = sqlx::query_scalar::<_, i64>(next_value_sql(kind))
            .bind(kind.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(storage_error("Failed to advance id sequence"))?;
        debug!(kind = %kind, value, "Advanced id sequence");
        Ok(value)
    }

    async fn current_value(&self, kind: IdKind) -> AppResult<i64> {
        let value =
            sqlx::query_scalar::<_, i64>("SELECT value FROM id_sequences WHERE kind = $1")
                .bind(kind.as_str())
                .fetch_optional(&self.pool)
                .await
                .map_err(storage_error("Failed to read id sequence"))?;
        Ok(value.unwrap_or(0))
    }
}
