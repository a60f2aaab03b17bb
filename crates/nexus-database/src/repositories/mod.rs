//! PostgreSQL repository implementations.

pub mod activity;
pub mod file;
pub mod folder;
pub mod sequence;

pub use activity::PgActivityRepository;
pub use file::PgFileRepository;
pub use folder::PgFolderRepository;
pub use sequence::PgIdSequence;

use nexus_core::error::{AppError, ErrorKind};

/// Map a sqlx failure to `StorageUnavailable` with a fixed context message.
pub(crate) fn storage_error(context: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
    move |e| AppError::with_source(ErrorKind::StorageUnavailable, context, e)
}

/// SQLSTATE `numeric_value_out_of_range`.
const NUMERIC_OUT_OF_RANGE: &str = "22003";

/// Whether a sqlx failure is a bigint overflow in the statement itself.
pub(crate) fn is_numeric_overflow(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.code().as_deref() == Some(NUMERIC_OUT_OF_RANGE))
}

/// Whether a sqlx failure is a foreign key violation.
pub(crate) fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_foreign_key_violation())
}
