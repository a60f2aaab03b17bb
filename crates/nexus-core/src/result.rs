//! Convenience result type alias for Research Nexus.

use crate::error::AppError;

/// A specialized `Result` type for Nexus operations.
pub type AppResult<T> = Result<T, AppError>;
