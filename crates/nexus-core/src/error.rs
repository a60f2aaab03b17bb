//! Unified application error types for Research Nexus.
//!
//! Every error surfaced by a core operation carries one of the
//! [`ErrorKind`] categories plus a human-readable message. Backend and I/O
//! failures are mapped into these categories at the crate boundary where
//! they occur.

use std::fmt;
use thiserror::Error;

/// Top-level error kind categorization used across the entire application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// Malformed or missing required input. Never retried.
    Validation,
    /// The referenced folder, file, or student does not exist.
    NotFound,
    /// The backing store is unreachable or timed out. Safe to retry.
    StorageUnavailable,
    /// A derived aggregate disagreed with its source of truth.
    ConsistencyDrift,
    /// Configuration could not be loaded (startup only).
    Configuration,
}

impl ErrorKind {
    /// Whether an operation failing with this kind may be retried.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::StorageUnavailable)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation => write!(f, "VALIDATION_ERROR"),
            Self::NotFound => write!(f, "NOT_FOUND"),
            Self::StorageUnavailable => write!(f, "STORAGE_UNAVAILABLE"),
            Self::ConsistencyDrift => write!(f, "CONSISTENCY_DRIFT"),
            Self::Configuration => write!(f, "CONFIGURATION"),
        }
    }
}

/// The unified application error used throughout Research Nexus.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

/// One shorthand constructor per [`ErrorKind`].
macro_rules! kind_constructors {
    ($($fn_name:ident => $kind:ident),* $(,)?) => {
        impl AppError {
            $(
                #[doc = concat!("An [`ErrorKind::", stringify!($kind), "`] error.")]
                pub fn $fn_name(message: impl Into<String>) -> Self {
                    Self::new(ErrorKind::$kind, message)
                }
            )*
        }
    };
}

kind_constructors! {
    validation => Validation,
    not_found => NotFound,
    storage_unavailable => StorageUnavailable,
    consistency_drift => ConsistencyDrift,
    configuration => Configuration,
}

impl AppError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Like [`AppError::new`], keeping `source` as the error chain.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Whether this error may be retried by the caller.
    pub fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }

    pub fn is_not_found(&self) -> bool {
        self.kind == ErrorKind::NotFound
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::Validation,
            format!("Malformed JSON: {err}"),
            err,
        )
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            return Self::with_source(ErrorKind::NotFound, format!("Not found: {err}"), err);
        }
        Self::with_source(
            ErrorKind::StorageUnavailable,
            format!("I/O error: {err}"),
            err,
        )
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}
