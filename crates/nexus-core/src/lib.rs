//! # nexus-core
//!
//! Core crate for Research Nexus. Contains the unified error system,
//! configuration schemas, typed identifiers, the caller principal, and the
//! provider traits implemented by the storage and database crates.
//!
//! This crate has **no** internal dependencies on other Nexus crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
