//! # nexus-database
//!
//! Repository traits for folders, files and student activity, with two
//! interchangeable implementations: PostgreSQL via sqlx
//! ([`repositories`]) and a lock-striped in-memory store ([`memory`]).
//! [`Repositories`] selects one of them from configuration.

pub mod backend;
pub mod connection;
pub mod memory;
pub mod repositories;
pub mod traits;

pub use backend::Repositories;
pub use connection::DatabasePool;
pub use memory::MemoryDatabase;
pub use traits::{ActivityRepository, FileRepository, FolderDeletion, FolderRepository, Recount};
