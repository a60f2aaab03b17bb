//! # nexus-entity
//!
//! Domain entity models for Research Nexus. Every struct in this crate
//! represents a database table row or a domain value object. Row entities
//! derive `sqlx::FromRow` so the PostgreSQL backend can load them directly.
//!
//! The access filter ([`access`]) and the name search predicate
//! ([`search`]) live here as well, so every backend evaluates them the
//! same way.

pub mod access;
pub mod file;
pub mod folder;
pub mod search;
pub mod student;

pub use access::{AccessScope, Scoped};
pub use search::NameQuery;
