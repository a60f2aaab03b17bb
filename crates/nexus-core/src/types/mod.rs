//! Core type definitions used across the Nexus workspace.

pub mod id;
pub mod principal;

pub use id::*;
pub use principal::Principal;
