//! Folder management.

pub mod service;

pub use service::{CreateFolderParams, FolderService};
