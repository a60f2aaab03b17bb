//! Folder domain entities.

pub mod model;

pub use model::{CreateFolder, Folder, FolderPatch};
