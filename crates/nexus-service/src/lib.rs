//! # nexus-service
//!
//! Business logic for Research Nexus. Each service owns its validation
//! rules and calls repositories through a bounded [`Deadline`]. File
//! creation and deletion notify the [`CountCoordinator`], the only writer
//! of a folder's file count.
//!
//! Services follow constructor injection: all dependencies are passed in
//! as `Arc`s and [`Services`] wires them together from configuration.

pub mod activity;
pub mod consistency;
pub mod deadline;
pub mod file;
pub mod folder;
pub mod identity;
pub mod registry;

#[cfg(test)]
pub(crate) mod testing;

pub use activity::ActivityService;
pub use consistency::{CountCoordinator, ReconcileReport};
pub use deadline::Deadline;
pub use file::{Download, DownloadService, FileService, RegisterFile, UploadParams, UploadService};
pub use folder::{CreateFolderParams, FolderService};
pub use identity::IdAllocator;
pub use registry::Services;
