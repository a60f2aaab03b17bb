//! Folder file-count coordination and reconciliation.

pub mod coordinator;
pub mod retry;

pub use coordinator::{CountCoordinator, ReconcileReport};
pub use retry::RetryPolicy;
