//! Student daily activity and weekly summaries.

pub mod service;

pub use service::ActivityService;
