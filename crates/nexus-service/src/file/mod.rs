//! File upload, listing, deletion, and download.

pub mod download;
pub mod service;
pub mod upload;

pub use download::{Download, DownloadService};
pub use service::FileService;
pub use upload::{RegisterFile, UploadParams, UploadService};
