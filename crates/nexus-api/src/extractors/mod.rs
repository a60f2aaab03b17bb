//! Custom Axum extractors.

pub mod path;
pub mod principal;

pub use path::{parse_file_id, parse_folder_id};
pub use principal::{Caller, GROUP_HEADER, USER_HEADER};
