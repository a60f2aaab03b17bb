//! Typed path parameter helpers.

use nexus_core::error::AppError;
use nexus_core::types::{FileId, FolderId};

/// Parses a folder id from a path segment.
pub fn parse_folder_id(s: &str) -> Result<FolderId, AppError> {
    s.parse::<FolderId>()
        .ok()
        .filter(|id| id.is_valid())
        .ok_or_else(|| AppError::validation(format!("Invalid folder id: {s}")))
}

/// Parses a file id from a path segment.
pub fn parse_file_id(s: &str) -> Result<FileId, AppError> {
    s.parse::<FileId>()
        .ok()
        .filter(|id| id.is_valid())
        .ok_or_else(|| AppError::validation(format!("Invalid file id: {s}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ids() {
        assert_eq!(parse_folder_id("12").unwrap(), FolderId(12));
        assert_eq!(parse_file_id(" 7 ").unwrap(), FileId(7));
        assert!(parse_folder_id("abc").is_err());
        assert!(parse_folder_id("0").is_err());
        assert!(parse_file_id("-3").is_err());
    }
}
