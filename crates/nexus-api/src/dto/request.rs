//! Request DTOs with validation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use nexus_core::error::AppError;

/// Run the derived validation rules of a request body.
pub fn validated<T: Validate>(req: T) -> Result<T, AppError> {
    req.validate()
        .map_err(|e| AppError::validation(format!("Invalid request: {e}")))?;
    Ok(req)
}

/// Create folder request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateFolderRequest {
    /// Folder name.
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    /// Whether the folder is visible outside its group.
    #[serde(default)]
    pub visibility: bool,
}

/// Partial folder update.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateFolderRequest {
    /// New name.
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    /// New visibility.
    pub visibility: Option<bool>,
}

/// `?q=` search parameter. Absent means match all.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

/// Enroll a student for activity tracking.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct EnrollStudentRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(max = 255))]
    #[serde(default)]
    pub name: String,
    #[validate(length(min = 1, message = "Group id is required"))]
    pub group_id: String,
}

/// Record minutes spent by a student.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RecordActivityRequest {
    #[validate(email)]
    pub email: String,
    /// Minutes to add to the day's entry.
    #[validate(range(min = 0, message = "Minutes spent cannot be negative"))]
    pub minutes: i64,
    /// Calendar day; the server's local today when omitted.
    pub date: Option<NaiveDate>,
}
