//! Student activity record models.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use nexus_core::types::{Email, GroupId};

/// A student whose daily usage is tracked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Student {
    /// The student key.
    pub email: Email,
    /// Display name.
    pub name: String,
    /// The student's research group.
    pub group_id: GroupId,
    /// Sum cached by the most recent summary request.
    pub weekly_summary: i64,
    /// When the student was enrolled.
    pub created_at: DateTime<Utc>,
}

/// Minutes spent on one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct DailyActivity {
    /// The calendar day.
    #[sqlx(rename = "activity_date")]
    pub date: NaiveDate,
    /// Accumulated minutes for that day.
    pub minutes_spent: i64,
}

/// Data required to enroll a student.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrollStudent {
    pub email: Email,
    pub name: String,
    pub group_id: GroupId,
}

/// A student together with their insertion-ordered daily history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentActivity {
    pub student: Student,
    pub daily_activity: Vec<DailyActivity>,
}

/// Result of a trailing seven-day summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklySummary {
    /// Minutes summed over `[window_start, window_end]`.
    pub weekly_summary: i64,
    /// The full, unpruned history.
    pub daily_activity: Vec<DailyActivity>,
    pub window_start: NaiveDate,
    pub window_end: NaiveDate,
}
