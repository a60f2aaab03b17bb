//! Student enrollment and activity handlers.

use axum::Json;
use axum::extract::{Path, State};

use nexus_core::types::{Email, GroupId};
use nexus_entity::student::{DailyActivity, Student, StudentActivity, WeeklySummary};

use crate::dto::request::{EnrollStudentRequest, RecordActivityRequest, validated};
use crate::dto::response::ApiResponse;
use crate::error::ApiResult;
use crate::state::AppState;

/// POST /api/students
pub async fn enroll_student(
    State(state): State<AppState>,
    Json(req): Json<EnrollStudentRequest>,
) -> ApiResult<ApiResponse<Student>> {
    let req = validated(req)?;
    let student = state
        .services
        .activity
        .enroll(
            &Email::new(req.email),
            &req.name,
            &GroupId::new(req.group_id),
        )
        .await?;
    Ok(ApiResponse::created(student))
}

/// GET /api/students/{email}
pub async fn get_student_activity(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> ApiResult<ApiResponse<StudentActivity>> {
    let activity = state
        .services
        .activity
        .get_activity(&Email::new(email))
        .await?;
    Ok(ApiResponse::ok(activity))
}

/// POST /api/activity
pub async fn record_activity(
    State(state): State<AppState>,
    Json(req): Json<RecordActivityRequest>,
) -> ApiResult<ApiResponse<Vec<DailyActivity>>> {
    let req = validated(req)?;
    let history = state
        .services
        .activity
        .record_activity(&Email::new(req.email), req.minutes, req.date)
        .await?;
    Ok(ApiResponse::ok(history))
}

/// GET /api/activity/{email}/weekly
pub async fn weekly_summary(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> ApiResult<ApiResponse<WeeklySummary>> {
    let summary = state
        .services
        .activity
        .weekly_summary(&Email::new(email))
        .await?;
    Ok(ApiResponse::ok(summary))
}
