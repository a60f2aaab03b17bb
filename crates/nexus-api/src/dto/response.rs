//! Response envelopes.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// `{"success": true, "data": ...}` envelope wrapped around every successful payload.
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
    #[serde(skip)]
    status: StatusCode,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self::with_status(StatusCode::OK, data)
    }

    /// 201 envelope for newly created records.
    pub fn created(data: T) -> Self {
        Self::with_status(StatusCode::CREATED, data)
    }

    pub fn with_status(status: StatusCode, data: T) -> Self {
        Self {
            success: true,
            data,
            status,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status = self.status;
        (status, Json(self)).into_response()
    }
}

/// Payload for operations with nothing else to return.
#[derive(Debug, Clone, Serialize)]
pub struct Deleted {
    pub deleted: bool,
    pub id: i64,
}

impl Deleted {
    pub fn id(id: i64) -> Self {
        Self { deleted: true, id }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// `ok` or `degraded`.
    pub status: String,
    pub version: String,
    /// `postgres` or `memory`.
    pub backend: String,
    pub database: bool,
    pub storage: bool,
}
