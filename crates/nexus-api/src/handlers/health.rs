//! Health check handler.

use axum::extract::State;
use axum::http::StatusCode;

use crate::dto::response::{ApiResponse, HealthResponse};
use crate::state::AppState;

/// GET /api/health
///
/// 503 when either the backend or the storage provider is unreachable.
pub async fn health(State(state): State<AppState>) -> ApiResponse<HealthResponse> {
    let (database, storage) = state.services.health_check().await;
    let healthy = database && storage;

    let status = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let body = HealthResponse {
        status: if healthy { "ok" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        backend: state.services.repositories.backend().to_string(),
        database,
        storage,
    };

    ApiResponse::with_status(status, body)
}
