//! Route definitions for the Research Nexus HTTP API.
//!
//! All routes are mounted under `/api` and receive `AppState` through
//! Axum's `State` extractor.

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};

use crate::handlers;
use crate::state::AppState;

/// Room for multipart boundaries and text fields on top of the file cap.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Build the router with every route and the body size limit.
pub fn build_router(state: AppState) -> Router {
    let max_body = usize::try_from(state.config.storage.max_upload_size_bytes)
        .unwrap_or(usize::MAX)
        .saturating_add(MULTIPART_OVERHEAD_BYTES);

    let api_routes = Router::new()
        .merge(folder_routes())
        .merge(file_routes())
        .merge(activity_routes())
        .merge(health_routes());

    Router::new()
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::max(max_body))
        .with_state(state)
}

/// Folder CRUD, search, and reconcile
fn folder_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/folders",
            get(handlers::folder::list_folders).post(handlers::folder::create_folder),
        )
        .route("/folders/search", get(handlers::folder::search_folders))
        .route(
            "/folders/{id}",
            get(handlers::folder::get_folder)
                .patch(handlers::folder::update_folder)
                .delete(handlers::folder::delete_folder),
        )
        .route(
            "/folders/{id}/reconcile",
            post(handlers::folder::reconcile_folder),
        )
        .route(
            "/folders/{id}/files",
            get(handlers::file::list_files_by_folder),
        )
}

/// File upload, search, delete, and download
fn file_routes() -> Router<AppState> {
    Router::new()
        .route("/files", post(handlers::file::upload_file))
        .route("/files/search", get(handlers::file::search_files))
        .route(
            "/files/{id}",
            get(handlers::file::get_file).delete(handlers::file::delete_file),
        )
        .route("/files/{id}/download", get(handlers::file::download_file))
}

/// Student enrollment and activity
fn activity_routes() -> Router<AppState> {
    Router::new()
        .route("/students", post(handlers::activity::enroll_student))
        .route(
            "/students/{email}",
            get(handlers::activity::get_student_activity),
        )
        .route("/activity", post(handlers::activity::record_activity))
        .route(
            "/activity/{email}/weekly",
            get(handlers::activity::weekly_summary),
        )
}

/// Health check
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
