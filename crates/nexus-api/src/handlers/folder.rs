//! Folder CRUD, search, and reconcile handlers.

use axum::Json;
use axum::extract::{Path, Query, State};

use nexus_entity::folder::{Folder, FolderPatch};
use nexus_service::{CreateFolderParams, ReconcileReport};

use crate::dto::request::{CreateFolderRequest, SearchQuery, UpdateFolderRequest, validated};
use crate::dto::response::{ApiResponse, Deleted};
use crate::error::ApiResult;
use crate::extractors::{Caller, parse_folder_id};
use crate::state::AppState;

/// POST /api/folders
pub async fn create_folder(
    State(state): State<AppState>,
    caller: Caller,
    Json(req): Json<CreateFolderRequest>,
) -> ApiResult<ApiResponse<Folder>> {
    let req = validated(req)?;
    let folder = state
        .services
        .folders
        .create_folder(
            &caller.group_id,
            CreateFolderParams {
                name: req.name,
                visibility: req.visibility,
            },
        )
        .await?;

    Ok(ApiResponse::created(folder))
}

/// GET /api/folders
pub async fn list_folders(
    State(state): State<AppState>,
    caller: Caller,
) -> ApiResult<ApiResponse<Vec<Folder>>> {
    let folders = state.services.folders.list_folders(&caller.group_id).await?;
    Ok(ApiResponse::ok(folders))
}

/// GET /api/folders/search?q=
pub async fn search_folders(
    State(state): State<AppState>,
    caller: Caller,
    Query(params): Query<SearchQuery>,
) -> ApiResult<ApiResponse<Vec<Folder>>> {
    let folders = state
        .services
        .folders
        .search_folders(&params.q, &caller.group_id)
        .await?;
    Ok(ApiResponse::ok(folders))
}

/// GET /api/folders/{id}
pub async fn get_folder(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<ApiResponse<Folder>> {
    let id = parse_folder_id(&id)?;
    let folder = state.services.folders.get_folder(id).await?;
    Ok(ApiResponse::ok(folder))
}

/// PATCH /api/folders/{id}
pub async fn update_folder(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateFolderRequest>,
) -> ApiResult<ApiResponse<Folder>> {
    let id = parse_folder_id(&id)?;
    let req = validated(req)?;
    let folder = state
        .services
        .folders
        .update_folder(
            id,
            FolderPatch {
                name: req.name,
                visibility: req.visibility,
            },
        )
        .await?;
    Ok(ApiResponse::ok(folder))
}

/// DELETE /api/folders/{id}
pub async fn delete_folder(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<ApiResponse<Deleted>> {
    let id = parse_folder_id(&id)?;
    state.services.folders.delete_folder(id).await?;
    Ok(ApiResponse::ok(Deleted::id(id.get())))
}

/// POST /api/folders/{id}/reconcile
pub async fn reconcile_folder(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<ApiResponse<ReconcileReport>> {
    let id = parse_folder_id(&id)?;
    let report = state.services.coordinator.reconcile(id).await?;
    Ok(ApiResponse::ok(report))
}
