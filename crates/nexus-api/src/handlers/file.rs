//! File upload, listing, search, delete, and download handlers.

use axum::body::Body;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::{StatusCode, header};
use axum::response::Response;
use bytes::Bytes;

use nexus_core::error::AppError;
use nexus_core::types::FolderId;
use nexus_entity::file::File;
use nexus_service::UploadParams;
use nexus_storage::mime::content_type_for;

use crate::dto::request::SearchQuery;
use crate::dto::response::ApiResponse;
use crate::error::ApiResult;
use crate::extractors::{Caller, parse_file_id, parse_folder_id};
use crate::state::AppState;

fn parse_visibility(text: &str) -> Result<bool, AppError> {
    match text.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "public" => Ok(true),
        "false" | "0" | "private" | "" => Ok(false),
        other => Err(AppError::validation(format!("Invalid visibility: {other}"))),
    }
}

/// POST /api/files, multipart fields `name`, `folder_id`, `visibility`, `file`
pub async fn upload_file(
    State(state): State<AppState>,
    caller: Caller,
    mut multipart: Multipart,
) -> ApiResult<ApiResponse<File>> {
    let mut name: Option<String> = None;
    let mut folder_id: Option<FolderId> = None;
    let mut visibility = false;
    let mut file_name: Option<String> = None;
    let mut content: Option<Bytes> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Multipart error: {e}")))?
    {
        let field_name = field.name().unwrap_or("").to_string();
        match field_name.as_str() {
            "file" => {
                file_name = field.file_name().map(String::from);
                content = Some(
                    field
                        .bytes()
                        .await
                        .map_err(|e| AppError::validation(format!("Read error: {e}")))?,
                );
            }
            "name" | "folder_id" | "visibility" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::validation(format!("Read error: {e}")))?;
                match field_name.as_str() {
                    "name" => name = Some(text),
                    "folder_id" => folder_id = Some(parse_folder_id(&text)?),
                    _ => visibility = parse_visibility(&text)?,
                }
            }
            _ => {}
        }
    }

    let folder_id = folder_id.ok_or_else(|| AppError::validation("folder_id is required"))?;
    let content = content.ok_or_else(|| AppError::validation("file is required"))?;
    let name = name
        .filter(|n| !n.trim().is_empty())
        .or(file_name)
        .unwrap_or_default();

    let file = state
        .services
        .uploads
        .upload_file(
            &caller,
            UploadParams {
                name,
                folder_id,
                visibility,
                content,
            },
        )
        .await?;

    Ok(ApiResponse::created(file))
}

/// GET /api/folders/{id}/files
pub async fn list_files_by_folder(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<String>,
) -> ApiResult<ApiResponse<Vec<File>>> {
    let folder_id = parse_folder_id(&id)?;
    let files = state
        .services
        .files
        .list_files_by_folder(folder_id, &caller.group_id)
        .await?;
    Ok(ApiResponse::ok(files))
}

/// GET /api/files/search?q=
pub async fn search_files(
    State(state): State<AppState>,
    caller: Caller,
    Query(params): Query<SearchQuery>,
) -> ApiResult<ApiResponse<Vec<File>>> {
    let files = state
        .services
        .files
        .search_files(&params.q, &caller.group_id)
        .await?;
    Ok(ApiResponse::ok(files))
}

/// GET /api/files/{id}
pub async fn get_file(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<ApiResponse<File>> {
    let id = parse_file_id(&id)?;
    let file = state.services.files.get_file(id).await?;
    Ok(ApiResponse::ok(file))
}

/// DELETE /api/files/{id}
pub async fn delete_file(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<ApiResponse<File>> {
    let id = parse_file_id(&id)?;
    let file = state.services.files.delete_file(id).await?;
    Ok(ApiResponse::ok(file))
}

/// GET /api/files/{id}/download
pub async fn download_file(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Response> {
    let id = parse_file_id(&id)?;
    let download = state.services.downloads.download_file(id).await?;
    let filename: String = download
        .file
        .name
        .chars()
        .filter(|c| !c.is_control() && *c != '"')
        .collect();

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type_for(&download.file.name))
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{filename}\""),
        )
        .header(header::CONTENT_LENGTH, download.file.size_bytes)
        .body(Body::from_stream(download.content))
        .map_err(|e| AppError::storage_unavailable(format!("Response build failed: {e}")))?;

    Ok(response)
}
