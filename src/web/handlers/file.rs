//! File handlers for the HTTP API.

use axum::{
    body::Body,
    extract::{multipart::MultipartError, ConnectInfo, Multipart, Path, State},
    http::{header, HeaderMap, StatusCode},
    response::Response,
    Json,
};
use std::net::SocketAddr;
use std::sync::Arc;

use crate::file::UploadRequest;
use crate::web::dto::{FileSummaryResponse, MessageResponse, UploadResponse};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;
use crate::web::middleware::RequireApiKey;

/// Multipart form field carrying the uploaded file.
const FILE_FIELD: &str = "file";

/// Generate a safe Content-Disposition header value for file downloads.
///
/// Control characters (CR, LF) are removed to prevent header injection,
/// quotes and backslashes are replaced in the ASCII fallback, and non-ASCII
/// names are carried in an RFC 5987 `filename*` parameter.
fn content_disposition_header(filename: &str) -> String {
    if filename.is_ascii() && !filename.chars().any(|c| c.is_control() || c == '"' || c == '\\') {
        return format!("attachment; filename=\"{}\"", filename);
    }

    let fallback: String = filename
        .chars()
        .filter(|c| !c.is_control())
        .map(|c| match c {
            '"' | '\\' => '_',
            c if c.is_ascii() => c,
            _ => '_',
        })
        .collect();

    let cleaned: String = filename.chars().filter(|c| !c.is_control()).collect();
    let encoded = urlencoding::encode(&cleaned);

    format!(
        "attachment; filename=\"{}\"; filename*=UTF-8''{}",
        fallback, encoded
    )
}

/// Best-effort network origin of the client.
///
/// Prefers the first `X-Forwarded-For` entry (reverse proxy), then the peer
/// address of the connection.
fn client_origin(headers: &HeaderMap, peer: Option<SocketAddr>) -> String {
    let forwarded = headers
        .get("X-Forwarded-For")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|ip| !ip.is_empty());

    match (forwarded, peer) {
        (Some(ip), _) => ip.to_string(),
        (None, Some(addr)) => addr.ip().to_string(),
        (None, None) => "unknown".to_string(),
    }
}

/// Map a multipart read failure, keeping body-limit rejections as 413.
fn multipart_error(e: MultipartError) -> ApiError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        tracing::warn!("Upload rejected by body limit: {}", e);
        ApiError::payload_too_large("File too large")
    } else {
        tracing::warn!("Failed to read multipart data: {}", e);
        ApiError::bad_request("Invalid multipart data")
    }
}

/// Run a blocking storage operation off the async executor.
async fn run_blocking<T, F>(f: F) -> Result<T, ApiError>
where
    F: FnOnce() -> crate::Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| {
            tracing::error!("Storage task failed: {}", e);
            ApiError::internal("An internal error occurred")
        })?
        .map_err(ApiError::from)
}

/// POST /upload - Upload a file.
///
/// Request body: multipart/form-data with a `file` field.
pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    _auth: RequireApiKey,
    peer: Option<ConnectInfo<SocketAddr>>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<UploadResponse>), ApiError> {
    let mut upload: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let Some(filename) = field.file_name().map(|s| s.to_string()) else {
            continue;
        };
        let content = field.bytes().await.map_err(multipart_error)?;
        upload = Some((filename, content.to_vec()));
        break;
    }

    let (filename, content) = upload.ok_or_else(|| {
        tracing::warn!("No file part in request");
        ApiError::bad_request("No file part")
    })?;

    let origin = client_origin(&headers, peer.map(|ConnectInfo(addr)| addr));
    let request = UploadRequest::new(filename, content, origin);

    let manager = state.manager.clone();
    let uploaded = run_blocking(move || manager.upload(&request)).await?;

    Ok((StatusCode::CREATED, Json(UploadResponse::from(uploaded))))
}

/// GET /download/:storage_id - Download a file.
pub async fn download_file(
    State(state): State<Arc<AppState>>,
    Path(storage_id): Path<String>,
) -> Result<Response<Body>, ApiError> {
    let manager = state.manager.clone();
    let file = run_blocking(move || manager.download(&storage_id)).await?;

    Response::builder()
        .header(header::CONTENT_TYPE, file.mime_type)
        .header(
            header::CONTENT_DISPOSITION,
            content_disposition_header(&file.display_name),
        )
        .header(header::CONTENT_LENGTH, file.content.len())
        .body(Body::from(file.content))
        .map_err(|e| {
            tracing::error!("Failed to build response: {}", e);
            ApiError::internal("Failed to build response")
        })
}

/// GET /files - List stored files.
pub async fn list_files(
    State(state): State<Arc<AppState>>,
    _auth: RequireApiKey,
) -> Result<Json<Vec<FileSummaryResponse>>, ApiError> {
    let manager = state.manager.clone();
    let files = run_blocking(move || manager.list()).await?;

    Ok(Json(files))
}

/// DELETE /files/:storage_id - Delete a file.
pub async fn delete_file(
    State(state): State<Arc<AppState>>,
    _auth: RequireApiKey,
    Path(storage_id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let manager = state.manager.clone();
    run_blocking(move || manager.delete(&storage_id)).await?;

    Ok(Json(MessageResponse::new("File deleted successfully")))
}
