//! Router configuration for the Filebox HTTP API.

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use super::handlers::{delete_file, download_file, list_files, upload_file, AppState};
use super::middleware::{api_key_context, create_cors_layer, security_headers, ApiKeyState};

/// Room for multipart boundaries and part headers on top of the file itself.
const MULTIPART_OVERHEAD: u64 = 64 * 1024;

/// Create the main API router.
pub fn create_router(
    app_state: Arc<AppState>,
    api_key_state: Arc<ApiKeyState>,
    cors_origins: &[String],
) -> Router {
    let body_limit = app_state
        .max_upload_size()
        .saturating_add(MULTIPART_OVERHEAD);
    let body_limit = usize::try_from(body_limit).unwrap_or(usize::MAX);

    let file_routes = Router::new()
        .route("/upload", post(upload_file))
        .route("/files", get(list_files))
        .route("/files/:storage_id", delete(delete_file))
        .route("/download/:storage_id", get(download_file))
        .layer(DefaultBodyLimit::max(body_limit));

    Router::new()
        .merge(file_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(create_cors_layer(cors_origins))
                .layer(middleware::from_fn(security_headers))
                .layer(middleware::from_fn(move |req, next| {
                    let state = api_key_state.clone();
                    api_key_context(state, req, next)
                })),
        )
        .with_state(app_state)
}

/// Create a health check router.
pub fn create_health_router() -> Router {
    Router::new().route("/health", get(health_check))
}

/// Health check handler.
async fn health_check() -> &'static str {
    "OK"
}
