//! API key authentication middleware.

use axum::{
    body::Body,
    extract::FromRequestParts,
    http::{request::Parts, Request},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use crate::auth::{verify_api_key, API_KEY_HEADER};
use crate::web::error::ApiError;

/// Shared secret the API key header is checked against.
#[derive(Clone)]
pub struct ApiKeyState {
    api_key: String,
}

impl ApiKeyState {
    /// Create a new API key state.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
        }
    }
}

impl std::fmt::Debug for ApiKeyState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiKeyState").finish_non_exhaustive()
    }
}

/// Extractor for requests carrying a valid `X-API-Key` header.
///
/// Add it to a handler's arguments to require the shared secret.
#[derive(Debug, Clone, Copy)]
pub struct RequireApiKey;

#[axum::async_trait]
impl<S> FromRequestParts<S> for RequireApiKey
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let key_state = parts
            .extensions
            .get::<Arc<ApiKeyState>>()
            .ok_or_else(|| ApiError::internal("API key state not configured"))?;

        let presented = parts
            .headers
            .get(API_KEY_HEADER)
            .and_then(|value| value.to_str().ok());

        if verify_api_key(presented, &key_state.api_key) {
            Ok(RequireApiKey)
        } else {
            tracing::warn!(path = %parts.uri.path(), "Unauthorized access");
            Err(ApiError::unauthorized("Unauthorized access"))
        }
    }
}

/// Middleware function to inject the API key state into request extensions.
pub async fn api_key_context(
    key_state: Arc<ApiKeyState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    request.extensions_mut().insert(key_state);
    next.run(request).await
}
