//! Middleware for the HTTP API.

pub mod auth;
pub mod cors;
pub mod security;

pub use auth::{api_key_context, ApiKeyState, RequireApiKey};
pub use cors::create_cors_layer;
pub use security::security_headers;
