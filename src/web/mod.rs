//! Web API module for Filebox.
//!
//! This module provides the HTTP surface: upload, list, download and delete,
//! guarded by a shared API key.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod server;

pub use error::ApiError;
pub use handlers::AppState;
pub use middleware::ApiKeyState;
pub use router::{create_health_router, create_router};
pub use server::WebServer;
