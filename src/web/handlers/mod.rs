//! API handlers for the HTTP API.

pub mod file;

pub use file::*;

use std::sync::Arc;

use crate::file::StorageManager;

/// Shared application state.
#[derive(Debug, Clone)]
pub struct AppState {
    /// File storage manager.
    pub manager: Arc<StorageManager>,
}

impl AppState {
    /// Create a new application state.
    pub fn new(manager: StorageManager) -> Self {
        Self {
            manager: Arc::new(manager),
        }
    }

    /// Upload limit in bytes.
    pub fn max_upload_size(&self) -> u64 {
        self.manager.max_file_size()
    }
}
