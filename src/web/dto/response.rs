//! Response DTOs for the HTTP API.

use serde::Serialize;

use crate::file::{FileSummary, UploadedFile};

/// Upload response (201).
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    /// Human-readable status message.
    pub message: String,
    /// Generated storage identifier.
    pub storage_id: String,
    /// Sanitized original filename.
    pub original_name: String,
    /// Relative download URL.
    pub download_reference: String,
}

impl From<UploadedFile> for UploadResponse {
    fn from(file: UploadedFile) -> Self {
        Self {
            message: "File uploaded successfully".to_string(),
            storage_id: file.storage_id,
            original_name: file.original_name,
            download_reference: file.download_reference,
        }
    }
}

/// One entry of the file list response.
pub type FileSummaryResponse = FileSummary;

/// Plain message response.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    /// Human-readable status message.
    pub message: String,
}

impl MessageResponse {
    /// Create a new message response.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
