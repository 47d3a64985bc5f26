//! File management module for Filebox.
//!
//! This module provides the upload/list/download/delete core:
//! - Extension allow-list validation
//! - Random storage identifiers that keep only the extension
//! - Volatile in-memory metadata keyed by storage identifier
//! - Flat on-disk storage with atomic writes

mod extension;
mod identifier;
mod metadata;
mod sanitize;
mod service;
mod storage;

pub use extension::ExtensionValidator;
pub use identifier::{download_reference, generate_storage_id, is_addressable, TOKEN_LENGTH};
pub use metadata::{MetadataStore, StoredFile};
pub use sanitize::{sanitize_filename, MAX_FILENAME_LENGTH};
pub use service::{DownloadResult, FileSummary, StorageManager, UploadRequest, UploadedFile};
pub use storage::FileStorage;

/// Default maximum file size (16MB).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 16 * 1024 * 1024;

/// Identifier generation attempts before giving up on an upload.
pub const MAX_ID_ATTEMPTS: usize = 5;

/// MIME type reported when nothing better is known.
pub const OCTET_STREAM: &str = "application/octet-stream";

/// Upload time reported for files without metadata.
pub const UNKNOWN_TIMESTAMP: &str = "unknown";
