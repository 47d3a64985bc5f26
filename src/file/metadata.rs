//! Stored file metadata and the in-memory metadata store.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Metadata for one stored file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredFile {
    /// Generated storage identifier (also the on-disk filename).
    pub storage_id: String,
    /// Sanitized client-supplied filename.
    pub original_name: String,
    /// When the file was uploaded.
    pub uploaded_at: DateTime<Utc>,
    /// Bytes written at upload time.
    pub size_bytes: u64,
    /// MIME type guessed from the original name.
    pub mime_type: Option<String>,
    /// Network origin of the uploader (advisory).
    pub uploader_origin: String,
}

/// In-memory mapping from storage identifier to [`StoredFile`].
///
/// Contents are lost on restart. The map itself is guarded by a lock, but
/// callers that need a check-then-act sequence across the filesystem and this
/// store must serialize it themselves.
#[derive(Debug, Default)]
pub struct MetadataStore {
    entries: RwLock<HashMap<String, StoredFile>>,
}

impl MetadataStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or silently overwrite the record for `id`.
    pub fn put(&self, id: impl Into<String>, record: StoredFile) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id.into(), record);
    }

    /// Get a copy of the record for `id`.
    pub fn get(&self, id: &str) -> Option<StoredFile> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()
    }

    /// Check whether a record exists for `id`.
    pub fn contains(&self, id: &str) -> bool {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(id)
    }

    /// Remove the record for `id`, returning it if present.
    pub fn remove(&self, id: &str) -> Option<StoredFile> {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(id)
    }

    /// Snapshot of all records. Order is unspecified.
    pub fn list_all(&self) -> Vec<(String, StoredFile)> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(id, record)| (id.clone(), record.clone()))
            .collect()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Check whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
