//! File service for Filebox.
//!
//! [`StorageManager`] is the single entry point for upload, list, download
//! and delete. It keeps the metadata store and the storage directory in step:
//! uploads and deletes hold an exclusive lock around the combined
//! filesystem + metadata change, while listing and downloading share a read
//! lock so they never observe a half-applied mutation.

use std::sync::{PoisonError, RwLock};

use chrono::Utc;
use serde::Serialize;

use crate::config::FilesConfig;
use crate::{FileboxError, Result};

use super::extension::ExtensionValidator;
use super::identifier::{download_reference, generate_storage_id, is_addressable};
use super::metadata::{MetadataStore, StoredFile};
use super::sanitize::sanitize_filename;
use super::storage::FileStorage;
use super::{DEFAULT_MAX_FILE_SIZE, MAX_ID_ATTEMPTS, OCTET_STREAM, UNKNOWN_TIMESTAMP};

/// Request data for file upload.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    /// Client-supplied filename.
    pub filename: String,
    /// File content.
    pub content: Vec<u8>,
    /// Network origin of the uploader.
    pub uploader_origin: String,
}

impl UploadRequest {
    /// Create a new upload request.
    pub fn new(
        filename: impl Into<String>,
        content: Vec<u8>,
        uploader_origin: impl Into<String>,
    ) -> Self {
        Self {
            filename: filename.into(),
            content,
            uploader_origin: uploader_origin.into(),
        }
    }
}

/// Result of a successful upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadedFile {
    /// Generated storage identifier.
    pub storage_id: String,
    /// Sanitized original filename.
    pub original_name: String,
    /// Relative URL the file can be downloaded from.
    pub download_reference: String,
}

/// One entry of a file listing, with metadata fallbacks applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileSummary {
    /// Storage identifier (on-disk filename).
    pub storage_id: String,
    /// Original filename, or the identifier for orphan files.
    pub original_name: String,
    /// Current size on disk.
    pub size_bytes: u64,
    /// RFC 3339 upload time, or `"unknown"` for orphan files.
    pub uploaded_at: String,
    /// Recorded MIME type, or `application/octet-stream`.
    pub mime_type: String,
    /// Relative URL the file can be downloaded from.
    pub download_reference: String,
}

/// Result of a file download.
#[derive(Debug)]
pub struct DownloadResult {
    /// Name to present to the client.
    pub display_name: String,
    /// MIME type to serve the content with.
    pub mime_type: String,
    /// File content.
    pub content: Vec<u8>,
}

/// Coordinates extension checks, identifier generation, the metadata store
/// and the storage directory.
#[derive(Debug)]
pub struct StorageManager {
    storage: FileStorage,
    metadata: MetadataStore,
    extensions: ExtensionValidator,
    max_file_size: u64,
    lock: RwLock<()>,
}

impl StorageManager {
    /// Create a new StorageManager with the default size limit.
    pub fn new(storage: FileStorage, metadata: MetadataStore, extensions: ExtensionValidator) -> Self {
        Self {
            storage,
            metadata,
            extensions,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            lock: RwLock::new(()),
        }
    }

    /// Set a custom max file size in bytes.
    pub fn with_max_file_size(mut self, max_size: u64) -> Self {
        self.max_file_size = max_size;
        self
    }

    /// Build a StorageManager from configuration.
    ///
    /// Creates the storage root if needed and removes temporary files left by
    /// interrupted uploads. Files already present are served as orphans.
    pub fn from_config(config: &FilesConfig) -> Result<Self> {
        let storage = FileStorage::new(&config.storage_path)?;

        let removed = storage.cleanup_temp_files()?;
        if removed > 0 {
            tracing::info!(count = removed, "Removed leftover temporary upload files");
        }

        let extensions = ExtensionValidator::new(&config.allowed_extensions);

        Ok(Self::new(storage, MetadataStore::new(), extensions)
            .with_max_file_size(config.max_upload_size_bytes))
    }

    /// Configured max file size in bytes.
    pub fn max_file_size(&self) -> u64 {
        self.max_file_size
    }

    /// The underlying storage.
    pub fn storage(&self) -> &FileStorage {
        &self.storage
    }

    /// The metadata store.
    pub fn metadata(&self) -> &MetadataStore {
        &self.metadata
    }

    /// Upload a file.
    ///
    /// # Validation
    /// - Size: at most the configured maximum
    /// - Filename: non-empty, allowed extension, sane after sanitizing
    ///
    /// Nothing is written when validation fails. Metadata is recorded only
    /// after the content is fully on disk.
    pub fn upload(&self, request: &UploadRequest) -> Result<UploadedFile> {
        let size = request.content.len() as u64;
        if size > self.max_file_size {
            tracing::warn!(size, limit = self.max_file_size, "Upload rejected: too large");
            return Err(FileboxError::PayloadTooLarge {
                size,
                limit: self.max_file_size,
            });
        }

        if request.filename.is_empty() {
            tracing::warn!("Upload rejected: empty filename");
            return Err(FileboxError::Validation("empty filename".to_string()));
        }

        if !self.extensions.is_allowed(&request.filename) {
            tracing::warn!(filename = ?request.filename, "Upload rejected: extension not allowed");
            return Err(FileboxError::Validation("disallowed extension".to_string()));
        }

        let safe_name = sanitize_filename(&request.filename)?;

        let _guard = self.lock.write().unwrap_or_else(PoisonError::into_inner);

        let storage_id = self.fresh_storage_id(&safe_name)?;

        let written = self.storage.write(&storage_id, &request.content).map_err(|e| {
            tracing::error!(storage_id = %storage_id, error = %e, "Failed to write file");
            e
        })?;

        let record = StoredFile {
            storage_id: storage_id.clone(),
            original_name: safe_name.clone(),
            uploaded_at: Utc::now(),
            size_bytes: written,
            mime_type: mime_guess::from_path(&safe_name)
                .first()
                .map(|m| m.to_string()),
            uploader_origin: request.uploader_origin.clone(),
        };
        self.metadata.put(storage_id.clone(), record);

        tracing::info!(
            storage_id = %storage_id,
            original_name = %safe_name,
            size = written,
            "File uploaded"
        );

        Ok(UploadedFile {
            download_reference: download_reference(&storage_id),
            storage_id,
            original_name: safe_name,
        })
    }

    /// Generate an identifier not yet used in metadata or on disk.
    ///
    /// Must be called with the write lock held.
    fn fresh_storage_id(&self, safe_name: &str) -> Result<String> {
        self.fresh_storage_id_with(safe_name, |name| {
            generate_storage_id(name, &self.extensions)
        })
    }

    fn fresh_storage_id_with<F>(&self, safe_name: &str, mut generate: F) -> Result<String>
    where
        F: FnMut(&str) -> String,
    {
        for _ in 0..MAX_ID_ATTEMPTS {
            let id = generate(safe_name);
            if !self.metadata.contains(&id) && !self.storage.get_file_path(&id).exists() {
                return Ok(id);
            }
            tracing::warn!(storage_id = %id, "Storage identifier collision, regenerating");
        }

        tracing::error!("Could not generate a unique storage identifier");
        Err(FileboxError::Internal(
            "could not generate a unique storage identifier".to_string(),
        ))
    }

    /// List files present in storage, enriched with metadata.
    ///
    /// Files without metadata are reported with the identifier as name,
    /// `"unknown"` upload time and a generic MIME type. Sorted by identifier.
    pub fn list(&self) -> Result<Vec<FileSummary>> {
        let _guard = self.lock.read().unwrap_or_else(PoisonError::into_inner);

        let mut names = self.storage.list().map_err(|e| {
            tracing::error!(error = %e, "Failed to list storage directory");
            e
        })?;
        // Only names that download and delete accept are listed.
        names.retain(|name| is_addressable(name));
        names.sort();

        let mut files = Vec::with_capacity(names.len());
        for storage_id in names {
            let size_bytes = match self.storage.file_size(&storage_id) {
                Ok(size) => size,
                // Removed behind our back between listing and stat.
                Err(FileboxError::NotFound(_)) => continue,
                Err(e) => return Err(e),
            };

            let summary = match self.metadata.get(&storage_id) {
                Some(record) => FileSummary {
                    original_name: record.original_name,
                    uploaded_at: record.uploaded_at.to_rfc3339(),
                    mime_type: record.mime_type.unwrap_or_else(|| OCTET_STREAM.to_string()),
                    size_bytes,
                    download_reference: download_reference(&storage_id),
                    storage_id,
                },
                None => FileSummary {
                    original_name: storage_id.clone(),
                    uploaded_at: UNKNOWN_TIMESTAMP.to_string(),
                    mime_type: OCTET_STREAM.to_string(),
                    size_bytes,
                    download_reference: download_reference(&storage_id),
                    storage_id,
                },
            };
            files.push(summary);
        }

        tracing::info!(count = files.len(), "File list requested");
        Ok(files)
    }

    /// Download a file.
    ///
    /// Existence is decided by the filesystem, so orphan files remain
    /// downloadable under their identifier.
    pub fn download(&self, storage_id: &str) -> Result<DownloadResult> {
        if !is_addressable(storage_id) {
            tracing::warn!(storage_id = %storage_id, "Download of malformed identifier");
            return Err(FileboxError::NotFound(format!("File {storage_id}")));
        }

        let _guard = self.lock.read().unwrap_or_else(PoisonError::into_inner);

        if !self.storage.exists(storage_id) {
            tracing::warn!(storage_id = %storage_id, "File not found");
            return Err(FileboxError::NotFound(format!("File {storage_id}")));
        }

        let content = self.storage.load(storage_id)?;

        let record = self.metadata.get(storage_id);
        let display_name = record
            .as_ref()
            .map(|r| r.original_name.clone())
            .unwrap_or_else(|| storage_id.to_string());
        let mime_type = record
            .and_then(|r| r.mime_type)
            .unwrap_or_else(|| {
                mime_guess::from_path(&display_name)
                    .first_or_octet_stream()
                    .to_string()
            });

        tracing::info!(
            storage_id = %storage_id,
            original_name = %display_name,
            "File downloaded"
        );

        Ok(DownloadResult {
            display_name,
            mime_type,
            content,
        })
    }

    /// Delete a file.
    ///
    /// Removes the file, then its metadata if any. Deleting an orphan file
    /// is a success.
    pub fn delete(&self, storage_id: &str) -> Result<()> {
        if !is_addressable(storage_id) {
            tracing::warn!(storage_id = %storage_id, "Delete of malformed identifier");
            return Err(FileboxError::NotFound(format!("File {storage_id}")));
        }

        let _guard = self.lock.write().unwrap_or_else(PoisonError::into_inner);

        if !self.storage.exists(storage_id) {
            tracing::warn!(storage_id = %storage_id, "Attempted to delete non-existent file");
            return Err(FileboxError::NotFound(format!("File {storage_id}")));
        }

        if !self.storage.delete(storage_id)? {
            return Err(FileboxError::NotFound(format!("File {storage_id}")));
        }
        self.metadata.remove(storage_id);

        tracing::info!(storage_id = %storage_id, "File deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::fs;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn setup() -> (TempDir, StorageManager) {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path()).unwrap();
        let extensions = ExtensionValidator::new(["txt", "pdf", "png", "csv"]);
        let manager = StorageManager::new(storage, MetadataStore::new(), extensions);
        (temp_dir, manager)
    }

    fn upload(manager: &StorageManager, name: &str, content: &[u8]) -> Result<UploadedFile> {
        manager.upload(&UploadRequest::new(name, content.to_vec(), "127.0.0.1"))
    }

    fn dir_entries(temp_dir: &TempDir) -> usize {
        fs::read_dir(temp_dir.path()).unwrap().count()
    }

    #[test]
    fn test_from_config_cleans_temp_files() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("files");
        fs::create_dir(&root).unwrap();
        fs::write(root.join(".upload-stale.tmp"), b"partial").unwrap();
        fs::write(root.join("existing.txt"), b"kept").unwrap();

        let config = FilesConfig {
            storage_path: root.to_string_lossy().into_owned(),
            max_upload_size_bytes: 4,
            allowed_extensions: vec!["txt".to_string()],
        };
        let manager = StorageManager::from_config(&config).unwrap();

        assert_eq!(manager.max_file_size(), 4);
        assert!(!root.join(".upload-stale.tmp").exists());
        assert_eq!(manager.list().unwrap().len(), 1);
        assert!(upload(&manager, "a.pdf", b"x").is_err());
        assert!(upload(&manager, "a.txt", b"12345").is_err());
    }

    #[test]
    fn test_upload_and_download() {
        let (_temp_dir, manager) = setup();

        let uploaded = upload(&manager, "x.txt", b"hello").unwrap();
        assert!(uploaded.storage_id.ends_with(".txt"));
        assert_eq!(uploaded.original_name, "x.txt");
        assert_eq!(
            uploaded.download_reference,
            format!("/download/{}", uploaded.storage_id)
        );

        let downloaded = manager.download(&uploaded.storage_id).unwrap();
        assert_eq!(downloaded.content, b"hello");
        assert_eq!(downloaded.display_name, "x.txt");
        assert_eq!(downloaded.mime_type, "text/plain");
    }

    #[test]
    fn test_upload_records_metadata() {
        let (_temp_dir, manager) = setup();

        let uploaded = upload(&manager, "Report.PDF", b"%PDF-1.4").unwrap();
        assert!(uploaded.storage_id.ends_with(".pdf"));

        let record = manager.metadata().get(&uploaded.storage_id).unwrap();
        assert_eq!(record.original_name, "Report.PDF");
        assert_eq!(record.size_bytes, 8);
        assert_eq!(record.mime_type.as_deref(), Some("application/pdf"));
        assert_eq!(record.uploader_origin, "127.0.0.1");
    }

    #[test]
    fn test_upload_disallowed_extension() {
        let (temp_dir, manager) = setup();

        let result = upload(&manager, "x.exe", b"MZ");
        match result {
            Err(FileboxError::Validation(msg)) => assert_eq!(msg, "disallowed extension"),
            other => panic!("Expected validation error, got {other:?}"),
        }
        assert_eq!(dir_entries(&temp_dir), 0);
        assert!(manager.metadata().is_empty());
    }

    #[derive(Clone, Default)]
    struct CapturedLog(Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLog {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_rejected_filename_logged_escaped() {
        let (_temp_dir, manager) = setup();
        let log = CapturedLog::default();
        let writer = log.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            let result = upload(&manager, "a.exe\nINFO forged line", b"x");
            assert!(matches!(result, Err(FileboxError::Validation(_))));
        });

        let output = String::from_utf8(log.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("extension not allowed"));
        assert_eq!(output.lines().count(), 1);
    }

    #[test]
    fn test_upload_empty_filename() {
        let (temp_dir, manager) = setup();

        let result = upload(&manager, "", b"data");
        match result {
            Err(FileboxError::Validation(msg)) => assert_eq!(msg, "empty filename"),
            other => panic!("Expected validation error, got {other:?}"),
        }
        assert_eq!(dir_entries(&temp_dir), 0);
    }

    #[test]
    fn test_upload_sanitizes_path() {
        let (_temp_dir, manager) = setup();

        let uploaded = upload(&manager, "../../etc/notes.txt", b"x").unwrap();
        assert_eq!(uploaded.original_name, "notes.txt");
        assert!(!uploaded.storage_id.contains('/'));
        assert!(manager.storage().exists(&uploaded.storage_id));
    }

    #[test]
    fn test_upload_exact_limit_succeeds() {
        let (_temp_dir, manager) = setup();
        let manager = manager.with_max_file_size(16);

        let uploaded = upload(&manager, "a.txt", &[b'a'; 16]).unwrap();
        assert_eq!(manager.storage().file_size(&uploaded.storage_id).unwrap(), 16);
    }

    #[test]
    fn test_upload_over_limit_fails() {
        let (temp_dir, manager) = setup();
        let manager = manager.with_max_file_size(16);

        let result = upload(&manager, "a.txt", &[b'a'; 17]);
        assert!(matches!(
            result,
            Err(FileboxError::PayloadTooLarge { size: 17, limit: 16 })
        ));
        assert_eq!(dir_entries(&temp_dir), 0);
        assert!(manager.metadata().is_empty());
    }

    #[test]
    fn test_upload_storage_failure_leaves_no_metadata() {
        let (temp_dir, manager) = setup();
        fs::remove_dir_all(temp_dir.path()).unwrap();

        let result = upload(&manager, "a.txt", b"data");
        assert!(matches!(result, Err(FileboxError::Storage(_))));
        assert!(manager.metadata().is_empty());
    }

    #[test]
    fn test_upload_unique_identifiers() {
        let (_temp_dir, manager) = setup();

        let ids: HashSet<String> = (0..10_000)
            .map(|_| upload(&manager, "same.txt", b"").unwrap().storage_id)
            .collect();
        assert_eq!(ids.len(), 10_000);
    }

    #[test]
    fn test_upload_delete_download_not_found() {
        let (_temp_dir, manager) = setup();

        let uploaded = upload(&manager, "x.txt", b"hello").unwrap();
        manager.delete(&uploaded.storage_id).unwrap();

        let result = manager.download(&uploaded.storage_id);
        assert!(matches!(result, Err(FileboxError::NotFound(_))));
        assert!(manager.metadata().get(&uploaded.storage_id).is_none());
    }

    #[test]
    fn test_delete_not_found() {
        let (_temp_dir, manager) = setup();

        let result = manager.delete("0123456789abcdef0123456789abcdef.txt");
        assert!(matches!(result, Err(FileboxError::NotFound(_))));
    }

    #[test]
    fn test_delete_orphan_succeeds() {
        let (temp_dir, manager) = setup();
        fs::write(temp_dir.path().join("orphan.bin"), b"left over").unwrap();

        manager.delete("orphan.bin").unwrap();
        assert!(!temp_dir.path().join("orphan.bin").exists());
    }

    #[test]
    fn test_malformed_identifiers_not_found() {
        let (_temp_dir, manager) = setup();

        for id in ["", ".", "..", "../outside.txt", "a/b.txt", ".upload-x.tmp"] {
            assert!(matches!(
                manager.download(id),
                Err(FileboxError::NotFound(_))
            ));
            assert!(matches!(manager.delete(id), Err(FileboxError::NotFound(_))));
        }
    }

    #[test]
    fn test_list_after_two_uploads_and_one_delete() {
        let (_temp_dir, manager) = setup();

        let first = upload(&manager, "one.txt", b"first file").unwrap();
        let second = upload(&manager, "two.csv", b"a,b\n1,2\n").unwrap();
        manager.delete(&first.storage_id).unwrap();

        let files = manager.list().unwrap();
        assert_eq!(files.len(), 1);

        let file = &files[0];
        assert_eq!(file.storage_id, second.storage_id);
        assert_eq!(file.original_name, "two.csv");
        assert_eq!(file.size_bytes, 8);
        assert_eq!(file.mime_type, "text/csv");
        assert_ne!(file.uploaded_at, "unknown");
        assert_eq!(file.download_reference, second.download_reference);
    }

    #[test]
    fn test_list_orphan_fallbacks() {
        let (temp_dir, manager) = setup();
        fs::write(temp_dir.path().join("orphan.txt"), b"12345").unwrap();

        let files = manager.list().unwrap();
        assert_eq!(files.len(), 1);

        let file = &files[0];
        assert_eq!(file.storage_id, "orphan.txt");
        assert_eq!(file.original_name, "orphan.txt");
        assert_eq!(file.uploaded_at, "unknown");
        assert_eq!(file.mime_type, "application/octet-stream");
        assert_eq!(file.size_bytes, 5);
    }

    #[cfg(unix)]
    #[test]
    fn test_list_skips_unaddressable_names() {
        let (temp_dir, manager) = setup();
        fs::write(temp_dir.path().join("a\\b.txt"), b"odd").unwrap();
        fs::write(temp_dir.path().join("plain.txt"), b"ok").unwrap();

        let ids: Vec<String> = manager.list().unwrap().into_iter().map(|f| f.storage_id).collect();
        assert_eq!(ids, vec!["plain.txt".to_string()]);

        for file in manager.list().unwrap() {
            assert!(manager.download(&file.storage_id).is_ok());
        }
    }

    #[test]
    fn test_fresh_storage_id_retries_after_collision() {
        let (_temp_dir, manager) = setup();
        upload(&manager, "a.txt", b"a").unwrap();
        let taken = manager.list().unwrap().remove(0).storage_id;

        let mut candidates = vec![taken.clone(), "fresh.txt".to_string()].into_iter();
        let id = manager
            .fresh_storage_id_with("a.txt", |_| candidates.next().unwrap())
            .unwrap();

        assert_eq!(id, "fresh.txt");
    }

    #[test]
    fn test_fresh_storage_id_exhausted_by_metadata() {
        let (_temp_dir, manager) = setup();
        manager.metadata().put(
            "taken.txt".to_string(),
            StoredFile {
                storage_id: "taken.txt".to_string(),
                original_name: "a.txt".to_string(),
                uploaded_at: Utc::now(),
                size_bytes: 0,
                mime_type: None,
                uploader_origin: "unknown".to_string(),
            },
        );

        let mut calls = 0;
        let result = manager.fresh_storage_id_with("a.txt", |_| {
            calls += 1;
            "taken.txt".to_string()
        });

        assert!(matches!(result, Err(FileboxError::Internal(_))));
        assert_eq!(calls, MAX_ID_ATTEMPTS);
    }

    #[test]
    fn test_fresh_storage_id_exhausted_by_disk() {
        let (temp_dir, manager) = setup();
        fs::write(temp_dir.path().join("ondisk.txt"), b"x").unwrap();

        let result = manager.fresh_storage_id_with("a.txt", |_| "ondisk.txt".to_string());

        assert!(matches!(result, Err(FileboxError::Internal(_))));
    }

    #[test]
    fn test_list_sorted_by_identifier() {
        let (_temp_dir, manager) = setup();

        for i in 0..5 {
            upload(&manager, &format!("f{i}.txt"), b"x").unwrap();
        }

        let ids: Vec<String> = manager.list().unwrap().into_iter().map(|f| f.storage_id).collect();
        let mut sorted = ids.clone();
        sorted.sort();
        assert_eq!(ids, sorted);
    }

    #[test]
    fn test_list_unreadable_root_fails() {
        let (temp_dir, manager) = setup();
        fs::remove_dir_all(temp_dir.path()).unwrap();

        assert!(matches!(manager.list(), Err(FileboxError::Storage(_))));
    }

    #[test]
    fn test_download_orphan_uses_identifier_as_name() {
        let (temp_dir, manager) = setup();
        fs::write(temp_dir.path().join("orphan.png"), b"\x89PNG").unwrap();

        let downloaded = manager.download("orphan.png").unwrap();
        assert_eq!(downloaded.display_name, "orphan.png");
        assert_eq!(downloaded.mime_type, "image/png");
        assert_eq!(downloaded.content, b"\x89PNG");
    }

    #[test]
    fn test_round_trip_binary_content() {
        let (_temp_dir, manager) = setup();
        let contents: Vec<Vec<u8>> = vec![
            vec![],
            (0..=255).collect(),
            vec![0u8; 4096],
            "日本語テキスト".as_bytes().to_vec(),
        ];

        for content in contents {
            let uploaded = upload(&manager, "data.txt", &content).unwrap();
            assert_eq!(manager.download(&uploaded.storage_id).unwrap().content, content);
        }
    }

    #[test]
    fn test_concurrent_uploads() {
        let (_temp_dir, manager) = setup();
        let manager = Arc::new(manager);

        let handles: Vec<_> = (0..8)
            .map(|t| {
                let manager = Arc::clone(&manager);
                std::thread::spawn(move || {
                    (0..50)
                        .map(|i| {
                            upload(&manager, "c.txt", format!("{t}-{i}").as_bytes())
                                .unwrap()
                                .storage_id
                        })
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let ids: HashSet<String> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        assert_eq!(ids.len(), 400);
        assert_eq!(manager.list().unwrap().len(), 400);
        assert_eq!(manager.metadata().len(), 400);
    }
}
