//! File storage for Filebox.
//!
//! Physical file storage in a single flat directory:
//! - every stored file is named by its storage identifier
//! - writes go to a hidden temporary file that is renamed into place
//! - hidden entries (leading `.`) are never reported as stored files

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::{FileboxError, Result};

/// Prefix of in-flight upload files.
const TEMP_PREFIX: &str = ".upload-";

/// Suffix of in-flight upload files.
const TEMP_SUFFIX: &str = ".tmp";

/// File storage service for managing physical files.
///
/// ```text
/// {base_path}/
/// ├── 3f2a9c0d4e5b6a7c8d9e0f1a2b3c4d5e.txt
/// ├── 9b8a7c6d5e4f3a2b1c0d9e8f7a6b5c4d
/// └── .upload-<uuid>.tmp      (only while an upload is in flight)
/// ```
#[derive(Debug, Clone)]
pub struct FileStorage {
    /// Base directory for file storage.
    base_path: PathBuf,
}

impl FileStorage {
    /// Create a new FileStorage with the given base path.
    ///
    /// The base directory will be created if it doesn't exist.
    pub fn new(base_path: impl Into<PathBuf>) -> Result<Self> {
        let base_path = base_path.into();
        fs::create_dir_all(&base_path)?;

        Ok(Self { base_path })
    }

    /// Get the base path of this storage.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Write `content` under `stored_name`.
    ///
    /// The bytes are written to a temporary file first, then
    /// renamed over the final name, so readers see either no file or the
    /// complete file. Returns the number of bytes written.
    pub fn write(&self, stored_name: &str, content: &[u8]) -> Result<u64> {
        let temp_path = self
            .base_path
            .join(format!("{TEMP_PREFIX}{}{TEMP_SUFFIX}", Uuid::new_v4().simple()));

        let written = Self::write_temp(&temp_path, content).and_then(|written| {
            fs::rename(&temp_path, self.get_file_path(stored_name))?;
            Ok(written)
        });

        match written {
            Ok(written) => Ok(written),
            Err(e) => {
                let _ = fs::remove_file(&temp_path);
                Err(e.into())
            }
        }
    }

    fn write_temp(path: &Path, content: &[u8]) -> io::Result<u64> {
        let mut file = File::options().write(true).create_new(true).open(path)?;
        file.write_all(content)?;
        Ok(content.len() as u64)
    }

    /// Load content from storage.
    pub fn load(&self, stored_name: &str) -> Result<Vec<u8>> {
        let file_path = self.get_file_path(stored_name);

        match fs::read(&file_path) {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(FileboxError::NotFound(format!("File {stored_name}")))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Delete a file from storage.
    ///
    /// Returns `true` if the file was deleted, `false` if it didn't exist.
    pub fn delete(&self, stored_name: &str) -> Result<bool> {
        let file_path = self.get_file_path(stored_name);

        match fs::remove_file(&file_path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Check if a regular file exists in storage under `stored_name`.
    pub fn exists(&self, stored_name: &str) -> bool {
        self.get_file_path(stored_name).is_file()
    }

    /// Get the size of a stored file.
    pub fn file_size(&self, stored_name: &str) -> Result<u64> {
        let file_path = self.get_file_path(stored_name);

        match fs::metadata(&file_path) {
            Ok(m) => Ok(m.len()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(FileboxError::NotFound(format!("File {stored_name}")))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// List the names of stored files.
    ///
    /// Only regular files with UTF-8 names are reported; hidden entries,
    /// directories, in-flight uploads and unreadable entries are skipped.
    /// Fails only when the directory itself cannot be read. Order is unspecified.
    pub fn list(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();

        for entry in fs::read_dir(&self.base_path)?.flatten() {
            if !entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
                continue;
            }
            let Ok(name) = entry.file_name().into_string() else {
                continue;
            };
            if name.starts_with('.') {
                continue;
            }
            names.push(name);
        }

        Ok(names)
    }

    /// Get the full file path for a stored name.
    pub fn get_file_path(&self, stored_name: &str) -> PathBuf {
        self.base_path.join(stored_name)
    }

    /// Remove temporary files left behind by interrupted uploads.
    ///
    /// Returns the number of files removed.
    pub fn cleanup_temp_files(&self) -> Result<usize> {
        let mut removed = 0;

        for entry in fs::read_dir(&self.base_path)?.flatten() {
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                continue;
            };
            if name.starts_with(TEMP_PREFIX)
                && name.ends_with(TEMP_SUFFIX)
                && fs::remove_file(entry.path()).is_ok()
            {
                removed += 1;
            }
        }

        Ok(removed)
    }
}
