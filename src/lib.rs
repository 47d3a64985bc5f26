//! Filebox - a small file upload and download service.
//!
//! Files are stored under random identifiers in a flat directory and served
//! back over HTTP with their original names.

pub mod auth;
pub mod config;
pub mod error;
pub mod file;
pub mod logging;
pub mod web;

pub use config::Config;
pub use error::{FileboxError, Result};
pub use file::{
    DownloadResult, ExtensionValidator, FileStorage, FileSummary, MetadataStore, StorageManager,
    StoredFile, UploadRequest, UploadedFile,
};
