//! Storage abstraction trait
//!
//! This module defines the Storage trait that the migrator uploads through.

use async_trait::async_trait;
use std::path::Path;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Storage abstraction trait
///
/// Objects are written under caller-chosen keys; see the crate root for the key
/// format and the public URL shape.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Upload a local file under `storage_key` and return its public URL.
    ///
    /// The content type is guessed from the file extension.
    async fn upload_file(&self, storage_key: &str, path: &Path) -> StorageResult<String>;

    /// Upload data to a specific storage key. Returns the public URL.
    async fn upload_with_key(
        &self,
        storage_key: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> StorageResult<String>;

    /// Check if an object exists
    async fn exists(&self, storage_key: &str) -> StorageResult<bool>;

    /// Public URL for `storage_key`, whether or not it has been uploaded yet.
    fn public_url(&self, storage_key: &str) -> String;

    fn bucket(&self) -> &str;
}
