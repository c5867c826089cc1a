//! Storage abstraction trait
//!
//! This module defines the Storage trait that all storage backends must implement.

use crate::StorageBackend;
use async_trait::async_trait;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

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

impl From<StorageError> for dtt_core::PublishError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound(key) => dtt_core::PublishError::NotFound(key),
            StorageError::ConfigError(msg) => dtt_core::PublishError::Config(msg),
            StorageError::IoError(e) => dtt_core::PublishError::Io(e),
            other => dtt_core::PublishError::Other(other.to_string()),
        }
    }
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Storage abstraction trait
///
/// All storage backends (S3-compatible, local filesystem) must implement
/// this trait. The publisher works against it without coupling to a
/// specific provider.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Upload data to a storage key and return the public URL for it.
    async fn put(&self, key: &str, data: Vec<u8>, content_type: &str) -> StorageResult<String>;

    /// Delete an object by its storage key. Deleting a key that does not
    /// exist is not an error.
    async fn delete(&self, key: &str) -> StorageResult<()>;

    /// Check whether an object exists.
    async fn exists(&self, key: &str) -> StorageResult<bool>;

    /// Public URL an uploaded key is served from.
    fn public_url(&self, key: &str) -> String;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;
}
