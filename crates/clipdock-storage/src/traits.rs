//! Storage abstraction trait
//!
//! Defines the `Storage` trait both backends implement. Keys are opaque
//! relative paths (e.g. `landscape/dGhpcy1pcy1yYW5kb20.mp4`); every
//! operation returns or synthesizes the public URL the key resolves to.

use async_trait::async_trait;
use std::pin::Pin;
use thiserror::Error;
use tokio::io::AsyncRead;

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

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Storage backend kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    S3,
    Local,
}

/// Storage abstraction trait
///
/// Uploads never overwrite-check: key uniqueness is the caller's problem
/// (keys carry 256 bits of randomness, see [`crate::keys`]).
#[async_trait]
pub trait Storage: Send + Sync {
    /// Upload a buffer under `storage_key` and return the public URL.
    async fn upload(
        &self,
        storage_key: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> StorageResult<String>;

    /// Upload from a reader until EOF and return the public URL.
    ///
    /// Used for large files that are already staged on disk and should
    /// not be duplicated in memory by the caller.
    async fn upload_stream(
        &self,
        storage_key: &str,
        content_type: &str,
        reader: Pin<Box<dyn AsyncRead + Send + Unpin>>,
    ) -> StorageResult<String>;

    /// Delete a file by its storage key. Deleting a missing key is not an
    /// error.
    async fn delete(&self, storage_key: &str) -> StorageResult<()>;

    /// Check if a file exists
    async fn exists(&self, storage_key: &str) -> StorageResult<bool>;

    /// Public URL a committed key resolves to.
    fn public_url(&self, storage_key: &str) -> String;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;
}
