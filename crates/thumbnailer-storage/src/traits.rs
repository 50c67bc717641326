//! Object store abstraction trait
//!
//! This module defines the `ObjectStore` trait that all storage backends must
//! implement, and the error type they report.

use crate::StorageBackend;
use async_trait::async_trait;
use thiserror::Error;
use thumbnailer_core::{ObjectRef, StoreOperation, ThumbnailError};

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("Object not found: {0}")]
    NotFound(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Access denied: {0}")]
    AccessDenied(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl StorageError {
    /// Whether retrying the same call later may succeed.
    ///
    /// Missing objects, rejected keys, denied access and misconfiguration do
    /// not change between deliveries; network and backend faults may.
    pub fn is_transient(&self) -> bool {
        match self {
            StorageError::UploadFailed(_)
            | StorageError::DownloadFailed(_)
            | StorageError::BackendError(_)
            | StorageError::IoError(_) => true,
            StorageError::NotFound(_)
            | StorageError::InvalidKey(_)
            | StorageError::AccessDenied(_)
            | StorageError::ConfigError(_) => false,
        }
    }

    /// Classify into the pipeline taxonomy.
    pub fn into_thumbnail_error(self, operation: StoreOperation) -> ThumbnailError {
        if self.is_transient() {
            ThumbnailError::retrievable(operation, self.to_string())
        } else {
            ThumbnailError::permanent(format!("{} {}", operation, self))
        }
    }
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Metadata written alongside an uploaded object.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectMetadata {
    pub content_type: Option<String>,
}

impl ObjectMetadata {
    pub fn with_content_type(content_type: impl Into<String>) -> Self {
        Self {
            content_type: Some(content_type.into()),
        }
    }
}

/// Object store client
///
/// All storage backends (S3, local filesystem, memory) implement this trait.
/// A single handle is built at startup and shared read-only across concurrent
/// invocations, so implementations must not keep per-call mutable state.
///
/// Uploads replace the whole object and must be atomic from a reader's point
/// of view: a concurrent `download` sees either the previous object or the
/// complete new one, never a partial write.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Download the full contents of an object
    async fn download(&self, object: &ObjectRef) -> StorageResult<Vec<u8>>;

    /// Upload (create or overwrite) an object
    async fn upload(
        &self,
        object: &ObjectRef,
        data: Vec<u8>,
        metadata: &ObjectMetadata,
    ) -> StorageResult<()>;

    /// Check if an object exists
    async fn exists(&self, object: &ObjectRef) -> StorageResult<bool>;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;
}
