//! Thumbnailer Storage Library
//!
//! This crate provides the object-store client boundary used by the pipeline:
//! the `ObjectStore` trait and its S3, local filesystem and in-memory
//! implementations.
//!
//! # Key format
//!
//! Objects are addressed by `(bucket, path)`. Paths are used verbatim as
//! object keys; they must not be empty or start with `/`, and no segment may
//! be empty, `.` or `..`. Validation is centralized in the `keys` module so
//! all backends reject the same inputs.

pub mod factory;
pub(crate) mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-memory")]
pub mod memory;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
#[cfg(feature = "storage-memory")]
pub use memory::{MemoryStorage, StoredObject};
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
pub use thumbnailer_core::StorageBackend;
pub use traits::{ObjectMetadata, ObjectStore, StorageError, StorageResult};
