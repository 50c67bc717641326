//! Shared key validation for storage backends.
//!
//! Every backend rejects the same bucket names and object paths so that a
//! path accepted by one backend is accepted by all of them.

use crate::{StorageError, StorageResult};
use thumbnailer_core::ObjectRef;

/// Validate a bucket name and object path.
pub fn validate_object_ref(object: &ObjectRef) -> StorageResult<()> {
    validate_bucket(&object.bucket)?;
    validate_key(&object.path)
}

/// Bucket names map onto a single directory level in the local backend.
pub fn validate_bucket(bucket: &str) -> StorageResult<()> {
    if bucket.is_empty() || bucket == "." || bucket == ".." {
        return Err(StorageError::InvalidKey(format!(
            "Invalid bucket name: {:?}",
            bucket
        )));
    }
    if bucket.contains('/') || bucket.contains('\\') || bucket.contains('\0') {
        return Err(StorageError::InvalidKey(format!(
            "Bucket name contains invalid characters: {:?}",
            bucket
        )));
    }
    Ok(())
}

/// Object paths must not be empty or absolute, and every `/`-separated
/// segment must be non-empty and neither `.` nor `..`.
pub fn validate_key(key: &str) -> StorageResult<()> {
    if key.is_empty() {
        return Err(StorageError::InvalidKey("Storage key is empty".to_string()));
    }
    if key.starts_with('/') {
        return Err(StorageError::InvalidKey(format!(
            "Storage key must not start with '/': {}",
            key
        )));
    }
    if key.contains('\0')
        || key
            .split('/')
            .any(|segment| segment.is_empty() || segment == "." || segment == "..")
    {
        return Err(StorageError::InvalidKey(format!(
            "Storage key contains invalid characters: {}",
            key
        )));
    }
    Ok(())
}
