//! In-memory object store
//!
//! Used by tests and by the `memory` backend for dry runs. Each upload swaps
//! the whole entry under the lock, so readers never see a partial object.

use crate::keys::validate_object_ref;
use crate::traits::{ObjectMetadata, ObjectStore, StorageError, StorageResult};
use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use thumbnailer_core::ObjectRef;

/// An object held by [`MemoryStorage`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub data: Bytes,
    pub metadata: ObjectMetadata,
}

/// Memory storage implementation
#[derive(Clone, Default)]
pub struct MemoryStorage {
    objects: Arc<RwLock<HashMap<ObjectRef, StoredObject>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an object without going through `upload`.
    pub fn insert(&self, object: ObjectRef, data: impl Into<Bytes>, metadata: ObjectMetadata) {
        let stored = StoredObject {
            data: data.into(),
            metadata,
        };
        self.write_lock().insert(object, stored);
    }

    /// Snapshot of a stored object (for test assertions)
    pub fn get(&self, object: &ObjectRef) -> Option<StoredObject> {
        self.read_lock().get(object).cloned()
    }

    pub fn len(&self) -> usize {
        self.read_lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read_lock().is_empty()
    }

    // A poisoned lock only means another thread panicked mid-insert; the map
    // itself is still consistent because entries are replaced whole.
    fn read_lock(&self) -> std::sync::RwLockReadGuard<'_, HashMap<ObjectRef, StoredObject>> {
        self.objects.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write_lock(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<ObjectRef, StoredObject>> {
        self.objects.write().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl ObjectStore for MemoryStorage {
    async fn download(&self, object: &ObjectRef) -> StorageResult<Vec<u8>> {
        validate_object_ref(object)?;
        self.read_lock()
            .get(object)
            .map(|stored| stored.data.to_vec())
            .ok_or_else(|| StorageError::NotFound(object.to_string()))
    }

    async fn upload(
        &self,
        object: &ObjectRef,
        data: Vec<u8>,
        metadata: &ObjectMetadata,
    ) -> StorageResult<()> {
        validate_object_ref(object)?;
        let size = data.len();
        self.insert(object.clone(), data, metadata.clone());

        tracing::debug!(
            bucket = %object.bucket,
            key = %object.path,
            size_bytes = size,
            "Memory storage upload successful"
        );

        Ok(())
    }

    async fn exists(&self, object: &ObjectRef) -> StorageResult<bool> {
        validate_object_ref(object)?;
        Ok(self.read_lock().contains_key(object))
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Memory
    }
}
