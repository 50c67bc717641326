//! Object store wrapper that counts calls and injects faults.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use thumbnailer_core::ObjectRef;
use thumbnailer_storage::{
    MemoryStorage, ObjectMetadata, ObjectStore, StorageBackend, StorageError, StorageResult,
};

/// In-memory store that records how often it was called.
#[derive(Default)]
pub struct RecordingStore {
    inner: MemoryStorage,
    downloads: AtomicUsize,
    uploads: AtomicUsize,
    fail_downloads: AtomicBool,
    fail_uploads: AtomicBool,
}

impl RecordingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn memory(&self) -> &MemoryStorage {
        &self.inner
    }

    pub fn put(&self, object: &ObjectRef, data: Vec<u8>, content_type: &str) {
        self.inner.insert(
            object.clone(),
            data,
            ObjectMetadata::with_content_type(content_type),
        );
    }

    /// Make every download fail with a transient backend fault.
    pub fn fail_downloads(&self) {
        self.fail_downloads.store(true, Ordering::SeqCst);
    }

    /// Make every upload fail with a transient backend fault.
    pub fn fail_uploads(&self) {
        self.fail_uploads.store(true, Ordering::SeqCst);
    }

    pub fn downloads(&self) -> usize {
        self.downloads.load(Ordering::SeqCst)
    }

    pub fn uploads(&self) -> usize {
        self.uploads.load(Ordering::SeqCst)
    }

    pub fn calls(&self) -> usize {
        self.downloads() + self.uploads()
    }
}

#[async_trait]
impl ObjectStore for RecordingStore {
    async fn download(&self, object: &ObjectRef) -> StorageResult<Vec<u8>> {
        self.downloads.fetch_add(1, Ordering::SeqCst);
        if self.fail_downloads.load(Ordering::SeqCst) {
            return Err(StorageError::DownloadFailed("connection reset".to_string()));
        }
        self.inner.download(object).await
    }

    async fn upload(
        &self,
        object: &ObjectRef,
        data: Vec<u8>,
        metadata: &ObjectMetadata,
    ) -> StorageResult<()> {
        self.uploads.fetch_add(1, Ordering::SeqCst);
        if self.fail_uploads.load(Ordering::SeqCst) {
            return Err(StorageError::UploadFailed("503 Slow Down".to_string()));
        }
        self.inner.upload(object, data, metadata).await
    }

    async fn exists(&self, object: &ObjectRef) -> StorageResult<bool> {
        self.inner.exists(object).await
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Memory
    }
}
