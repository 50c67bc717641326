//! Test helpers: build the router over an in-memory store.

#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::TestServer;
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use std::io::Cursor;
use std::sync::Arc;
use thumbnailer_core::{NamingPolicy, ObjectRef, ThumbnailSpec};
use thumbnailer_processing::ThumbnailPipeline;
use thumbnailer_server::setup::routes::setup_routes;
use thumbnailer_server::state::AppState;
use thumbnailer_storage::{
    MemoryStorage, ObjectMetadata, ObjectStore, StorageBackend, StorageError, StorageResult,
};

pub struct TestApp {
    pub server: TestServer,
    pub storage: MemoryStorage,
}

/// Router over a fresh in-memory store.
pub fn setup_test_app() -> TestApp {
    let storage = MemoryStorage::new();
    let server = server_over(Arc::new(storage.clone()));
    TestApp { server, storage }
}

pub fn server_over(store: Arc<dyn ObjectStore>) -> TestServer {
    let pipeline =
        ThumbnailPipeline::new(store, ThumbnailSpec::default(), NamingPolicy::default());
    let router = setup_routes(Arc::new(AppState::new(pipeline)));
    TestServer::new(router).unwrap()
}

pub fn seed_png(storage: &MemoryStorage, bucket: &str, path: &str, width: u32, height: u32) {
    let img = RgbImage::from_pixel(width, height, Rgb([200, 100, 50]));
    let mut buffer = Vec::new();
    DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
        .unwrap();
    storage.insert(
        ObjectRef::new(bucket, path),
        buffer,
        ObjectMetadata::with_content_type("image/png"),
    );
}

/// Store whose every call fails with a transient backend fault.
pub struct UnavailableStore;

#[async_trait]
impl ObjectStore for UnavailableStore {
    async fn download(&self, _object: &ObjectRef) -> StorageResult<Vec<u8>> {
        Err(StorageError::DownloadFailed("connection timed out".to_string()))
    }

    async fn upload(
        &self,
        _object: &ObjectRef,
        _data: Vec<u8>,
        _metadata: &ObjectMetadata,
    ) -> StorageResult<()> {
        Err(StorageError::UploadFailed("connection timed out".to_string()))
    }

    async fn exists(&self, _object: &ObjectRef) -> StorageResult<bool> {
        Err(StorageError::BackendError("connection timed out".to_string()))
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Memory
    }
}
