use crate::keys::validate_object_ref;
use crate::traits::{ObjectMetadata, ObjectStore, StorageError, StorageResult};
use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use object_store::aws::{AmazonS3, AmazonS3Builder};
use object_store::path::Path;
use object_store::Error as ObjectStoreError;
use object_store::{
    Attribute, Attributes, ObjectStore as _, ObjectStoreExt, PutOptions, PutPayload,
    Result as ObjectResult,
};
use thumbnailer_core::ObjectRef;

/// S3 storage implementation
///
/// Holds one pre-built client for the configured default bucket. Events for
/// any other bucket get a client built from the same immutable builder
/// template; nothing is cached between calls.
#[derive(Clone)]
pub struct S3Storage {
    builder: AmazonS3Builder,
    default_bucket: Option<String>,
    default_store: Option<AmazonS3>,
}

impl S3Storage {
    /// Create a new S3Storage instance
    ///
    /// # Arguments
    /// * `default_bucket` - Bucket to pre-build a client for (optional)
    /// * `region` - AWS region (or region identifier for S3-compatible providers)
    /// * `endpoint_url` - Optional custom endpoint URL for S3-compatible providers
    ///   (e.g., "http://localhost:9000" for MinIO, "https://storage.googleapis.com" for GCS interop)
    pub fn new(
        default_bucket: Option<String>,
        region: String,
        endpoint_url: Option<String>,
    ) -> StorageResult<Self> {
        // Credentials come from the standard AWS_* environment variables.
        let mut builder = AmazonS3Builder::from_env().with_region(region);

        if let Some(ref endpoint) = endpoint_url {
            let allow_http = endpoint.starts_with("http://");
            builder = builder
                .with_endpoint(endpoint.clone())
                .with_allow_http(allow_http);
        }

        let default_store = match default_bucket {
            Some(ref bucket) => Some(Self::build_store(&builder, bucket)?),
            None => None,
        };

        Ok(S3Storage {
            builder,
            default_bucket,
            default_store,
        })
    }

    fn build_store(builder: &AmazonS3Builder, bucket: &str) -> StorageResult<AmazonS3> {
        builder
            .clone()
            .with_bucket_name(bucket)
            .build()
            .map_err(|e| StorageError::ConfigError(e.to_string()))
    }

    fn store_for(&self, bucket: &str) -> StorageResult<AmazonS3> {
        match (&self.default_bucket, &self.default_store) {
            (Some(default), Some(store)) if default == bucket => Ok(store.clone()),
            _ => Self::build_store(&self.builder, bucket),
        }
    }

    fn location(object: &ObjectRef) -> StorageResult<Path> {
        validate_object_ref(object)?;
        Path::parse(&object.path).map_err(|e| StorageError::InvalidKey(e.to_string()))
    }

    /// Map errors that are the same for every operation.
    fn classify_error(
        object: &ObjectRef,
        err: ObjectStoreError,
        otherwise: fn(String) -> StorageError,
    ) -> StorageError {
        match err {
            ObjectStoreError::NotFound { .. } => StorageError::NotFound(object.to_string()),
            ObjectStoreError::PermissionDenied { .. } | ObjectStoreError::Unauthenticated { .. } => {
                StorageError::AccessDenied(err.to_string())
            }
            ObjectStoreError::InvalidPath { .. } => StorageError::InvalidKey(err.to_string()),
            other => otherwise(other.to_string()),
        }
    }
}

#[async_trait]
impl ObjectStore for S3Storage {
    async fn download(&self, object: &ObjectRef) -> StorageResult<Vec<u8>> {
        let start = std::time::Instant::now();
        let location = Self::location(object)?;
        let store = self.store_for(&object.bucket)?;

        let result: ObjectResult<_> = store.get(&location).await;

        let result = result.map_err(|e| {
            let err = Self::classify_error(object, e, StorageError::DownloadFailed);
            tracing::error!(
                error = %err,
                bucket = %object.bucket,
                key = %object.path,
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                "S3 download failed"
            );
            err
        })?;

        let bytes = result
            .bytes()
            .await
            .map_err(|e| StorageError::DownloadFailed(e.to_string()))?;

        tracing::info!(
            bucket = %object.bucket,
            key = %object.path,
            size_bytes = bytes.len() as u64,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 download successful"
        );

        Ok(bytes.to_vec())
    }

    async fn upload(
        &self,
        object: &ObjectRef,
        data: Vec<u8>,
        metadata: &ObjectMetadata,
    ) -> StorageResult<()> {
        let start = std::time::Instant::now();
        let location = Self::location(object)?;
        let store = self.store_for(&object.bucket)?;

        let size = data.len() as u64;
        let payload = PutPayload::from(Bytes::from(data));

        let mut attributes = Attributes::new();
        if let Some(ref content_type) = metadata.content_type {
            attributes.insert(Attribute::ContentType, content_type.clone().into());
        }
        let options = PutOptions {
            attributes,
            ..Default::default()
        };

        // A single PUT replaces the object atomically.
        let result: ObjectResult<_> = store.put_opts(&location, payload, options).await;

        result.map_err(|e| {
            let err = Self::classify_error(object, e, StorageError::UploadFailed);
            tracing::error!(
                error = %err,
                bucket = %object.bucket,
                key = %object.path,
                size_bytes = size,
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                "S3 upload failed"
            );
            err
        })?;

        tracing::info!(
            bucket = %object.bucket,
            key = %object.path,
            size_bytes = size,
            content_type = ?metadata.content_type,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 upload successful"
        );

        Ok(())
    }

    async fn exists(&self, object: &ObjectRef) -> StorageResult<bool> {
        let location = Self::location(object)?;
        let store = self.store_for(&object.bucket)?;
        match store.head(&location).await {
            Ok(_) => Ok(true),
            Err(ObjectStoreError::NotFound { .. }) => Ok(false),
            Err(e) => Err(Self::classify_error(object, e, StorageError::BackendError)),
        }
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::S3
    }
}
