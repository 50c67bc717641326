use crate::keys::validate_object_ref;
use crate::traits::{ObjectMetadata, ObjectStore, StorageError, StorageResult};
use crate::StorageBackend;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use thumbnailer_core::ObjectRef;
use uuid::Uuid;

/// Local filesystem storage implementation
///
/// Buckets are directories directly under `base_path`; object paths are laid
/// out beneath them. Intended for development and storage emulators.
#[derive(Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    /// Create a new LocalStorage instance
    ///
    /// # Arguments
    /// * `base_path` - Root directory for buckets (e.g., "/var/lib/thumbnailer")
    pub async fn new(base_path: impl Into<PathBuf>) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create storage directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalStorage { base_path })
    }

    /// Convert an object reference to a filesystem path with security validation
    ///
    /// Rejects references that would resolve outside the base directory,
    /// including through symlinks that already exist on disk.
    fn object_to_path(&self, object: &ObjectRef) -> StorageResult<PathBuf> {
        validate_object_ref(object)?;

        let path = self.base_path.join(&object.bucket).join(&object.path);

        let base_canonical = self.base_path.canonicalize().map_err(|e| {
            StorageError::ConfigError(format!("Failed to canonicalize base path: {}", e))
        })?;

        // Walk up to the deepest existing ancestor and make sure it stays
        // inside the base directory.
        let mut existing = path.as_path();
        loop {
            if let Ok(canonical) = existing.canonicalize() {
                if canonical.strip_prefix(&base_canonical).is_err() {
                    return Err(StorageError::InvalidKey(
                        "Storage key resolves outside storage directory".to_string(),
                    ));
                }
                break;
            }
            match existing.parent() {
                Some(parent) => existing = parent,
                None => break,
            }
        }

        Ok(path)
    }

    /// Ensure parent directory exists
    async fn ensure_parent_dir(&self, path: &Path) -> StorageResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        Ok(())
    }

    /// Sibling temp file used for write-then-rename.
    fn temp_path_for(path: &Path) -> PathBuf {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        path.with_file_name(format!(".{}.{}.tmp", file_name, Uuid::new_v4()))
    }
}

#[async_trait]
impl ObjectStore for LocalStorage {
    async fn download(&self, object: &ObjectRef) -> StorageResult<Vec<u8>> {
        let path = self.object_to_path(object)?;
        let start = std::time::Instant::now();

        if !fs::try_exists(&path).await.unwrap_or(false) {
            return Err(StorageError::NotFound(object.to_string()));
        }

        let data = fs::read(&path).await.map_err(|e| {
            StorageError::DownloadFailed(format!("Failed to read file {}: {}", path.display(), e))
        })?;

        tracing::info!(
            path = %path.display(),
            bucket = %object.bucket,
            key = %object.path,
            size_bytes = data.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage download successful"
        );

        Ok(data)
    }

    async fn upload(
        &self,
        object: &ObjectRef,
        data: Vec<u8>,
        _metadata: &ObjectMetadata,
    ) -> StorageResult<()> {
        let path = self.object_to_path(object)?;
        let size = data.len();

        self.ensure_parent_dir(&path).await?;

        let start = std::time::Instant::now();
        let temp_path = Self::temp_path_for(&path);

        let write_result = async {
            let mut file = fs::File::create(&temp_path).await.map_err(|e| {
                StorageError::UploadFailed(format!(
                    "Failed to create file {}: {}",
                    temp_path.display(),
                    e
                ))
            })?;

            file.write_all(&data).await.map_err(|e| {
                StorageError::UploadFailed(format!(
                    "Failed to write file {}: {}",
                    temp_path.display(),
                    e
                ))
            })?;

            file.sync_all().await.map_err(|e| {
                StorageError::UploadFailed(format!(
                    "Failed to sync file {}: {}",
                    temp_path.display(),
                    e
                ))
            })?;

            // Rename within one directory is atomic, so readers see either the
            // old object or the new one.
            fs::rename(&temp_path, &path).await.map_err(|e| {
                StorageError::UploadFailed(format!(
                    "Failed to move {} into place: {}",
                    path.display(),
                    e
                ))
            })
        }
        .await;

        if let Err(e) = write_result {
            let _ = fs::remove_file(&temp_path).await;
            tracing::error!(
                error = %e,
                path = %path.display(),
                bucket = %object.bucket,
                key = %object.path,
                size_bytes = size,
                "Local storage upload failed"
            );
            return Err(e);
        }

        tracing::info!(
            path = %path.display(),
            bucket = %object.bucket,
            key = %object.path,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage upload successful"
        );

        Ok(())
    }

    async fn exists(&self, object: &ObjectRef) -> StorageResult<bool> {
        let path = self.object_to_path(object)?;
        Ok(fs::try_exists(&path).await.unwrap_or(false))
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}
