//! Thumbnail pipeline orchestrator
//!
//! Sequences one object event through
//! `Received -> Classified -> (Skipped | Downloaded -> Resized -> Uploaded -> Completed)`.
//! Any stage may end in `Failed`, reported as a [`ThumbnailError`].
//!
//! The orchestrator holds no per-invocation state: the store handle, resizer
//! and naming policy are read-only after construction, so one pipeline can
//! serve any number of concurrent events.

use crate::image::ImageResizer;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::sync::Arc;
use std::time::Instant;
use thumbnailer_core::{
    Config, ErrorMetadata, LogLevel, NamingPolicy, ObjectEvent, PipelineOutcome, SkipReason,
    StoreOperation, ThumbnailError, ThumbnailResult, ThumbnailSpec,
};
use thumbnailer_storage::{ObjectMetadata, ObjectStore};

/// Stage of one invocation, used as a structured log field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Received,
    Classified,
    Skipped,
    Downloaded,
    Resized,
    Uploaded,
    Completed,
    Failed,
}

impl PipelineState {
    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineState::Received => "received",
            PipelineState::Classified => "classified",
            PipelineState::Skipped => "skipped",
            PipelineState::Downloaded => "downloaded",
            PipelineState::Resized => "resized",
            PipelineState::Uploaded => "uploaded",
            PipelineState::Completed => "completed",
            PipelineState::Failed => "failed",
        }
    }
}

impl Display for PipelineState {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

#[derive(Clone)]
pub struct ThumbnailPipeline {
    storage: Arc<dyn ObjectStore>,
    resizer: ImageResizer,
    naming: NamingPolicy,
}

impl ThumbnailPipeline {
    pub fn new(storage: Arc<dyn ObjectStore>, spec: ThumbnailSpec, naming: NamingPolicy) -> Self {
        Self {
            storage,
            resizer: ImageResizer::new(spec),
            naming,
        }
    }

    /// Build a pipeline from validated configuration.
    pub fn from_config(
        storage: Arc<dyn ObjectStore>,
        config: &Config,
    ) -> Result<Self, anyhow::Error> {
        Ok(Self::new(storage, config.thumbnail, config.naming_policy()?))
    }

    /// Handle one finalized-upload event.
    ///
    /// Skips return `Ok(PipelineOutcome::Skipped)` without any store call.
    /// Nothing is uploaded unless the resize fully succeeded.
    #[tracing::instrument(
        skip(self, event),
        fields(
            bucket = %event.object.bucket,
            path = %event.object.path,
            content_type = ?event.content_type,
        )
    )]
    pub async fn handle(&self, event: &ObjectEvent) -> ThumbnailResult<PipelineOutcome> {
        let start = Instant::now();

        match self.run(event).await {
            Ok(outcome) => {
                if let PipelineOutcome::Completed {
                    ref thumbnail,
                    width,
                    height,
                    size_bytes,
                } = outcome
                {
                    tracing::info!(
                        state = %PipelineState::Completed,
                        thumbnail = %thumbnail,
                        width,
                        height,
                        size_bytes,
                        duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                        "Thumbnail created"
                    );
                }
                Ok(outcome)
            }
            Err(err) => {
                log_failure(&err, start);
                Err(err)
            }
        }
    }

    async fn run(&self, event: &ObjectEvent) -> ThumbnailResult<PipelineOutcome> {
        tracing::debug!(state = %PipelineState::Received, "Object event received");

        let naming = self
            .naming
            .classify(&event.object.path, event.content_type.as_deref());

        let derived_path = match (naming.is_eligible, naming.derived_path) {
            (true, Some(path)) => path,
            _ => {
                let reason = naming.skip_reason.unwrap_or(SkipReason::NotAnImage);
                tracing::info!(
                    state = %PipelineState::Skipped,
                    reason = %reason,
                    is_already_thumbnail = naming.is_already_thumbnail,
                    "Object not eligible for thumbnailing"
                );
                return Ok(PipelineOutcome::Skipped { reason });
            }
        };

        // Only the store calls need a bucket; skips never reach them.
        if event.object.bucket.trim().is_empty() {
            return Err(ThumbnailError::permanent("event has an empty bucket name"));
        }

        // An eligible event always carries an image/* content type.
        let content_type = event.content_type.clone().unwrap_or_default();
        let thumbnail_ref = event.object.with_path(derived_path);
        tracing::debug!(
            state = %PipelineState::Classified,
            thumbnail = %thumbnail_ref,
            "Object eligible for thumbnailing"
        );

        let source = self
            .storage
            .download(&event.object)
            .await
            .map_err(|e| e.into_thumbnail_error(StoreOperation::Download))?;
        tracing::info!(
            state = %PipelineState::Downloaded,
            size_bytes = source.len() as u64,
            "Source image downloaded"
        );

        let resizer = self.resizer;
        let resize_content_type = content_type.clone();
        let thumbnail = tokio::task::spawn_blocking(move || {
            resizer.thumbnail(&source, &resize_content_type)
        })
        .await
        .map_err(|e| ThumbnailError::Encode(format!("resize task failed: {}", e)))??;

        let (width, height) = (thumbnail.width(), thumbnail.height());
        let size_bytes = thumbnail.len() as u64;
        tracing::info!(
            state = %PipelineState::Resized,
            width,
            height,
            size_bytes,
            "Thumbnail resized"
        );

        self.storage
            .upload(
                &thumbnail_ref,
                thumbnail.into_bytes(),
                &ObjectMetadata::with_content_type(content_type),
            )
            .await
            .map_err(|e| e.into_thumbnail_error(StoreOperation::Upload))?;
        tracing::debug!(state = %PipelineState::Uploaded, "Thumbnail uploaded");

        Ok(PipelineOutcome::Completed {
            thumbnail: thumbnail_ref,
            width,
            height,
            size_bytes,
        })
    }
}

fn log_failure(err: &ThumbnailError, start: Instant) {
    let duration_ms = start.elapsed().as_secs_f64() * 1000.0;
    let error_code = err.error_code();
    let recoverable = err.is_recoverable();

    match err.log_level() {
        LogLevel::Debug => tracing::debug!(
            state = %PipelineState::Failed,
            error = %err,
            error_code,
            recoverable,
            duration_ms,
            "Thumbnail pipeline failed"
        ),
        LogLevel::Warn => tracing::warn!(
            state = %PipelineState::Failed,
            error = %err,
            error_code,
            recoverable,
            duration_ms,
            "Thumbnail pipeline failed"
        ),
        LogLevel::Error => tracing::error!(
            state = %PipelineState::Failed,
            error = %err,
            error_code,
            recoverable,
            duration_ms,
            "Thumbnail pipeline failed"
        ),
    }
}
