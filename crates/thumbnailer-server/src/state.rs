//! Application state shared by all handlers.

use thumbnailer_processing::ThumbnailPipeline;

/// Immutable after startup; cloned into every request through `Arc`.
pub struct AppState {
    pub pipeline: ThumbnailPipeline,
}

impl AppState {
    pub fn new(pipeline: ThumbnailPipeline) -> Self {
        Self { pipeline }
    }
}
