//! Test helpers: generated image fixtures and an instrumented object store.

#![allow(dead_code)]

pub mod fixtures;
pub mod storage;

use std::sync::Arc;
use thumbnailer_core::{NamingPolicy, ThumbnailSpec};
use thumbnailer_processing::ThumbnailPipeline;

/// Pipeline with default spec and naming over the given store.
pub fn pipeline_with(store: Arc<storage::RecordingStore>) -> ThumbnailPipeline {
    ThumbnailPipeline::new(store, ThumbnailSpec::default(), NamingPolicy::default())
}
