//! Domain models
//!
//! Value types that flow through a single pipeline invocation. None of them
//! outlive the invocation that created them.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::constants::{DEFAULT_MAX_HEIGHT, DEFAULT_MAX_WIDTH};

/// Identifies a stored object.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectRef {
    pub bucket: String,
    pub path: String,
}

impl ObjectRef {
    pub fn new(bucket: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            path: path.into(),
        }
    }

    /// Same bucket, different path.
    pub fn with_path(&self, path: impl Into<String>) -> Self {
        Self {
            bucket: self.bucket.clone(),
            path: path.into(),
        }
    }
}

impl Display for ObjectRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}/{}", self.bucket, self.path)
    }
}

/// One finalized-upload notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectEvent {
    pub object: ObjectRef,
    pub content_type: Option<String>,
}

impl ObjectEvent {
    pub fn new(object: ObjectRef, content_type: Option<String>) -> Self {
        Self {
            object,
            content_type,
        }
    }
}

/// Storage-object payload as delivered by the hosting transport.
///
/// Only the fields the handler reads are declared; everything else in the
/// payload is ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageObjectData {
    pub bucket: String,
    pub name: String,
    #[serde(default)]
    pub content_type: Option<String>,
}

impl From<StorageObjectData> for ObjectEvent {
    fn from(data: StorageObjectData) -> Self {
        ObjectEvent {
            object: ObjectRef::new(data.bucket, data.name),
            content_type: data.content_type,
        }
    }
}

/// Bounding box for generated thumbnails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThumbnailSpec {
    pub max_width: u32,
    pub max_height: u32,
    pub allow_enlargement: bool,
}

impl Default for ThumbnailSpec {
    fn default() -> Self {
        Self {
            max_width: DEFAULT_MAX_WIDTH,
            max_height: DEFAULT_MAX_HEIGHT,
            allow_enlargement: false,
        }
    }
}

/// Why an event was resolved without touching the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Content type absent or not `image/*`.
    NotAnImage,
    /// Base filename carries the reserved thumbnail prefix.
    AlreadyThumbnail,
    /// Path has no base filename (e.g. a folder placeholder ending in `/`).
    EmptyName,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::NotAnImage => "not_an_image",
            SkipReason::AlreadyThumbnail => "already_thumbnail",
            SkipReason::EmptyName => "empty_name",
        }
    }
}

impl Display for SkipReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Successful result of one invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PipelineOutcome {
    Skipped {
        reason: SkipReason,
    },
    Completed {
        thumbnail: ObjectRef,
        width: u32,
        height: u32,
        size_bytes: u64,
    },
}

impl PipelineOutcome {
    pub fn is_skipped(&self) -> bool {
        matches!(self, PipelineOutcome::Skipped { .. })
    }
}
