//! Thumbnailer Core Library
//!
//! This crate provides the domain model, naming policy, error taxonomy and
//! configuration shared by every thumbnailer component.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod naming;
pub mod storage_types;

// Re-export commonly used types
pub use config::{Config, StorageConfig};
pub use error::{ErrorMetadata, LogLevel, StoreOperation, ThumbnailError, ThumbnailResult};
pub use models::{ObjectEvent, ObjectRef, PipelineOutcome, SkipReason, StorageObjectData, ThumbnailSpec};
pub use naming::{NamingPolicy, NamingResult};
pub use storage_types::StorageBackend;
