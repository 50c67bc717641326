//! Thumbnailer Media Processing Library
//!
//! This crate provides the image codec/resizer and the pipeline orchestrator
//! that sequences download, resize and upload for one object event.

pub mod image;
pub mod pipeline;

// Re-export commonly used types
pub use crate::image::{ImageBuffer, ImageResizer, ThumbnailFormat};
pub use pipeline::{PipelineState, ThumbnailPipeline};
