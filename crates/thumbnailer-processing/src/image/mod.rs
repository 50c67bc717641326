//! Image processing module
//!
//! - Format detection from the declared content type (format)
//! - Bounded-fit dimension computation and resampling (resize)
//! - Deterministic re-encoding in the source container format (encode)
//! - The `ImageResizer` entry point tying them together (resizer)

pub mod buffer;
pub mod encode;
pub mod format;
pub mod resize;
pub mod resizer;

pub use buffer::ImageBuffer;
pub use format::ThumbnailFormat;
pub use resize::ImageResize;
pub use resizer::ImageResizer;
