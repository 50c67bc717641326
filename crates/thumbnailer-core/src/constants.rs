//! Defaults shared across crates.

/// Default bounding box width in pixels.
pub const DEFAULT_MAX_WIDTH: u32 = 200;

/// Default bounding box height in pixels.
pub const DEFAULT_MAX_HEIGHT: u32 = 200;

/// Reserved filename prefix marking derived thumbnails.
pub const DEFAULT_THUMBNAIL_PREFIX: &str = "thumb_";

/// Content types starting with this prefix are considered images.
pub const IMAGE_CONTENT_TYPE_PREFIX: &str = "image/";

/// Default HTTP port for the event receiver.
pub const DEFAULT_SERVER_PORT: u16 = 8080;
