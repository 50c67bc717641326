//! Supported container formats

use thumbnailer_core::{ThumbnailError, ThumbnailResult};

/// Image formats the resizer can decode and re-encode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThumbnailFormat {
    Jpeg,
    Png,
    Gif,
    WebP,
}

impl ThumbnailFormat {
    /// Detect format from a declared content type.
    ///
    /// Matching ignores case and MIME parameters (`image/jpeg; charset=binary`).
    pub fn from_content_type(content_type: &str) -> ThumbnailResult<Self> {
        let essence = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        match essence.as_str() {
            "image/jpeg" | "image/jpg" | "image/pjpeg" => Ok(ThumbnailFormat::Jpeg),
            "image/png" => Ok(ThumbnailFormat::Png),
            "image/gif" => Ok(ThumbnailFormat::Gif),
            "image/webp" => Ok(ThumbnailFormat::WebP),
            _ => Err(ThumbnailError::UnsupportedFormat(content_type.to_string())),
        }
    }

    pub fn to_image_format(self) -> image::ImageFormat {
        match self {
            ThumbnailFormat::Jpeg => image::ImageFormat::Jpeg,
            ThumbnailFormat::Png => image::ImageFormat::Png,
            ThumbnailFormat::Gif => image::ImageFormat::Gif,
            ThumbnailFormat::WebP => image::ImageFormat::WebP,
        }
    }

    pub fn to_mime_type(self) -> &'static str {
        match self {
            ThumbnailFormat::Jpeg => "image/jpeg",
            ThumbnailFormat::Png => "image/png",
            ThumbnailFormat::Gif => "image/gif",
            ThumbnailFormat::WebP => "image/webp",
        }
    }
}
