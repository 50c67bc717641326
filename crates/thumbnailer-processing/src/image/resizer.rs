use super::buffer::ImageBuffer;
use super::encode::ImageEncode;
use super::format::ThumbnailFormat;
use super::resize::ImageResize;
use image::GenericImageView;
use thumbnailer_core::{ThumbnailError, ThumbnailResult, ThumbnailSpec};

/// Produces a bounded-fit thumbnail in the source container format.
///
/// Pure and synchronous; callers on an async runtime should run it inside
/// `spawn_blocking`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageResizer {
    spec: ThumbnailSpec,
}

impl ImageResizer {
    pub fn new(spec: ThumbnailSpec) -> Self {
        Self { spec }
    }

    /// Decode `data` as `content_type`, fit it into the bounding box and
    /// re-encode it in the same format.
    pub fn thumbnail(&self, data: &[u8], content_type: &str) -> ThumbnailResult<ImageBuffer> {
        let format = ThumbnailFormat::from_content_type(content_type)?;

        let img = image::load_from_memory_with_format(data, format.to_image_format())
            .map_err(|e| ThumbnailError::Decode(format!("{}: {}", content_type, e)))?;

        let (orig_width, orig_height) = img.dimensions();
        let (width, height) = ImageResize::fit_dimensions(orig_width, orig_height, &self.spec);
        if width == 0 || height == 0 {
            return Err(ThumbnailError::Encode(format!(
                "{}x{} source fits to zero-area {}x{} thumbnail",
                orig_width, orig_height, width, height
            )));
        }

        let resized = ImageResize::apply_fit(img, &self.spec);
        let bytes = ImageEncode::encode(&resized, format)?;

        tracing::debug!(
            orig_width,
            orig_height,
            width,
            height,
            size_bytes = bytes.len(),
            format = format.to_mime_type(),
            "Thumbnail encoded"
        );

        Ok(ImageBuffer::new(bytes, width, height, format))
    }
}
