use super::format::ThumbnailFormat;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::webp::WebPEncoder;
use image::{DynamicImage, GenericImageView};
use std::io::Cursor;
use thumbnailer_core::{ThumbnailError, ThumbnailResult};

/// Fixed JPEG quality for thumbnails.
pub const JPEG_QUALITY: u8 = 80;

/// Re-encodes resized images in their source container format.
///
/// Every encoder used here is deterministic: the same pixels always produce
/// the same bytes.
pub struct ImageEncode;

impl ImageEncode {
    pub fn encode(img: &DynamicImage, format: ThumbnailFormat) -> ThumbnailResult<Vec<u8>> {
        let (width, height) = img.dimensions();
        if width == 0 || height == 0 {
            return Err(ThumbnailError::Encode(format!(
                "cannot encode zero-area image ({}x{})",
                width, height
            )));
        }

        let estimated_size = (width as usize) * (height as usize) * 3;
        let mut buffer = Vec::with_capacity(estimated_size);

        let result = match format {
            ThumbnailFormat::Jpeg => DynamicImage::ImageRgb8(img.to_rgb8())
                .write_with_encoder(JpegEncoder::new_with_quality(&mut buffer, JPEG_QUALITY)),
            ThumbnailFormat::Png => img.write_to(&mut Cursor::new(&mut buffer), format.to_image_format()),
            // GIF output is a single frame; the encoder wants 8-bit RGBA.
            ThumbnailFormat::Gif => DynamicImage::ImageRgba8(img.to_rgba8())
                .write_to(&mut Cursor::new(&mut buffer), format.to_image_format()),
            ThumbnailFormat::WebP => DynamicImage::ImageRgba8(img.to_rgba8())
                .write_with_encoder(WebPEncoder::new_lossless(&mut buffer)),
        };

        result.map_err(|e| {
            ThumbnailError::Encode(format!("failed to encode {}: {}", format.to_mime_type(), e))
        })?;

        Ok(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn gradient(width: u32, height: u32) -> DynamicImage {
        let img = RgbaImage::from_fn(width, height, |x, y| {
            Rgba([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8, 255])
        });
        DynamicImage::ImageRgba8(img)
    }

    #[test]
    fn test_encode_each_format_decodes_back() {
        let img = gradient(40, 30);
        for format in [
            ThumbnailFormat::Jpeg,
            ThumbnailFormat::Png,
            ThumbnailFormat::Gif,
            ThumbnailFormat::WebP,
        ] {
            let bytes = ImageEncode::encode(&img, format).unwrap();
            let detected = image::guess_format(&bytes).unwrap();
            assert_eq!(detected, format.to_image_format());

            let decoded = image::load_from_memory_with_format(&bytes, detected).unwrap();
            assert_eq!(decoded.dimensions(), (40, 30));
        }
    }

    #[test]
    fn test_encode_is_deterministic() {
        let img = gradient(64, 48);
        for format in [
            ThumbnailFormat::Jpeg,
            ThumbnailFormat::Png,
            ThumbnailFormat::Gif,
            ThumbnailFormat::WebP,
        ] {
            let first = ImageEncode::encode(&img, format).unwrap();
            let second = ImageEncode::encode(&img, format).unwrap();
            assert_eq!(first, second, "{:?} output differs between runs", format);
        }
    }

    #[test]
    fn test_encode_zero_area_rejected() {
        let img = DynamicImage::ImageRgba8(RgbaImage::new(10, 0));
        let result = ImageEncode::encode(&img, ThumbnailFormat::Png);
        assert!(matches!(result, Err(ThumbnailError::Encode(_))));
    }
}
