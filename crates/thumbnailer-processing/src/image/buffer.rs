use super::format::ThumbnailFormat;

/// Encoded thumbnail bytes together with their dimensions and format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageBuffer {
    data: Vec<u8>,
    width: u32,
    height: u32,
    format: ThumbnailFormat,
}

impl ImageBuffer {
    pub fn new(data: Vec<u8>, width: u32, height: u32, format: ThumbnailFormat) -> Self {
        Self {
            data,
            width,
            height,
            format,
        }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Canonical MIME type of the encoded bytes
    pub fn content_type(&self) -> &'static str {
        self.format.to_mime_type()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
