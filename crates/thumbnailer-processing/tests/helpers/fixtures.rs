//! Test fixtures: encoded images of a given size.

use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use std::io::Cursor;

fn gradient(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, ((x / 7 + y / 5) % 256) as u8])
    }))
}

fn encode(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
    // GIF and WebP encoders want 8-bit RGBA.
    let img = match format {
        ImageFormat::Gif | ImageFormat::WebP => {
            DynamicImage::ImageRgba8(gradient(width, height).to_rgba8())
        }
        _ => gradient(width, height),
    };
    let mut buffer = Vec::new();
    img.write_to(&mut Cursor::new(&mut buffer), format).unwrap();
    buffer
}

pub fn jpeg(width: u32, height: u32) -> Vec<u8> {
    encode(width, height, ImageFormat::Jpeg)
}

pub fn png(width: u32, height: u32) -> Vec<u8> {
    encode(width, height, ImageFormat::Png)
}

pub fn gif(width: u32, height: u32) -> Vec<u8> {
    encode(width, height, ImageFormat::Gif)
}

pub fn webp(width: u32, height: u32) -> Vec<u8> {
    encode(width, height, ImageFormat::WebP)
}

/// Decode bytes and return their dimensions and detected format.
pub fn inspect(bytes: &[u8]) -> (u32, u32, ImageFormat) {
    use image::GenericImageView;
    let format = image::guess_format(bytes).unwrap();
    let img = image::load_from_memory_with_format(bytes, format).unwrap();
    let (width, height) = img.dimensions();
    (width, height, format)
}
