use image::{DynamicImage, GenericImageView};
use thumbnailer_core::ThumbnailSpec;

/// Image resize operations
pub struct ImageResize;

impl ImageResize {
    /// Bounded-fit target dimensions.
    ///
    /// `scale = min(max_width / w, max_height / h, cap)` where `cap` is 1.0
    /// unless enlargement is allowed; the result is `(round(w * scale),
    /// round(h * scale))`, clamped to the bounding box. A zero-sized source
    /// or a side that rounds to zero yields a zero dimension, which the
    /// encoder rejects.
    pub fn fit_dimensions(orig_width: u32, orig_height: u32, spec: &ThumbnailSpec) -> (u32, u32) {
        if orig_width == 0 || orig_height == 0 {
            return (0, 0);
        }

        let scale_width = spec.max_width as f64 / orig_width as f64;
        let scale_height = spec.max_height as f64 / orig_height as f64;
        let mut scale = scale_width.min(scale_height);
        if !spec.allow_enlargement {
            scale = scale.min(1.0);
        }

        let width = (orig_width as f64 * scale).round().min(spec.max_width as f64);
        let height = (orig_height as f64 * scale).round().min(spec.max_height as f64);

        (width as u32, height as u32)
    }

    /// Select appropriate filter type based on resize ratio
    pub fn select_filter(
        orig_width: u32,
        orig_height: u32,
        new_width: u32,
        new_height: u32,
    ) -> image::imageops::FilterType {
        let width_ratio = orig_width as f32 / new_width as f32;
        let height_ratio = orig_height as f32 / new_height as f32;
        let max_ratio = width_ratio.max(height_ratio);

        if max_ratio > 2.0 {
            image::imageops::FilterType::Triangle
        } else if max_ratio > 1.5 {
            image::imageops::FilterType::CatmullRom
        } else {
            image::imageops::FilterType::Lanczos3
        }
    }

    /// Resize to the bounded-fit dimensions.
    ///
    /// Returns the image untouched when the target equals the source size.
    /// Callers must reject zero-area targets before calling.
    pub fn apply_fit(img: DynamicImage, spec: &ThumbnailSpec) -> DynamicImage {
        let (orig_width, orig_height) = img.dimensions();
        let (width, height) = Self::fit_dimensions(orig_width, orig_height, spec);

        if (width, height) == (orig_width, orig_height) || width == 0 || height == 0 {
            return img;
        }

        let filter = Self::select_filter(orig_width, orig_height, width, height);
        img.resize_exact(width, height, filter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn spec(max_width: u32, max_height: u32, allow_enlargement: bool) -> ThumbnailSpec {
        ThumbnailSpec {
            max_width,
            max_height,
            allow_enlargement,
        }
    }

    #[test]
    fn test_fit_landscape_downscale() {
        assert_eq!(
            ImageResize::fit_dimensions(4000, 3000, &ThumbnailSpec::default()),
            (200, 150)
        );
    }

    #[test]
    fn test_fit_portrait_downscale() {
        assert_eq!(
            ImageResize::fit_dimensions(3000, 4000, &ThumbnailSpec::default()),
            (150, 200)
        );
    }

    #[test]
    fn test_fit_never_upscales_by_default() {
        assert_eq!(
            ImageResize::fit_dimensions(100, 50, &ThumbnailSpec::default()),
            (100, 50)
        );
    }

    #[test]
    fn test_fit_upscales_when_allowed() {
        assert_eq!(
            ImageResize::fit_dimensions(100, 50, &spec(200, 200, true)),
            (200, 100)
        );
    }

    #[test]
    fn test_fit_one_side_over_bound() {
        // Only height exceeds the box
        assert_eq!(
            ImageResize::fit_dimensions(150, 400, &ThumbnailSpec::default()),
            (75, 200)
        );
    }

    #[test]
    fn test_fit_rounding() {
        // 1000x333 -> scale 0.2 -> 200x66.6 -> 200x67
        assert_eq!(
            ImageResize::fit_dimensions(1000, 333, &ThumbnailSpec::default()),
            (200, 67)
        );
    }

    #[test]
    fn test_fit_extreme_aspect_ratio_rounds_to_zero() {
        assert_eq!(
            ImageResize::fit_dimensions(10000, 1, &ThumbnailSpec::default()),
            (200, 0)
        );
    }

    #[test]
    fn test_fit_zero_source() {
        assert_eq!(ImageResize::fit_dimensions(0, 10, &ThumbnailSpec::default()), (0, 0));
    }

    #[test]
    fn test_fit_bounds_and_aspect_ratio_hold_across_sizes() {
        let specs = [spec(200, 200, false), spec(320, 180, false), spec(64, 128, false)];
        let sizes = [1u32, 2, 3, 7, 50, 99, 199, 200, 201, 640, 1023, 4000];

        for spec in &specs {
            for &w in &sizes {
                for &h in &sizes {
                    let (tw, th) = ImageResize::fit_dimensions(w, h, spec);
                    assert!(tw <= w.min(spec.max_width), "{}x{} -> {}x{}", w, h, tw, th);
                    assert!(th <= h.min(spec.max_height), "{}x{} -> {}x{}", w, h, tw, th);

                    if tw > 0 && th > 0 {
                        // Each side is off by at most 0.5px from the exact scaled size,
                        // so compare cross products with that slack.
                        let lhs = tw as f64 * h as f64;
                        let rhs = th as f64 * w as f64;
                        let slack = 0.5 * (w as f64 + h as f64) + 1e-9;
                        assert!((lhs - rhs).abs() <= slack, "{}x{} -> {}x{}", w, h, tw, th);
                    }
                }
            }
        }
    }

    #[test]
    fn test_select_filter() {
        use image::imageops::FilterType;
        assert_eq!(ImageResize::select_filter(4000, 3000, 200, 150), FilterType::Triangle);
        assert_eq!(ImageResize::select_filter(300, 300, 180, 180), FilterType::CatmullRom);
        assert_eq!(ImageResize::select_filter(220, 220, 200, 200), FilterType::Lanczos3);
    }

    #[test]
    fn test_apply_fit() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(400, 100, Rgba([255, 0, 0, 255])));
        let resized = ImageResize::apply_fit(img, &ThumbnailSpec::default());
        assert_eq!(resized.dimensions(), (200, 50));
    }

    #[test]
    fn test_apply_fit_small_image_untouched() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(100, 50, Rgba([0, 255, 0, 255])));
        let resized = ImageResize::apply_fit(img, &ThumbnailSpec::default());
        assert_eq!(resized.dimensions(), (100, 50));
    }
}
