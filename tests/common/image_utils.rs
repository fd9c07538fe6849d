//! Image utilities for testing.
//!
//! This module provides helper functions for inspecting rendered canvases.

use choropleth::Canvas;
use image::{DynamicImage, GenericImageView, ImageError, ImageFormat};
use std::collections::HashSet;

/// Load an image from a byte array
pub fn load_image_from_bytes(bytes: &[u8]) -> Result<DynamicImage, ImageError> {
    image::load_from_memory(bytes)
}

/// Detect image format from bytes
pub fn detect_image_format(bytes: &[u8]) -> Option<ImageFormat> {
    image::guess_format(bytes).ok()
}

/// Check if an image has the expected dimensions
pub fn assert_image_dimensions(
    image: &DynamicImage,
    expected_width: u32,
    expected_height: u32,
) -> Result<(), String> {
    let (actual_width, actual_height) = image.dimensions();

    if actual_width != expected_width || actual_height != expected_height {
        return Err(format!(
            "Image dimensions differ: actual = {}x{}, expected = {}x{}",
            actual_width, actual_height, expected_width, expected_height
        ));
    }

    Ok(())
}

/// Color of the canvas pixel under a world coordinate
pub fn pixel_at(canvas: &Canvas, world: [f64; 2]) -> [u8; 4] {
    let transform = canvas.transform().expect("canvas has not been plotted on");
    let (x, y) = transform.to_pixel(world);
    canvas
        .pixel(x as u32, y as u32)
        .expect("coordinate is outside the canvas")
}

/// Count distinct pixel colors
pub fn distinct_colors(canvas: &Canvas) -> usize {
    canvas
        .to_image()
        .pixels()
        .map(|p| p.0)
        .collect::<HashSet<_>>()
        .len()
}

/// Assert two colors match within `tolerance` per channel
pub fn assert_color_close(actual: [u8; 4], expected: [u8; 4], tolerance: u8, context: &str) {
    let close = actual
        .iter()
        .zip(expected)
        .all(|(a, e)| a.abs_diff(e) <= tolerance);
    assert!(
        close,
        "{}: color {:?} differs from {:?} by more than {}",
        context, actual, expected, tolerance
    );
}

/// Count pixels that differ between two canvases of the same size
pub fn differing_pixels(a: &Canvas, b: &Canvas) -> usize {
    a.to_image()
        .pixels()
        .zip(b.to_image().pixels())
        .filter(|(p, q)| p != q)
        .count()
}

/// Composite `color` at `alpha` over opaque white, as the canvas does
pub fn over_white(color: [u8; 4], alpha: f64) -> [u8; 4] {
    let a = color[3] as f64 / 255.0 * alpha;
    let mix = |c: u8| (c as f64 * a + 255.0 * (1.0 - a)).round() as u8;
    [mix(color[0]), mix(color[1]), mix(color[2]), 255]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_over_white() {
        assert_eq!(over_white([0, 0, 0, 255], 1.0), [0, 0, 0, 255]);
        assert_eq!(over_white([0, 0, 0, 255], 0.0), [255, 255, 255, 255]);
        assert_eq!(over_white([0, 0, 0, 255], 0.5), [128, 128, 128, 255]);
    }

    #[test]
    fn test_assert_color_close() {
        assert_color_close([10, 20, 30, 255], [11, 19, 30, 255], 1, "within");
        let result = std::panic::catch_unwind(|| {
            assert_color_close([10, 20, 30, 255], [14, 20, 30, 255], 2, "outside")
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_assert_image_dimensions() {
        let img = DynamicImage::new_rgb8(10, 20);
        assert!(assert_image_dimensions(&img, 10, 20).is_ok());
        assert!(assert_image_dimensions(&img, 11, 20).is_err());
    }
}
