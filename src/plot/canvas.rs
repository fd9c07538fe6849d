//! Raster drawing surface.
//!
//! A [`Canvas`] owns a `tiny_skia` pixmap plus the world-to-pixel
//! transform that the first plot drawn on it establishes. Later plots on
//! the same canvas reuse that transform so their geometries line up.
//! Paths are clipped to the pixmap by the rasterizer, so geometry far
//! outside the canvas costs no more than geometry inside it.

use ab_glyph::FontArc;
use image::{DynamicImage, ImageFormat, RgbaImage};
use serde::Serialize;
use std::io::Cursor;
use std::path::Path;
use tiny_skia::{FillRule, Mask, Paint, Path as SkPath, PathBuilder, Pixmap, Rect, Stroke};

use super::font;
use crate::error::{ChoroplethError, Result};
use crate::table::{Bounds, Coord};

/// Default image dimensions
pub const DEFAULT_WIDTH: u32 = 800;
pub const DEFAULT_HEIGHT: u32 = 600;

/// Default resolution, used to convert line widths from points to pixels
pub const DEFAULT_DPI: f64 = 100.0;

/// Fraction of the data extent added on each side
const MARGIN: f64 = 0.05;

/// Legend geometry in pixels
const SWATCH_SIZE: f32 = 14.0;
const SWATCH_GAP: f32 = 6.0;
const ROW_GAP: f32 = 4.0;
const LEGEND_PADDING: f32 = 8.0;

/// Legend label size in points
const LEGEND_FONT_POINTS: f64 = 9.0;

const LABEL_COLOR: [u8; 4] = [0, 0, 0, 255];

/// A point in fractional pixel coordinates
pub type PixelPoint = (f64, f64);

/// One legend row: category label and its fill color
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    pub label: String,
    pub color: [u8; 4],
}

/// Maps world coordinates to pixel coordinates with equal aspect ratio,
/// y pointing up in world space and down in pixel space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    center_x: f64,
    center_y: f64,
    scale: f64,
    offset_x: f64,
    offset_y: f64,
    height: f64,
}

impl Transform {
    /// Fit `bounds` (plus a margin) into a `width` x `height` pixel area,
    /// centered
    pub fn fit(bounds: Bounds, width: u32, height: u32) -> Self {
        let (w, h) = (width as f64, height as f64);

        // A single point or a perfectly flat extent still needs a scale
        let span_x = bounds.width();
        let span_y = bounds.height();
        let span = span_x.max(span_y);
        let (span_x, span_y) = if span > 0.0 {
            (span_x.max(span * 1e-6), span_y.max(span * 1e-6))
        } else {
            (1.0, 1.0)
        };

        let padded_x = span_x * (1.0 + 2.0 * MARGIN);
        let padded_y = span_y * (1.0 + 2.0 * MARGIN);
        let scale = (w / padded_x).min(h / padded_y);

        let center_x = (bounds.min_x + bounds.max_x) / 2.0;
        let center_y = (bounds.min_y + bounds.max_y) / 2.0;

        Self {
            center_x,
            center_y,
            scale,
            offset_x: w / 2.0,
            offset_y: h / 2.0,
            height: h,
        }
    }

    /// Convert a world coordinate to fractional pixel coordinates
    pub fn to_pixel(&self, c: Coord) -> (f64, f64) {
        let px = (c[0] - self.center_x) * self.scale + self.offset_x;
        let py = self.height - ((c[1] - self.center_y) * self.scale + self.offset_y);
        (px, py)
    }
}

/// The drawing surface returned by plotting routines
#[derive(Debug, Clone)]
pub struct Canvas {
    pixmap: Pixmap,
    dpi: f64,
    transform: Option<Transform>,
    legend: Option<Vec<LegendEntry>>,
}

impl Canvas {
    /// Create a blank white canvas
    pub fn new(width: u32, height: u32, dpi: f64) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(ChoroplethError::InvalidParameter {
                param: "size".to_string(),
                message: format!("Canvas size must be non-zero, got {}x{}", width, height),
            });
        }
        if !(dpi.is_finite() && dpi > 0.0) {
            return Err(ChoroplethError::InvalidParameter {
                param: "dpi".to_string(),
                message: format!("DPI must be positive, got {}", dpi),
            });
        }

        let mut pixmap = Pixmap::new(width, height).ok_or_else(|| {
            ChoroplethError::InvalidParameter {
                param: "size".to_string(),
                message: format!("Canvas of {}x{} pixels is too large", width, height),
            }
        })?;
        pixmap.fill(tiny_skia::Color::WHITE);

        Ok(Self {
            pixmap,
            dpi,
            transform: None,
            legend: None,
        })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    pub fn dpi(&self) -> f64 {
        self.dpi
    }

    /// Straight-alpha RGBA color of one pixel
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.pixmap.pixel(x, y).map(|p| {
            let c = p.demultiply();
            [c.red(), c.green(), c.blue(), c.alpha()]
        })
    }

    /// Copy of the pixels as an `image` buffer
    pub fn to_image(&self) -> RgbaImage {
        RgbaImage::from_fn(self.width(), self.height(), |x, y| {
            image::Rgba(self.pixel(x, y).unwrap_or([0, 0, 0, 0]))
        })
    }

    /// Legend entries recorded by the last plot that drew a legend
    pub fn legend(&self) -> Option<&[LegendEntry]> {
        self.legend.as_deref()
    }

    /// Current world-to-pixel transform, if anything has been plotted
    pub fn transform(&self) -> Option<Transform> {
        self.transform
    }

    /// Return the canvas transform, fitting it to `bounds` on first use
    pub fn fit(&mut self, bounds: Bounds) -> Transform {
        let (width, height) = (self.width(), self.height());
        *self
            .transform
            .get_or_insert_with(|| Transform::fit(bounds, width, height))
    }

    /// Convert a length in points to pixels
    pub fn points_to_pixels(&self, points: f64) -> f64 {
        points * self.dpi / 72.0
    }

    /// Fill the area enclosed by `rings` with the even-odd rule, which
    /// leaves holes unfilled
    pub fn fill_rings(&mut self, rings: &[Vec<PixelPoint>], color: [u8; 4], alpha: f64) {
        if !self.touches(rings.iter().flatten(), 0.0) {
            return;
        }
        if let Some(path) = polyline_path(rings.iter().map(Vec::as_slice), true) {
            self.pixmap.fill_path(
                &path,
                &paint(color, alpha),
                FillRule::EvenOdd,
                tiny_skia::Transform::identity(),
                None,
            );
        }
    }

    /// Stroke a polyline `width` pixels wide. Widths under one pixel are
    /// drawn as hairlines with proportionally reduced coverage.
    pub fn stroke_polyline(
        &mut self,
        points: &[PixelPoint],
        closed: bool,
        color: [u8; 4],
        alpha: f64,
        width: f64,
    ) {
        // Zero means hairline to tiny-skia
        if !(width > 0.0) || !self.touches(points.iter(), width) {
            return;
        }
        if let Some(path) = polyline_path([points], closed) {
            let stroke = Stroke {
                width: width as f32,
                ..Stroke::default()
            };
            self.pixmap.stroke_path(
                &path,
                &paint(color, alpha),
                &stroke,
                tiny_skia::Transform::identity(),
                None,
            );
        }
    }

    /// Fill a disc of `radius` pixels
    pub fn fill_disc(&mut self, center: PixelPoint, radius: f64, color: [u8; 4], alpha: f64) {
        if !(radius > 0.0) || !self.touches(std::iter::once(&center), radius) {
            return;
        }
        let (cx, cy) = (center.0 as f32, center.1 as f32);
        if let Some(path) = PathBuilder::from_circle(cx, cy, radius as f32) {
            self.pixmap.fill_path(
                &path,
                &paint(color, alpha),
                FillRule::Winding,
                tiny_skia::Transform::identity(),
                None,
            );
        }
    }

    /// Whether the bounding box of `points`, grown by `pad`, overlaps the canvas
    fn touches<'a>(&self, points: impl Iterator<Item = &'a PixelPoint>, pad: f64) -> bool {
        let (min_x, min_y, max_x, max_y) = points
            .filter(|p| p.0.is_finite() && p.1.is_finite())
            .fold(
                (f64::INFINITY, f64::INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
                |(x0, y0, x1, y1), p| (x0.min(p.0), y0.min(p.1), x1.max(p.0), y1.max(p.1)),
            );
        min_x - pad <= self.width() as f64
            && max_x + pad >= 0.0
            && min_y - pad <= self.height() as f64
            && max_y + pad >= 0.0
    }

    /// Record legend entries and draw them in the top-right corner: a
    /// swatch per entry, with its label beside it when a font is given
    pub fn draw_legend(
        &mut self,
        entries: Vec<LegendEntry>,
        edge: [u8; 4],
        label_font: Option<&FontArc>,
    ) {
        if !entries.is_empty() {
            let text_px = self.points_to_pixels(LEGEND_FONT_POINTS) as f32;
            let (ascent, descent) =
                label_font.map_or((0.0, 0.0), |f| font::vertical_metrics(f, text_px));
            let text_w = label_font.map_or(0.0, |f| {
                entries
                    .iter()
                    .map(|e| font::text_width(f, text_px, &e.label))
                    .fold(0.0, f32::max)
            });

            let rows = entries.len() as f32;
            let row_h = SWATCH_SIZE.max((ascent - descent).ceil());
            let label_w = if text_w > 0.0 { SWATCH_GAP + text_w.ceil() } else { 0.0 };
            let box_w = 2.0 * LEGEND_PADDING + SWATCH_SIZE + label_w;
            let box_h = 2.0 * LEGEND_PADDING + rows * row_h + (rows - 1.0) * ROW_GAP;
            let left = (self.width() as f32 - box_w - LEGEND_PADDING).max(0.0);
            let top = LEGEND_PADDING;

            self.fill_rect(left, top, box_w, box_h, [255, 255, 255, 255], 0.8);

            let mut labels = label_font.and_then(|_| Mask::new(self.width(), self.height()));
            for (i, entry) in entries.iter().enumerate() {
                let row_top = top + LEGEND_PADDING + i as f32 * (row_h + ROW_GAP);
                let x = left + LEGEND_PADDING;
                let y = row_top + (row_h - SWATCH_SIZE) / 2.0;
                self.fill_rect(x, y, SWATCH_SIZE, SWATCH_SIZE, entry.color, 1.0);
                self.outline_rect(x, y, SWATCH_SIZE, SWATCH_SIZE, edge);

                if let (Some(f), Some(mask)) = (label_font, labels.as_mut()) {
                    // Center the text's ascent-to-descent span on the row
                    let baseline = row_top + row_h / 2.0 + (ascent + descent) / 2.0;
                    let text_x = x + SWATCH_SIZE + SWATCH_GAP;
                    font::rasterize(f, text_px, &entry.label, text_x, baseline, mask);
                }
            }

            let full = Rect::from_xywh(0.0, 0.0, self.width() as f32, self.height() as f32);
            if let (Some(mask), Some(full)) = (labels, full) {
                self.pixmap.fill_rect(
                    full,
                    &paint(LABEL_COLOR, 1.0),
                    tiny_skia::Transform::identity(),
                    Some(&mask),
                );
            }
        }
        self.legend = Some(entries);
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: [u8; 4], alpha: f64) {
        if let Some(rect) = Rect::from_xywh(x, y, w, h) {
            self.pixmap.fill_rect(
                rect,
                &paint(color, alpha),
                tiny_skia::Transform::identity(),
                None,
            );
        }
    }

    fn outline_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: [u8; 4]) {
        // Inset by half a pixel so the one-pixel outline lands on whole pixels
        if let Some(rect) = Rect::from_xywh(x + 0.5, y + 0.5, w - 1.0, h - 1.0) {
            let path = PathBuilder::from_rect(rect);
            self.pixmap.stroke_path(
                &path,
                &paint(color, 1.0),
                &Stroke::default(),
                tiny_skia::Transform::identity(),
                None,
            );
        }
    }

    /// Encode the canvas as `png` or `jpeg`
    pub fn encode(&self, format: &str) -> Result<Vec<u8>> {
        let mut buffer = Cursor::new(Vec::new());
        match format {
            "png" => self.to_image().write_to(&mut buffer, ImageFormat::Png)?,
            // JPEG has no alpha channel
            "jpeg" => DynamicImage::ImageRgba8(self.to_image())
                .to_rgb8()
                .write_to(&mut buffer, ImageFormat::Jpeg)?,
            other => {
                return Err(ChoroplethError::InvalidParameter {
                    param: "format".to_string(),
                    message: format!("Format must be 'png' or 'jpeg', got '{}'", other),
                })
            }
        }
        Ok(buffer.into_inner())
    }

    /// Write the canvas to `path`, choosing the format from the extension
    pub fn save(&self, path: &Path) -> Result<()> {
        let bytes = self.encode(format_for_path(path)?)?;
        std::fs::write(path, bytes)?;
        Ok(())
    }
}

/// Solid paint with `color`'s alpha scaled by `alpha`
fn paint(color: [u8; 4], alpha: f64) -> Paint<'static> {
    let mut paint = Paint::default();
    let a = (color[3] as f64 * alpha.clamp(0.0, 1.0)).round() as u8;
    paint.set_color_rgba8(color[0], color[1], color[2], a);
    paint.anti_alias = true;
    paint
}

/// One subpath per ring; non-finite points are dropped
fn polyline_path<'a>(
    rings: impl IntoIterator<Item = &'a [PixelPoint]>,
    closed: bool,
) -> Option<SkPath> {
    let mut builder = PathBuilder::new();
    for ring in rings {
        let mut points = ring.iter().filter(|p| p.0.is_finite() && p.1.is_finite());
        let Some(first) = points.next() else {
            continue;
        };
        builder.move_to(first.0 as f32, first.1 as f32);
        for p in points {
            builder.line_to(p.0 as f32, p.1 as f32);
        }
        if closed {
            builder.close();
        }
    }
    builder.finish()
}

/// Image format name for a file extension
pub fn format_for_path(path: &Path) -> Result<&'static str> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase);

    match extension.as_deref() {
        Some("png") => Ok("png"),
        Some("jpg") | Some("jpeg") => Ok("jpeg"),
        _ => Err(ChoroplethError::InvalidParameter {
            param: "output".to_string(),
            message: format!("Unsupported output extension: {}", path.display()),
        }),
    }
}
