//! Legend label fonts.
//!
//! Labels are drawn with a TrueType font, either one given explicitly or
//! the first usable system font from a list of well-known locations.

use ab_glyph::{point, Font, FontArc, GlyphId, PxScale, ScaleFont};
use once_cell::sync::Lazy;
use std::path::Path;
use tiny_skia::Mask;
use tracing::{debug, warn};

use crate::error::{ChoroplethError, Result};

const SYSTEM_FONT_PATHS: &[&str] = &[
    // Linux
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
    "/usr/share/fonts/noto/NotoSans-Regular.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSansMono.ttf",
    // macOS
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    // Windows
    "C:\\Windows\\Fonts\\arial.ttf",
    "C:\\Windows\\Fonts\\segoeui.ttf",
];

static SYSTEM_FONT: Lazy<Option<FontArc>> = Lazy::new(|| {
    for path in SYSTEM_FONT_PATHS {
        let Ok(bytes) = std::fs::read(path) else {
            continue;
        };
        if let Ok(font) = FontArc::try_from_vec(bytes) {
            debug!(path = path, "Using system font for legend labels");
            return Some(font);
        }
    }
    warn!("No system font found; legend labels will not be drawn");
    None
});

/// First usable font from the system font locations
pub fn system_font() -> Option<FontArc> {
    SYSTEM_FONT.clone()
}

/// Load a TrueType/OpenType font file
pub fn load_font(path: &Path) -> Result<FontArc> {
    let bytes = std::fs::read(path)?;
    FontArc::try_from_vec(bytes).map_err(|e| ChoroplethError::InvalidParameter {
        param: "font".to_string(),
        message: format!("{}: {}", path.display(), e),
    })
}

/// Font for legend labels: `path` when given, else the system font
pub fn legend_font(path: Option<&Path>) -> Result<Option<FontArc>> {
    match path {
        Some(path) => load_font(path).map(Some),
        None => Ok(system_font()),
    }
}

/// Advance width of `text` in pixels
pub fn text_width(font: &FontArc, px: f32, text: &str) -> f32 {
    let scaled = font.as_scaled(PxScale::from(px));
    let mut width = 0.0;
    let mut previous: Option<GlyphId> = None;
    for ch in text.chars() {
        let id = scaled.glyph_id(ch);
        if let Some(prev) = previous {
            width += scaled.kern(prev, id);
        }
        width += scaled.h_advance(id);
        previous = Some(id);
    }
    width
}

/// Ascent and descent in pixels; descent is negative
pub fn vertical_metrics(font: &FontArc, px: f32) -> (f32, f32) {
    let scaled = font.as_scaled(PxScale::from(px));
    (scaled.ascent(), scaled.descent())
}

/// Accumulate glyph coverage for `text` into `mask`, starting at `x` on
/// the `baseline`
pub fn rasterize(font: &FontArc, px: f32, text: &str, x: f32, baseline: f32, mask: &mut Mask) {
    let scaled = font.as_scaled(PxScale::from(px));
    let (width, height) = (mask.width() as i64, mask.height() as i64);
    let data = mask.data_mut();

    let mut caret = x;
    let mut previous: Option<GlyphId> = None;
    for ch in text.chars() {
        let id = scaled.glyph_id(ch);
        if let Some(prev) = previous {
            caret += scaled.kern(prev, id);
        }
        let glyph = id.with_scale_and_position(px, point(caret, baseline));
        caret += scaled.h_advance(id);
        previous = Some(id);

        let Some(outlined) = font.outline_glyph(glyph) else {
            continue;
        };
        let bounds = outlined.px_bounds();
        outlined.draw(|gx, gy, coverage| {
            let x = bounds.min.x as i64 + gx as i64;
            let y = bounds.min.y as i64 + gy as i64;
            if x < 0 || y < 0 || x >= width || y >= height {
                return;
            }
            let cell = &mut data[(y * width + x) as usize];
            *cell = (*cell).max((coverage.clamp(0.0, 1.0) * 255.0).round() as u8);
        });
    }
}
