//! Plotting of geometry tables.
//!
//! The [`Plotter`] trait is the seam between the choropleth renderer and
//! whatever draws the map. [`RasterPlotter`] draws onto a raster
//! [`Canvas`]; tests can substitute their own implementation.

pub mod canvas;
pub mod font;
pub mod plotter;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::Result;
use crate::table::GeoTable;

pub use canvas::{
    Canvas, LegendEntry, PixelPoint, Transform, DEFAULT_DPI, DEFAULT_HEIGHT, DEFAULT_WIDTH,
};
pub use plotter::RasterPlotter;

/// Styling options forwarded to the plotter.
///
/// Every option is explicit here rather than inherited from plotter
/// defaults, so the rendered output only changes when these values do.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotStyle {
    /// Colormap name (matplotlib naming, `_r` suffix reverses)
    #[serde(default = "default_colormap")]
    pub colormap: String,

    /// Draw a legend of the plotted categories
    #[serde(default)]
    pub legend: bool,

    /// Polygon outline color (CSS color syntax)
    #[serde(default = "default_edge_color")]
    pub edge_color: String,

    /// Outline and line width in points
    #[serde(default = "default_line_width")]
    pub line_width: f64,

    /// Opacity of fills and outlines, in `[0, 1]`
    #[serde(default = "default_alpha")]
    pub alpha: f64,

    /// Radius of point markers in pixels
    #[serde(default = "default_point_radius")]
    pub point_radius: f64,

    /// Font file for legend labels; a system font is used when unset
    #[serde(default)]
    pub font: Option<PathBuf>,
}

impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            colormap: default_colormap(),
            legend: false,
            edge_color: default_edge_color(),
            line_width: default_line_width(),
            alpha: default_alpha(),
            point_radius: default_point_radius(),
            font: None,
        }
    }
}

fn default_colormap() -> String {
    "BuGn".to_string()
}

fn default_edge_color() -> String {
    "black".to_string()
}

fn default_line_width() -> f64 {
    0.1
}

fn default_alpha() -> f64 {
    0.75
}

fn default_point_radius() -> f64 {
    3.0
}

/// Something that can draw a table onto a canvas
pub trait Plotter {
    /// Plot `table`, colored by `column`.
    ///
    /// With `categorical` set, each distinct column value is one category
    /// and gets its own evenly spaced colormap color. Draws onto `target`
    /// when given, otherwise onto a fresh canvas, and returns the canvas.
    fn plot(
        &self,
        table: &GeoTable,
        column: &str,
        categorical: bool,
        style: &PlotStyle,
        target: Option<Canvas>,
    ) -> Result<Canvas>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_style() {
        let style = PlotStyle::default();
        assert_eq!(style.colormap, "BuGn");
        assert!(!style.legend);
        assert_eq!(style.edge_color, "black");
        assert_eq!(style.line_width, 0.1);
        assert_eq!(style.alpha, 0.75);
        assert!(style.font.is_none());
    }

    #[test]
    fn test_style_from_partial_json() {
        let style: PlotStyle =
            serde_json::from_str(r#"{"colormap": "Reds", "alpha": 1.0}"#).unwrap();
        assert_eq!(style.colormap, "Reds");
        assert_eq!(style.alpha, 1.0);
        assert_eq!(style.edge_color, "black");
    }
}
