//! Raster implementation of [`Plotter`].

use tracing::debug;

use super::canvas::{Canvas, LegendEntry, PixelPoint, DEFAULT_DPI, DEFAULT_HEIGHT, DEFAULT_WIDTH};
use super::font::legend_font;
use super::{PlotStyle, Plotter};
use crate::colormaps::{get_colormap, parse_color, Colormap};
use crate::error::{ChoroplethError, Result};
use crate::table::{ClassLabel, Column, GeoTable, Geometry, Ring};

/// Draws tables onto raster canvases
#[derive(Debug, Clone)]
pub struct RasterPlotter {
    /// Size of canvases created when no target is given
    pub width: u32,
    pub height: u32,
    pub dpi: f64,
}

impl Default for RasterPlotter {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            dpi: DEFAULT_DPI,
        }
    }
}

impl RasterPlotter {
    pub fn new(width: u32, height: u32, dpi: f64) -> Self {
        Self { width, height, dpi }
    }
}

impl Plotter for RasterPlotter {
    fn plot(
        &self,
        table: &GeoTable,
        column: &str,
        categorical: bool,
        style: &PlotStyle,
        target: Option<Canvas>,
    ) -> Result<Canvas> {
        if !(0.0..=1.0).contains(&style.alpha) {
            return Err(ChoroplethError::InvalidParameter {
                param: "alpha".to_string(),
                message: format!("alpha ({}) is outside 0-1 range", style.alpha),
            });
        }
        let colormap = get_colormap(&style.colormap)?;
        let edge = parse_color("edgecolor", &style.edge_color)?;
        let values = table.column_checked(column)?;

        let (colors, legend) = if categorical {
            let (codes, categories) = categorize(values);
            let palette = colormap.categorical(categories.len());
            let colors = codes
                .iter()
                .map(|code| code.map(|c| palette[c]))
                .collect::<Vec<_>>();
            let legend = categories
                .into_iter()
                .zip(palette)
                .map(|(label, color)| LegendEntry { label, color })
                .collect::<Vec<_>>();
            (colors, Some(legend))
        } else {
            (continuous_colors(column, values, colormap.as_ref())?, None)
        };

        let mut canvas = match target {
            Some(canvas) => canvas,
            None => Canvas::new(self.width, self.height, self.dpi)?,
        };

        let Some(bounds) = table.bounds() else {
            debug!(column = column, "Nothing to draw: table has no coordinates");
            return Ok(canvas);
        };
        let transform = canvas.fit(bounds);
        let line_px = canvas.points_to_pixels(style.line_width);

        let mut drawn = 0usize;
        for (geometry, color) in table.geometries().iter().zip(&colors) {
            let Some(color) = *color else { continue };
            let project = |ring: &Ring| -> Vec<PixelPoint> {
                ring.iter().map(|c| transform.to_pixel(*c)).collect()
            };

            match geometry {
                Geometry::Point(c) => {
                    let center = transform.to_pixel(*c);
                    canvas.fill_disc(center, style.point_radius, color, style.alpha);
                }
                Geometry::LineString(line) => {
                    let points = project(line);
                    canvas.stroke_polyline(&points, false, color, style.alpha, line_px);
                }
                Geometry::Polygon(rings) => {
                    let projected: Vec<_> = rings.iter().map(&project).collect();
                    draw_polygon(&mut canvas, &projected, color, edge, style.alpha, line_px);
                }
                Geometry::MultiPolygon(polygons) => {
                    for rings in polygons {
                        let projected: Vec<_> = rings.iter().map(&project).collect();
                        draw_polygon(&mut canvas, &projected, color, edge, style.alpha, line_px);
                    }
                }
            }
            drawn += 1;
        }

        debug!(
            column = column,
            categorical = categorical,
            rows = table.len(),
            drawn = drawn,
            "Plotted table"
        );

        if style.legend {
            if let Some(entries) = legend {
                let font = legend_font(style.font.as_deref())?;
                canvas.draw_legend(entries, edge, font.as_ref());
            }
        }

        Ok(canvas)
    }
}

fn draw_polygon(
    canvas: &mut Canvas,
    rings: &[Vec<PixelPoint>],
    fill: [u8; 4],
    edge: [u8; 4],
    alpha: f64,
    line_px: f64,
) {
    canvas.fill_rings(rings, fill, alpha);
    for ring in rings {
        canvas.stroke_polyline(ring, true, edge, alpha, line_px);
    }
}

/// Category code per row plus the sorted category labels.
/// Rows without a value (NaN) get no code.
fn categorize(column: &Column) -> (Vec<Option<usize>>, Vec<String>) {
    match column {
        Column::Labels(labels) => {
            let mut categories: Vec<ClassLabel> = labels.clone();
            categories.sort_by(ClassLabel::total_cmp);
            categories.dedup_by(|a, b| a.value() == b.value());
            let codes = labels
                .iter()
                .map(|l| categories.binary_search_by(|c| c.total_cmp(l)).ok())
                .collect();
            (codes, categories.iter().map(ToString::to_string).collect())
        }
        Column::Numeric(values) => {
            let mut categories: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
            categories.sort_by(f64::total_cmp);
            categories.dedup();
            let codes = values
                .iter()
                .map(|v| categories.binary_search_by(|c| c.total_cmp(v)).ok())
                .collect();
            (codes, categories.iter().map(|v| format!("{:?}", v)).collect())
        }
        Column::Text(values) => {
            let mut categories: Vec<&String> = values.iter().collect();
            categories.sort();
            categories.dedup();
            let codes = values
                .iter()
                .map(|v| categories.binary_search(&v).ok())
                .collect();
            (codes, categories.into_iter().cloned().collect())
        }
    }
}

/// Colors for a continuous colormap spanning the column's finite range
fn continuous_colors(
    name: &str,
    column: &Column,
    colormap: &dyn Colormap,
) -> Result<Vec<Option<[u8; 4]>>> {
    let values: Vec<f64> = match column {
        Column::Numeric(values) => values.to_vec(),
        Column::Labels(labels) => labels.iter().map(ClassLabel::value).collect(),
        Column::Text(_) => {
            return Err(ChoroplethError::NonNumericColumn {
                column: name.to_string(),
            })
        }
    };

    let (min, max) = values
        .iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(*v), hi.max(*v))
        });

    Ok(values
        .iter()
        .map(|v| v.is_finite().then(|| colormap.map(*v, min, max)))
        .collect())
}
