//! Test data generation utilities.
//!
//! Builds GeoJSON FeatureCollections with known layouts so tests can find
//! each feature's pixels on the rendered canvas.

use serde_json::{json, Value};
use std::path::Path;

/// Side length of every generated square
pub const SQUARE_SIZE: f64 = 1.0;

/// Horizontal distance between neighbouring squares
pub const SQUARE_STRIDE: f64 = 2.0;

/// Closed ring of an axis-aligned square with its lower-left corner at `(x, y)`
pub fn square_ring(x: f64, y: f64, size: f64) -> Value {
    json!([
        [x, y],
        [x + size, y],
        [x + size, y + size],
        [x, y + size],
        [x, y]
    ])
}

/// A row of unit squares, one per value, carrying the value as `value`
/// and the row index as `id`
pub fn square_row_geojson(values: &[f64]) -> String {
    sized_square_row_geojson(values, SQUARE_SIZE, SQUARE_STRIDE)
}

/// Like [`square_row_geojson`] with a custom square size and spacing
pub fn sized_square_row_geojson(values: &[f64], size: f64, stride: f64) -> String {
    let features: Vec<Value> = values
        .iter()
        .enumerate()
        .map(|(i, v)| {
            json!({
                "type": "Feature",
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [square_ring(i as f64 * stride, 0.0, size)]
                },
                "properties": {"id": i, "value": v, "name": format!("region-{}", i)}
            })
        })
        .collect();

    json!({"type": "FeatureCollection", "features": features}).to_string()
}

/// World coordinate of the center of square `i` from [`square_row_geojson`]
pub fn square_center(i: usize) -> [f64; 2] {
    [
        i as f64 * SQUARE_STRIDE + SQUARE_SIZE / 2.0,
        SQUARE_SIZE / 2.0,
    ]
}

/// A polygon with a hole, a multipolygon, a line and a point
pub fn mixed_geometry_geojson() -> String {
    json!({
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [square_ring(0.0, 0.0, 6.0), square_ring(2.0, 2.0, 2.0)]
                },
                "properties": {"value": 1.0}
            },
            {
                "type": "Feature",
                "geometry": {
                    "type": "MultiPolygon",
                    "coordinates": [[square_ring(8.0, 0.0, 2.0)], [square_ring(8.0, 4.0, 2.0)]]
                },
                "properties": {"value": 5.0}
            },
            {
                "type": "Feature",
                "geometry": {"type": "LineString", "coordinates": [[12.0, 0.0], [12.0, 6.0]]},
                "properties": {"value": 9.0}
            },
            {
                "type": "Feature",
                "geometry": {"type": "Point", "coordinates": [14.0, 3.0]},
                "properties": {"value": 13.0}
            }
        ]
    })
    .to_string()
}

/// Write GeoJSON text to `path`
pub fn write_geojson(path: &Path, content: &str) -> std::io::Result<()> {
    std::fs::write(path, content)
}
