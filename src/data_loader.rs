//! GeoJSON loading.
//!
//! Reads a GeoJSON `FeatureCollection` into a [`GeoTable`]: one row per
//! feature, one column per property key. A property becomes a numeric
//! column when every non-null value is a number, otherwise a text column.

use ndarray::Array1;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use std::path::Path;
use tracing::debug;

use crate::error::{ChoroplethError, Result};
use crate::logging::log_table_load_stats;
use crate::table::{Column, Coord, GeoTable, Geometry, Ring};

#[derive(Debug, Deserialize)]
struct FeatureCollection {
    #[serde(rename = "type")]
    kind: String,
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    geometry: Option<RawGeometry>,
    #[serde(default)]
    properties: Option<Map<String, Value>>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum RawGeometry {
    Point { coordinates: Vec<f64> },
    LineString { coordinates: Vec<Vec<f64>> },
    Polygon { coordinates: Vec<Vec<Vec<f64>>> },
    MultiPolygon { coordinates: Vec<Vec<Vec<Vec<f64>>>> },
    #[serde(other)]
    Unsupported,
}

/// Load a GeoJSON file into memory
pub fn load_geojson(path: &Path) -> Result<GeoTable> {
    if !path.exists() {
        return Err(ChoroplethError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("File not found: {}", path.display()),
        )));
    }

    let content = std::fs::read_to_string(path)?;
    let table = parse_geojson(&content)?;

    let names: Vec<&str> = table.column_names().collect();
    log_table_load_stats(&path.display().to_string(), table.len(), &names);

    Ok(table)
}

/// Parse GeoJSON text into a table
pub fn parse_geojson(content: &str) -> Result<GeoTable> {
    let collection: FeatureCollection = serde_json::from_str(content)?;
    if collection.kind != "FeatureCollection" {
        return Err(ChoroplethError::Geometry {
            message: format!("Expected a FeatureCollection, got {}", collection.kind),
        });
    }

    let mut geometries = Vec::with_capacity(collection.features.len());
    let mut properties = Vec::with_capacity(collection.features.len());

    for (index, feature) in collection.features.into_iter().enumerate() {
        let geometry = feature.geometry.ok_or_else(|| ChoroplethError::Geometry {
            message: format!("Feature {} has no geometry", index),
        })?;
        geometries.push(convert_geometry(geometry, index)?);
        properties.push(feature.properties.unwrap_or_default());
    }

    let keys: BTreeSet<&String> = properties.iter().flat_map(|p| p.keys()).collect();
    let columns: Vec<(String, Column)> = keys
        .into_iter()
        .map(|key| (key.clone(), build_column(key, &properties)))
        .collect();

    let mut table = GeoTable::new(geometries);
    for (name, column) in columns {
        debug!(column = %name, kind = column.kind(), "Loaded property column");
        table = table.with_column(name, column)?;
    }

    Ok(table)
}

fn build_column(key: &str, properties: &[Map<String, Value>]) -> Column {
    let values: Vec<Option<&Value>> = properties
        .iter()
        .map(|p| p.get(key).filter(|v| !v.is_null()))
        .collect();

    if values.iter().flatten().all(|v| v.is_number()) {
        let numbers = values
            .iter()
            .map(|v| v.and_then(Value::as_f64).unwrap_or(f64::NAN))
            .collect::<Vec<_>>();
        return Column::Numeric(Array1::from(numbers));
    }

    Column::Text(
        values
            .iter()
            .map(|v| match v {
                Some(Value::String(s)) => s.clone(),
                Some(other) => other.to_string(),
                None => String::new(),
            })
            .collect(),
    )
}

fn convert_geometry(raw: RawGeometry, index: usize) -> Result<Geometry> {
    let coord = |position: Vec<f64>| -> Result<Coord> {
        match position.as_slice() {
            [x, y, ..] => Ok([*x, *y]),
            _ => Err(ChoroplethError::Geometry {
                message: format!("Feature {} has a position with fewer than 2 values", index),
            }),
        }
    };
    let ring = |positions: Vec<Vec<f64>>| -> Result<Ring> {
        positions.into_iter().map(coord).collect()
    };
    let polygon = |rings: Vec<Vec<Vec<f64>>>| -> Result<Vec<Ring>> {
        rings.into_iter().map(ring).collect()
    };

    match raw {
        RawGeometry::Point { coordinates } => Ok(Geometry::Point(coord(coordinates)?)),
        RawGeometry::LineString { coordinates } => Ok(Geometry::LineString(ring(coordinates)?)),
        RawGeometry::Polygon { coordinates } => Ok(Geometry::Polygon(polygon(coordinates)?)),
        RawGeometry::MultiPolygon { coordinates } => Ok(Geometry::MultiPolygon(
            coordinates
                .into_iter()
                .map(polygon)
                .collect::<Result<Vec<_>>>()?,
        )),
        RawGeometry::Unsupported => Err(ChoroplethError::Geometry {
            message: format!("Feature {} has an unsupported geometry type", index),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "geometry": {"type": "Polygon", "coordinates": [[[0, 0], [1, 0], [1, 1], [0, 0]]]},
                "properties": {"name": "a", "pop": 10, "code": 1}
            },
            {
                "type": "Feature",
                "geometry": {"type": "Point", "coordinates": [5.0, 6.0, 7.0]},
                "properties": {"name": "b", "pop": null, "code": "x1"}
            },
            {
                "type": "Feature",
                "geometry": {"type": "MultiPolygon", "coordinates": [[[[2, 2], [3, 2], [3, 3], [2, 2]]]]},
                "properties": {"pop": 2.5}
            }
        ]
    }"#;

    #[test]
    fn test_parse_feature_collection() {
        let table = parse_geojson(SAMPLE).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.geometries()[1], Geometry::Point([5.0, 6.0]));
        assert_eq!(table.geometries()[2].type_name(), "MultiPolygon");
        assert_eq!(
            table.column_names().collect::<Vec<_>>(),
            vec!["code", "name", "pop"]
        );
    }

    #[test]
    fn test_property_column_kinds() {
        let table = parse_geojson(SAMPLE).unwrap();

        let pop = table.numeric_column("pop").unwrap();
        assert_eq!(pop[0], 10.0);
        assert!(pop[1].is_nan());
        assert_eq!(pop[2], 2.5);

        assert_eq!(
            table.column("name"),
            Some(&Column::Text(vec!["a".into(), "b".into(), "".into()]))
        );
        // Mixed numbers and strings fall back to text
        assert_eq!(
            table.column("code"),
            Some(&Column::Text(vec!["1".into(), "x1".into(), "".into()]))
        );
    }

    #[test]
    fn test_rejects_bad_geometry() {
        let null_geometry = r#"{"type": "FeatureCollection", "features": [
            {"type": "Feature", "geometry": null, "properties": {}}
        ]}"#;
        assert!(matches!(
            parse_geojson(null_geometry),
            Err(ChoroplethError::Geometry { .. })
        ));

        let collection = r#"{"type": "FeatureCollection", "features": [
            {"type": "Feature", "geometry": {"type": "GeometryCollection", "geometries": []}}
        ]}"#;
        assert!(matches!(
            parse_geojson(collection),
            Err(ChoroplethError::Geometry { .. })
        ));

        let short = r#"{"type": "FeatureCollection", "features": [
            {"type": "Feature", "geometry": {"type": "Point", "coordinates": [1.0]}}
        ]}"#;
        assert!(matches!(
            parse_geojson(short),
            Err(ChoroplethError::Geometry { .. })
        ));
    }

    #[test]
    fn test_rejects_non_collection() {
        let feature = r#"{"type": "Feature", "features": []}"#;
        assert!(matches!(
            parse_geojson(feature),
            Err(ChoroplethError::Geometry { .. })
        ));
        assert!(matches!(
            parse_geojson("{not json"),
            Err(ChoroplethError::Json(_))
        ));
    }

    #[test]
    fn test_load_geojson_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        let table = load_geojson(file.path()).unwrap();
        assert_eq!(table.len(), 3);

        assert!(matches!(
            load_geojson(Path::new("/definitely/not/here.geojson")),
            Err(ChoroplethError::Io(_))
        ));
    }
}
