//! Geometry-bearing tables.
//!
//! A [`GeoTable`] holds one geometry per row plus any number of named
//! columns of the same length. Tables are treated as values: deriving a
//! styled copy goes through [`GeoTable::assign`], which never touches the
//! source table.

use ndarray::{Array1, ArrayView1};
use serde::Serialize;
use std::fmt;

use crate::error::{ChoroplethError, Result};

/// A planar coordinate pair (x = longitude, y = latitude)
pub type Coord = [f64; 2];

/// A closed ring of coordinates
pub type Ring = Vec<Coord>;

/// Supported feature geometries
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    /// Single position
    Point(Coord),
    /// Open polyline
    LineString(Vec<Coord>),
    /// Outer ring followed by zero or more holes
    Polygon(Vec<Ring>),
    /// Several polygons sharing one row
    MultiPolygon(Vec<Vec<Ring>>),
}

impl Geometry {
    /// Iterate over every coordinate of the geometry
    pub fn coords(&self) -> Box<dyn Iterator<Item = &Coord> + '_> {
        match self {
            Geometry::Point(c) => Box::new(std::iter::once(c)),
            Geometry::LineString(line) => Box::new(line.iter()),
            Geometry::Polygon(rings) => Box::new(rings.iter().flatten()),
            Geometry::MultiPolygon(polys) => Box::new(polys.iter().flatten().flatten()),
        }
    }

    /// Bounding box of the geometry, `None` if it has no coordinates
    pub fn bounds(&self) -> Option<Bounds> {
        self.coords().fold(None, |acc, c| {
            let point = Bounds::point(*c);
            Some(match acc {
                Some(b) => b.union(&point),
                None => point,
            })
        })
    }

    /// Short type name used in logs and error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Geometry::Point(_) => "Point",
            Geometry::LineString(_) => "LineString",
            Geometry::Polygon(_) => "Polygon",
            Geometry::MultiPolygon(_) => "MultiPolygon",
        }
    }
}

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    /// Degenerate bounds around a single coordinate
    pub fn point(c: Coord) -> Self {
        Self {
            min_x: c[0],
            min_y: c[1],
            max_x: c[0],
            max_y: c[1],
        }
    }

    /// Smallest box containing both boxes
    pub fn union(&self, other: &Bounds) -> Bounds {
        Bounds {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// A class label attached to a row by the choropleth renderer.
///
/// Labels are the upper bound of the row's class, optionally truncated
/// to an integer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ClassLabel {
    Float(f64),
    Int(i64),
}

impl ClassLabel {
    /// Numeric value of the label
    pub fn value(&self) -> f64 {
        match self {
            ClassLabel::Float(v) => *v,
            ClassLabel::Int(v) => *v as f64,
        }
    }

    /// Total ordering by numeric value
    pub fn total_cmp(&self, other: &ClassLabel) -> std::cmp::Ordering {
        self.value().total_cmp(&other.value())
    }
}

impl fmt::Display for ClassLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Debug keeps the trailing ".0" so float labels read as floats
            ClassLabel::Float(v) => write!(f, "{:?}", v),
            ClassLabel::Int(v) => write!(f, "{}", v),
        }
    }
}

/// A named column of a [`GeoTable`]
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    /// Numeric attribute, NaN marks a missing value
    Numeric(Array1<f64>),
    /// Free text attribute
    Text(Vec<String>),
    /// Categorical class labels
    Labels(Vec<ClassLabel>),
}

impl Column {
    /// Number of rows in the column
    pub fn len(&self) -> usize {
        match self {
            Column::Numeric(values) => values.len(),
            Column::Text(values) => values.len(),
            Column::Labels(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Kind of column as a string
    pub fn kind(&self) -> &'static str {
        match self {
            Column::Numeric(_) => "numeric",
            Column::Text(_) => "text",
            Column::Labels(_) => "labels",
        }
    }
}

/// Rows of geometries with named attribute columns
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeoTable {
    geometries: Vec<Geometry>,
    columns: Vec<(String, Column)>,
}

impl GeoTable {
    /// Create a table with the given geometries and no attribute columns
    pub fn new(geometries: Vec<Geometry>) -> Self {
        Self {
            geometries,
            columns: Vec::new(),
        }
    }

    /// Builder-style variant of [`GeoTable::assign`] that consumes the table
    pub fn with_column(mut self, name: impl Into<String>, column: Column) -> Result<Self> {
        self.set_column(name.into(), column)?;
        Ok(self)
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.geometries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.geometries.is_empty()
    }

    /// Row geometries in table order
    pub fn geometries(&self) -> &[Geometry] {
        &self.geometries
    }

    /// Column names in insertion order
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }

    /// Get a column by name
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, column)| column)
    }

    /// Get a column by name with error handling
    pub fn column_checked(&self, name: &str) -> Result<&Column> {
        self.column(name).ok_or_else(|| ChoroplethError::MissingField {
            column: name.to_string(),
        })
    }

    /// View a column as numbers.
    ///
    /// Label columns are not accepted: they are produced by the renderer,
    /// not attributes to classify.
    pub fn numeric_column(&self, name: &str) -> Result<ArrayView1<'_, f64>> {
        match self.column_checked(name)? {
            Column::Numeric(values) => Ok(values.view()),
            _ => Err(ChoroplethError::NonNumericColumn {
                column: name.to_string(),
            }),
        }
    }

    /// Return a copy of the table with `column` added under `name`,
    /// replacing any existing column of the same name.
    pub fn assign(&self, name: impl Into<String>, column: Column) -> Result<GeoTable> {
        let mut derived = self.clone();
        derived.set_column(name.into(), column)?;
        Ok(derived)
    }

    /// Bounding box of all geometries
    pub fn bounds(&self) -> Option<Bounds> {
        self.geometries
            .iter()
            .filter_map(Geometry::bounds)
            .reduce(|a, b| a.union(&b))
    }

    fn set_column(&mut self, name: String, column: Column) -> Result<()> {
        if column.len() != self.len() {
            return Err(ChoroplethError::LengthMismatch {
                column: name,
                expected: self.len(),
                actual: column.len(),
            });
        }

        match self.columns.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = column,
            None => self.columns.push((name, column)),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn square(x: f64, y: f64) -> Geometry {
        Geometry::Polygon(vec![vec![
            [x, y],
            [x + 1.0, y],
            [x + 1.0, y + 1.0],
            [x, y + 1.0],
            [x, y],
        ]])
    }

    fn sample_table() -> GeoTable {
        GeoTable::new(vec![square(0.0, 0.0), square(2.0, 3.0)])
            .with_column("pop", Column::Numeric(array![10.0, 20.0]))
            .unwrap()
            .with_column("name", Column::Text(vec!["a".into(), "b".into()]))
            .unwrap()
    }

    #[test]
    fn test_bounds_cover_all_rows() {
        let table = sample_table();
        let bounds = table.bounds().unwrap();
        assert_eq!(bounds.min_x, 0.0);
        assert_eq!(bounds.min_y, 0.0);
        assert_eq!(bounds.max_x, 3.0);
        assert_eq!(bounds.max_y, 4.0);
        assert!(GeoTable::default().bounds().is_none());
    }

    #[test]
    fn test_numeric_column_lookup() {
        let table = sample_table();
        assert_eq!(table.numeric_column("pop").unwrap().to_vec(), vec![10.0, 20.0]);

        assert!(matches!(
            table.numeric_column("missing"),
            Err(ChoroplethError::MissingField { .. })
        ));
        assert!(matches!(
            table.numeric_column("name"),
            Err(ChoroplethError::NonNumericColumn { .. })
        ));
    }

    #[test]
    fn test_assign_leaves_source_untouched() {
        let table = sample_table();
        let labels = Column::Labels(vec![ClassLabel::Int(1), ClassLabel::Int(2)]);
        let derived = table.assign("cl", labels.clone()).unwrap();

        assert!(table.column("cl").is_none());
        assert_eq!(derived.column("cl"), Some(&labels));
        assert_eq!(
            derived.column_names().collect::<Vec<_>>(),
            vec!["pop", "name", "cl"]
        );
    }

    #[test]
    fn test_assign_replaces_and_checks_length() {
        let table = sample_table();
        let replaced = table
            .assign("pop", Column::Numeric(array![1.0, 2.0]))
            .unwrap();
        assert_eq!(replaced.numeric_column("pop").unwrap().to_vec(), vec![1.0, 2.0]);
        assert_eq!(replaced.column_names().count(), 2);

        let err = table
            .assign("cl", Column::Labels(vec![ClassLabel::Int(1)]))
            .unwrap_err();
        assert!(matches!(
            err,
            ChoroplethError::LengthMismatch {
                expected: 2,
                actual: 1,
                ..
            }
        ));
    }

    #[test]
    fn test_label_display() {
        assert_eq!(ClassLabel::Float(100.0).to_string(), "100.0");
        assert_eq!(ClassLabel::Float(2.5).to_string(), "2.5");
        assert_eq!(ClassLabel::Int(100).to_string(), "100");
    }
}
