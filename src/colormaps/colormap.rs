//! Colormap trait and utilities.
//!
//! This module defines the common interface for all colormaps.

use crate::error::{ChoroplethError, Result};

/// Trait for color mapping implementations
pub trait Colormap {
    /// Map a normalized value (0.0 to 1.0) to an RGBA color
    fn map_normalized(&self, value: f64) -> [u8; 4];

    /// Map a value to an RGBA color given the data range
    fn map(&self, value: f64, min: f64, max: f64) -> [u8; 4] {
        let normalized = if max > min {
            ((value - min) / (max - min)).clamp(0.0, 1.0)
        } else {
            0.0
        };
        self.map_normalized(normalized)
    }

    /// Evenly spaced colors for `n` ordered categories
    fn categorical(&self, n: usize) -> Vec<[u8; 4]> {
        (0..n)
            .map(|i| {
                let t = if n > 1 { i as f64 / (n - 1) as f64 } else { 0.0 };
                self.map_normalized(t)
            })
            .collect()
    }

    /// Get the name of this colormap
    fn name(&self) -> &str;
}

/// Colormap backed by a `colorgrad` gradient
pub struct GradientColormap {
    name: String,
    gradient: colorgrad::Gradient,
    reversed: bool,
}

impl GradientColormap {
    pub fn new(name: impl Into<String>, gradient: colorgrad::Gradient, reversed: bool) -> Self {
        Self {
            name: name.into(),
            gradient,
            reversed,
        }
    }
}

impl Colormap for GradientColormap {
    fn map_normalized(&self, value: f64) -> [u8; 4] {
        let t = value.clamp(0.0, 1.0);
        let t = if self.reversed { 1.0 - t } else { t };
        let (min, max) = self.gradient.domain();
        self.gradient.at(min + t * (max - min)).to_rgba8()
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Get a colormap by its matplotlib name, ignoring case.
///
/// A `_r` suffix selects the reversed map.
pub fn get_colormap(name: &str) -> Result<Box<dyn Colormap>> {
    let lower = name.to_lowercase();
    let (base, reversed) = match lower.strip_suffix("_r") {
        Some(base) => (base, true),
        None => (lower.as_str(), false),
    };

    match super::presets::gradient(base) {
        Some(gradient) => Ok(Box::new(GradientColormap::new(name, gradient, reversed))),
        None => Err(ChoroplethError::InvalidParameter {
            param: "colormap".to_string(),
            message: format!("Unknown colormap: {}", name),
        }),
    }
}

/// Parse a CSS color (name, hex, or functional notation) into RGBA
pub fn parse_color(param: &str, value: &str) -> Result<[u8; 4]> {
    colorgrad::Color::from_html(value)
        .map(|c| c.to_rgba8())
        .map_err(|e| ChoroplethError::InvalidParameter {
            param: param.to_string(),
            message: format!("Invalid color '{}': {}", value, e),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_colormap_case_insensitive() {
        let upper = get_colormap("BuGn").unwrap();
        let lower = get_colormap("bugn").unwrap();
        assert_eq!(upper.map_normalized(0.3), lower.map_normalized(0.3));
        assert_eq!(upper.name(), "BuGn");
    }

    #[test]
    fn test_reversed_colormap() {
        let forward = get_colormap("viridis").unwrap();
        let reversed = get_colormap("viridis_r").unwrap();
        assert_eq!(forward.map_normalized(0.0), reversed.map_normalized(1.0));
        assert_eq!(forward.map_normalized(1.0), reversed.map_normalized(0.0));
    }

    #[test]
    fn test_unknown_colormap() {
        assert!(matches!(
            get_colormap("not_a_map"),
            Err(ChoroplethError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_categorical_spans_the_map() {
        let cmap = get_colormap("Greys").unwrap();
        let colors = cmap.categorical(3);
        assert_eq!(colors.len(), 3);
        assert_eq!(colors[0], cmap.map_normalized(0.0));
        assert_eq!(colors[2], cmap.map_normalized(1.0));
        assert_eq!(cmap.categorical(1), vec![cmap.map_normalized(0.0)]);
    }

    #[test]
    fn test_map_degenerate_range() {
        let cmap = get_colormap("Blues").unwrap();
        assert_eq!(cmap.map(5.0, 5.0, 5.0), cmap.map_normalized(0.0));
        assert_eq!(cmap.map(20.0, 0.0, 10.0), cmap.map_normalized(1.0));
    }

    #[test]
    fn test_parse_color() {
        assert_eq!(parse_color("edgecolor", "black").unwrap(), [0, 0, 0, 255]);
        assert_eq!(parse_color("edgecolor", "#ff0000").unwrap(), [255, 0, 0, 255]);
        assert!(parse_color("edgecolor", "nope").is_err());
    }
}
