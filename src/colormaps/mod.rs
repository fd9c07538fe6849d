//! Colormap implementations for choropleth rendering.
//!
//! Colormaps are resolved by their matplotlib names and backed by the
//! `colorgrad` presets.

pub mod colormap;
pub mod presets;

pub use colormap::{get_colormap, parse_color, Colormap, GradientColormap};
