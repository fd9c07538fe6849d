//! # choropleth
//!
//! Choropleth map rendering for geometry tables.
//!
//! This library classifies a numeric column of a geometry table with one
//! of a fixed set of classification schemes, labels every row with the
//! upper bound of its class, and draws the table as a categorical map.
//!
//! ## Key Features
//!
//! - **Case-insensitive scheme dispatch**: Quantiles, Equal_Interval, Maximum_Breaks, Fisher_Jenks
//! - **GeoJSON input**: FeatureCollections of points, lines, polygons and multipolygons
//! - **Raster output**: PNG/JPEG canvases with matplotlib-named colormaps
//!
//! ## Architecture
//!
//! - **Data Layer**: `data_loader` reads GeoJSON into a `GeoTable`
//! - **Classification**: `classify` computes class bins and per-row bin indices
//! - **Rendering**: `renderer` builds labels and hands them to a `Plotter`

pub mod classify;
pub mod colormaps;
pub mod config;
pub mod data_loader;
pub mod error;
pub mod logging;
pub mod plot;
pub mod renderer;
pub mod table;

pub use classify::{lookup_scheme, Classification, Scheme};
pub use config::Config;
pub use error::{ChoroplethError, Result};
pub use logging::{
    generate_operation_id, init_tracing, log_error, log_operation_end, log_operation_start,
    log_timed_operation,
};
pub use plot::{Canvas, LegendEntry, PlotStyle, Plotter, RasterPlotter};
pub use renderer::{build_labels, choropleth, choropleth_with, label_plan, LabelPlan, LABEL_COLUMN};
pub use table::{ClassLabel, Column, GeoTable, Geometry};
