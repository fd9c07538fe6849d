//! Configuration management for choropleth.
//!
//! This module handles the layered configuration system with the following precedence:
//! 1. Command-line arguments (highest priority)
//! 2. Environment variables
//! 3. JSON config file
//! 4. Default values (lowest priority)

use clap::{CommandFactory, FromArgMatches, Parser};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::classify::scheme_keys;
use crate::colormaps::presets::PRESET_NAMES;
use crate::error::{ChoroplethError, Result};
use crate::plot::{canvas::format_for_path, PlotStyle, DEFAULT_DPI, DEFAULT_HEIGHT, DEFAULT_WIDTH};

/// Command-line arguments for choropleth
#[derive(Parser, Debug)]
#[command(name = "choropleth")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the GeoJSON file to map
    pub input: PathBuf,

    /// Numeric property to classify
    #[arg(long, env = "CHOROPLETH_COLUMN")]
    pub column: Option<String>,

    /// Classification scheme (quantiles, equal_interval, maximum_breaks, fisher_jenks)
    #[arg(short, long, env = "CHOROPLETH_SCHEME")]
    pub scheme: Option<String>,

    /// Number of classes
    #[arg(short, env = "CHOROPLETH_K")]
    pub k: Option<usize>,

    /// Colormap name (e.g. BuGn, viridis, YlOrRd_r)
    #[arg(long = "cmap", env = "CHOROPLETH_CMAP")]
    pub colormap: Option<String>,

    /// Request a legend
    #[arg(long)]
    pub legend: bool,

    /// Polygon outline color
    #[arg(long = "edgecolor")]
    pub edge_color: Option<String>,

    /// Outline width in points
    #[arg(long = "linewidth")]
    pub line_width: Option<f64>,

    /// Fill and outline opacity
    #[arg(long)]
    pub alpha: Option<f64>,

    /// Truncate class labels to integers
    #[arg(long)]
    pub label_int: bool,

    /// Font file for legend labels (defaults to a system font)
    #[arg(long, env = "CHOROPLETH_FONT")]
    pub font: Option<PathBuf>,

    /// Image width in pixels
    #[arg(long, env = "CHOROPLETH_WIDTH")]
    pub width: Option<u32>,

    /// Image height in pixels
    #[arg(long, env = "CHOROPLETH_HEIGHT")]
    pub height: Option<u32>,

    /// Resolution used to convert line widths from points
    #[arg(long, env = "CHOROPLETH_DPI")]
    pub dpi: Option<f64>,

    /// Output image path (.png, .jpg or .jpeg)
    #[arg(short, long, env = "CHOROPLETH_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Path to JSON configuration file
    #[arg(short, long, env = "CHOROPLETH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "CHOROPLETH_LOG_LEVEL")]
    pub log_level: Option<String>,
}

/// Output canvas configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasConfig {
    /// Image width in pixels
    #[serde(default = "default_width")]
    pub width: u32,

    /// Image height in pixels
    #[serde(default = "default_height")]
    pub height: u32,

    /// Dots per inch
    #[serde(default = "default_dpi")]
    pub dpi: f64,

    /// Output image path
    #[serde(default = "default_output")]
    pub output: PathBuf,
}

/// Classification configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationConfig {
    /// Column to classify
    #[serde(default)]
    pub column: Option<String>,

    /// Scheme name, resolved case-insensitively at render time
    #[serde(default = "default_scheme")]
    pub scheme: String,

    /// Requested number of classes
    #[serde(default = "default_k")]
    pub k: usize,

    /// Truncate labels to integers
    #[serde(default)]
    pub label_int: bool,
}

/// Complete configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Canvas configuration
    #[serde(default)]
    pub canvas: CanvasConfig,

    /// Classification configuration
    #[serde(default)]
    pub classification: ClassificationConfig,

    /// Plot styling
    #[serde(default)]
    pub style: PlotStyle,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Config {
    /// Load configuration from all sources with proper precedence.
    ///
    /// Returns the configuration and the input GeoJSON path.
    pub fn load() -> Result<(Self, PathBuf)> {
        let matches = command().get_matches();
        let args = Args::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());
        Self::from_args(args)
    }

    /// Build configuration from already-parsed arguments
    pub fn from_args(args: Args) -> Result<(Self, PathBuf)> {
        // Start with defaults
        let mut config = Config::default();

        // Load from JSON file if provided
        if let Some(config_path) = &args.config {
            config = Self::load_from_file(config_path)?;
        }

        // Override with command-line arguments and environment variables
        config.apply_args(&args);

        Ok((config, args.input))
    }

    /// Load configuration from a JSON file
    fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Apply explicitly given arguments on top of this config
    fn apply_args(&mut self, args: &Args) {
        if let Some(column) = &args.column {
            self.classification.column = Some(column.clone());
        }
        if let Some(scheme) = &args.scheme {
            self.classification.scheme = scheme.clone();
        }
        if let Some(k) = args.k {
            self.classification.k = k;
        }
        if args.label_int {
            self.classification.label_int = true;
        }

        if let Some(colormap) = &args.colormap {
            self.style.colormap = colormap.clone();
        }
        if args.legend {
            self.style.legend = true;
        }
        if let Some(edge_color) = &args.edge_color {
            self.style.edge_color = edge_color.clone();
        }
        if let Some(line_width) = args.line_width {
            self.style.line_width = line_width;
        }
        if let Some(alpha) = args.alpha {
            self.style.alpha = alpha;
        }
        if let Some(font) = &args.font {
            self.style.font = Some(font.clone());
        }

        if let Some(width) = args.width {
            self.canvas.width = width;
        }
        if let Some(height) = args.height {
            self.canvas.height = height;
        }
        if let Some(dpi) = args.dpi {
            self.canvas.dpi = dpi;
        }
        if let Some(output) = &args.output {
            self.canvas.output = output.clone();
        }

        if let Some(log_level) = &args.log_level {
            self.log_level = log_level.clone();
        }
    }

    /// Column to classify, or an error if none was configured
    pub fn column(&self) -> Result<&str> {
        match self.classification.column.as_deref() {
            Some(column) if !column.is_empty() => Ok(column),
            _ => Err(ChoroplethError::Config {
                message: "No column given; use --column or set classification.column".to_string(),
            }),
        }
    }

    /// Validate the configuration.
    ///
    /// Scheme, class count and style values are left to the classifier
    /// and plotter, which report their own errors.
    pub fn validate(&self) -> Result<()> {
        self.column()?;

        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(ChoroplethError::Config {
                message: format!(
                    "Canvas size must be non-zero, got {}x{}",
                    self.canvas.width, self.canvas.height
                ),
            });
        }

        if !(self.canvas.dpi.is_finite() && self.canvas.dpi > 0.0) {
            return Err(ChoroplethError::Config {
                message: format!("DPI must be positive, got {}", self.canvas.dpi),
            });
        }

        format_for_path(&self.canvas.output).map_err(|e| ChoroplethError::Config {
            message: e.to_string(),
        })?;

        // Validate log level
        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(ChoroplethError::Config {
                    message: format!(
                        "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
                        self.log_level
                    ),
                });
            }
        }

        Ok(())
    }
}

/// Argument parser with the accepted scheme and colormap names appended
/// to the help text
pub fn command() -> clap::Command {
    Args::command().after_help(format!(
        "Schemes (any casing): {}\nColormaps (append _r to reverse): {}",
        scheme_keys().join(", "),
        PRESET_NAMES.join(", ")
    ))
}

impl Default for Config {
    fn default() -> Self {
        Self {
            canvas: CanvasConfig::default(),
            classification: ClassificationConfig::default(),
            style: PlotStyle::default(),
            log_level: default_log_level(),
        }
    }
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            dpi: default_dpi(),
            output: default_output(),
        }
    }
}

impl Default for ClassificationConfig {
    fn default() -> Self {
        Self {
            column: None,
            scheme: default_scheme(),
            k: default_k(),
            label_int: false,
        }
    }
}

// Default value functions for serde
fn default_width() -> u32 {
    DEFAULT_WIDTH
}

fn default_height() -> u32 {
    DEFAULT_HEIGHT
}

fn default_dpi() -> f64 {
    DEFAULT_DPI
}

fn default_output() -> PathBuf {
    PathBuf::from("map.png")
}

fn default_scheme() -> String {
    "Quantiles".to_string()
}

fn default_k() -> usize {
    5
}

fn default_log_level() -> String {
    "info".to_string()
}
