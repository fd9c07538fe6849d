//! Error types for the choropleth crate.
//!
//! A single error enum covers every failure the crate can surface. Nothing
//! is recovered locally: classifier, table and plotter errors all travel
//! unchanged to the caller of [`crate::choropleth`].

use thiserror::Error;

/// The main error type for choropleth operations.
#[derive(Error, Debug)]
pub enum ChoroplethError {
    /// Scheme name not present in the scheme registry
    #[error("Unknown classification scheme: {name}")]
    UnknownScheme { name: String },

    /// Column absent from the table
    #[error("Missing field: {column}")]
    MissingField { column: String },

    /// Column exists but cannot be classified
    #[error("Column '{column}' is not numeric")]
    NonNumericColumn { column: String },

    /// Degenerate input handed to a classifier
    #[error("Classification error: {message}")]
    Classification { message: String },

    /// Column length does not match the table's row count
    #[error("Length mismatch for column '{column}': expected {expected}, got {actual}")]
    LengthMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },

    /// Unsupported or malformed geometry
    #[error("Geometry error: {message}")]
    Geometry { message: String },

    /// Invalid parameter errors
    #[error("Invalid parameter: {param} - {message}")]
    InvalidParameter { param: String, message: String },

    /// Image generation errors
    #[error("Image generation error: {message}")]
    ImageGeneration { message: String },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Image encoding errors
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Convenience type alias for Results with ChoroplethError
pub type Result<T> = std::result::Result<T, ChoroplethError>;
