//! Classification schemes for choropleth mapping.
//!
//! This module partitions a numeric column into ordered classes. Each
//! scheme produces the ascending upper bounds of its classes ("bins");
//! rows are then assigned to the first bin whose upper bound is not
//! below the row value.
//!
//! Schemes are looked up by name through a process-wide registry keyed by
//! the lowercase scheme name, so lookups are case-insensitive.

pub mod common;
pub mod equal_interval;
pub mod fisher_jenks;
pub mod maximum_breaks;
pub mod quantiles;

use ndarray::ArrayView1;
use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::error::{ChoroplethError, Result};

/// Trait for classification routines
pub trait Classifier: Send + Sync {
    /// Compute ascending class upper bounds for sorted, finite values.
    ///
    /// `sorted` is never empty and `k` is never zero.
    fn bins(&self, sorted: &[f64], k: usize) -> Result<Vec<f64>>;

    /// Get the name of this classifier
    fn name(&self) -> &str;
}

/// The closed set of supported classification schemes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Scheme {
    Quantiles,
    EqualInterval,
    MaximumBreaks,
    FisherJenks,
}

impl Scheme {
    /// Every supported scheme, in registry order
    pub const ALL: [Scheme; 4] = [
        Scheme::Quantiles,
        Scheme::EqualInterval,
        Scheme::MaximumBreaks,
        Scheme::FisherJenks,
    ];

    /// Canonical scheme name
    pub fn name(&self) -> &'static str {
        match self {
            Scheme::Quantiles => "Quantiles",
            Scheme::EqualInterval => "Equal_Interval",
            Scheme::MaximumBreaks => "Maximum_Breaks",
            Scheme::FisherJenks => "Fisher_Jenks",
        }
    }

    /// Routine implementing this scheme
    pub fn classifier(&self) -> &'static dyn Classifier {
        match self {
            Scheme::Quantiles => &quantiles::QuantilesClassifier,
            Scheme::EqualInterval => &equal_interval::EqualIntervalClassifier,
            Scheme::MaximumBreaks => &maximum_breaks::MaximumBreaksClassifier,
            Scheme::FisherJenks => &fisher_jenks::FisherJenksClassifier,
        }
    }

    /// Classify `values` into at most `k` classes
    pub fn classify(&self, values: ArrayView1<f64>, k: usize) -> Result<Classification> {
        let sorted = common::sorted_finite(values, k)?;
        let bins = self.classifier().bins(&sorted, k)?;
        let (yb, counts) = common::assign_bins(values, &bins);

        Ok(Classification {
            scheme: *self,
            k,
            bins,
            yb,
            counts,
        })
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Scheme {
    type Err = ChoroplethError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        lookup_scheme(s)
    }
}

static SCHEME_REGISTRY: Lazy<HashMap<String, Scheme>> = Lazy::new(|| {
    Scheme::ALL
        .iter()
        .map(|scheme| (scheme.name().to_lowercase(), *scheme))
        .collect()
});

/// Resolve a scheme name, ignoring case
pub fn lookup_scheme(name: &str) -> Result<Scheme> {
    SCHEME_REGISTRY
        .get(&name.to_lowercase())
        .copied()
        .ok_or_else(|| ChoroplethError::UnknownScheme {
            name: name.to_string(),
        })
}

/// Registry keys, sorted
pub fn scheme_keys() -> Vec<&'static str> {
    let mut keys: Vec<&'static str> = SCHEME_REGISTRY.keys().map(String::as_str).collect();
    keys.sort_unstable();
    keys
}

/// Result of classifying a column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Classification {
    /// Scheme that produced the classes
    pub scheme: Scheme,
    /// Requested class count
    pub k: usize,
    /// Ascending class upper bounds; its length is the actual class count
    pub bins: Vec<f64>,
    /// Bin index per input row, in row order
    pub yb: Vec<usize>,
    /// Number of rows in each class
    pub counts: Vec<usize>,
}

impl Classification {
    /// Actual number of classes, which may be below the requested `k`
    pub fn classes(&self) -> usize {
        self.bins.len()
    }
}
