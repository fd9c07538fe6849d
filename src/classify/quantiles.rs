//! Quantile classification.
//!
//! Each class holds roughly the same number of observations. Class upper
//! bounds are the `100 * i / k` percentiles; repeated bounds collapse, so
//! low-cardinality columns yield fewer than `k` classes.

use super::{common::percentile, Classifier};
use crate::error::Result;

/// Quantile classifier
pub struct QuantilesClassifier;

impl Classifier for QuantilesClassifier {
    fn bins(&self, sorted: &[f64], k: usize) -> Result<Vec<f64>> {
        let step = 100.0 / k as f64;
        let mut bins: Vec<f64> = (1..k)
            .map(|i| percentile(sorted, step * i as f64))
            .collect();
        bins.push(percentile(sorted, 100.0));
        bins.dedup();
        Ok(bins)
    }

    fn name(&self) -> &str {
        "Quantiles"
    }
}
