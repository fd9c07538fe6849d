//! Maximum breaks classification.
//!
//! Class boundaries are placed in the middle of the `k - 1` widest gaps
//! between neighbouring sorted values. With `k = 1` every distinct gap
//! width is kept, as mapclassify does.

use super::Classifier;
use crate::error::Result;

/// Maximum breaks classifier
pub struct MaximumBreaksClassifier;

impl Classifier for MaximumBreaksClassifier {
    fn bins(&self, sorted: &[f64], k: usize) -> Result<Vec<f64>> {
        let gaps: Vec<f64> = sorted.windows(2).map(|w| w[1] - w[0]).collect();

        let mut widest: Vec<f64> = gaps.iter().copied().filter(|g| *g > 0.0).collect();
        widest.sort_by(f64::total_cmp);
        widest.dedup();
        if k > 1 && widest.len() > k - 1 {
            widest.drain(..widest.len() - (k - 1));
        }

        // A gap width shared by several neighbours only breaks at its first occurrence
        let mut bins: Vec<f64> = widest
            .iter()
            .filter_map(|gap| gaps.iter().position(|g| g == gap))
            .map(|i| (sorted[i] + sorted[i + 1]) / 2.0)
            .collect();
        bins.push(sorted[sorted.len() - 1]);
        bins.sort_by(f64::total_cmp);
        Ok(bins)
    }

    fn name(&self) -> &str {
        "Maximum_Breaks"
    }
}
