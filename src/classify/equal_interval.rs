//! Equal interval classification.
//!
//! Splits the value range into `k` classes of equal width.

use super::Classifier;
use crate::error::{ChoroplethError, Result};

/// Equal interval classifier
pub struct EqualIntervalClassifier;

impl Classifier for EqualIntervalClassifier {
    fn bins(&self, sorted: &[f64], k: usize) -> Result<Vec<f64>> {
        let min = sorted[0];
        let max = sorted[sorted.len() - 1];
        if min == max {
            return Err(ChoroplethError::Classification {
                message: "Not enough unique values in array to form classes".to_string(),
            });
        }

        let width = (max - min) / k as f64;
        let mut bins: Vec<f64> = (1..=k).map(|i| min + width * i as f64).collect();
        // Accumulated width can drift below the maximum
        bins[k - 1] = max;
        Ok(bins)
    }

    fn name(&self) -> &str {
        "Equal_Interval"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_width_bins() {
        let bins = EqualIntervalClassifier
            .bins(&[0.0, 1.0, 5.0, 10.0], 4)
            .unwrap();
        assert_eq!(bins, vec![2.5, 5.0, 7.5, 10.0]);
    }

    #[test]
    fn test_more_classes_than_values() {
        let bins = EqualIntervalClassifier.bins(&[0.0, 6.0], 3).unwrap();
        assert_eq!(bins, vec![2.0, 4.0, 6.0]);
    }

    #[test]
    fn test_constant_column_fails() {
        assert!(matches!(
            EqualIntervalClassifier.bins(&[2.0, 2.0], 3),
            Err(ChoroplethError::Classification { .. })
        ));
    }
}
