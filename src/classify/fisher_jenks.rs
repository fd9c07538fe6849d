//! Fisher-Jenks optimal classification.
//!
//! Finds the partition of the sorted values into `k` contiguous classes
//! that minimises the total within-class sum of squared deviations.
//! Runs in `O(k * n^2)` time.

use super::{common::distinct_count, Classifier};
use crate::error::{ChoroplethError, Result};

/// Fisher-Jenks classifier
pub struct FisherJenksClassifier;

impl Classifier for FisherJenksClassifier {
    fn bins(&self, sorted: &[f64], k: usize) -> Result<Vec<f64>> {
        if distinct_count(sorted) < k {
            return Err(ChoroplethError::Classification {
                message: format!("Fewer unique values than specified classes ({})", k),
            });
        }

        let n = sorted.len();
        // Tables are 1-based in both dimensions: row = values considered, column = classes
        let mut lower_limits = vec![vec![0usize; k + 1]; n + 1];
        let mut variances = vec![vec![0.0f64; k + 1]; n + 1];

        for j in 1..=k {
            lower_limits[1][j] = 1;
            for row in variances.iter_mut().skip(2) {
                row[j] = f64::INFINITY;
            }
        }

        for l in 2..=n {
            let mut sum = 0.0;
            let mut sum_sq = 0.0;
            let mut count = 0.0;
            let mut variance = 0.0;

            for m in 1..=l {
                let lower = l - m + 1;
                let value = sorted[lower - 1];
                sum_sq += value * value;
                sum += value;
                count += 1.0;
                variance = sum_sq - (sum * sum) / count;

                let prev = lower - 1;
                if prev != 0 {
                    for j in 2..=k {
                        let candidate = variance + variances[prev][j - 1];
                        if variances[l][j] >= candidate {
                            lower_limits[l][j] = lower;
                            variances[l][j] = candidate;
                        }
                    }
                }
            }

            lower_limits[l][1] = 1;
            variances[l][1] = variance;
        }

        let mut bins = vec![0.0; k];
        bins[k - 1] = sorted[n - 1];
        let mut row = n;
        for class in (2..=k).rev() {
            let lower = lower_limits[row][class];
            bins[class - 2] = sorted[lower - 2];
            row = lower - 1;
        }

        Ok(bins)
    }

    fn name(&self) -> &str {
        "Fisher_Jenks"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_separates_clusters() {
        let sorted = [1.0, 2.0, 3.0, 10.0, 11.0, 12.0, 50.0, 52.0];
        let bins = FisherJenksClassifier.bins(&sorted, 3).unwrap();
        assert_eq!(bins, vec![3.0, 12.0, 52.0]);
    }

    #[test]
    fn test_one_class_per_value() {
        let sorted = [1.0, 2.0, 3.0, 4.0, 100.0];
        let bins = FisherJenksClassifier.bins(&sorted, 5).unwrap();
        assert_eq!(bins, sorted.to_vec());
    }

    #[test]
    fn test_single_class() {
        let bins = FisherJenksClassifier.bins(&[4.0, 5.0, 9.0], 1).unwrap();
        assert_eq!(bins, vec![9.0]);
    }

    #[test]
    fn test_too_few_unique_values() {
        assert!(matches!(
            FisherJenksClassifier.bins(&[1.0, 1.0, 2.0], 3),
            Err(ChoroplethError::Classification { .. })
        ));
    }
}
