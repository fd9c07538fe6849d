//! Common utilities for classification schemes.

use ndarray::ArrayView1;

use crate::error::{ChoroplethError, Result};

/// Validate classifier input and return the values sorted ascending
pub fn sorted_finite(values: ArrayView1<f64>, k: usize) -> Result<Vec<f64>> {
    if values.is_empty() {
        return Err(ChoroplethError::Classification {
            message: "Cannot classify an empty column".to_string(),
        });
    }
    if k == 0 {
        return Err(ChoroplethError::Classification {
            message: "Number of classes must be at least 1".to_string(),
        });
    }
    if let Some(bad) = values.iter().find(|v| !v.is_finite()) {
        return Err(ChoroplethError::Classification {
            message: format!("Cannot classify non-finite value: {}", bad),
        });
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    Ok(sorted)
}

/// Assign each value to the first bin whose upper bound is `>=` the value.
///
/// Returns the per-value bin index and the per-bin counts.
pub fn assign_bins(values: ArrayView1<f64>, bins: &[f64]) -> (Vec<usize>, Vec<usize>) {
    let last = bins.len().saturating_sub(1);
    let mut counts = vec![0; bins.len()];

    let yb = values
        .iter()
        .map(|v| {
            let index = bins.partition_point(|b| b < v).min(last);
            counts[index] += 1;
            index
        })
        .collect();

    (yb, counts)
}

/// Percentile of sorted data with linear interpolation between order
/// statistics; `pct` is in `[0, 100]`
pub fn percentile(sorted: &[f64], pct: f64) -> f64 {
    let position = (sorted.len() - 1) as f64 * pct / 100.0;
    let lower = position.floor() as usize;
    let upper = (position.ceil() as usize).min(sorted.len() - 1);
    let fraction = position - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * fraction
}

/// Number of distinct values in sorted data
pub fn distinct_count(sorted: &[f64]) -> usize {
    if sorted.is_empty() {
        return 0;
    }
    1 + sorted.windows(2).filter(|w| w[0] != w[1]).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_assign_bins_upper_inclusive() {
        let values = array![1.0, 1.5, 2.0, 10.0, 0.0];
        let (yb, counts) = assign_bins(values.view(), &[1.0, 2.0, 10.0]);
        assert_eq!(yb, vec![0, 1, 1, 2, 0]);
        assert_eq!(counts, vec![2, 2, 1]);
    }

    #[test]
    fn test_percentile_linear() {
        let sorted = [1.0, 2.0, 3.0, 4.0, 100.0];
        assert!((percentile(&sorted, 20.0) - 1.8).abs() < 1e-12);
        assert!((percentile(&sorted, 80.0) - 23.2).abs() < 1e-12);
        assert_eq!(percentile(&sorted, 0.0), 1.0);
        assert_eq!(percentile(&sorted, 100.0), 100.0);
        assert_eq!(percentile(&[5.0], 50.0), 5.0);
    }

    #[test]
    fn test_distinct_count() {
        assert_eq!(distinct_count(&[]), 0);
        assert_eq!(distinct_count(&[1.0, 1.0, 2.0, 3.0, 3.0]), 3);
    }

    #[test]
    fn test_sorted_finite() {
        let sorted = sorted_finite(array![3.0, -1.0, 2.0].view(), 2).unwrap();
        assert_eq!(sorted, vec![-1.0, 2.0, 3.0]);
        assert!(sorted_finite(array![f64::INFINITY].view(), 2).is_err());
    }
}
