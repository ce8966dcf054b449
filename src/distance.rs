//! Distance computation between numeric vectors

use crate::error::{Error, Result};
use ndarray::ArrayView1;

/// Squared Euclidean distance between two equal-length vectors
pub fn squared_euclidean_distance(a: ArrayView1<f64>, b: ArrayView1<f64>) -> Result<f64> {
    if a.len() != b.len() {
        return Err(Error::dimension_mismatch(a.len(), b.len()));
    }

    let sum_sq_diff = a
        .iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let diff = x - y;
            diff * diff
        })
        .sum::<f64>();

    Ok(sum_sq_diff)
}

/// Euclidean distance between two equal-length vectors
pub fn euclidean_distance(a: ArrayView1<f64>, b: ArrayView1<f64>) -> Result<f64> {
    squared_euclidean_distance(a, b).map(f64::sqrt)
}
