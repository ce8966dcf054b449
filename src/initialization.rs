//! Centroid seeding

use crate::error::{Error, Result};
use ndarray::{s, Array2, ArrayView2};

/// Seed `n_clusters` centroids with the first `n_clusters` points, in input order
///
/// Duplicate points are copied as-is, so two seeds may coincide.
pub fn initialize_centroids(data: ArrayView2<f64>, n_clusters: usize) -> Result<Array2<f64>> {
    if n_clusters == 0 || n_clusters > data.nrows() {
        return Err(Error::invalid_cluster_count(n_clusters, data.nrows()));
    }

    Ok(data.slice(s![..n_clusters, ..]).to_owned())
}
