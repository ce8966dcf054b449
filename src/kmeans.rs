//! K-means clustering with Lloyd's algorithm

use crate::assignment::{assign_clusters, calculate_inertia, ClusterSet};
use crate::distance::euclidean_distance;
use crate::error::{Error, Result};
use crate::initialization::initialize_centroids;
use ndarray::{Array1, Array2, ArrayView1, ArrayView2};
use tracing::{debug, info, warn};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default convergence threshold on centroid movement
pub const DEFAULT_EPSILON: f64 = 0.001;
/// Default cap on assignment/update cycles
pub const DEFAULT_ITERATIONS: usize = 200;
/// Default exclusive upper bound for the iteration cap
pub const MAX_ITERATIONS: usize = 1000;

/// K-means clusterer configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct KMeans {
    /// Number of clusters
    pub n_clusters: usize,
    /// Maximum number of assignment/update cycles
    pub max_iter: usize,
    /// Exclusive upper bound accepted for `max_iter`
    pub iteration_limit: usize,
    /// Centroid movement below which a centroid counts as settled
    pub epsilon: f64,
}

/// Why the iteration loop stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Termination {
    /// Every centroid moved less than epsilon in the last cycle
    Converged,
    /// The iteration cap was reached first
    Exhausted,
}

/// Result of k-means clustering
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct KMeansResult {
    /// Final centroids, one row per cluster
    pub centroids: Array2<f64>,
    /// Cluster label of each point against the final centroids
    pub labels: Array1<usize>,
    /// Number of assignment/update cycles performed
    pub n_iter: usize,
    /// Within-cluster sum of squared distances against the final centroids
    pub inertia: f64,
    /// How the loop ended
    pub termination: Termination,
}

impl KMeansResult {
    /// Whether the loop stopped because the centroids settled
    pub fn converged(&self) -> bool {
        self.termination == Termination::Converged
    }
}

/// Outcome of recomputing one centroid
#[derive(Debug, Clone, PartialEq)]
pub enum CentroidUpdate {
    /// Mean of the cluster's members
    Updated(Array1<f64>),
    /// The cluster was empty; the previous centroid stands
    Unchanged,
}

impl CentroidUpdate {
    /// The numeric centroid, falling back to `previous` when unchanged
    pub fn resolve(self, previous: ArrayView1<f64>) -> Array1<f64> {
        match self {
            CentroidUpdate::Updated(centroid) => centroid,
            CentroidUpdate::Unchanged => previous.to_owned(),
        }
    }
}

/// Recompute each cluster's centroid as the coordinate-wise mean of its members
///
/// Empty clusters yield [`CentroidUpdate::Unchanged`].
pub fn update_centroids(data: ArrayView2<f64>, clusters: &ClusterSet) -> Vec<CentroidUpdate> {
    clusters
        .iter()
        .map(|members| {
            if members.is_empty() {
                return CentroidUpdate::Unchanged;
            }

            let mut sums = Array1::<f64>::zeros(data.ncols());
            for &point_idx in members {
                sums += &data.row(point_idx);
            }
            CentroidUpdate::Updated(sums / members.len() as f64)
        })
        .collect()
}

/// True when every centroid moved strictly less than `epsilon`
pub fn converged(old: ArrayView2<f64>, new: ArrayView2<f64>, epsilon: f64) -> Result<bool> {
    if old.nrows() != new.nrows() {
        return Err(Error::dimension_mismatch(old.nrows(), new.nrows()));
    }

    for (old_centroid, new_centroid) in old.rows().into_iter().zip(new.rows()) {
        if euclidean_distance(old_centroid, new_centroid)? >= epsilon {
            return Ok(false);
        }
    }

    Ok(true)
}

impl Default for KMeans {
    fn default() -> Self {
        Self {
            n_clusters: 2,
            max_iter: DEFAULT_ITERATIONS,
            iteration_limit: MAX_ITERATIONS,
            epsilon: DEFAULT_EPSILON,
        }
    }
}

impl KMeans {
    /// Create a new k-means clusterer with specified number of clusters
    pub fn new(n_clusters: usize) -> Self {
        Self {
            n_clusters,
            ..Default::default()
        }
    }

    /// Set the maximum number of iterations
    pub fn max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Set the exclusive upper bound accepted for the iteration cap
    pub fn iteration_limit(mut self, limit: usize) -> Self {
        self.iteration_limit = limit;
        self
    }

    /// Set the convergence threshold
    pub fn tolerance(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Check the iteration cap and threshold, which do not depend on the data
    pub fn validate_iterations(&self) -> Result<()> {
        if self.max_iter <= 1 || self.max_iter >= self.iteration_limit {
            return Err(Error::invalid_iteration_count(
                self.max_iter,
                self.iteration_limit,
            ));
        }

        if !(self.epsilon.is_finite() && self.epsilon > 0.0) {
            return Err(Error::invalid_parameter(format!(
                "epsilon must be a positive finite number, got {}",
                self.epsilon
            )));
        }

        Ok(())
    }

    /// Check every parameter against a data set of `n_points` points
    pub fn validate(&self, n_points: usize) -> Result<()> {
        self.validate_iterations()?;

        if self.n_clusters <= 1 || self.n_clusters >= n_points {
            return Err(Error::invalid_cluster_count(self.n_clusters, n_points));
        }

        Ok(())
    }

    /// Fit the model to the points, one per row
    pub fn fit(&self, data: ArrayView2<f64>) -> Result<KMeansResult> {
        self.validate(data.nrows())?;
        if data.ncols() == 0 {
            return Err(Error::invalid_parameter("points must have at least one coordinate"));
        }

        let mut centroids = initialize_centroids(data, self.n_clusters)?;
        let mut termination = Termination::Exhausted;
        let mut n_iter = 0;

        while n_iter < self.max_iter {
            n_iter += 1;

            let previous = centroids.clone();
            let clusters = assign_clusters(data, previous.view())?;
            let updates = update_centroids(data, &clusters);

            for (cluster_id, update) in updates.into_iter().enumerate() {
                let centroid = update.resolve(previous.row(cluster_id));
                centroids.row_mut(cluster_id).assign(&centroid);
            }

            debug!(
                iteration = n_iter,
                sizes = ?clusters.sizes(),
                "k-means cycle complete"
            );

            if converged(previous.view(), centroids.view(), self.epsilon)? {
                termination = Termination::Converged;
                break;
            }
        }

        match termination {
            Termination::Converged => info!(n_iter, "k-means converged"),
            Termination::Exhausted => warn!(
                max_iter = self.max_iter,
                "k-means stopped at the iteration cap before converging"
            ),
        }

        let final_clusters = assign_clusters(data, centroids.view())?;
        let inertia = calculate_inertia(data, centroids.view(), &final_clusters)?;

        Ok(KMeansResult {
            labels: final_clusters.labels(),
            centroids,
            n_iter,
            inertia,
            termination,
        })
    }

    /// Fit the model and return only the final centroids
    pub fn fit_centroids(&self, data: ArrayView2<f64>) -> Result<Array2<f64>> {
        Ok(self.fit(data)?.centroids)
    }

    /// Fit the model and predict cluster assignments
    pub fn fit_predict(&self, data: ArrayView2<f64>) -> Result<Array1<usize>> {
        Ok(self.fit(data)?.labels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{arr1, arr2};

    #[test]
    fn test_kmeans_creation() {
        let kmeans = KMeans::new(3);
        assert_eq!(kmeans.n_clusters, 3);
        assert_eq!(kmeans.max_iter, DEFAULT_ITERATIONS);
        assert_eq!(kmeans.iteration_limit, MAX_ITERATIONS);
        assert_eq!(kmeans.epsilon, DEFAULT_EPSILON);
    }

    #[test]
    fn test_kmeans_builder_pattern() {
        let kmeans = KMeans::new(5)
            .max_iter(50)
            .iteration_limit(100)
            .tolerance(0.01);

        assert_eq!(kmeans.n_clusters, 5);
        assert_eq!(kmeans.max_iter, 50);
        assert_eq!(kmeans.iteration_limit, 100);
        assert_eq!(kmeans.epsilon, 0.01);
    }

    #[test]
    fn test_update_centroids_mean() {
        let data = arr2(&[[1.0, 1.0], [3.0, 3.0]]);
        let clusters = ClusterSet::from_labels(arr1(&[0, 0]).view(), 1).unwrap();

        let updates = update_centroids(data.view(), &clusters);
        assert_eq!(updates, vec![CentroidUpdate::Updated(arr1(&[2.0, 2.0]))]);
    }

    #[test]
    fn test_update_centroids_empty_cluster() {
        let data = arr2(&[[1.0, 1.0], [3.0, 3.0]]);
        let clusters = ClusterSet::from_labels(arr1(&[1, 1]).view(), 2).unwrap();

        let updates = update_centroids(data.view(), &clusters);
        assert_eq!(updates[0], CentroidUpdate::Unchanged);
        assert_eq!(updates[1], CentroidUpdate::Updated(arr1(&[2.0, 2.0])));

        let previous = arr1(&[7.0, -7.0]);
        let resolved = updates[0].clone().resolve(previous.view());
        assert_eq!(resolved, previous);
    }

    #[test]
    fn test_update_does_not_touch_input() {
        let data = arr2(&[[1.0, 4.0], [2.0, 5.0], [6.0, 0.0]]);
        let before = data.clone();
        let clusters = ClusterSet::from_labels(arr1(&[0, 1, 0]).view(), 2).unwrap();

        let updates = update_centroids(data.view(), &clusters);
        assert_eq!(updates[0], CentroidUpdate::Updated(arr1(&[3.5, 2.0])));
        assert_eq!(updates[1], CentroidUpdate::Updated(arr1(&[2.0, 5.0])));
        assert_eq!(data, before);
    }

    #[test]
    fn test_converged_threshold() {
        let old = arr2(&[[0.0, 0.0], [5.0, 5.0]]);

        let close = arr2(&[[0.0005, 0.0], [5.0, 5.0009]]);
        assert!(converged(old.view(), close.view(), DEFAULT_EPSILON).unwrap());

        let at_threshold = arr2(&[[0.001, 0.0], [5.0, 5.0]]);
        assert!(!converged(old.view(), at_threshold.view(), DEFAULT_EPSILON).unwrap());

        let far = arr2(&[[0.0, 0.0], [5.0, 6.0]]);
        assert!(!converged(old.view(), far.view(), DEFAULT_EPSILON).unwrap());
    }

    #[test]
    fn test_validation_boundaries() {
        assert!(KMeans::new(1).validate(4).is_err());
        assert!(KMeans::new(4).validate(4).is_err());
        assert!(KMeans::new(2).validate(4).is_ok());
        assert!(KMeans::new(3).validate(4).is_ok());

        assert!(matches!(
            KMeans::new(2).max_iter(1).validate(4),
            Err(Error::InvalidIterationCount { .. })
        ));
        assert!(matches!(
            KMeans::new(2).max_iter(1000).validate(4),
            Err(Error::InvalidIterationCount { .. })
        ));
        assert!(KMeans::new(2).max_iter(2).validate(4).is_ok());
        assert!(KMeans::new(2).max_iter(999).validate(4).is_ok());

        assert!(KMeans::new(2).tolerance(0.0).validate(4).is_err());
        assert!(KMeans::new(2).tolerance(f64::NAN).validate(4).is_err());
    }

    #[test]
    fn test_iteration_limit_is_configurable() {
        assert!(KMeans::new(2).max_iter(1500).validate(4).is_err());
        assert!(KMeans::new(2)
            .iteration_limit(2000)
            .max_iter(1500)
            .validate(4)
            .is_ok());
    }

    #[test]
    fn test_two_groups() {
        let data = arr2(&[[0.0, 0.0], [10.0, 0.0], [0.0, 1.0], [10.0, 1.0]]);

        let result = KMeans::new(2).fit(data.view()).unwrap();

        assert_eq!(result.centroids, arr2(&[[0.0, 0.5], [10.0, 0.5]]));
        assert_eq!(result.labels, arr1(&[0, 1, 0, 1]));
        assert!(result.converged());
        assert_eq!(result.n_iter, 2);
        assert_eq!(result.inertia, 1.0);
    }

    #[test]
    fn test_seeds_decide_the_split() {
        // Seeding with (0,0) and (0,1) splits the data horizontally
        let data = arr2(&[[0.0, 0.0], [0.0, 1.0], [10.0, 0.0], [10.0, 1.0]]);

        let result = KMeans::new(2).fit(data.view()).unwrap();

        assert_eq!(result.centroids, arr2(&[[5.0, 0.0], [5.0, 1.0]]));
        assert_eq!(result.labels, arr1(&[0, 1, 0, 1]));
        assert!(result.converged());
    }

    #[test]
    fn test_empty_cluster_keeps_seed() {
        // Seeds coincide, so every point ties and goes to cluster 0
        let data = arr2(&[[1.0], [1.0], [1.0003]]);

        let result = KMeans::new(2).fit(data.view()).unwrap();

        assert_eq!(result.centroids.row(1), arr1(&[1.0]));
        assert!(result.converged());
        assert_eq!(result.n_iter, 1);
    }

    #[test]
    fn test_exhausted_is_not_an_error() {
        let data = arr2(&[[0.0], [1.0], [2.0], [3.0], [100.0], [101.0]]);

        let result = KMeans::new(2).max_iter(2).fit(data.view()).unwrap();

        assert_eq!(result.termination, Termination::Exhausted);
        assert_eq!(result.n_iter, 2);
        assert_eq!(result.centroids, arr2(&[[1.5], [100.5]]));
    }

    #[test]
    fn test_fit_predict() {
        let data = arr2(&[[0.0, 0.0], [0.0, 1.0], [10.0, 0.0], [10.0, 1.0]]);

        let labels = KMeans::new(2).fit_predict(data.view()).unwrap();
        assert_eq!(labels.len(), 4);
        assert!(labels.iter().all(|&label| label < 2));
    }

    #[test]
    fn test_invalid_parameters() {
        let data = arr2(&[[0.0], [1.0]]);

        // Too many clusters
        assert!(KMeans::new(3).fit(data.view()).is_err());

        // Zero clusters
        assert!(KMeans::new(0).fit(data.view()).is_err());
    }
}
