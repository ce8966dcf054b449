//! Assignment of points to their nearest centroid

use crate::distance::{euclidean_distance, squared_euclidean_distance};
use crate::error::{Error, Result};
use ndarray::{Array1, ArrayView1, ArrayView2};

/// Points grouped by the centroid they were assigned to
///
/// Each cluster holds row indices into the point matrix it was built from,
/// in input order. A cluster may be empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterSet {
    clusters: Vec<Vec<usize>>,
}

impl ClusterSet {
    /// Create `n_clusters` empty clusters
    pub fn with_clusters(n_clusters: usize) -> Self {
        Self {
            clusters: vec![Vec::new(); n_clusters],
        }
    }

    /// Build a cluster set from per-point labels
    pub fn from_labels(labels: ArrayView1<usize>, n_clusters: usize) -> Result<Self> {
        let mut set = Self::with_clusters(n_clusters);
        for (point_idx, &cluster_id) in labels.iter().enumerate() {
            if cluster_id >= n_clusters {
                return Err(Error::invalid_parameter(format!(
                    "label {} out of range for {} clusters",
                    cluster_id, n_clusters
                )));
            }
            set.clusters[cluster_id].push(point_idx);
        }
        Ok(set)
    }

    /// Number of clusters, empty ones included
    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    /// True when the set holds no clusters at all
    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    /// Member row indices of cluster `cluster_id`
    pub fn cluster(&self, cluster_id: usize) -> &[usize] {
        &self.clusters[cluster_id]
    }

    /// Iterate over clusters in index order
    pub fn iter(&self) -> impl Iterator<Item = &[usize]> {
        self.clusters.iter().map(Vec::as_slice)
    }

    /// Number of members in each cluster
    pub fn sizes(&self) -> Vec<usize> {
        self.clusters.iter().map(Vec::len).collect()
    }

    /// Total number of points across all clusters
    pub fn total_members(&self) -> usize {
        self.clusters.iter().map(Vec::len).sum()
    }

    /// Indices of clusters that received no points
    pub fn empty_clusters(&self) -> Vec<usize> {
        self.clusters
            .iter()
            .enumerate()
            .filter(|(_, members)| members.is_empty())
            .map(|(cluster_id, _)| cluster_id)
            .collect()
    }

    /// Cluster label of every point, indexed by point
    pub fn labels(&self) -> Array1<usize> {
        let mut labels = Array1::zeros(self.total_members());
        for (cluster_id, members) in self.clusters.iter().enumerate() {
            for &point_idx in members {
                labels[point_idx] = cluster_id;
            }
        }
        labels
    }

    fn push(&mut self, cluster_id: usize, point_idx: usize) {
        self.clusters[cluster_id].push(point_idx);
    }
}

/// Find the closest centroid for a given point
///
/// Centroids are scanned in index order and the best is only replaced on a
/// strictly smaller distance, so the lowest index wins a tie.
pub fn find_closest_centroid(point: ArrayView1<f64>, centroids: ArrayView2<f64>) -> Result<usize> {
    if centroids.nrows() == 0 {
        return Err(Error::invalid_parameter("No centroids provided"));
    }

    if centroids.ncols() != point.len() {
        return Err(Error::dimension_mismatch(centroids.ncols(), point.len()));
    }

    let mut min_distance = f64::INFINITY;
    let mut closest_centroid = 0;

    for (i, centroid) in centroids.rows().into_iter().enumerate() {
        let distance = euclidean_distance(point, centroid)?;
        if distance < min_distance {
            min_distance = distance;
            closest_centroid = i;
        }
    }

    Ok(closest_centroid)
}

/// Assign every point to the cluster of its closest centroid
pub fn assign_clusters(data: ArrayView2<f64>, centroids: ArrayView2<f64>) -> Result<ClusterSet> {
    let mut clusters = ClusterSet::with_clusters(centroids.nrows());

    for (i, point) in data.rows().into_iter().enumerate() {
        let cluster_id = find_closest_centroid(point, centroids)?;
        clusters.push(cluster_id, i);
    }

    Ok(clusters)
}

/// Within-cluster sum of squared distances to the assigned centroids
pub fn calculate_inertia(
    data: ArrayView2<f64>,
    centroids: ArrayView2<f64>,
    clusters: &ClusterSet,
) -> Result<f64> {
    if clusters.len() != centroids.nrows() {
        return Err(Error::dimension_mismatch(centroids.nrows(), clusters.len()));
    }

    let mut total = 0.0;
    for (cluster_id, members) in clusters.iter().enumerate() {
        let centroid = centroids.row(cluster_id);
        for &point_idx in members {
            total += squared_euclidean_distance(data.row(point_idx), centroid)?;
        }
    }

    Ok(total)
}
