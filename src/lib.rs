//! # K-means clustering with Lloyd's algorithm
//!
//! This crate clusters fixed-dimensional numeric points into `k` groups by
//! iterative centroid refinement: assign every point to its nearest centroid,
//! recompute each centroid as the mean of its members, and repeat until no
//! centroid moves by `epsilon` or more, or the iteration cap is reached.
//!
//! ## Features
//!
//! - Euclidean distance in double precision
//! - Deterministic seeding from the first `k` points
//! - Empty clusters keep their previous centroid
//! - Loader and formatter for comma-separated numeric text
//!
//! ## Example
//!
//! ```rust
//! use lloyd::KMeans;
//! use ndarray::array;
//!
//! let data = array![[0.0, 0.0], [10.0, 0.0], [0.0, 1.0], [10.0, 1.0]];
//!
//! let result = KMeans::new(2)
//!     .max_iter(100)
//!     .fit(data.view())
//!     .unwrap();
//!
//! assert_eq!(result.centroids, array![[0.0, 0.5], [10.0, 0.5]]);
//! ```

#![deny(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod assignment;
pub mod distance;
pub mod error;
pub mod initialization;
pub mod io;
pub mod kmeans;

pub use assignment::{assign_clusters, ClusterSet};
pub use distance::euclidean_distance;
pub use error::{Error, Result};
pub use initialization::initialize_centroids;
pub use kmeans::{
    converged, update_centroids, CentroidUpdate, KMeans, KMeansResult, Termination,
    DEFAULT_EPSILON, DEFAULT_ITERATIONS, MAX_ITERATIONS,
};

/// Re-export commonly used types from ndarray
pub use ndarray::{Array1, Array2, ArrayView1, ArrayView2};
