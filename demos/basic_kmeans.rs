//! Basic k-means clustering example
//!
//! Clusters a small two-dimensional data set, compares a few cluster counts
//! and prints the centroids in the same format as the command-line tool.

use lloyd::io::write_centroids;
use lloyd::KMeans;
use ndarray::Array2;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Three loose groups around (1, 1), (8, 8) and (1, 8)
    let data = Array2::from_shape_vec(
        (9, 2),
        vec![
            1.0, 1.0, //
            8.0, 8.5, //
            1.2, 7.9, //
            1.5, 0.8, //
            7.6, 8.1, //
            0.7, 8.3, //
            0.9, 1.4, //
            8.3, 7.7, //
            1.1, 8.0, //
        ],
    )?;

    println!("Sample data shape: {:?}", data.dim());
    println!();

    println!("=== Example 1: Basic k-means ===");
    let kmeans = KMeans::new(3).max_iter(100);

    let result = kmeans.fit(data.view())?;

    println!("Termination: {:?}", result.termination);
    println!("Iterations: {}", result.n_iter);
    println!("Final inertia: {:.4}", result.inertia);
    println!("Cluster assignments: {:?}", result.labels.to_vec());
    println!("Centroids:");
    write_centroids(&mut std::io::stdout(), result.centroids.view())?;
    println!();

    println!("=== Example 2: Effect of number of clusters ===");
    for k in 2..=5 {
        let result = KMeans::new(k).max_iter(50).fit(data.view())?;
        println!(
            "k={}: Inertia={:.4}, Converged={}",
            k,
            result.inertia,
            result.converged()
        );
    }
    println!();

    println!("=== Example 3: Using fit_predict ===");
    let labels = KMeans::new(3).fit_predict(data.view())?;
    for cluster_id in 0..3 {
        let members: Vec<_> = labels
            .iter()
            .enumerate()
            .filter(|&(_, &label)| label == cluster_id)
            .map(|(i, _)| data.row(i).to_vec())
            .collect();

        println!("  Cluster {}: {} points", cluster_id, members.len());
        for point in members {
            println!("    {:?}", point);
        }
    }

    Ok(())
}
