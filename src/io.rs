//! Reading points from delimited text and writing centroids back out
//!
//! The input format is one point per line, coordinates separated by commas,
//! no header and no quoting. The first record fixes the dimension for the
//! whole file. Output is one centroid per line with every coordinate printed
//! to four decimal places.

use crate::error::{Error, Result};
use ndarray::{Array2, ArrayView1, ArrayView2};
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use tracing::debug;

/// Parse comma-separated points, one per line
///
/// Blank lines are skipped. An empty source yields a `0 x 0` matrix.
pub fn parse_points<R: BufRead>(reader: R) -> Result<Array2<f64>> {
    let mut values = Vec::new();
    let mut dimension: Option<usize> = None;
    let mut n_points = 0;

    for (line_idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = line_idx + 1;
        let record = line.trim();
        if record.is_empty() {
            continue;
        }

        let mut n_fields = 0;
        for field in record.split(',') {
            let value = field.trim().parse::<f64>().map_err(|e| {
                Error::malformed_input(line_no, format!("invalid number {:?}: {}", field, e))
            })?;
            values.push(value);
            n_fields += 1;
        }

        match dimension {
            None => dimension = Some(n_fields),
            Some(d) if d != n_fields => {
                return Err(Error::malformed_input(
                    line_no,
                    format!("expected {} fields, found {}", d, n_fields),
                ));
            }
            Some(_) => {}
        }
        n_points += 1;
    }

    let dimension = dimension.unwrap_or(0);
    debug!(n_points, dimension, "parsed input points");

    Array2::from_shape_vec((n_points, dimension), values)
        .map_err(|e| Error::malformed_input(n_points, e.to_string()))
}

/// Read comma-separated points from a file
pub fn read_points(path: impl AsRef<Path>) -> Result<Array2<f64>> {
    let file = File::open(path.as_ref())?;
    parse_points(BufReader::new(file))
}

/// Render one centroid as comma-joined fixed four-decimal coordinates
pub fn format_centroid(centroid: ArrayView1<f64>) -> String {
    centroid
        .iter()
        .map(|value| format!("{:.4}", value))
        .collect::<Vec<_>>()
        .join(",")
}

/// Write every centroid on its own line, in cluster-index order
pub fn write_centroids<W: Write>(writer: &mut W, centroids: ArrayView2<f64>) -> Result<()> {
    for centroid in centroids.rows() {
        writeln!(writer, "{}", format_centroid(centroid))?;
    }
    writer.flush()?;
    Ok(())
}
