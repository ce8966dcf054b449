//! lloyd - cluster numeric points from a text file
//!
//! # Usage
//!
//! ```bash
//! lloyd K [ITER] INPUT_PATH
//! ```
//!
//! - `K` - number of clusters, `1 < K < N` where `N` is the number of points
//! - `ITER` - maximum number of iterations, `1 < ITER < 1000`, default 200
//! - `INPUT_PATH` - one point per line, coordinates separated by commas
//!
//! The final centroids are printed to stdout, one per line, each coordinate to
//! four decimal places. Validation failures print a one-line message to stdout
//! and exit with status 1. Logs go to stderr and are controlled by `RUST_LOG`.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

use lloyd::io::{read_points, write_centroids};
use lloyd::{Error, KMeans, DEFAULT_ITERATIONS, MAX_ITERATIONS};

#[derive(Parser, Debug)]
#[command(name = "lloyd")]
#[command(version, about = "Cluster numeric points into K groups with Lloyd's algorithm")]
#[command(override_usage = "lloyd K [ITER] INPUT_PATH")]
struct Cli {
    /// Number of clusters (1 < K < number of points)
    #[arg(value_name = "K", allow_negative_numbers = true)]
    clusters: String,

    /// Optional maximum iteration count (1 < ITER < 1000, default 200), then the input file
    #[arg(
        value_name = "ITER_AND_INPUT",
        num_args = 1..=2,
        required = true,
        allow_negative_numbers = true
    )]
    rest: Vec<String>,
}

/// Validated command-line request
#[derive(Debug, Clone, PartialEq)]
struct Invocation {
    n_clusters: usize,
    max_iter: usize,
    input: PathBuf,
}

impl Invocation {
    /// Interpret the positional arguments
    ///
    /// The iteration cap is range-checked here so that a bad value is
    /// reported before any input is read. The cluster count can only be
    /// range-checked once the number of points is known.
    fn from_args(clusters: &str, rest: &[String]) -> lloyd::Result<Self> {
        let n_clusters =
            parse_count(clusters).ok_or_else(|| Error::invalid_cluster_count(0, 0))?;

        let (max_iter, input) = match rest {
            [input] => (DEFAULT_ITERATIONS, input),
            [iter, input] => {
                let max_iter = parse_count(iter)
                    .ok_or_else(|| Error::invalid_iteration_count(0, MAX_ITERATIONS))?;
                (max_iter, input)
            }
            _ => {
                return Err(Error::invalid_parameter(format!(
                    "expected 2 or 3 arguments, got {}",
                    rest.len() + 1
                )))
            }
        };

        KMeans::new(n_clusters)
            .max_iter(max_iter)
            .validate_iterations()?;

        Ok(Self {
            n_clusters,
            max_iter,
            input: PathBuf::from(input),
        })
    }
}

/// Parse a positive whole number, also accepting a round decimal such as `3.0`
fn parse_count(raw: &str) -> Option<usize> {
    let raw = raw.trim();
    if let Ok(count) = raw.parse::<usize>() {
        return Some(count);
    }

    let value = raw.parse::<f64>().ok()?;
    if value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value <= u32::MAX as f64 {
        Some(value as usize)
    } else {
        None
    }
}

fn run(cli: &Cli) -> Result<()> {
    let invocation = Invocation::from_args(&cli.clusters, &cli.rest)?;

    let points = read_points(&invocation.input).with_context(|| {
        format!("failed to load points from {}", invocation.input.display())
    })?;
    info!(
        n_points = points.nrows(),
        dimension = points.ncols(),
        n_clusters = invocation.n_clusters,
        max_iter = invocation.max_iter,
        "loaded input"
    );

    let result = KMeans::new(invocation.n_clusters)
        .max_iter(invocation.max_iter)
        .fit(points.view())?;
    info!(
        n_iter = result.n_iter,
        inertia = result.inertia,
        termination = ?result.termination,
        "clustering finished"
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_centroids(&mut out, result.centroids.view())?;
    Ok(())
}

/// Print the user-facing message for a failed run
fn report(err: &anyhow::Error) {
    error!("{:#}", err);

    let message = match err.downcast_ref::<Error>() {
        Some(e @ (Error::InvalidClusterCount { .. } | Error::InvalidIterationCount { .. })) => {
            e.to_string()
        }
        _ => "An Error Has Occurred".to_string(),
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let _ = writeln!(out, "{}", message);
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err);
            ExitCode::FAILURE
        }
    }
}
