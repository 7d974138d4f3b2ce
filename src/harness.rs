//! The benchmark harness shared by every multiplication program.
//!
//! A run loads A and B once, then for each repetition zeroes the output
//! buffer, times exactly one call of the selected [`Algorithm`], reports it,
//! and records a [`ResultRow`]. When all repetitions are done the rows are
//! appended to the results CSV in one batch and the summary is printed.
//!
//! Console output goes to a caller-supplied writer:
//!
//! ```text
//! Loading matrices A_1024.csv and B_1024.csv...
//! Running strassen algorithm in Rust on 1024x1024 matrices (5 reps)...
//! Rep 1: 3.217143 s
//! ...
//!
//! Summary statistics:
//!   mean = 3.201876 s
//!   sd   = 0.012034 s
//!   min  = 3.190051 s
//!   max  = 3.217143 s
//! ```

use std::fmt;
use std::hint::black_box;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{debug, info, instrument};

use crate::algorithm::{Algorithm, Tuning};
use crate::error::{Error, Result};
use crate::matrix::Matrix;
use crate::results::{ResultRow, append_results};
use crate::stats::Summary;

/// Matrix dimension of the reference inputs.
pub const DEFAULT_N: usize = 1024;
/// Timed repetitions per run.
pub const DEFAULT_REPS: usize = 5;
/// Results file shared by the Rust programs.
pub const DEFAULT_RESULTS_CSV: &str = "results_rust.csv";
/// Value of the `language` column.
pub const LANGUAGE: &str = "Rust";

/// Conventional input file names for dimension `n`: `A_<n>.csv`, `B_<n>.csv`.
pub fn default_input_paths(n: usize) -> (PathBuf, PathBuf) {
    (
        PathBuf::from(format!("A_{n}.csv")),
        PathBuf::from(format!("B_{n}.csv")),
    )
}

#[derive(Clone, Debug)]
pub struct BenchConfig {
    pub algorithm: Algorithm,
    pub n: usize,
    pub reps: usize,
    /// Untimed repetitions run before measuring.
    pub warmup: usize,
    pub a_path: PathBuf,
    pub b_path: PathBuf,
    pub csv_path: PathBuf,
    pub tuning: Tuning,
    /// Check the algorithm against the naive kernel before loading anything.
    pub verify: bool,
    pub language: String,
}

impl BenchConfig {
    pub fn new(algorithm: Algorithm) -> Self {
        let (a_path, b_path) = default_input_paths(DEFAULT_N);
        Self {
            algorithm,
            n: DEFAULT_N,
            reps: DEFAULT_REPS,
            warmup: 0,
            a_path,
            b_path,
            csv_path: PathBuf::from(DEFAULT_RESULTS_CSV),
            tuning: Tuning::default(),
            verify: false,
            language: LANGUAGE.to_string(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.n == 0 {
            return Err(Error::Config("matrix dimension must be at least 1".into()));
        }
        self.tuning.validate()
    }
}

/// Everything a completed run recorded.
#[derive(Clone, Debug)]
pub struct BenchReport {
    pub rows: Vec<ResultRow>,
    pub summary: Summary,
}

impl BenchReport {
    pub fn times(&self) -> Vec<f64> {
        self.rows.iter().map(|row| row.time_s).collect()
    }
}

/// Loads both `n x n` operands.
pub fn load_inputs(a_path: &Path, b_path: &Path, n: usize) -> Result<(Matrix, Matrix)> {
    let a = Matrix::load_csv(a_path, n)?;
    let b = Matrix::load_csv(b_path, n)?;
    Ok((a, b))
}

/// Zeroes `out`, then returns the wall-clock seconds of one `algorithm` call.
///
/// A buffer displaced by the call is dropped only after the clock stops.
pub fn time_once(
    algorithm: Algorithm,
    a: &Matrix,
    b: &Matrix,
    out: &mut Matrix,
    tuning: Tuning,
) -> f64 {
    out.fill_zero();
    let start = Instant::now();
    let retired = algorithm.multiply(black_box(a), black_box(b), out, tuning);
    let elapsed = start.elapsed();
    drop(retired);
    black_box(out.as_slice());
    elapsed.as_secs_f64()
}

/// Runs one benchmark end to end, writing console output to `out`.
#[instrument(skip_all, fields(algorithm = %config.algorithm, n = config.n, reps = config.reps))]
pub fn run_benchmark(config: &BenchConfig, out: &mut dyn Write) -> Result<BenchReport> {
    config.validate()?;
    let algorithm = config.algorithm;
    let n = config.n;

    if config.verify {
        algorithm.verify(config.tuning)?;
        emit(out, format_args!("Verified {algorithm} against the naive kernel."))?;
    }

    emit(
        out,
        format_args!(
            "Loading matrices {} and {}...",
            config.a_path.display(),
            config.b_path.display()
        ),
    )?;
    let (a, b) = load_inputs(&config.a_path, &config.b_path, n)?;

    emit(
        out,
        format_args!(
            "Running {algorithm} algorithm in {} on {n}x{n} matrices ({} reps)...",
            config.language, config.reps
        ),
    )?;

    let mut c = Matrix::zeros(n);
    for _ in 0..config.warmup {
        let t = time_once(algorithm, &a, &b, &mut c, config.tuning);
        debug!(elapsed_s = t, "warm-up repetition");
    }

    let mut rows = Vec::with_capacity(config.reps);
    for rep in 1..=config.reps {
        let t = time_once(algorithm, &a, &b, &mut c, config.tuning);
        emit(out, format_args!("Rep {rep}: {t:.6} s"))?;
        rows.push(ResultRow::new(
            config.language.as_str(),
            algorithm.name(),
            n,
            rep,
            t,
        ));
    }

    append_results(&config.csv_path, &rows)?;

    let report = BenchReport {
        summary: Summary::from_samples(&rows.iter().map(|row| row.time_s).collect::<Vec<_>>()),
        rows,
    };
    emit(out, format_args!("\nSummary statistics:"))?;
    for line in report.summary.report_lines() {
        emit(out, format_args!("{line}"))?;
    }

    info!(mean_s = report.summary.mean, "benchmark finished");
    Ok(report)
}

/// Writes one console line.
pub(crate) fn emit(out: &mut dyn Write, line: fmt::Arguments<'_>) -> Result<()> {
    writeln!(out, "{line}").map_err(|err| Error::io("<stdout>", err))
}
