//! Command-line front ends for the benchmark binaries.
//!
//! Each binary under `src/bin/` is a one-line `main` calling into this module,
//! so the three per-algorithm programs share one argument surface:
//!
//! ```text
//! mm_strassen [REPS] [CSV] [--n N] [--a PATH] [--b PATH]
//!             [--block-size B] [--leaf-size L] [--warmup W] [--verify]
//! ```

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use clap::error::ErrorKind;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::algorithm::{Algorithm, Tuning};
use crate::error::Result;
use crate::experiment::{
    DEFAULT_EXPERIMENT_CSV, DEFAULT_EXPERIMENT_SEED, DEFAULT_REPS_PER_CELL, ExperimentConfig,
    run_experiment,
};
use crate::generate::{DEFAULT_SEED, generate_inputs};
use crate::harness::{
    BenchConfig, DEFAULT_N, DEFAULT_REPS, DEFAULT_RESULTS_CSV, default_input_paths, run_benchmark,
};
use crate::matmul::BLOCK_SIZE;
use crate::strassen::LEAF_SIZE;

/// Arguments of `mm_naive`, `mm_blocked` and `mm_strassen`.
#[derive(Debug, Parser)]
#[command(about = "Time repeated n x n matrix multiplications and append the results to a CSV")]
pub struct BenchArgs {
    /// Number of timed repetitions
    #[arg(default_value_t = DEFAULT_REPS)]
    pub reps: usize,

    /// Results CSV to append to (created with a header if missing)
    #[arg(default_value = DEFAULT_RESULTS_CSV)]
    pub csv: PathBuf,

    /// Matrix dimension
    #[arg(long, default_value_t = DEFAULT_N)]
    pub n: usize,

    /// Left operand [default: A_<N>.csv]
    #[arg(long)]
    pub a: Option<PathBuf>,

    /// Right operand [default: B_<N>.csv]
    #[arg(long)]
    pub b: Option<PathBuf>,

    /// Tile edge of the blocked kernel
    #[arg(long, default_value_t = BLOCK_SIZE)]
    pub block_size: usize,

    /// Dimension at or below which Strassen multiplies directly
    #[arg(long, default_value_t = LEAF_SIZE)]
    pub leaf_size: usize,

    /// Untimed repetitions before measuring
    #[arg(long, default_value_t = 0)]
    pub warmup: usize,

    /// Check the algorithm against the naive kernel before benchmarking
    #[arg(long)]
    pub verify: bool,
}

impl BenchArgs {
    pub fn into_config(self, algorithm: Algorithm) -> BenchConfig {
        let (default_a, default_b) = default_input_paths(self.n);
        BenchConfig {
            n: self.n,
            reps: self.reps,
            warmup: self.warmup,
            a_path: self.a.unwrap_or(default_a),
            b_path: self.b.unwrap_or(default_b),
            csv_path: self.csv,
            tuning: Tuning {
                block_size: self.block_size,
                leaf_size: self.leaf_size,
            },
            verify: self.verify,
            ..BenchConfig::new(algorithm)
        }
    }
}

/// Arguments of `run_experiment`.
#[derive(Debug, Parser)]
#[command(about = "Run every algorithm in a seeded random order, one repetition per run")]
pub struct ExperimentArgs {
    /// CSV file all runs append to
    #[arg(long, default_value = DEFAULT_EXPERIMENT_CSV)]
    pub csv: PathBuf,

    /// Seed for the run order
    #[arg(long, default_value_t = DEFAULT_EXPERIMENT_SEED)]
    pub seed: u64,

    /// Runs per algorithm
    #[arg(long, default_value_t = DEFAULT_REPS_PER_CELL)]
    pub reps_per_cell: usize,

    /// Algorithms to include
    #[arg(long, value_delimiter = ',', default_value = "naive,blocked,strassen")]
    pub algorithms: Vec<Algorithm>,

    #[arg(long, default_value_t = DEFAULT_N)]
    pub n: usize,

    #[arg(long)]
    pub a: Option<PathBuf>,

    #[arg(long)]
    pub b: Option<PathBuf>,

    #[arg(long, default_value_t = BLOCK_SIZE)]
    pub block_size: usize,

    #[arg(long, default_value_t = LEAF_SIZE)]
    pub leaf_size: usize,
}

impl ExperimentArgs {
    pub fn into_config(self) -> ExperimentConfig {
        let (default_a, default_b) = default_input_paths(self.n);
        ExperimentConfig {
            algorithms: self.algorithms,
            reps_per_cell: self.reps_per_cell,
            seed: self.seed,
            n: self.n,
            a_path: self.a.unwrap_or(default_a),
            b_path: self.b.unwrap_or(default_b),
            csv_path: self.csv,
            tuning: Tuning {
                block_size: self.block_size,
                leaf_size: self.leaf_size,
            },
            ..ExperimentConfig::default()
        }
    }
}

/// Arguments of `generate_matrices`.
#[derive(Debug, Parser)]
#[command(about = "Write reproducible standard-normal A_<N>.csv and B_<N>.csv")]
pub struct GenerateArgs {
    #[arg(long, default_value_t = DEFAULT_N)]
    pub n: usize,

    #[arg(long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Output directory
    #[arg(long, default_value = ".")]
    pub dir: PathBuf,
}

/// Installs a stderr `tracing` subscriber; `RUST_LOG` overrides the `warn` default.
pub fn init_tracing() {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy();
    // A second initialization (e.g. from tests) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

/// Entry point of the per-algorithm programs.
pub fn bench_main(algorithm: Algorithm) -> ExitCode {
    init_tracing();
    let config = match parse_args::<BenchArgs>() {
        Ok(args) => args.into_config(algorithm),
        Err(code) => return code,
    };
    let stdout = io::stdout();
    finish(run_benchmark(&config, &mut stdout.lock()).map(drop))
}

/// Entry point of `run_experiment`.
pub fn experiment_main() -> ExitCode {
    init_tracing();
    let config = match parse_args::<ExperimentArgs>() {
        Ok(args) => args.into_config(),
        Err(code) => return code,
    };
    let stdout = io::stdout();
    finish(run_experiment(&config, &mut stdout.lock()).map(drop))
}

/// Entry point of `generate_matrices`.
pub fn generate_main() -> ExitCode {
    init_tracing();
    let args = match parse_args::<GenerateArgs>() {
        Ok(args) => args,
        Err(code) => return code,
    };
    let result = generate_inputs(&args.dir, args.n, args.seed).map(|(a, b)| {
        println!(
            "Generated {} and {} with seed={}, size={}x{}.",
            a.display(),
            b.display(),
            args.seed,
            args.n,
            args.n
        );
    });
    finish(result)
}

/// Parses the process arguments, printing `clap`'s message on failure.
fn parse_args<T: Parser>() -> std::result::Result<T, ExitCode> {
    T::try_parse().map_err(|err| {
        let _ = err.print();
        ExitCode::from(usage_status(&err))
    })
}

/// Help and version requests succeed; every other usage error is status 1.
fn usage_status(err: &clap::Error) -> u8 {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
        _ => 1,
    }
}

fn finish(result: Result<()>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
