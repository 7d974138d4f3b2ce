//! Dense matrix multiplication benchmarks: naive, cache-blocked and Strassen.
//!
//! Three programs (`mm_naive`, `mm_blocked`, `mm_strassen`) load the same pair
//! of `n x n` matrices from CSV, time repeated multiplications, append one row
//! per repetition to a shared results CSV and print summary statistics. They
//! are thin wrappers over one harness ([`run_benchmark`]) parameterized by an
//! [`Algorithm`].
//!
//! # Components
//!
//! - **Kernels** ([`matmul_naive`], [`matmul_blocked`], [`strassen`]) — row-major `&[f64]` slices
//! - **Matrix I/O** ([`Matrix::load_csv`], [`Matrix::write_csv`]) — headerless comma-separated values
//! - **Statistics** ([`Summary`]) — mean, sample standard deviation, min, max
//! - **Results log** ([`append_results`]) — `language,algorithm,n,rep,time_s`
//! - **Experiment** ([`build_schedule`], [`run_experiment`]) — shuffled runs of every algorithm
//! - **Inputs** ([`generate_matrix`], [`generate_inputs`]) — seeded standard-normal matrices

mod algorithm;
pub mod cli;
mod error;
mod experiment;
mod generate;
mod harness;
mod matmul;
mod matrix;
mod results;
mod stats;
mod strassen;
#[cfg(test)]
mod test_util;

pub use algorithm::*;
pub use error::*;
pub use experiment::*;
pub use generate::*;
pub use harness::*;
pub use matmul::*;
pub use matrix::*;
pub use results::*;
pub use stats::*;
pub use strassen::*;
