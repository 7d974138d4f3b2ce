//! Reproducible random input matrices.

use std::path::{Path, PathBuf};

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, StandardNormal};
use tracing::info;

use crate::error::Result;
use crate::harness::default_input_paths;
use crate::matrix::Matrix;

/// Seed of the reference inputs.
pub const DEFAULT_SEED: u64 = 2025;

/// `n x n` matrix of standard-normal samples, fully determined by `seed`.
pub fn generate_matrix(n: usize, seed: u64) -> Matrix {
    let mut rng = StdRng::seed_from_u64(seed);
    Matrix::from_fn(n, |_, _| StandardNormal.sample(&mut rng))
}

/// Seeds for A and B derived from one experiment seed.
pub fn operand_seeds(seed: u64) -> (u64, u64) {
    (seed, seed.rotate_left(32) ^ 0xD1B5_4A32_D192_ED03)
}

/// Writes `A_<n>.csv` and `B_<n>.csv` into `dir` and returns their paths.
pub fn generate_inputs(dir: &Path, n: usize, seed: u64) -> Result<(PathBuf, PathBuf)> {
    let (seed_a, seed_b) = operand_seeds(seed);
    let (a_name, b_name) = default_input_paths(n);
    let a_path = dir.join(a_name);
    let b_path = dir.join(b_name);

    generate_matrix(n, seed_a).write_csv(&a_path)?;
    generate_matrix(n, seed_b).write_csv(&b_path)?;

    info!(n, seed, dir = %dir.display(), "generated input matrices");
    Ok((a_path, b_path))
}
