//! The interchangeable multiplication strategies driven by the harness.

use std::fmt;
use std::str::FromStr;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{Error, Result};
use crate::matmul::{BLOCK_SIZE, matmul_blocked, matmul_naive};
use crate::matrix::Matrix;
use crate::strassen::{LEAF_SIZE, strassen};

/// Kernel parameters shared by every strategy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tuning {
    /// Tile edge of the blocked kernel.
    pub block_size: usize,
    /// Strassen recursion cut-over.
    pub leaf_size: usize,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            block_size: BLOCK_SIZE,
            leaf_size: LEAF_SIZE,
        }
    }
}

impl Tuning {
    pub fn validate(&self) -> Result<()> {
        if self.block_size == 0 {
            return Err(Error::Config("block size must be at least 1".into()));
        }
        if self.leaf_size == 0 {
            return Err(Error::Config("leaf size must be at least 1".into()));
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Algorithm {
    Naive,
    Blocked,
    Strassen,
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [Algorithm::Naive, Algorithm::Blocked, Algorithm::Strassen];

    /// Tag written to the `algorithm` column of the results CSV.
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Naive => "naive",
            Algorithm::Blocked => "blocked",
            Algorithm::Strassen => "strassen",
        }
    }

    /// Computes `out = a x b`.
    ///
    /// `out` is a reusable buffer that the caller zeroes before each call: the
    /// naive kernel overwrites it, the blocked kernel accumulates into it, and
    /// Strassen swaps in the freshly allocated product. In that last case the
    /// displaced buffer is returned so a timed caller can free it after
    /// stopping the clock.
    pub fn multiply(
        self,
        a: &Matrix,
        b: &Matrix,
        out: &mut Matrix,
        tuning: Tuning,
    ) -> Option<Vec<f64>> {
        let n = a.n();
        debug_assert_eq!(b.n(), n);
        debug_assert_eq!(out.n(), n);
        match self {
            Algorithm::Naive => {
                matmul_naive(a.as_slice(), b.as_slice(), out.as_mut_slice(), n);
                None
            }
            Algorithm::Blocked => {
                matmul_blocked(
                    a.as_slice(),
                    b.as_slice(),
                    out.as_mut_slice(),
                    n,
                    tuning.block_size,
                );
                None
            }
            Algorithm::Strassen => Some(out.replace_data(strassen(
                a.as_slice(),
                b.as_slice(),
                n,
                tuning.leaf_size,
            ))),
        }
    }

    /// Checks this strategy against the naive kernel on a small random input.
    ///
    /// The size is chosen so the blocked kernel has a ragged edge tile and
    /// Strassen recurses at least once through an odd level.
    pub fn verify(self, tuning: Tuning) -> Result<()> {
        tuning.validate()?;
        let n = (2 * tuning.leaf_size + 1)
            .max(tuning.block_size + 1)
            .min(257);
        let mut rng = StdRng::seed_from_u64(0x1234_5678_9ABC_DEF0 ^ n as u64);
        let a = Matrix::from_fn(n, |_, _| rng.gen_range(-1.0..1.0));
        let b = Matrix::from_fn(n, |_, _| rng.gen_range(-1.0..1.0));

        let mut expected = Matrix::zeros(n);
        Algorithm::Naive.multiply(&a, &b, &mut expected, tuning);
        let mut actual = Matrix::zeros(n);
        self.multiply(&a, &b, &mut actual, tuning);

        let max_abs_diff = expected.max_abs_diff(&actual);
        if max_abs_diff > 1.0e-9 * n as f64 {
            return Err(Error::Verification {
                algorithm: self.name(),
                max_abs_diff,
            });
        }
        Ok(())
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Algorithm::ALL
            .into_iter()
            .find(|algo| algo.name() == s)
            .ok_or_else(|| format!("unknown algorithm: {s} (expected naive, blocked or strassen)"))
    }
}
