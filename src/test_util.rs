//! Helpers shared by the unit tests.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::harness::default_input_paths;
use crate::matrix::Matrix;

static NEXT_DIR: AtomicUsize = AtomicUsize::new(0);

/// Fresh, empty directory under the system temp dir.
pub(crate) fn scratch_dir(label: &str) -> PathBuf {
    let id = NEXT_DIR.fetch_add(1, Ordering::Relaxed);
    let dir = std::env::temp_dir().join(format!(
        "matmul_bench_{label}_{}_{id}",
        std::process::id()
    ));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

/// Small integer entries, so every partial sum is exact in `f64`.
pub(crate) fn make_small_matrix(n: usize) -> Vec<f64> {
    let mut out = Vec::with_capacity(n * n);
    for i in 0..n {
        for j in 0..n {
            out.push(((i * 3 + j * 5) % 7) as f64);
        }
    }
    out
}

pub(crate) fn make_random_matrix(n: usize, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n * n).map(|_| rng.gen_range(-1.0..1.0)).collect()
}

/// Element-wise agreement with a tolerance relative to the entry magnitude.
pub(crate) fn assert_close(expected: &[f64], actual: &[f64]) {
    assert_eq!(expected.len(), actual.len());
    for (idx, (x, y)) in expected.iter().zip(actual).enumerate() {
        let scale = 1.0 + x.abs().max(y.abs());
        assert!((x - y).abs() <= 1.0e-9 * scale, "idx={idx} x={x} y={y}");
    }
}

/// Writes `A_<n>.csv` / `B_<n>.csv` into `dir` and returns their paths.
pub(crate) fn write_inputs(dir: &Path, n: usize) -> (PathBuf, PathBuf) {
    let a = Matrix::from_fn(n, |i, j| ((i + 2 * j) % 5) as f64 - 1.0);
    let b = Matrix::from_fn(n, |i, j| ((3 * i + j) % 4) as f64 * 0.5);
    let (a_name, b_name) = default_input_paths(n);
    let a_path = dir.join(a_name);
    let b_path = dir.join(b_name);
    a.write_csv(&a_path).unwrap();
    b.write_csv(&b_path).unwrap();
    (a_path, b_path)
}
