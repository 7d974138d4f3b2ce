//! Conventional O(n^3) matrix multiplication (C = A x B).
//!
//! All matrices are `n x n` in row-major order.
//!
//! # Strategies
//!
//! | Function | Strategy | Output contract |
//! |----------|----------|-----------------|
//! | [`matmul_naive`] | i-j-k loops, scalar accumulator per cell | Overwrites every cell of `c` |
//! | [`matmul_blocked`] | Square tiles over (i, k, j), i-k-j inside a tile | Accumulates into `c`, which must be zeroed |
//!
//! # Cache-aware blocking
//!
//! With `BLOCK_SIZE = 64` one tile of each of A, B and C is 3 x 64 x 64 x 8
//! bytes = 96KB, so the B and C tiles touched by the inner j loop stay in L2
//! while a row of A is streamed. The tiles only change locality. Bitwise
//! equality with [`matmul_naive`] is not part of the contract; compare with a
//! tolerance.

/// Default tile edge for [`matmul_blocked`].
pub const BLOCK_SIZE: usize = 64;

#[inline]
pub(crate) fn check_dims(a: &[f64], b: &[f64], c: &[f64], n: usize) {
    let len = n * n;
    debug_assert_eq!(a.len(), len);
    debug_assert_eq!(b.len(), len);
    debug_assert_eq!(c.len(), len);
}

/// Naive multiplication (i-j-k order).
///
/// Each output cell is the dot product of row `i` of A with column `j` of B,
/// accumulated in a local starting at `0.0`. Every cell of `c` is written, so
/// the previous contents do not matter.
pub fn matmul_naive(a: &[f64], b: &[f64], c: &mut [f64], n: usize) {
    check_dims(a, b, c, n);
    for i in 0..n {
        let a_row = i * n;
        for j in 0..n {
            let mut sum = 0.0f64;
            for k in 0..n {
                sum += a[a_row + k] * b[k * n + j];
            }
            c[a_row + j] = sum;
        }
    }
}

/// Cache-blocked multiplication over `block x block` tiles.
///
/// Tiles are visited in (ii, kk, jj) order and each tile product runs i-k-j,
/// adding `A[i][k] * B[k][j]` straight into `C[i][j]`. `c` must be zeroed by
/// the caller; edge tiles are clipped to `n`, so `block` need not divide `n`.
///
/// # Panics
///
/// Panics if `block` is zero.
pub fn matmul_blocked(a: &[f64], b: &[f64], c: &mut [f64], n: usize, block: usize) {
    check_dims(a, b, c, n);
    assert!(block > 0, "block size must be non-zero");

    for ii in (0..n).step_by(block) {
        let i_max = (ii + block).min(n);
        for kk in (0..n).step_by(block) {
            let k_max = (kk + block).min(n);
            for jj in (0..n).step_by(block) {
                let j_max = (jj + block).min(n);

                for i in ii..i_max {
                    let row = i * n;
                    for k in kk..k_max {
                        let a_ik = a[row + k];
                        let b_row = k * n;
                        for j in jj..j_max {
                            c[row + j] += a_ik * b[b_row + j];
                        }
                    }
                }
            }
        }
    }
}
