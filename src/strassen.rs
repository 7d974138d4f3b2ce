//! Strassen's divide-and-conquer multiplication.
//!
//! Each level splits A and B into quadrants and forms seven half-size products
//! instead of eight:
//!
//! ```text
//! M1 = (A11 + A22)(B11 + B22)    C11 = M1 + M4 - M5 + M7
//! M2 = (A21 + A22) B11           C12 = M3 + M5
//! M3 = A11 (B12 - B22)           C21 = M2 + M4
//! M4 = A22 (B21 - B11)           C22 = M1 - M2 + M3 + M6
//! M5 = (A11 + A12) B22
//! M6 = (A21 - A11)(B11 + B12)
//! M7 = (A12 - A22)(B21 + B22)
//! ```
//!
//! giving O(n^log2(7)) ~ O(n^2.807) multiplications at the cost of 18 extra
//! quadrant additions and fresh temporaries per level. Below the leaf size the
//! recursion stops and [`matmul_naive`] computes the block directly.
//!
//! Every call is a pure function of its inputs and returns a newly allocated
//! buffer. A level whose dimension is odd is zero-padded by one row and column,
//! multiplied, and cropped back, so any `n` is accepted.
//!
//! # References
//!
//! - V. Strassen, "Gaussian elimination is not optimal" (1969)

use crate::matmul::matmul_naive;

/// Default dimension at or below which the recursion switches to [`matmul_naive`].
pub const LEAF_SIZE: usize = 64;

/// Computes `A x B` for `n x n` row-major inputs, recursing while `n > leaf`.
///
/// For `n <= leaf` the result is exactly that of [`matmul_naive`].
///
/// # Panics
///
/// Panics if `leaf` is zero.
pub fn strassen(a: &[f64], b: &[f64], n: usize, leaf: usize) -> Vec<f64> {
    assert!(leaf > 0, "leaf size must be non-zero");
    debug_assert_eq!(a.len(), n * n);
    debug_assert_eq!(b.len(), n * n);
    multiply(a, b, n, leaf)
}

fn multiply(a: &[f64], b: &[f64], n: usize, leaf: usize) -> Vec<f64> {
    if n <= leaf {
        let mut c = vec![0.0f64; n * n];
        matmul_naive(a, b, &mut c, n);
        return c;
    }

    if n % 2 == 1 {
        let padded = n + 1;
        let c = multiply(&pad(a, n, padded), &pad(b, n, padded), padded, leaf);
        return crop(&c, padded, n);
    }

    let h = n / 2;
    let [a11, a12, a21, a22] = split(a, n);
    let [b11, b12, b21, b22] = split(b, n);

    let m1 = multiply(&add(&a11, &a22), &add(&b11, &b22), h, leaf);
    let m2 = multiply(&add(&a21, &a22), &b11, h, leaf);
    let m3 = multiply(&a11, &sub(&b12, &b22), h, leaf);
    let m4 = multiply(&a22, &sub(&b21, &b11), h, leaf);
    let m5 = multiply(&add(&a11, &a12), &b22, h, leaf);
    let m6 = multiply(&sub(&a21, &a11), &add(&b11, &b12), h, leaf);
    let m7 = multiply(&sub(&a12, &a22), &add(&b21, &b22), h, leaf);

    // Left-to-right, as written in the module docs.
    let c11 = add(&sub(&add(&m1, &m4), &m5), &m7);
    let c12 = add(&m3, &m5);
    let c21 = add(&m2, &m4);
    let c22 = add(&add(&sub(&m1, &m2), &m3), &m6);

    join(&c11, &c12, &c21, &c22, h)
}

/// Copies the four `n/2 x n/2` quadrants of an even-sized matrix: [11, 12, 21, 22].
fn split(m: &[f64], n: usize) -> [Vec<f64>; 4] {
    let h = n / 2;
    let mut q11 = Vec::with_capacity(h * h);
    let mut q12 = Vec::with_capacity(h * h);
    let mut q21 = Vec::with_capacity(h * h);
    let mut q22 = Vec::with_capacity(h * h);

    for (i, row) in m.chunks_exact(n).enumerate() {
        let (left, right) = row.split_at(h);
        if i < h {
            q11.extend_from_slice(left);
            q12.extend_from_slice(right);
        } else {
            q21.extend_from_slice(left);
            q22.extend_from_slice(right);
        }
    }

    [q11, q12, q21, q22]
}

/// Assembles four `h x h` quadrants into a `2h x 2h` matrix.
fn join(c11: &[f64], c12: &[f64], c21: &[f64], c22: &[f64], h: usize) -> Vec<f64> {
    let n = 2 * h;
    let mut out = Vec::with_capacity(n * n);
    for (left, right) in c11.chunks_exact(h).zip(c12.chunks_exact(h)) {
        out.extend_from_slice(left);
        out.extend_from_slice(right);
    }
    for (left, right) in c21.chunks_exact(h).zip(c22.chunks_exact(h)) {
        out.extend_from_slice(left);
        out.extend_from_slice(right);
    }
    out
}

#[inline]
fn add(x: &[f64], y: &[f64]) -> Vec<f64> {
    x.iter().zip(y).map(|(p, q)| p + q).collect()
}

#[inline]
fn sub(x: &[f64], y: &[f64]) -> Vec<f64> {
    x.iter().zip(y).map(|(p, q)| p - q).collect()
}

/// Embeds an `n x n` matrix in the top-left corner of a zeroed `size x size` one.
fn pad(m: &[f64], n: usize, size: usize) -> Vec<f64> {
    let mut out = vec![0.0f64; size * size];
    for (src, dst) in m.chunks_exact(n).zip(out.chunks_exact_mut(size)) {
        dst[..n].copy_from_slice(src);
    }
    out
}

/// Top-left `n x n` corner of a `size x size` matrix.
fn crop(m: &[f64], size: usize, n: usize) -> Vec<f64> {
    let mut out = Vec::with_capacity(n * n);
    for row in m.chunks_exact(size).take(n) {
        out.extend_from_slice(&row[..n]);
    }
    out
}
