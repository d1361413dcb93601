//! Utility functions for two-qubit matrix algebra.
//!
//! This module contains helper functions for:
//! - Matrix operations (Kronecker product, trace, outer product, adjoint).
//! - Shape and tolerance checks shared by gates and registers.
//! - Spectral queries on Hermitian matrices.

use crate::core::errors::DimensionError;
use nalgebra::DMatrix;
use ndarray::{Array1, Array2};
use num_complex::Complex64;

/// Hilbert space dimension of a two-qubit system.
pub const DIM: usize = 4;

/// Computes the Kronecker (Tensor) product of two matrices.
///
/// If `A` is an $m \times n$ matrix and `B` is a $p \times q$ matrix,
/// the result is an $mp \times nq$ matrix. The first factor indexes the
/// most significant qubit.
pub fn kronecker_product(a: &Array2<Complex64>, b: &Array2<Complex64>) -> Array2<Complex64> {
    let (m, n) = a.dim();
    let (p, q) = b.dim();

    Array2::from_shape_fn((m * p, n * q), |(row, col)| {
        a[[row / p, col / q]] * b[[row % p, col % q]]
    })
}

/// Computes the trace of a matrix (sum of diagonal elements).
pub fn trace(matrix: &Array2<Complex64>) -> Complex64 {
    matrix.diag().sum()
}

/// Conjugate transpose $M^\dagger$.
pub fn dagger(matrix: &Array2<Complex64>) -> Array2<Complex64> {
    matrix.t().mapv(|x| x.conj())
}

/// Computes the outer product of two vectors $|a\rangle\langle b|$.
pub fn outer_product(a: &Array1<Complex64>, b: &Array1<Complex64>) -> Array2<Complex64> {
    Array2::from_shape_fn((a.len(), b.len()), |(i, j)| a[i] * b[j].conj())
}

/// Standard basis vector $e_k$ of the two-qubit Hilbert space.
pub fn basis_vector(k: usize) -> Array1<Complex64> {
    let mut v = Array1::<Complex64>::zeros(DIM);
    v[k] = Complex64::new(1.0, 0.0);
    v
}

/// Rank-1 projector $e_k e_k^T$ onto the `k`-th computational basis state.
pub fn projector(k: usize) -> Array2<Complex64> {
    let v = basis_vector(k);
    outer_product(&v, &v)
}

/// Largest entrywise modulus of `a - b`. NaN if any entry is NaN.
pub fn max_deviation(a: &Array2<Complex64>, b: &Array2<Complex64>) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y).norm())
        .fold(0.0, |acc, d| if d.is_nan() || d > acc { d } else { acc })
}

/// Fails unless `matrix` is exactly 4x4.
pub fn ensure_two_qubit_shape<T>(matrix: &Array2<T>) -> Result<(), DimensionError> {
    let (rows, cols) = matrix.dim();
    if rows != DIM || cols != DIM {
        return Err(DimensionError { rows, cols });
    }
    Ok(())
}

/// Checks if a matrix is Hermitian
pub fn is_hermitian(mat: &Array2<Complex64>, tol: f64) -> bool {
    mat.iter()
        .zip(mat.t().iter())
        .all(|(a, b)| (a - b.conj()).norm() < tol)
}

/// Eigenvalues of a Hermitian matrix, in no particular order.
///
/// Only the lower triangle is read, so the result is meaningless for
/// non-Hermitian input.
pub fn hermitian_eigenvalues(mat: &Array2<Complex64>) -> Vec<f64> {
    let (rows, cols) = mat.dim();

    // Convert ndarray -> nalgebra
    let na_mat = DMatrix::from_fn(rows, cols, |r, c| mat[[r, c]]);

    na_mat.symmetric_eigenvalues().iter().copied().collect()
}
