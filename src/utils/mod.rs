//! Small public helpers for callers working with runtime-sized matrices.
//! `make_zero` and `make_identity` are exported for downstream code; the
//! crate itself builds its matrices through nalgebra's generic constructors.

use anyhow::bail;
use nalgebra::allocator::Allocator;
use nalgebra::{DMatrix, DefaultAllocator, Dim, Matrix, OVector, RealField, Storage, U1};

use crate::error::AlgebraError;

/// Zero matrix with `rows` x `cols` entries.
pub fn make_zero<T: RealField + Copy>(rows: usize, cols: usize) -> DMatrix<T> {
    DMatrix::zeros(rows, cols)
}

/// Identity matrix of order `size`.
pub fn make_identity<T: RealField + Copy>(size: usize) -> DMatrix<T> {
    DMatrix::identity(size, size)
}

/// Scales `v` to unit Euclidean length, `v / sqrt(v . v)`.
pub fn unit<T, R, S>(v: &Matrix<T, R, U1, S>) -> anyhow::Result<OVector<T, R>>
where
    T: RealField + Copy,
    R: Dim,
    S: Storage<T, R>,
    DefaultAllocator: Allocator<R>,
{
    let length = v.dot(v).sqrt();
    if length.is_zero() || !length.is_finite() {
        bail!(AlgebraError::ZeroVector);
    }
    Ok(v / length)
}
