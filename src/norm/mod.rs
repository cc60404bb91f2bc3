//! # Induced Matrix Norms
//!
//! Row-sum and column-sum norms used by the scaling step and the convergence
//! test of the matrix exponential, and by the degeneracy check of the
//! SL(n) coercion.

use nalgebra::{Dim, Matrix, RawStorage, RealField};

pub trait MatrixNorm {
    type Item;

    /// Maximum over rows of the sum of absolute values in that row.
    fn norm_inf(&self) -> Self::Item;

    /// Maximum over columns of the sum of absolute values in that column.
    fn norm_1(&self) -> Self::Item;
}

impl<T, R, C, S> MatrixNorm for Matrix<T, R, C, S>
where
    T: RealField + Copy,
    R: Dim,
    C: Dim,
    S: RawStorage<T, R, C>,
{
    type Item = T;

    fn norm_inf(&self) -> T {
        self.row_iter()
            .map(|row| row.iter().fold(T::zero(), |acc, &v| acc + v.abs()))
            .fold(T::zero(), max_sum)
    }

    fn norm_1(&self) -> T {
        self.column_iter()
            .map(|col| col.iter().fold(T::zero(), |acc, &v| acc + v.abs()))
            .fold(T::zero(), max_sum)
    }
}

/// Larger of two absolute sums. A NaN or infinite sum is kept, so a
/// non-finite entry anywhere makes the norm non-finite.
pub(crate) fn max_sum<T: RealField + Copy>(current: T, sum: T) -> T {
    if sum > current || !sum.is_finite() {
        sum
    } else {
        current
    }
}

/// Row sum norm of `m`.
pub fn norm_inf<M: MatrixNorm + ?Sized>(m: &M) -> M::Item {
    m.norm_inf()
}

/// Column sum norm of `m`.
pub fn norm_1<M: MatrixNorm + ?Sized>(m: &M) -> M::Item {
    m.norm_1()
}
