//! # Special Linear Group
//!
//! [`SL<N, T>`] represents an element of SL(n), the `N x N` matrices with
//! determinant one. Elements are built from a vector in the Lie algebra
//! through the matrix exponential, or from an arbitrary non-singular matrix
//! divided by its determinant. Composition is the matrix product and the
//! inverse goes through an LU decomposition.
//!
//! The Lie algebra is the space of traceless `N x N` matrices. It is spanned
//! by the generators enumerated in [`SL::generator`]:
//! - `N - 1` diagonal generators `diag(..., 1, -1, ...)`
//! - one symmetric generator for every off-diagonal pair
//! - one antisymmetric generator for every off-diagonal pair
//!
//! This mirrors the factorization of SL(n) into symmetric matrices with
//! determinant one times SO(n).

use std::ops::{Mul, MulAssign};

use anyhow::bail;
use log::debug;
use nalgebra::{
    DMatrix, Dim, Dyn, Matrix, RawStorage, RealField, RowSVector, SMatrix, SVector, LU, U1,
};

use crate::error::{scalar_to_f64, AlgebraError};
use crate::expm;

mod generator;
pub mod io;
#[cfg(feature = "serde")]
mod serialize;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SL<const N: usize, T = f64> {
    matrix: SMatrix<T, N, N>,
}

impl<const N: usize, T: RealField + Copy> SL<N, T> {
    pub const SIZE: usize = N;
    pub const DIM: usize = N * N - 1;

    pub fn identity() -> Self {
        SL {
            matrix: SMatrix::identity(),
        }
    }

    /// Exponential map from the Lie algebra.
    ///
    /// `v` holds the coordinates in the generator basis and must have
    /// exactly [`SL::DIM`] entries. The traceless matrix `sum_i v[i] G_i` is
    /// exponentiated, so the result has determinant one up to rounding.
    pub fn from_algebra<R, S>(v: &Matrix<T, R, U1, S>) -> anyhow::Result<Self>
    where
        R: Dim,
        S: RawStorage<T, R>,
    {
        if v.len() != Self::DIM {
            bail!(AlgebraError::length_mismatch(Self::DIM, v.len()));
        }

        let mut t = SMatrix::<T, N, N>::zeros();
        for (i, &coefficient) in v.iter().enumerate() {
            t += Self::basis_element(i) * coefficient;
        }

        Ok(SL {
            matrix: expm::exp(&t)?,
        })
    }

    /// Alias of [`SL::from_algebra`].
    pub fn exp<R, S>(v: &Matrix<T, R, U1, S>) -> anyhow::Result<Self>
    where
        R: Dim,
        S: RawStorage<T, R>,
    {
        Self::from_algebra(v)
    }

    /// Coercing constructor: copies `m` and divides it by its determinant.
    ///
    /// Any storage is accepted; a shape other than `N x N` fails with
    /// [`AlgebraError::SizeMismatch`].
    pub fn from_matrix<R, C, S>(m: &Matrix<T, R, C, S>) -> anyhow::Result<Self>
    where
        R: Dim,
        C: Dim,
        S: RawStorage<T, R, C>,
    {
        if m.shape() != (N, N) {
            bail!(AlgebraError::shape_mismatch((N, N), m.shape()));
        }

        let mut matrix = SMatrix::<T, N, N>::from_fn(|r, c| m[(r, c)]);
        Self::coerce(&mut matrix)?;
        Ok(SL { matrix })
    }

    /// Divides `m` in place by its determinant, rejecting matrices whose
    /// determinant is within machine precision of zero.
    pub fn coerce(m: &mut SMatrix<T, N, N>) -> anyhow::Result<()> {
        Self::coerce_with_tolerance(m, T::default_epsilon())
    }

    /// Divides `m` in place by its determinant `d`.
    ///
    /// `d` must be finite, non-zero, and satisfy `|d| > tolerance * prod_i r_i`
    /// where `r_i` is the absolute sum of row `i`. The product bounds `|d|`
    /// from above, so the check does not depend on how the input is scaled.
    /// It is evaluated on logarithms and cannot overflow.
    ///
    /// A matrix that is already on SL(n) up to rounding, such as a parsed
    /// text form, comes back with determinant one up to the same rounding.
    /// In general the result has determinant `d^(1 - N)`.
    pub fn coerce_with_tolerance(m: &mut SMatrix<T, N, N>, tolerance: T) -> anyhow::Result<()> {
        let det = dense_lu(m).determinant();
        if !det.is_finite() || det.is_zero() || relative_log_det(m, det) <= tolerance.ln() {
            bail!(AlgebraError::DegenerateMatrix {
                determinant: scalar_to_f64(det),
            });
        }

        debug!("coerce: dividing by determinant {}", det);
        *m /= det;
        Ok(())
    }

    /// Group inverse, computed from an LU decomposition of the matrix.
    pub fn inverse(&self) -> anyhow::Result<Self> {
        let lu = dense_lu(&self.matrix);
        let Some(inverse) = lu.try_inverse() else {
            bail!(AlgebraError::DegenerateMatrix {
                determinant: scalar_to_f64(lu.determinant()),
            });
        };

        Ok(SL {
            matrix: SMatrix::from_column_slice(inverse.as_slice()),
        })
    }

    pub fn determinant(&self) -> T {
        dense_lu(&self.matrix).determinant()
    }

    pub fn matrix(&self) -> &SMatrix<T, N, N> {
        &self.matrix
    }

    pub fn into_matrix(self) -> SMatrix<T, N, N> {
        self.matrix
    }
}

/// `ln |det| - sum_i ln r_i` with `r_i` the absolute row sums of `m`.
/// A non-zero determinant implies every row sum is positive.
fn relative_log_det<const N: usize, T: RealField + Copy>(m: &SMatrix<T, N, N>, det: T) -> T {
    m.row_iter().fold(det.abs().ln(), |acc, row| {
        acc - row.iter().fold(T::zero(), |sum, &v| sum + v.abs()).ln()
    })
}

// LU on a runtime-sized copy; `DimMin` for `Const<N>` only resolves for concrete N.
fn dense_lu<const N: usize, T: RealField + Copy>(m: &SMatrix<T, N, N>) -> LU<T, Dyn, Dyn> {
    DMatrix::from_column_slice(N, N, m.as_slice()).lu()
}

impl<const N: usize, T: RealField + Copy> Default for SL<N, T> {
    fn default() -> Self {
        Self::identity()
    }
}

impl<const N: usize, T: RealField + Copy> Mul<&SL<N, T>> for &SL<N, T> {
    type Output = SL<N, T>;

    fn mul(self, rhs: &SL<N, T>) -> SL<N, T> {
        SL {
            matrix: self.matrix * rhs.matrix,
        }
    }
}

impl<const N: usize, T: RealField + Copy> Mul for SL<N, T> {
    type Output = SL<N, T>;

    fn mul(self, rhs: SL<N, T>) -> SL<N, T> {
        &self * &rhs
    }
}

impl<const N: usize, T: RealField + Copy> MulAssign<&SL<N, T>> for SL<N, T> {
    fn mul_assign(&mut self, rhs: &SL<N, T>) {
        self.matrix = self.matrix * rhs.matrix;
    }
}

impl<const N: usize, T: RealField + Copy> MulAssign for SL<N, T> {
    fn mul_assign(&mut self, rhs: SL<N, T>) {
        *self *= &rhs;
    }
}

impl<const N: usize, T: RealField + Copy> Mul<&SVector<T, N>> for &SL<N, T> {
    type Output = SVector<T, N>;

    fn mul(self, rhs: &SVector<T, N>) -> SVector<T, N> {
        self.matrix * rhs
    }
}

impl<const N: usize, T: RealField + Copy> Mul<SVector<T, N>> for SL<N, T> {
    type Output = SVector<T, N>;

    fn mul(self, rhs: SVector<T, N>) -> SVector<T, N> {
        &self * &rhs
    }
}

impl<const N: usize, T: RealField + Copy> Mul<&SL<N, T>> for &RowSVector<T, N> {
    type Output = RowSVector<T, N>;

    fn mul(self, rhs: &SL<N, T>) -> RowSVector<T, N> {
        self * rhs.matrix
    }
}

impl<const N: usize, T: RealField + Copy> Mul<SL<N, T>> for RowSVector<T, N> {
    type Output = RowSVector<T, N>;

    fn mul(self, rhs: SL<N, T>) -> RowSVector<T, N> {
        &self * &rhs
    }
}
