use anyhow::bail;
use nalgebra::{RealField, SMatrix};

use super::SL;
use crate::error::AlgebraError;

/// Partition of the parameter vector into diagonal, symmetric and
/// antisymmetric generators.
impl<const N: usize, T: RealField + Copy> SL<N, T> {
    pub const COUNT_DIAG: usize = N - 1;
    pub const COUNT_SYMM: usize = (Self::DIM - Self::COUNT_DIAG) / 2;
    pub const COUNT_ASYMM: usize = Self::COUNT_SYMM;
    pub const DIAG_LIMIT: usize = Self::COUNT_DIAG;
    pub const SYMM_LIMIT: usize = Self::DIAG_LIMIT + Self::COUNT_SYMM;

    /// The `i`-th generator of the Lie algebra of traceless matrices.
    ///
    /// Indices `0..DIAG_LIMIT` are `diag(..., 1, -1, ...)` with the `+1` at
    /// `(i, i)`. Indices `DIAG_LIMIT..SYMM_LIMIT` are symmetric generators and
    /// the remaining ones antisymmetric generators (`-1` above, `+1` below the
    /// diagonal); both walk the upper triangle row by row.
    pub fn generator(i: usize) -> anyhow::Result<SMatrix<T, N, N>> {
        if i >= Self::DIM {
            bail!(AlgebraError::IndexOutOfRange {
                index: i,
                dim: Self::DIM,
            });
        }
        Ok(Self::basis_element(i))
    }

    /// All [`SL::DIM`] generators in index order.
    pub fn generators() -> impl Iterator<Item = SMatrix<T, N, N>> {
        (0..Self::DIM).map(Self::basis_element)
    }

    pub(super) fn basis_element(i: usize) -> SMatrix<T, N, N> {
        let mut result = SMatrix::<T, N, N>::zeros();
        if i < Self::DIAG_LIMIT {
            result[(i, i)] = T::one();
            result[(i + 1, i + 1)] = -T::one();
        } else if i < Self::SYMM_LIMIT {
            let (row, col) = upper_pair(N, i - Self::DIAG_LIMIT);
            result[(row, col)] = T::one();
            result[(col, row)] = T::one();
        } else {
            let (row, col) = upper_pair(N, i - Self::SYMM_LIMIT);
            result[(row, col)] = -T::one();
            result[(col, row)] = T::one();
        }
        result
    }
}

/// Unranks `offset` into the `(row, col)` pair, `row < col`, of the strict
/// upper triangle of an `n x n` matrix, counting row by row.
fn upper_pair(n: usize, offset: usize) -> (usize, usize) {
    let mut row = 0;
    let mut col = offset + 1;
    while col > n - row - 1 {
        col -= n - row - 1;
        row += 1;
    }
    (row, col + row)
}
