use nalgebra::{DMatrix, RealField};
use ndarray::{Array2, ArrayBase, Data, Ix2};

use crate::expm::{exp, MatrixExp};
use crate::norm::{max_sum, MatrixNorm};

impl<A, S> MatrixNorm for ArrayBase<S, Ix2>
where
    A: RealField + Copy,
    S: Data<Elem = A>,
{
    type Item = A;

    fn norm_inf(&self) -> A {
        self.rows()
            .into_iter()
            .map(|row| row.iter().fold(A::zero(), |acc, &v| acc + v.abs()))
            .fold(A::zero(), max_sum)
    }

    fn norm_1(&self) -> A {
        self.columns()
            .into_iter()
            .map(|col| col.iter().fold(A::zero(), |acc, &v| acc + v.abs()))
            .fold(A::zero(), max_sum)
    }
}

impl<A: RealField + Copy> MatrixExp for Array2<A> {
    fn expm(&self) -> anyhow::Result<Self> {
        let (rows, cols) = self.dim();
        let m = DMatrix::from_fn(rows, cols, |r, c| self[[r, c]]);
        let e = exp(&m)?;
        Ok(Array2::from_shape_fn((rows, cols), |(r, c)| e[(r, c)]))
    }
}
