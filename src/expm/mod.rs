//! # Matrix Exponential
//!
//! Scaling-and-squaring with a Taylor series. The input is scaled by `2^-s`
//! so that its row sum norm is at most one, the series is summed until the
//! next term no longer changes the partial sum at the working precision, and
//! the result is squared `s` times.
//!
//! The stopping rule is a convergence test rather than a fixed term count, so
//! it adapts to the magnitude of the matrix and to the precision of `T`.

use anyhow::bail;
use log::trace;
use nalgebra::allocator::Allocator;
use nalgebra::{DefaultAllocator, Dim, OMatrix, RealField};

use crate::error::AlgebraError;
use crate::norm::MatrixNorm;

/// Configuration of the scaling-and-squaring exponential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScalingSquaring {
    max_terms: Option<usize>,
}

pub struct ScalingSquaringBuilder {
    max_terms: Option<usize>,
}

impl ScalingSquaringBuilder {
    pub fn new() -> Self {
        ScalingSquaringBuilder { max_terms: None }
    }

    /// Upper bound on the number of Taylor terms. Without a bound the series
    /// runs until it converges.
    pub fn max_terms(mut self, max_terms: usize) -> Self {
        self.max_terms = Some(max_terms);
        self
    }

    pub fn build(self) -> ScalingSquaring {
        ScalingSquaring {
            max_terms: self.max_terms,
        }
    }
}

impl Default for ScalingSquaringBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ScalingSquaring {
    pub fn builder() -> ScalingSquaringBuilder {
        ScalingSquaringBuilder::new()
    }

    pub fn max_terms(&self) -> Option<usize> {
        self.max_terms
    }

    /// Computes `exp(m)` for a square matrix.
    ///
    /// Fails with [`AlgebraError::SizeMismatch`] for a runtime-sized input
    /// that is not square and with [`AlgebraError::NonFinite`] when an entry
    /// is NaN or infinite. A norm so close to the largest finite value of `T`
    /// that `2^s` itself overflows fails with [`AlgebraError::ScaleOverflow`].
    /// Nothing is computed in any of these cases.
    pub fn compute<T, D>(&self, m: &OMatrix<T, D, D>) -> anyhow::Result<OMatrix<T, D, D>>
    where
        T: RealField + Copy,
        D: Dim,
        DefaultAllocator: Allocator<D, D>,
    {
        if !m.is_square() {
            bail!(AlgebraError::shape_mismatch(
                (m.nrows(), m.nrows()),
                m.shape()
            ));
        }

        let norm = m.norm_inf();
        if !norm.is_finite() {
            bail!(AlgebraError::NonFinite);
        }

        let s = scaling_exponent(norm);
        let scale = (T::one() + T::one()).powi(s as i32);
        if !scale.is_finite() {
            bail!(AlgebraError::ScaleOverflow { exponent: s });
        }
        let (mut result, terms) = self.taylor(&(m / scale))?;
        trace!(
            "exp: norm {} scaled by 2^-{}, {} Taylor terms",
            norm,
            s,
            terms
        );

        for _ in 0..s {
            result = &result * &result;
        }
        Ok(result)
    }

    fn taylor<T, D>(&self, a: &OMatrix<T, D, D>) -> anyhow::Result<(OMatrix<T, D, D>, usize)>
    where
        T: RealField + Copy,
        D: Dim,
        DefaultAllocator: Allocator<D, D>,
    {
        let (rows, cols) = a.shape_generic();
        let mut result = OMatrix::<T, D, D>::zeros_generic(rows, cols);
        let mut f = OMatrix::<T, D, D>::identity_generic(rows, cols);
        let mut k = T::one();
        let mut terms = 0;

        while changes_sum(&result, &f) {
            if let Some(max_terms) = self.max_terms {
                if terms >= max_terms {
                    bail!(AlgebraError::NotConverged { terms: max_terms });
                }
            }
            result += &f;
            f = a * &f;
            f /= k;
            k += T::one();
            terms += 1;
        }
        Ok((result, terms))
    }
}

/// Whether adding `f` to `sum` is still visible at the working precision.
fn changes_sum<T, D>(sum: &OMatrix<T, D, D>, f: &OMatrix<T, D, D>) -> bool
where
    T: RealField + Copy,
    D: Dim,
    DefaultAllocator: Allocator<D, D>,
{
    let mut delta = sum.clone();
    delta += f;
    delta -= sum;
    delta.norm_inf() > T::zero()
}

/// `max(0, ceil(log2(norm)))`, computed by exact halving so that a zero or
/// sub-normal norm never reaches a logarithm.
pub(crate) fn scaling_exponent<T: RealField + Copy>(norm: T) -> u32 {
    let two = T::one() + T::one();
    let mut n = norm;
    let mut s = 0;
    while n > T::one() {
        n /= two;
        s += 1;
    }
    s
}

/// Matrix exponential of a square matrix with the default configuration.
pub fn exp<T, D>(m: &OMatrix<T, D, D>) -> anyhow::Result<OMatrix<T, D, D>>
where
    T: RealField + Copy,
    D: Dim,
    DefaultAllocator: Allocator<D, D>,
{
    ScalingSquaring::default().compute(m)
}

pub trait MatrixExp: Sized {
    fn expm(&self) -> anyhow::Result<Self>;
}

impl<T, D> MatrixExp for OMatrix<T, D, D>
where
    T: RealField + Copy,
    D: Dim,
    DefaultAllocator: Allocator<D, D>,
{
    fn expm(&self) -> anyhow::Result<Self> {
        exp(self)
    }
}
