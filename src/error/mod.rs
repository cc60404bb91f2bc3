use thiserror::Error;

/// Failures raised by the exponential, the generator basis and the SL(n) element.
///
/// Operations return `anyhow::Result`; callers that need to branch on the
/// failure kind can `downcast_ref::<AlgebraError>()` the returned error.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AlgebraError {
    #[error("Size mismatch: expected {expected}, found {found}")]
    SizeMismatch { expected: String, found: String },

    #[error("Generator index {index} out of range for dimension {dim}")]
    IndexOutOfRange { index: usize, dim: usize },

    #[error("Degenerate matrix: determinant {determinant} cannot be normalized")]
    DegenerateMatrix { determinant: f64 },

    #[error("Cannot normalize a zero vector")]
    ZeroVector,

    #[error("Matrix contains non-finite entries")]
    NonFinite,

    #[error("Scaling factor 2^{exponent} overflows the scalar type")]
    ScaleOverflow { exponent: u32 },

    #[error("Taylor series did not converge within {terms} terms")]
    NotConverged { terms: usize },

    #[error("Parse error: {0}")]
    Parse(String),
}

impl AlgebraError {
    pub(crate) fn shape_mismatch(expected: (usize, usize), found: (usize, usize)) -> Self {
        AlgebraError::SizeMismatch {
            expected: format!("{}x{}", expected.0, expected.1),
            found: format!("{}x{}", found.0, found.1),
        }
    }

    pub(crate) fn length_mismatch(expected: usize, found: usize) -> Self {
        AlgebraError::SizeMismatch {
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }
}

/// Lossy view of a scalar for error reporting.
pub(crate) fn scalar_to_f64<T: nalgebra::RealField + Copy>(value: T) -> f64 {
    nalgebra::try_convert::<T, f64>(value).unwrap_or(f64::NAN)
}
