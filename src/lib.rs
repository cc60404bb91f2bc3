pub mod error;
pub mod expm;
pub mod norm;
pub mod sl;
pub mod utils;

#[cfg(feature = "ndarray")]
mod dense;

pub use error::AlgebraError;
pub use expm::{exp, MatrixExp, ScalingSquaring};
pub use norm::{norm_1, norm_inf, MatrixNorm};
pub use sl::SL;
