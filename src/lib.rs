// Stable log-space arithmetic and affine scalar quantization
pub mod error;
pub mod logspace;
pub mod quant;
pub mod random;
pub mod experiment;

pub use error::{NumericError, Result};
