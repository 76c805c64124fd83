use serde::{Deserialize, Serialize};

use crate::error::{NumericError, Result};
use super::codec::{backward, forward};
use super::dot::cross_term;
use super::scheme::{QuantizationScheme, RoundMode};

/// Codes of one vector plus its cached cross term.
/// The cross term is only meaningful under the scheme the codes were produced with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuantizedVector {
    pub codes: Vec<i64>,
    pub cross_term: f64,
}

impl QuantizedVector {
    pub fn from_codes(codes: Vec<i64>, scheme: &QuantizationScheme) -> Self {
        let cross_term = cross_term(&codes, scheme);
        Self { codes, cross_term }
    }

    pub fn dim(&self) -> usize { self.codes.len() }

    /// Lossy reconstruction of the source vector.
    pub fn dequantize(&self, scheme: &QuantizationScheme) -> Vec<f64> {
        dequantize_vector(&self.codes, scheme)
    }
}

/// Element-wise [`forward`]. NaN entries are rejected; empty vectors are allowed.
pub fn quantize_vector(x: &[f64], scheme: &QuantizationScheme, mode: RoundMode) -> Result<QuantizedVector> {
    if let Some(index) = x.iter().position(|v| v.is_nan()) {
        return Err(NumericError::NotANumber { index });
    }
    let codes = x.iter().map(|&v| forward(v, scheme, mode)).collect();
    Ok(QuantizedVector::from_codes(codes, scheme))
}

/// Element-wise [`backward`].
pub fn dequantize_vector(codes: &[i64], scheme: &QuantizationScheme) -> Vec<f64> {
    codes.iter().map(|&c| backward(c, scheme)).collect()
}
