use rand::Rng;
use crate::error::{NumericError, Result};

/// Draws an index with probability proportional to `weights[i]` by walking the CDF.
/// Weights need not be normalized but must be finite, non-negative and not all zero.
pub fn sample_categorical<R: Rng + ?Sized>(weights: &[f64], rng: &mut R) -> Result<usize> {
    if weights.is_empty() { return Err(NumericError::EmptyInput); }
    if weights.iter().any(|w| !w.is_finite() || *w < 0.0) { return Err(NumericError::InvalidProbabilities); }
    let total: f64 = weights.iter().sum();
    if !(total > 0.0) { return Err(NumericError::InvalidProbabilities); }
    let r: f64 = rng.gen::<f64>() * total;
    let mut cdf = 0.0f64;
    let mut last = 0usize;
    for (i, &w) in weights.iter().enumerate() {
        if w == 0.0 { continue; }
        cdf += w;
        last = i;
        if r < cdf { return Ok(i); }
    }
    // rounding left r just past the accumulated total
    Ok(last)
}
