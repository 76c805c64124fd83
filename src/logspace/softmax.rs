use crate::error::{check_input, NumericError, Result};
use super::lse::log_sum_exp;

/// Stable softmax: `p_i = exp(x_i - LSE(x))`.
///
/// Entries equal to `+inf` split the whole mass evenly between them. An input with
/// every entry at `-inf` has no distribution and is rejected.
pub fn softmax(x: &[f64]) -> Result<Vec<f64>> {
    let lse = log_sum_exp(x)?;
    if lse == f64::NEG_INFINITY { return Err(NumericError::InvalidProbabilities); }
    if lse == f64::INFINITY {
        let n = x.iter().filter(|&&v| v == f64::INFINITY).count() as f64;
        return Ok(x.iter().map(|&v| if v == f64::INFINITY { 1.0 / n } else { 0.0 }).collect());
    }
    Ok(x.iter().map(|&v| (v - lse).exp()).collect())
}

/// `x_i - LSE(x)`, the log of [`softmax`] without the round trip through `exp`.
pub fn log_softmax(x: &[f64]) -> Result<Vec<f64>> {
    let lse = log_sum_exp(x)?;
    if lse == f64::NEG_INFINITY { return Err(NumericError::InvalidProbabilities); }
    if lse == f64::INFINITY {
        let n = x.iter().filter(|&&v| v == f64::INFINITY).count() as f64;
        let share = -n.ln();
        return Ok(x.iter().map(|&v| if v == f64::INFINITY { share } else { f64::NEG_INFINITY }).collect());
    }
    Ok(x.iter().map(|&v| v - lse).collect())
}

/// Softmax of `x / tau`. Small `tau` sharpens towards the argmax, large `tau` flattens.
pub fn softmax_with_temperature(x: &[f64], tau: f64) -> Result<Vec<f64>> {
    if !(tau.is_finite() && tau > 0.0) { return Err(NumericError::InvalidTemperature(tau)); }
    let scaled: Vec<f64> = x.iter().map(|v| v / tau).collect();
    softmax(&scaled)
}

/// Textbook `exp(x_i) / Σ exp(x_j)`. Overflows to `inf/inf` or underflows to `0/0`
/// for large-magnitude inputs and then returns NaN entries. Kept for comparison only.
pub fn naive_softmax(x: &[f64]) -> Result<Vec<f64>> {
    check_input(x)?;
    let exps: Vec<f64> = x.iter().map(|v| v.exp()).collect();
    let sum: f64 = exps.iter().sum();
    Ok(exps.into_iter().map(|e| e / sum).collect())
}
