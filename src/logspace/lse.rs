use crate::error::{check_input, Result};

#[inline]
fn max_of(x: &[f64]) -> f64 {
    x.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}

/// `ln(Σ exp(x_i))` evaluated as `c + ln(Σ exp(x_i - c))` with `c = max(x)`.
///
/// After the shift the largest exponent is exactly zero, so `exp` cannot overflow and
/// the sum is at least 1; only negligible terms can underflow.
/// An infinite maximum is returned as-is: `+inf` dominates, and an all-`-inf` input has
/// no mass at all.
pub fn log_sum_exp(x: &[f64]) -> Result<f64> {
    check_input(x)?;
    let c = max_of(x);
    if c.is_infinite() { return Ok(c); }
    let mut sum = 0.0f64;
    for &v in x { sum += (v - c).exp(); }
    Ok(c + sum.ln())
}

/// Binary form of [`log_sum_exp`]: `ln(e^a + e^b)`. NaN in either operand yields NaN.
pub fn log_add_exp(a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() { return f64::NAN; }
    let m = a.max(b);
    if m.is_infinite() { return m; }
    m + ((a - m).exp() + (b - m).exp()).ln()
}
