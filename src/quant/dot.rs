//! Dot products over quantized vectors.
//!
//! With `k = min - a·Δ`, every reconstruction is `x̂_i = Δ·c_i + k`, so
//!
//! ```text
//! ⟨x̂, ŷ⟩ = Δ²·⟨cx, cy⟩ + cross(cx) + cross(cy) + index(d)
//! cross(c) = min·Δ·(Σc − d·a) − a·Δ²·Σc
//! index(d) = d·(a²Δ² + min²)
//! ```
//!
//! The cross term depends on one vector only and the index term on the scheme and
//! dimension only, so both can be computed once and cached. The per-pair work is a
//! single integer inner product.

use crate::error::{NumericError, Result};
use super::scheme::{QuantizationScheme, RoundMode};

#[inline]
fn check_dims(left: usize, right: usize) -> Result<()> {
    if left != right { return Err(NumericError::DimensionMismatch { left, right }); }
    Ok(())
}

/// Integer inner product, accumulated wide so extrapolated codes cannot overflow.
#[inline]
pub fn integer_dot(x_codes: &[i64], y_codes: &[i64]) -> i128 {
    let mut acc: i128 = 0;
    for i in 0..x_codes.len().min(y_codes.len()) { acc += (x_codes[i] as i128) * (y_codes[i] as i128); }
    acc
}

/// Per-vector correction `min·Δ·(Σc − d·a) − a·Δ²·Σc`.
pub fn cross_term(codes: &[i64], scheme: &QuantizationScheme) -> f64 {
    let sum = codes.iter().map(|&c| c as i128).sum::<i128>() as f64;
    let d = codes.len() as f64;
    let a = scheme.a() as f64;
    let delta = scheme.delta();
    scheme.min() * delta * (sum - d * a) - a * delta * delta * sum
}

/// Per-scheme correction `d·(a²Δ² + min²)` for vectors of dimension `d`.
pub fn index_term(d: usize, scheme: &QuantizationScheme) -> f64 {
    let a = scheme.a() as f64;
    let delta = scheme.delta();
    d as f64 * (a * a * delta * delta + scheme.min() * scheme.min())
}

/// Combines precomputed terms with the integer inner product.
#[inline]
pub fn combine_terms(int_dot: i128, x_cross: f64, y_cross: f64, index: f64, scheme: &QuantizationScheme) -> f64 {
    let delta = scheme.delta();
    delta * delta * int_dot as f64 + x_cross + y_cross + index
}

/// Dot product of the dequantized vectors computed from the codes alone.
/// Equals `exact_dot(dequantize(x), dequantize(y))` up to rounding.
pub fn approximate_dot_product(x_codes: &[i64], y_codes: &[i64], scheme: &QuantizationScheme) -> Result<f64> {
    check_dims(x_codes.len(), y_codes.len())?;
    Ok(combine_terms(
        integer_dot(x_codes, y_codes),
        cross_term(x_codes, scheme),
        cross_term(y_codes, scheme),
        index_term(x_codes.len(), scheme),
        scheme,
    ))
}

/// Plain sequential dot product of two real vectors.
pub fn exact_dot(x: &[f64], y: &[f64]) -> Result<f64> {
    check_dims(x.len(), y.len())?;
    let mut acc = 0.0f64;
    for (a, b) in x.iter().zip(y.iter()) { acc += a * b; }
    Ok(acc)
}

/// Worst-case `|⟨x,y⟩ − ⟨x̂,ŷ⟩|` for unit vectors of dimension `d`.
///
/// Per-component error is below `Δ` (floor/ceil) or at most `Δ/2` (round), so
/// `‖x − x̂‖ ≤ √d·ε` and the product error is at most `2√d·ε + d·ε²`.
pub fn dot_error_bound(d: usize, delta: f64, mode: RoundMode) -> f64 {
    let eps = match mode {
        RoundMode::Floor | RoundMode::Ceil => delta,
        RoundMode::Round => delta / 2.0,
    };
    let root_d = (d as f64).sqrt();
    2.0 * root_d * eps + d as f64 * eps * eps
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quant::codec::backward;

    #[test]
    fn matches_dequantized_dot_on_fixed_codes() {
        let s = QuantizationScheme::int8_unit();
        let x = [-128i64, -3, 0, 64, 127];
        let y = [5i64, 127, -128, -1, 30];
        let xd: Vec<f64> = x.iter().map(|&c| backward(c, &s)).collect();
        let yd: Vec<f64> = y.iter().map(|&c| backward(c, &s)).collect();
        let direct = exact_dot(&xd, &yd).unwrap();
        let approx = approximate_dot_product(&x, &y, &s).unwrap();
        assert!((direct - approx).abs() < 1e-9, "direct={} approx={}", direct, approx);
    }

    #[test]
    fn rounding_bound_is_tighter() {
        let delta = 2.0 / 255.0;
        let d = 5;
        let round = dot_error_bound(d, delta, RoundMode::Round);
        let floor = dot_error_bound(d, delta, RoundMode::Floor);
        assert!((round - ((d as f64).sqrt() * delta + d as f64 * delta * delta / 4.0)).abs() < 1e-15);
        assert!((floor - (2.0 * (d as f64).sqrt() * delta + d as f64 * delta * delta)).abs() < 1e-15);
        assert!(round < floor);
    }

    #[test]
    fn dimension_mismatch_is_reported() {
        let s = QuantizationScheme::int8_unit();
        assert_eq!(approximate_dot_product(&[1, 2], &[1], &s), Err(NumericError::DimensionMismatch { left: 2, right: 1 }));
        assert_eq!(exact_dot(&[1.0], &[1.0, 2.0]), Err(NumericError::DimensionMismatch { left: 1, right: 2 }));
    }

    #[test]
    fn empty_vectors_have_zero_dot() {
        let s = QuantizationScheme::int8_unit();
        assert_eq!(approximate_dot_product(&[], &[], &s).unwrap(), 0.0);
    }
}
