use super::scheme::{QuantizationScheme, RoundMode};

// Past 2^52 adjacent codes no longer reconstruct to distinct doubles.
const SNAP_LIMIT: f64 = 4_503_599_627_370_496.0;

/// Maps `x` to an integer code: `mode(a + (x - min) / Δ)`.
///
/// For `x` in `[min, max]` the code lands in `[a, b]`. Values outside the range extrapolate
/// past the code bounds; use [`forward_clamped`] when codes must stay in range.
/// A collapsed range (`min == max`) sends every value to `a`. The final float-to-int cast
/// saturates, so NaN maps to 0.
#[inline]
pub fn forward(x: f64, scheme: &QuantizationScheme, mode: RoundMode) -> i64 {
    let delta = scheme.delta();
    if delta == 0.0 { return scheme.a() as i64; }
    let t = mode.apply(scheme.a() as f64 + (x - scheme.min()) / delta);
    if !(t.abs() < SNAP_LIMIT) { return t as i64; }
    snap(x, t as i64, scheme, mode)
}

/// The division in [`forward`] rounds, so a value sitting on or a few ulps from a
/// reconstruction point can come out one code off. Settle the code against its
/// neighbours in the reconstruction domain so the mode's error bound holds for the
/// `x̂` a caller actually gets back.
fn snap(x: f64, k: i64, scheme: &QuantizationScheme, mode: RoundMode) -> i64 {
    let delta = scheme.delta();
    match mode {
        RoundMode::Floor => {
            let mut k = k;
            if backward(k, scheme) > x { k -= 1; } else if backward(k + 1, scheme) <= x { k += 1; }
            // x̂ is itself rounded; the upper neighbour is then within ulps of x
            if x - backward(k, scheme) >= delta { k += 1; }
            k
        }
        RoundMode::Ceil => {
            let mut k = k;
            if backward(k, scheme) < x { k += 1; } else if backward(k - 1, scheme) >= x { k -= 1; }
            if backward(k, scheme) - x >= delta { k -= 1; }
            k
        }
        RoundMode::Round => {
            let err = |c: i64| (x - backward(c, scheme)).abs();
            let mut best = k;
            for c in [k - 1, k + 1] {
                if err(c) < err(best) { best = c; }
            }
            best
        }
    }
}

/// [`forward`] followed by clamping into `[a, b]`.
#[inline]
pub fn forward_clamped(x: f64, scheme: &QuantizationScheme, mode: RoundMode) -> i64 {
    forward(x, scheme, mode).clamp(scheme.a() as i64, scheme.b() as i64)
}

/// Reconstruction `x̂ = (code - a)·Δ + min`, fused so it rounds once.
#[inline]
pub fn backward(code: i64, scheme: &QuantizationScheme) -> f64 {
    ((code - scheme.a() as i64) as f64).mul_add(scheme.delta(), scheme.min())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_ends_map_to_code_ends() {
        let s = QuantizationScheme::int8_unit();
        assert_eq!(forward(-1.0, &s, RoundMode::Floor), -128);
        assert_eq!(forward(-1.0, &s, RoundMode::Ceil), -128);
        assert_eq!(forward(1.0, &s, RoundMode::Round), 127);
        assert_eq!(backward(-128, &s), -1.0);
        assert!((backward(127, &s) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn out_of_range_extrapolates_unless_clamped() {
        let s = QuantizationScheme::uint8(0.0, 255.0).unwrap();
        assert_eq!(forward(300.0, &s, RoundMode::Floor), 300);
        assert_eq!(forward(-10.0, &s, RoundMode::Floor), -10);
        assert_eq!(forward_clamped(300.0, &s, RoundMode::Floor), 255);
        assert_eq!(forward_clamped(-10.0, &s, RoundMode::Floor), 0);
        assert_eq!(backward(300, &s), 300.0);
    }

    #[test]
    fn modes_differ_between_codes() {
        let s = QuantizationScheme::uint8(0.0, 255.0).unwrap();
        assert_eq!(forward(10.4, &s, RoundMode::Floor), 10);
        assert_eq!(forward(10.4, &s, RoundMode::Ceil), 11);
        assert_eq!(forward(10.4, &s, RoundMode::Round), 10);
        assert_eq!(forward(10.6, &s, RoundMode::Round), 11);
    }

    #[test]
    fn collapsed_range_maps_everything_to_a() {
        let s = QuantizationScheme::new(2.0, 2.0, 0, 15).unwrap();
        assert_eq!(forward(2.0, &s, RoundMode::Round), 0);
        assert_eq!(forward(9.0, &s, RoundMode::Ceil), 0);
        assert_eq!(backward(0, &s), 2.0);
    }
}
