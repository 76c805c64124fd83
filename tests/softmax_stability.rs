use proptest::prelude::*;
use stablemath::logspace::{log_sum_exp, naive_softmax, softmax};
use stablemath::NumericError;

#[test]
fn softmax_large_equal_entries_stay_finite() {
    for c in [1000.0, -1000.0] {
        let x = vec![c; 5];
        let naive = naive_softmax(&x).unwrap();
        assert!(naive.iter().all(|p| p.is_nan()), "naive form should break at {}", c);
        let p = softmax(&x).unwrap();
        assert!(p.iter().all(|v| v.is_finite() && *v >= 0.0));
        let sum: f64 = p.iter().sum();
        assert!((sum - 1.0).abs() < 1e-9, "sum={} at c={}", sum, c);
        for v in p { assert!((v - 0.2).abs() < 1e-9); }
    }
}

#[test]
fn lse_of_repeated_constant() {
    for c in [-1000.0, -3.25, 0.0, 1.0, 7.5, 1000.0, 1e300] {
        assert_eq!(log_sum_exp(&[c, c, c]).unwrap(), c + 3f64.ln(), "c={}", c);
    }
}

#[test]
fn empty_input_is_a_domain_error() {
    assert_eq!(softmax(&[]), Err(NumericError::EmptyInput));
    assert_eq!(log_sum_exp(&[]), Err(NumericError::EmptyInput));
}

#[test]
fn one_element_softmax() {
    assert_eq!(softmax(&[3.0]).unwrap(), vec![1.0]);
}

#[test]
fn softmax_is_bit_deterministic() {
    let x = [0.3, -12.0, 44.5, 44.5, 1e-8];
    let a = softmax(&x).unwrap();
    let b = softmax(&x).unwrap();
    let a_bits: Vec<u64> = a.iter().map(|v| v.to_bits()).collect();
    let b_bits: Vec<u64> = b.iter().map(|v| v.to_bits()).collect();
    assert_eq!(a_bits, b_bits);
}

proptest! {
    #[test]
    fn prop_softmax_is_a_distribution(x in prop::collection::vec(-1e4f64..1e4f64, 1..64)) {
        let p = softmax(&x).unwrap();
        prop_assert_eq!(p.len(), x.len());
        for &v in &p { prop_assert!(v >= 0.0 && v <= 1.0, "entry {} out of [0,1]", v); }
        let sum: f64 = p.iter().sum();
        prop_assert!((sum - 1.0).abs() < 1e-9, "sum={}", sum);
    }

    #[test]
    fn prop_lse_shift_identity(x in prop::collection::vec(-500.0f64..500.0f64, 1..32), c in -500.0f64..500.0f64) {
        // LSE(x) = c + LSE(x - c)
        let shifted: Vec<f64> = x.iter().map(|v| v - c).collect();
        let lhs = log_sum_exp(&x).unwrap();
        let rhs = c + log_sum_exp(&shifted).unwrap();
        prop_assert!((lhs - rhs).abs() < 1e-9 * lhs.abs().max(1.0), "lhs={} rhs={}", lhs, rhs);
    }

    #[test]
    fn prop_lse_bounds(x in prop::collection::vec(-1e6f64..1e6f64, 1..32)) {
        // max(x) <= LSE(x) <= max(x) + ln(n)
        let m = x.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let v = log_sum_exp(&x).unwrap();
        prop_assert!(v >= m);
        prop_assert!(v <= m + (x.len() as f64).ln() + 1e-9);
    }
}
