use pretty_assertions::assert_eq;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use stablemath::quant::{dequantize_vector, exact_dot, quantize_vector, QuantizationScheme, QuantizedCollection, RoundMode};
use stablemath::random::random_unit_vector;

fn build(n: usize, dim: usize, seed: u64) -> (QuantizedCollection, Vec<Vec<f64>>) {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut c = QuantizedCollection::new(QuantizationScheme::int8_unit(), RoundMode::Round, dim);
    let mut raw = Vec::with_capacity(n);
    for i in 0..n {
        let v = random_unit_vector(dim, &mut rng);
        assert_eq!(c.push(&v).unwrap(), i);
        raw.push(v);
    }
    (c, raw)
}

#[test]
fn scores_match_dequantized_dots() {
    let (c, _) = build(200, 24, 5);
    let s = *c.scheme();
    let mut rng = SmallRng::seed_from_u64(6);
    let query = random_unit_vector(24, &mut rng);
    let scores = c.score(&query).unwrap();
    assert_eq!(scores.len(), 200);
    let qq = quantize_vector(&query, &s, RoundMode::Round).unwrap();
    let qd = dequantize_vector(&qq.codes, &s);
    for (i, score) in scores.iter().enumerate() {
        let stored = c.get(i).unwrap().dequantize(&s);
        let direct = exact_dot(&qd, &stored).unwrap();
        assert!((direct - score).abs() < 1e-9, "vector {}: direct={} score={}", i, direct, score);
    }
}

#[test]
fn top_k_is_sorted_and_truncated() {
    let (c, _) = build(100, 16, 11);
    let mut rng = SmallRng::seed_from_u64(12);
    let query = random_unit_vector(16, &mut rng);
    let top = c.top_k(&query, 10).unwrap();
    assert_eq!(top.len(), 10);
    for w in top.windows(2) { assert!(w[0].1 >= w[1].1); }
    let all = c.top_k(&query, 1_000).unwrap();
    assert_eq!(all.len(), 100);
    assert_eq!(&all[..10], &top[..]);
}

#[test]
fn self_query_ranks_itself_first() {
    let (c, raw) = build(50, 64, 21);
    for query_idx in [0usize, 17, 49] {
        let top = c.top_k(&raw[query_idx], 1).unwrap();
        assert_eq!(top[0].0, query_idx);
    }
}

#[test]
fn push_codes_and_score_quantized_agree_with_push() {
    let (c, raw) = build(10, 8, 31);
    let s = *c.scheme();
    let mut c2 = QuantizedCollection::new(s, RoundMode::Round, 8);
    for v in &raw {
        let q = quantize_vector(v, &s, RoundMode::Round).unwrap();
        c2.push_codes(q.codes).unwrap();
    }
    let q = quantize_vector(&raw[3], &s, RoundMode::Round).unwrap();
    assert_eq!(c.score_quantized(&q).unwrap(), c2.score_quantized(&q).unwrap());
}
