use rand::Rng;
use rand_distr::StandardNormal;

/// Uniformly distributed direction on the unit sphere in `d` dimensions
/// (normalized standard Gaussian sample). `d == 0` yields an empty vector.
pub fn random_unit_vector<R: Rng + ?Sized>(d: usize, rng: &mut R) -> Vec<f64> {
    if d == 0 { return Vec::new(); }
    loop {
        let v: Vec<f64> = (0..d).map(|_| rng.sample::<f64, _>(StandardNormal)).collect();
        let norm = v.iter().map(|x| x * x).sum::<f64>().sqrt();
        if norm > 0.0 { return v.into_iter().map(|x| x / norm).collect(); }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn unit_length_and_bounded_components() {
        let mut rng = SmallRng::seed_from_u64(3);
        for d in [1usize, 2, 5, 64] {
            let v = random_unit_vector(d, &mut rng);
            assert_eq!(v.len(), d);
            let norm = v.iter().map(|x| x * x).sum::<f64>().sqrt();
            assert!((norm - 1.0).abs() < 1e-12);
            assert!(v.iter().all(|x| x.abs() <= 1.0));
        }
        assert!(random_unit_vector(0, &mut rng).is_empty());
    }

    #[test]
    fn seeded_draws_repeat() {
        let a = random_unit_vector(8, &mut SmallRng::seed_from_u64(11));
        let b = random_unit_vector(8, &mut SmallRng::seed_from_u64(11));
        assert_eq!(a, b);
    }
}
