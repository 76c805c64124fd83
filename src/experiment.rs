//! Statistical check of the quantized dot-product error bound over random unit vectors.
use log::{debug, info, warn};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::quant::{approximate_dot_product, dequantize_vector, dot_error_bound, exact_dot, quantize_vector, QuantizationScheme, RoundMode};
use crate::random::random_unit_vector;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoundExperimentParams {
    pub dim: usize,
    pub trials: usize,
    pub seed: u64,
    pub mode: RoundMode,
    pub scheme: QuantizationScheme,
}

impl Default for BoundExperimentParams {
    fn default() -> Self {
        Self { dim: 5, trials: 10_000, seed: 42, mode: RoundMode::Round, scheme: QuantizationScheme::int8_unit() }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BoundReport {
    pub dim: usize,
    pub trials: usize,
    pub mode: RoundMode,
    pub delta: f64,
    /// `dot_error_bound(dim, delta, mode)`
    pub bound: f64,
    /// max over trials of `|⟨x,y⟩ − ⟨x̂,ŷ⟩|`
    pub max_dot_error: f64,
    pub mean_dot_error: f64,
    /// max over trials of `|approximate_dot_product − ⟨x̂,ŷ⟩|`; rounding noise only
    pub max_identity_error: f64,
    pub violations: usize,
}

impl BoundReport {
    pub fn holds(&self) -> bool { self.violations == 0 }
}

pub fn run_bound_experiment(params: &BoundExperimentParams) -> Result<BoundReport> {
    run_bound_experiment_with_progress(params, |_| {})
}

/// Same as [`run_bound_experiment`], calling `on_trial` with the number of finished trials.
pub fn run_bound_experiment_with_progress<F: FnMut(usize)>(params: &BoundExperimentParams, mut on_trial: F) -> Result<BoundReport> {
    let scheme = &params.scheme;
    let delta = scheme.delta();
    let bound = dot_error_bound(params.dim, delta, params.mode);
    debug!("bound experiment: dim={} trials={} seed={} mode={} delta={} bound={}", params.dim, params.trials, params.seed, params.mode, delta, bound);
    let mut rng = SmallRng::seed_from_u64(params.seed);
    let mut max_dot_error = 0.0f64;
    let mut sum_dot_error = 0.0f64;
    let mut max_identity_error = 0.0f64;
    let mut violations = 0usize;
    for t in 0..params.trials {
        let x = random_unit_vector(params.dim, &mut rng);
        let y = random_unit_vector(params.dim, &mut rng);
        let qx = quantize_vector(&x, scheme, params.mode)?;
        let qy = quantize_vector(&y, scheme, params.mode)?;
        let true_dot = exact_dot(&x, &y)?;
        let dequant_dot = exact_dot(&qx.dequantize(scheme), &dequantize_vector(&qy.codes, scheme))?;
        let approx_dot = approximate_dot_product(&qx.codes, &qy.codes, scheme)?;
        let err = (true_dot - dequant_dot).abs();
        if err > bound {
            violations += 1;
            warn!("trial {}: dot error {} exceeds bound {}", t, err, bound);
        }
        max_dot_error = max_dot_error.max(err);
        sum_dot_error += err;
        max_identity_error = max_identity_error.max((approx_dot - dequant_dot).abs());
        on_trial(t + 1);
    }
    let mean_dot_error = if params.trials > 0 { sum_dot_error / params.trials as f64 } else { 0.0 };
    info!("bound experiment done: max_err={:.3e} mean_err={:.3e} bound={:.3e} violations={}", max_dot_error, mean_dot_error, bound, violations);
    Ok(BoundReport {
        dim: params.dim,
        trials: params.trials,
        mode: params.mode,
        delta,
        bound,
        max_dot_error,
        mean_dot_error,
        max_identity_error,
        violations,
    })
}
