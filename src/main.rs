use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use stablemath::experiment::{run_bound_experiment_with_progress, BoundExperimentParams};
use stablemath::logspace::{log_sum_exp, naive_softmax, softmax_with_temperature};
use stablemath::quant::{backward, forward, load_scheme, QuantizationScheme, RoundMode};

#[derive(Parser, Debug)]
#[command(author, version, about = "Stable log-sum-exp/softmax and affine quantization playground", long_about = None)]
struct Args {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Log-sum-exp plus stable and naive softmax of the given values
    Lse {
        /// Softmax temperature
        #[arg(long, default_value_t = 1.0)]
        tau: f64,

        #[arg(required = true, allow_negative_numbers = true)]
        values: Vec<f64>,
    },
    /// Quantize values and show reconstructions and errors
    Quantize {
        /// JSON scheme file ({"min":..,"max":..,"a":..,"b":..}); overrides the bound flags
        #[arg(long)]
        scheme_file: Option<PathBuf>,

        #[arg(long, default_value_t = -1.0, allow_negative_numbers = true)]
        min: f64,

        #[arg(long, default_value_t = 1.0, allow_negative_numbers = true)]
        max: f64,

        /// Lowest code
        #[arg(long, default_value_t = -128, allow_negative_numbers = true)]
        a: i32,

        /// Highest code
        #[arg(long, default_value_t = 127, allow_negative_numbers = true)]
        b: i32,

        /// Rounding mode: floor, ceil or round
        #[arg(long, default_value = "floor")]
        mode: RoundMode,

        #[arg(required = true, allow_negative_numbers = true)]
        values: Vec<f64>,
    },
    /// Check the quantized dot-product error bound over random unit vectors
    Bounds {
        #[arg(long, default_value_t = 5)]
        dim: usize,

        #[arg(long, default_value_t = 10_000)]
        trials: usize,

        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Rounding mode: floor, ceil or round
        #[arg(long, default_value = "round")]
        mode: RoundMode,

        /// JSON scheme file; defaults to [-1, 1] -> [-128, 127]
        #[arg(long)]
        scheme_file: Option<PathBuf>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

fn fmt_vec(v: &[f64]) -> String {
    let parts: Vec<String> = v.iter().map(|x| format!("{:.6}", x)).collect();
    format!("[{}]", parts.join(", "))
}

fn run_lse(values: &[f64], tau: f64) -> Result<()> {
    let lse = log_sum_exp(values)?;
    let stable = softmax_with_temperature(values, tau)?;
    let scaled: Vec<f64> = values.iter().map(|v| v / tau).collect();
    let naive = naive_softmax(&scaled)?;
    println!("logsumexp      = {}", lse);
    println!("softmax        = {}", fmt_vec(&stable));
    println!("  sum          = {}", stable.iter().sum::<f64>());
    println!("naive softmax  = {}", fmt_vec(&naive));
    if naive.iter().any(|p| p.is_nan()) {
        println!("  (naive form overflowed/underflowed)");
    }
    Ok(())
}

fn run_quantize(scheme: QuantizationScheme, mode: RoundMode, values: &[f64]) -> Result<()> {
    let delta = scheme.delta();
    println!("scheme: [{}, {}] -> [{}, {}], delta={:.6e}, mode={}", scheme.min(), scheme.max(), scheme.a(), scheme.b(), delta, mode);
    for &x in values {
        let code = forward(x, &scheme, mode);
        let xh = backward(code, &scheme);
        let in_range = code >= scheme.a() as i64 && code <= scheme.b() as i64;
        println!("x={:>12.6} code={:>6} x_hat={:>12.6} err={:.3e}{}", x, code, xh, (x - xh).abs(), if in_range { "" } else { "  (extrapolated)" });
    }
    Ok(())
}

fn run_bounds(params: BoundExperimentParams, json: bool) -> Result<()> {
    let pb = ProgressBar::new(params.trials as u64);
    pb.set_style(ProgressStyle::with_template("{bar:40} {pos}/{len} trials ({eta})").context("progress template")?);
    let report = run_bound_experiment_with_progress(&params, |n| {
        if n % 256 == 0 { pb.set_position(n as u64); }
    })?;
    pb.finish_and_clear();
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("dim={} trials={} mode={} delta={:.6e}", report.dim, report.trials, report.mode, report.delta);
        println!("bound            = {:.6e}", report.bound);
        println!("max dot error    = {:.6e}", report.max_dot_error);
        println!("mean dot error   = {:.6e}", report.mean_dot_error);
        println!("max identity err = {:.3e}", report.max_identity_error);
        println!("violations       = {}", report.violations);
    }
    if !report.holds() {
        anyhow::bail!("{} trials exceeded the error bound", report.violations);
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    match args.cmd {
        Cmd::Lse { tau, values } => run_lse(&values, tau),
        Cmd::Quantize { scheme_file, min, max, a, b, mode, values } => {
            let scheme = match scheme_file {
                Some(p) => load_scheme(p)?,
                None => QuantizationScheme::new(min, max, a, b).context("invalid quantization scheme")?,
            };
            run_quantize(scheme, mode, &values)
        }
        Cmd::Bounds { dim, trials, seed, mode, scheme_file, json } => {
            let scheme = match scheme_file {
                Some(p) => load_scheme(p)?,
                None => QuantizationScheme::int8_unit(),
            };
            run_bounds(BoundExperimentParams { dim, trials, seed, mode, scheme }, json)
        }
    }
}
