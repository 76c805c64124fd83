use thiserror::Error;

/// Domain errors raised by the numeric routines. Detected up front, never recovered from.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NumericError {
    #[error("input vector is empty")]
    EmptyInput,
    #[error("input contains NaN at index {index}")]
    NotANumber { index: usize },
    #[error("code range has zero width (a == b == {code})")]
    ZeroWidthCodeRange { code: i32 },
    #[error("code range is inverted: a={a} > b={b}")]
    InvertedCodeRange { a: i32, b: i32 },
    #[error("value range is inverted: min={min} > max={max}")]
    InvertedRange { min: f64, max: f64 },
    #[error("value range bounds must be finite: min={min}, max={max}")]
    NonFiniteBound { min: f64, max: f64 },
    #[error("value range [{min}, {max}] is too wide: its step overflows")]
    StepOverflow { min: f64, max: f64 },
    #[error("invalid round mode '{0}': use floor, ceil or round")]
    UnknownRoundMode(String),
    #[error("dimension mismatch: {left} vs {right}")]
    DimensionMismatch { left: usize, right: usize },
    #[error("temperature must be finite and positive, got {0}")]
    InvalidTemperature(f64),
    #[error("weights do not form a probability distribution")]
    InvalidProbabilities,
    #[error("feature {feature} has unseen value '{value}'")]
    UnknownCategory { feature: usize, value: String },
    #[error("smoothing must be finite and non-negative, got {0}")]
    InvalidSmoothing(f64),
    #[error("feature range is invalid: lo={lo} must be finite and below hi={hi}")]
    InvalidFeatureRange { lo: f64, hi: f64 },
    #[error("model used before fit")]
    NotFitted,
}

pub type Result<T> = std::result::Result<T, NumericError>;

/// Rejects empty inputs and inputs containing NaN.
pub(crate) fn check_input(x: &[f64]) -> Result<()> {
    if x.is_empty() { return Err(NumericError::EmptyInput); }
    if let Some(index) = x.iter().position(|v| v.is_nan()) {
        return Err(NumericError::NotANumber { index });
    }
    Ok(())
}
