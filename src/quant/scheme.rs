use std::fmt;
use std::path::Path;
use std::str::FromStr;

use anyhow::Context;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{check_input, NumericError, Result};

/// How the continuous code `x̃` is mapped onto an integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoundMode {
    #[default]
    Floor,
    Ceil,
    /// Nearest integer, ties to even.
    Round,
}

impl RoundMode {
    pub const ALL: [RoundMode; 3] = [RoundMode::Floor, RoundMode::Ceil, RoundMode::Round];

    #[inline]
    pub fn apply(self, v: f64) -> f64 {
        match self {
            RoundMode::Floor => v.floor(),
            RoundMode::Ceil => v.ceil(),
            RoundMode::Round => v.round_ties_even(),
        }
    }
}

impl fmt::Display for RoundMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self { RoundMode::Floor => "floor", RoundMode::Ceil => "ceil", RoundMode::Round => "round" };
        f.write_str(s)
    }
}

impl FromStr for RoundMode {
    type Err = NumericError;
    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "floor" | "f" => Ok(RoundMode::Floor),
            "ceil" | "c" => Ok(RoundMode::Ceil),
            "round" | "r" | "nearest" => Ok(RoundMode::Round),
            _ => Err(NumericError::UnknownRoundMode(s.to_string())),
        }
    }
}

/// Raw scheme bounds as they appear in config files; validated into a [`QuantizationScheme`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SchemeBounds {
    pub min: f64,
    pub max: f64,
    pub a: i32,
    pub b: i32,
}

/// Affine map between the real interval `[min, max]` and the integer codes `[a, b]`.
///
/// Always valid once constructed: finite `min <= max`, `a < b`. The step
/// `Δ = (max - min) / (b - a)` is derived once here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SchemeBounds", into = "SchemeBounds")]
pub struct QuantizationScheme {
    min: f64,
    max: f64,
    a: i32,
    b: i32,
    delta: f64,
}

impl QuantizationScheme {
    pub fn new(min: f64, max: f64, a: i32, b: i32) -> Result<Self> {
        if !(min.is_finite() && max.is_finite()) { return Err(NumericError::NonFiniteBound { min, max }); }
        if a == b { return Err(NumericError::ZeroWidthCodeRange { code: a }); }
        if a > b { return Err(NumericError::InvertedCodeRange { a, b }); }
        if max < min { return Err(NumericError::InvertedRange { min, max }); }
        let delta = (max - min) / (b as i64 - a as i64) as f64;
        if !delta.is_finite() { return Err(NumericError::StepOverflow { min, max }); }
        Ok(Self { min, max, a, b, delta })
    }

    /// Signed 8-bit codes over `[-1, 1]`, the usual range for unit-normalized embeddings.
    pub fn int8_unit() -> Self {
        Self { min: -1.0, max: 1.0, a: -128, b: 127, delta: 2.0 / 255.0 }
    }

    /// Unsigned 8-bit codes `[0, 255]` over `[min, max]`.
    pub fn uint8(min: f64, max: f64) -> Result<Self> {
        Self::new(min, max, 0, 255)
    }

    /// Fits `[min, max]` to the observed range of `data`.
    pub fn calibrate(data: &[f64], a: i32, b: i32) -> Result<Self> {
        check_input(data)?;
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for &v in data {
            if v < min { min = v; }
            if v > max { max = v; }
        }
        let scheme = Self::new(min, max, a, b)?;
        debug!("calibrated scheme over {} values: min={} max={} codes=[{}, {}] delta={}", data.len(), min, max, a, b, scheme.delta);
        Ok(scheme)
    }

    #[inline] pub fn min(&self) -> f64 { self.min }
    #[inline] pub fn max(&self) -> f64 { self.max }
    #[inline] pub fn a(&self) -> i32 { self.a }
    #[inline] pub fn b(&self) -> i32 { self.b }
    /// Real width of one code step.
    #[inline] pub fn delta(&self) -> f64 { self.delta }

    /// Number of distinct codes, `b - a + 1`.
    pub fn levels(&self) -> u64 {
        (self.b as i64 - self.a as i64 + 1) as u64
    }
}

impl TryFrom<SchemeBounds> for QuantizationScheme {
    type Error = NumericError;
    fn try_from(s: SchemeBounds) -> Result<Self> {
        QuantizationScheme::new(s.min, s.max, s.a, s.b)
    }
}

impl From<QuantizationScheme> for SchemeBounds {
    fn from(s: QuantizationScheme) -> Self {
        SchemeBounds { min: s.min, max: s.max, a: s.a, b: s.b }
    }
}

/// Reads a JSON scheme file of the form `{"min": -1.0, "max": 1.0, "a": -128, "b": 127}`.
pub fn load_scheme<P: AsRef<Path>>(path: P) -> anyhow::Result<QuantizationScheme> {
    let text = std::fs::read_to_string(&path)
        .with_context(|| format!("open scheme file: {}", path.as_ref().display()))?;
    let scheme: QuantizationScheme = serde_json::from_str(&text)
        .with_context(|| format!("parse scheme file: {}", path.as_ref().display()))?;
    debug!("loaded scheme {:?} from {}", scheme, path.as_ref().display());
    Ok(scheme)
}
