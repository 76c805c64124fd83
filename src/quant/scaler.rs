use log::debug;

use crate::error::{NumericError, Result};
use super::scheme::QuantizationScheme;

/// Per-column affine rescaling of tabular data onto `[lo, hi]`.
///
/// `transform(x) = (x - data_min) · scale + lo` with `scale = (hi - lo) / (data_max - data_min)`.
/// The same min/max fit also calibrates a [`QuantizationScheme`] per column.
#[derive(Debug, Clone, PartialEq)]
pub struct MinMaxScaler {
    lo: f64,
    hi: f64,
    data_min: Option<Vec<f64>>,
    data_max: Option<Vec<f64>>,
    scale: Option<Vec<f64>>,
}

impl Default for MinMaxScaler {
    fn default() -> Self {
        Self { lo: 0.0, hi: 1.0, data_min: None, data_max: None, scale: None }
    }
}

impl MinMaxScaler {
    pub fn new(lo: f64, hi: f64) -> Result<Self> {
        if !(lo.is_finite() && hi.is_finite() && lo < hi) {
            return Err(NumericError::InvalidFeatureRange { lo, hi });
        }
        Ok(Self { lo, hi, ..Self::default() })
    }

    pub fn feature_range(&self) -> (f64, f64) { (self.lo, self.hi) }
    pub fn data_min(&self) -> Option<&[f64]> { self.data_min.as_deref() }
    pub fn data_max(&self) -> Option<&[f64]> { self.data_max.as_deref() }
    pub fn scale(&self) -> Option<&[f64]> { self.scale.as_deref() }

    /// Records the per-column extremes of `rows`. A constant column gets scale 1, so it
    /// maps to `lo` instead of dividing by zero.
    pub fn fit(&mut self, rows: &[Vec<f64>]) -> Result<()> {
        if rows.is_empty() { return Err(NumericError::EmptyInput); }
        let width = rows[0].len();
        let mut min = vec![f64::INFINITY; width];
        let mut max = vec![f64::NEG_INFINITY; width];
        for (r, row) in rows.iter().enumerate() {
            if row.len() != width { return Err(NumericError::DimensionMismatch { left: width, right: row.len() }); }
            for (j, &v) in row.iter().enumerate() {
                if v.is_nan() { return Err(NumericError::NotANumber { index: r * width + j }); }
                if v < min[j] { min[j] = v; }
                if v > max[j] { max[j] = v; }
            }
        }
        let scale = min
            .iter()
            .zip(&max)
            .map(|(&mn, &mx)| if mx > mn { (self.hi - self.lo) / (mx - mn) } else { 1.0 })
            .collect();
        debug!("min-max fit over {} rows x {} columns into [{}, {}]", rows.len(), width, self.lo, self.hi);
        self.data_min = Some(min);
        self.data_max = Some(max);
        self.scale = Some(scale);
        Ok(())
    }

    pub fn transform(&self, rows: &[Vec<f64>]) -> Result<Vec<Vec<f64>>> {
        let (min, scale) = self.fitted()?;
        rows.iter()
            .map(|row| -> Result<Vec<f64>> {
                check_width(row, min.len())?;
                Ok(row.iter().zip(min).zip(scale).map(|((&x, &mn), &s)| (x - mn) * s + self.lo).collect())
            })
            .collect()
    }

    pub fn fit_transform(&mut self, rows: &[Vec<f64>]) -> Result<Vec<Vec<f64>>> {
        self.fit(rows)?;
        self.transform(rows)
    }

    pub fn inverse_transform(&self, rows: &[Vec<f64>]) -> Result<Vec<Vec<f64>>> {
        let (min, scale) = self.fitted()?;
        rows.iter()
            .map(|row| -> Result<Vec<f64>> {
                check_width(row, min.len())?;
                Ok(row.iter().zip(min).zip(scale).map(|((&y, &mn), &s)| (y - self.lo) / s + mn).collect())
            })
            .collect()
    }

    /// Quantization scheme over the fitted range of column `feature`, with codes `[a, b]`.
    pub fn scheme_for(&self, feature: usize, a: i32, b: i32) -> Result<QuantizationScheme> {
        let (min, max) = match (&self.data_min, &self.data_max) {
            (Some(mn), Some(mx)) => (mn, mx),
            _ => return Err(NumericError::NotFitted),
        };
        if feature >= min.len() {
            return Err(NumericError::DimensionMismatch { left: min.len(), right: feature + 1 });
        }
        QuantizationScheme::new(min[feature], max[feature], a, b)
    }

    fn fitted(&self) -> Result<(&[f64], &[f64])> {
        match (&self.data_min, &self.scale) {
            (Some(mn), Some(s)) => Ok((mn.as_slice(), s.as_slice())),
            _ => Err(NumericError::NotFitted),
        }
    }
}

fn check_width(row: &[f64], width: usize) -> Result<()> {
    if row.len() != width { return Err(NumericError::DimensionMismatch { left: width, right: row.len() }); }
    Ok(())
}
