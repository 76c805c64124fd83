use std::collections::BTreeMap;

use log::debug;

use crate::error::{NumericError, Result};
use super::softmax::softmax;

/// Categorical naive Bayes scored in log space.
///
/// The joint score of a class is `ln P(c) + Σ_j ln P(x_j | c)`. Summing logs instead of
/// multiplying probabilities keeps the score finite for any number of features; a
/// zero likelihood contributes `-inf` and rules the class out.
#[derive(Debug, Clone, Default)]
pub struct NaiveBayes {
    alpha: f64,
    classes: Vec<String>,
    log_priors: Vec<f64>,
    // per feature: value -> per-class log-likelihood, indexed like `classes`
    log_likelihoods: Vec<BTreeMap<String, Vec<f64>>>,
}

impl NaiveBayes {
    /// Unsmoothed model: likelihoods are raw frequency ratios.
    pub fn new() -> Self {
        Self::default()
    }

    /// Additive (Laplace) smoothing with pseudo-count `alpha` per feature value.
    pub fn with_smoothing(alpha: f64) -> Result<Self> {
        if !(alpha.is_finite() && alpha >= 0.0) { return Err(NumericError::InvalidSmoothing(alpha)); }
        Ok(Self { alpha, ..Self::default() })
    }

    pub fn is_fitted(&self) -> bool { !self.classes.is_empty() }

    /// Class labels in sorted order; every per-class output is indexed the same way.
    pub fn classes(&self) -> &[String] { &self.classes }

    pub fn n_features(&self) -> usize { self.log_likelihoods.len() }

    /// Counts class frequencies and per-class value frequencies of every feature.
    /// Refitting replaces the previous model.
    pub fn fit<S: AsRef<str>>(&mut self, rows: &[Vec<S>], labels: &[S]) -> Result<()> {
        if rows.is_empty() { return Err(NumericError::EmptyInput); }
        if labels.len() != rows.len() {
            return Err(NumericError::DimensionMismatch { left: rows.len(), right: labels.len() });
        }
        let n_features = rows[0].len();
        if let Some(row) = rows.iter().find(|r| r.len() != n_features) {
            return Err(NumericError::DimensionMismatch { left: n_features, right: row.len() });
        }

        let mut class_counts: BTreeMap<&str, usize> = BTreeMap::new();
        for l in labels { *class_counts.entry(l.as_ref()).or_insert(0) += 1; }
        let classes: Vec<&str> = class_counts.keys().copied().collect();
        let class_index: BTreeMap<&str, usize> = classes.iter().enumerate().map(|(i, &c)| (c, i)).collect();
        let totals: Vec<f64> = classes.iter().map(|c| class_counts[c] as f64).collect();

        let mut counts: Vec<BTreeMap<&str, Vec<usize>>> = vec![BTreeMap::new(); n_features];
        for (row, label) in rows.iter().zip(labels) {
            let ci = class_index[label.as_ref()];
            for (j, v) in row.iter().enumerate() {
                counts[j].entry(v.as_ref()).or_insert_with(|| vec![0; classes.len()])[ci] += 1;
            }
        }

        let n = rows.len() as f64;
        let alpha = self.alpha;
        self.log_priors = totals.iter().map(|t| (t / n).ln()).collect();
        self.log_likelihoods = counts
            .into_iter()
            .map(|per_value| {
                let n_values = per_value.len() as f64;
                per_value
                    .into_iter()
                    .map(|(v, cs)| {
                        let logs = cs
                            .iter()
                            .zip(&totals)
                            .map(|(&c, &t)| ((c as f64 + alpha) / (t + alpha * n_values)).ln())
                            .collect();
                        (v.to_string(), logs)
                    })
                    .collect()
            })
            .collect();
        self.classes = classes.into_iter().map(String::from).collect();
        debug!("naive bayes fit: {} rows, {} features, {} classes, alpha={}", rows.len(), n_features, self.classes.len(), self.alpha);
        Ok(())
    }

    /// `P(feature = value | class)`, or `None` when the value or class was never seen.
    pub fn likelihood(&self, feature: usize, value: &str, class: &str) -> Option<f64> {
        let ci = self.classes.iter().position(|c| c == class)?;
        self.log_likelihoods.get(feature)?.get(value).map(|logs| logs[ci].exp())
    }

    /// Unnormalized log posterior of every class for one query row.
    pub fn log_joint<S: AsRef<str>>(&self, query: &[S]) -> Result<Vec<f64>> {
        if !self.is_fitted() { return Err(NumericError::NotFitted); }
        if query.len() != self.n_features() {
            return Err(NumericError::DimensionMismatch { left: self.n_features(), right: query.len() });
        }
        let mut scores = self.log_priors.clone();
        for (feature, (table, v)) in self.log_likelihoods.iter().zip(query).enumerate() {
            let logs = table
                .get(v.as_ref())
                .ok_or_else(|| NumericError::UnknownCategory { feature, value: v.as_ref().to_string() })?;
            for (s, l) in scores.iter_mut().zip(logs) { *s += l; }
        }
        Ok(scores)
    }

    /// Posterior class probabilities, normalized with the stable softmax.
    /// A query that every class rules out has no posterior and is rejected.
    pub fn predict_proba<S: AsRef<str>>(&self, query: &[S]) -> Result<Vec<f64>> {
        softmax(&self.log_joint(query)?)
    }

    /// The class with the highest log posterior; ties go to the first class in sorted order.
    pub fn predict<S: AsRef<str>>(&self, query: &[S]) -> Result<&str> {
        let scores = self.log_joint(query)?;
        let mut best = 0;
        for (i, &s) in scores.iter().enumerate() {
            if s > scores[best] { best = i; }
        }
        Ok(&self.classes[best])
    }
}
