use log::{debug, trace};
use rayon::prelude::*;

use crate::error::{NumericError, Result};
use super::dot::{combine_terms, index_term, integer_dot};
use super::scheme::{QuantizationScheme, RoundMode};
use super::vector::{quantize_vector, QuantizedVector};

/// Quantized vectors of one dimension under one scheme, scored by approximate dot product.
///
/// The index term is computed once for the collection and each vector's cross term
/// once at insertion, so scoring a query costs one integer inner product per vector.
#[derive(Debug, Clone)]
pub struct QuantizedCollection {
    scheme: QuantizationScheme,
    mode: RoundMode,
    dim: usize,
    index_term: f64,
    vectors: Vec<QuantizedVector>,
}

impl QuantizedCollection {
    pub fn new(scheme: QuantizationScheme, mode: RoundMode, dim: usize) -> Self {
        let index_term = index_term(dim, &scheme);
        debug!("new quantized collection: dim={} mode={} delta={} index_term={}", dim, mode, scheme.delta(), index_term);
        Self { scheme, mode, dim, index_term, vectors: Vec::new() }
    }

    pub fn scheme(&self) -> &QuantizationScheme { &self.scheme }
    pub fn mode(&self) -> RoundMode { self.mode }
    pub fn dim(&self) -> usize { self.dim }
    pub fn len(&self) -> usize { self.vectors.len() }
    pub fn is_empty(&self) -> bool { self.vectors.is_empty() }
    pub fn get(&self, idx: usize) -> Option<&QuantizedVector> { self.vectors.get(idx) }

    fn check_dim(&self, got: usize) -> Result<()> {
        if got != self.dim { return Err(NumericError::DimensionMismatch { left: self.dim, right: got }); }
        Ok(())
    }

    /// Quantizes and stores `vector`, returning its index.
    pub fn push(&mut self, vector: &[f64]) -> Result<usize> {
        self.check_dim(vector.len())?;
        let q = quantize_vector(vector, &self.scheme, self.mode)?;
        self.vectors.push(q);
        Ok(self.vectors.len() - 1)
    }

    /// Stores codes produced elsewhere under the same scheme.
    pub fn push_codes(&mut self, codes: Vec<i64>) -> Result<usize> {
        self.check_dim(codes.len())?;
        self.vectors.push(QuantizedVector::from_codes(codes, &self.scheme));
        Ok(self.vectors.len() - 1)
    }

    /// Approximate dot product of an already-quantized query with every stored vector, in insertion order.
    pub fn score_quantized(&self, query: &QuantizedVector) -> Result<Vec<f64>> {
        self.check_dim(query.dim())?;
        let scheme = &self.scheme;
        let index = self.index_term;
        Ok(self.vectors
            .par_iter()
            .map(|v| combine_terms(integer_dot(&query.codes, &v.codes), query.cross_term, v.cross_term, index, scheme))
            .collect())
    }

    /// Quantizes `query` with the collection's scheme and scores it.
    pub fn score(&self, query: &[f64]) -> Result<Vec<f64>> {
        self.check_dim(query.len())?;
        let q = quantize_vector(query, &self.scheme, self.mode)?;
        self.score_quantized(&q)
    }

    /// The `k` highest-scoring `(index, score)` pairs, best first. Ties keep insertion order.
    pub fn top_k(&self, query: &[f64], k: usize) -> Result<Vec<(usize, f64)>> {
        let scores = self.score(query)?;
        let mut ranked: Vec<(usize, f64)> = scores.into_iter().enumerate().collect();
        ranked.sort_by(|x, y| y.1.total_cmp(&x.1).then(x.0.cmp(&y.0)));
        ranked.truncate(k);
        trace!("top_k: k={} of {} vectors", k, self.vectors.len());
        Ok(ranked)
    }
}
