//! problem::normalize — ideal/nadir scaling into a common [0, 1]-like range.
//!
//! Purpose
//! -------
//! Map raw objective values and reference points onto a shared scale so
//! that weights in the achievement scalarization compare like with like.
//!
//! Key behaviors
//! -------------
//! - For dimension `i`, with `lo = min(ideal_i, nadir_i)` and
//!   `hi = max(ideal_i, nadir_i)`, a value `v` maps to `(v - lo) / (hi - lo)`.
//! - A zero-width range is rejected up front with
//!   [`ProblemError::DegenerateRange`] naming the dimension; the scaler
//!   never divides by zero later.
//! - [`Normalizer::scale_displacement`] maps a move on the normalized scale
//!   back to raw objective units; adding it to a raw point keeps a zero move
//!   exact.
//!
//! Invariants & assumptions
//! ------------------------
//! - Ideal and nadir share the internal minimize convention.
//! - Values outside `[lo, hi]` are allowed and map outside `[0, 1]`;
//!   reference points are aspirations, not feasible points.
use ndarray::{Array1, Zip};

use crate::problem::errors::{ProblemError, ProblemResult};

/// Precomputed affine scaler built from an ideal and a nadir point.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalizer {
    lower: Array1<f64>,
    span: Array1<f64>,
}

impl Normalizer {
    /// Build a scaler from ideal and nadir points.
    ///
    /// # Errors
    /// - [`ProblemError::DimensionMismatch`] if the points differ in length.
    /// - [`ProblemError::NonFiniteValue`] for a non-finite ideal/nadir entry.
    /// - [`ProblemError::DegenerateRange`] if `ideal_i == nadir_i`.
    pub fn new(ideal: &Array1<f64>, nadir: &Array1<f64>) -> ProblemResult<Self> {
        if ideal.len() != nadir.len() {
            return Err(ProblemError::DimensionMismatch {
                what: "nadir point",
                expected: ideal.len(),
                found: nadir.len(),
            });
        }
        let k = ideal.len();
        let mut lower = Array1::zeros(k);
        let mut span = Array1::zeros(k);
        for index in 0..k {
            let (i_val, n_val) = (ideal[index], nadir[index]);
            if !i_val.is_finite() {
                return Err(ProblemError::NonFiniteValue { what: "ideal", index, value: i_val });
            }
            if !n_val.is_finite() {
                return Err(ProblemError::NonFiniteValue { what: "nadir", index, value: n_val });
            }
            let lo = i_val.min(n_val);
            let hi = i_val.max(n_val);
            if hi == lo {
                return Err(ProblemError::DegenerateRange { index, ideal: i_val, nadir: n_val });
            }
            lower[index] = lo;
            span[index] = hi - lo;
        }
        Ok(Self { lower, span })
    }

    pub fn len(&self) -> usize {
        self.lower.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lower.is_empty()
    }

    /// Scale a point of length `k`.
    pub fn normalize(&self, point: &Array1<f64>) -> ProblemResult<Array1<f64>> {
        self.check_len(point)?;
        Ok(Zip::from(point).and(&self.lower).and(&self.span).map_collect(|&v, &lo, &w| (v - lo) / w))
    }

    /// Raw-unit equivalent `span ∘ delta` of a normalized displacement.
    pub fn scale_displacement(&self, delta: &Array1<f64>) -> ProblemResult<Array1<f64>> {
        self.check_len(delta)?;
        Ok(delta * &self.span)
    }

    fn check_len(&self, point: &Array1<f64>) -> ProblemResult<()> {
        if point.len() != self.len() {
            return Err(ProblemError::DimensionMismatch {
                what: "point to normalize",
                expected: self.len(),
                found: point.len(),
            });
        }
        Ok(())
    }
}

/// One-shot form of [`Normalizer::normalize`].
pub fn normalize(
    point: &Array1<f64>, ideal: &Array1<f64>, nadir: &Array1<f64>,
) -> ProblemResult<Array1<f64>> {
    Normalizer::new(ideal, nadir)?.normalize(point)
}
