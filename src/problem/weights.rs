//! problem::weights — strictly positive scalarization weights.
//!
//! Purpose
//! -------
//! Carry the weight vector `w` used by the achievement scalarization, the
//! trade-off calculator and the extrapolator. Every entry is used as a
//! divisor somewhere downstream, so positivity is checked once here and
//! assumed everywhere else.
//!
//! Key behaviors
//! -------------
//! - [`Weights::new`] rejects empty, non-finite and non-positive entries
//!   with the offending index.
//! - [`Weights::uniform`] builds the conventional `1/k` vector.
//! - [`simplex_lattice`] enumerates evenly spread weight vectors on the
//!   unit simplex (Das–Dennis construction), flooring zero entries at
//!   [`LATTICE_FLOOR`] so every generated vector stays valid.
use ndarray::Array1;

use crate::problem::errors::{ProblemError, ProblemResult};

/// Smallest entry of a lattice weight vector.
pub const LATTICE_FLOOR: f64 = 1e-5;

/// Validated weight vector; every entry is finite and `> 0`.
#[derive(Debug, Clone, PartialEq)]
pub struct Weights(Array1<f64>);

impl Weights {
    /// Validate and wrap a weight vector.
    ///
    /// # Errors
    /// - [`ProblemError::EmptyWeights`] for a zero-length vector.
    /// - [`ProblemError::InvalidWeight`] for the first entry that is not
    ///   finite and strictly positive. A zero weight would make its
    ///   achievement constraint vacuous at `alpha = 0`.
    pub fn new(values: Array1<f64>) -> ProblemResult<Self> {
        if values.is_empty() {
            return Err(ProblemError::EmptyWeights);
        }
        for (index, &value) in values.iter().enumerate() {
            if !(value.is_finite() && value > 0.0) {
                return Err(ProblemError::InvalidWeight { index, value });
            }
        }
        Ok(Self(values))
    }

    pub fn from_slice(values: &[f64]) -> ProblemResult<Self> {
        Self::new(Array1::from(values.to_vec()))
    }

    /// `1/k` in every entry.
    pub fn uniform(num_objectives: usize) -> ProblemResult<Self> {
        if num_objectives == 0 {
            return Err(ProblemError::EmptyWeights);
        }
        Self::new(Array1::from_elem(num_objectives, 1.0 / num_objectives as f64))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_array(&self) -> &Array1<f64> {
        &self.0
    }

    /// Element-wise reciprocal `1 / w_i`.
    pub fn reciprocal(&self) -> Array1<f64> {
        self.0.mapv(|w| 1.0 / w)
    }

    /// Check that the weights line up with `expected` objectives.
    pub fn check_len(&self, expected: usize) -> ProblemResult<()> {
        if self.len() != expected {
            return Err(ProblemError::DimensionMismatch {
                what: "weights",
                expected,
                found: self.len(),
            });
        }
        Ok(())
    }
}

/// simplex_lattice — evenly distributed weight vectors on the unit simplex.
///
/// Purpose
/// -------
/// Produce the smallest Das–Dennis lattice `{c / H : c ∈ ℕ^k, Σc = H}` with
/// at least `min_count` points, for sweeping reference directions.
///
/// Parameters
/// ----------
/// - `num_objectives`: `k >= 2`.
/// - `min_count`: lower bound on the number of vectors; must be `> 0`.
///
/// Returns
/// -------
/// `C(H + k - 1, k - 1)` weight vectors in lexicographic order of `c`,
/// with zero entries replaced by [`LATTICE_FLOOR`].
///
/// Errors
/// ------
/// - [`ProblemError::InvalidLattice`] for `k < 2` or `min_count == 0`.
pub fn simplex_lattice(num_objectives: usize, min_count: usize) -> ProblemResult<Vec<Weights>> {
    if num_objectives < 2 {
        return Err(ProblemError::InvalidLattice {
            num_objectives,
            reason: "at least two objectives are required",
        });
    }
    if min_count == 0 {
        return Err(ProblemError::InvalidLattice {
            num_objectives,
            reason: "the requested number of weight vectors must be positive",
        });
    }
    let mut divisions = 1usize;
    while lattice_size(divisions, num_objectives) < min_count as u128 {
        divisions += 1;
    }

    let mut compositions = Vec::new();
    let mut current = Vec::with_capacity(num_objectives);
    compose(divisions, num_objectives, &mut current, &mut compositions);

    compositions
        .into_iter()
        .map(|c| {
            let values = c
                .into_iter()
                .map(|ci| (ci as f64 / divisions as f64).max(LATTICE_FLOOR))
                .collect::<Array1<f64>>();
            Weights::new(values)
        })
        .collect()
}

// ---- Helper methods ----

/// Number of lattice points `C(h + k - 1, k - 1)`; saturates instead of
/// overflowing.
fn lattice_size(divisions: usize, num_objectives: usize) -> u128 {
    let mut count: u128 = 1;
    for i in 1..num_objectives as u128 {
        count = count.saturating_mul(divisions as u128 + i) / i;
    }
    count
}

fn compose(remaining: usize, slots: usize, current: &mut Vec<usize>, out: &mut Vec<Vec<usize>>) {
    if slots == 1 {
        current.push(remaining);
        out.push(current.clone());
        current.pop();
        return;
    }
    for take in 0..=remaining {
        current.push(take);
        compose(remaining - take, slots - 1, current, out);
        current.pop();
    }
}
