//! problem::traits — the `Problem` collaborator and its variable bounds.
//!
//! Purpose
//! -------
//! Describe the minimal surface the trade-off engine needs from a concrete
//! multiobjective problem: dimensions, box bounds on the decision
//! variables, an evaluator for the full objective vector (plus per-objective
//! access), and the ideal/nadir points used for normalization.
//!
//! Invariants & assumptions
//! ------------------------
//! - All objective values, ideal and nadir points are expressed in the
//!   engine's internal convention: every objective is **minimized**.
//!   Conversion from natural maximize/minimize semantics happens exactly
//!   once at the boundary (see [`SignConvention`](super::sign::SignConvention)).
//! - Implementations are immutable after construction and shared read-only
//!   across concurrent requests, hence the `Send + Sync` supertraits.
//! - Bounds are finite and satisfy `lower <= upper` component-wise; this is
//!   enforced by [`VariableBounds::new`].
//!
//! Downstream usage
//! ----------------
//! - Concrete benchmark problems implement [`Problem`] outside the core.
//! - The scalarization layer wraps a `&dyn Problem` into the epigraph
//!   formulation handed to the constrained solver.
use ndarray::{Array1, Zip, s};

use crate::{
    problem::errors::{ProblemError, ProblemResult},
    utils::{ensure_len, scalar_from_array},
};

/// Decision vector `x` in variable space.
pub type DecisionVector = Array1<f64>;

/// Objective vector `f(x)` in the internal (minimize) convention.
pub type ObjectiveVector = Array1<f64>;

/// Box bounds `lower <= x <= upper` for the decision variables.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableBounds {
    lower: Array1<f64>,
    upper: Array1<f64>,
}

impl VariableBounds {
    /// Construct validated bounds.
    ///
    /// # Errors
    /// - [`ProblemError::DimensionMismatch`] if the two vectors differ in length.
    /// - [`ProblemError::InvalidBounds`] for a non-finite or inverted pair.
    pub fn new(lower: Array1<f64>, upper: Array1<f64>) -> ProblemResult<Self> {
        if lower.len() != upper.len() {
            return Err(ProblemError::DimensionMismatch {
                what: "upper bounds",
                expected: lower.len(),
                found: upper.len(),
            });
        }
        for (index, (&lo, &hi)) in lower.iter().zip(upper.iter()).enumerate() {
            if !lo.is_finite() || !hi.is_finite() || lo > hi {
                return Err(ProblemError::InvalidBounds { index, lower: lo, upper: hi });
            }
        }
        Ok(Self { lower, upper })
    }

    /// Build bounds from `(lower, upper)` pairs.
    pub fn from_pairs(pairs: &[(f64, f64)]) -> ProblemResult<Self> {
        let lower = pairs.iter().map(|&(lo, _)| lo).collect();
        let upper = pairs.iter().map(|&(_, hi)| hi).collect();
        Self::new(lower, upper)
    }

    pub fn len(&self) -> usize {
        self.lower.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lower.is_empty()
    }

    pub fn lower(&self) -> &Array1<f64> {
        &self.lower
    }

    pub fn upper(&self) -> &Array1<f64> {
        &self.upper
    }

    /// Component-wise midpoint, the default starting point of a solve.
    pub fn midpoint(&self) -> DecisionVector {
        Zip::from(&self.lower).and(&self.upper).map_collect(|&lo, &hi| lo + 0.5 * (hi - lo))
    }

    /// `true` when every component of `x` lies inside the box.
    pub fn contains(&self, x: &DecisionVector) -> bool {
        x.len() == self.len()
            && Zip::from(x)
                .and(&self.lower)
                .and(&self.upper)
                .all(|&xi, &lo, &hi| xi >= lo && xi <= hi)
    }

    /// Project `x` onto the box.
    pub fn clamp(&self, x: &DecisionVector) -> DecisionVector {
        Zip::from(x).and(&self.lower).and(&self.upper).map_collect(|&xi, &lo, &hi| xi.clamp(lo, hi))
    }
}

/// Problem — a bounded multiobjective problem in the minimize convention.
///
/// Required:
/// - `num_objectives`, `bounds`, `evaluate`, `ideal`, `nadir`.
///
/// Optional:
/// - `num_variables` (defaults to `bounds().len()`),
/// - `objective` (per-objective evaluator; defaults to one entry of
///   `evaluate`),
/// - `objective_names` (defaults to `f_1 … f_k`).
pub trait Problem: Send + Sync {
    fn num_objectives(&self) -> usize;
    fn bounds(&self) -> &VariableBounds;
    fn evaluate(&self, x: &DecisionVector) -> ProblemResult<ObjectiveVector>;
    fn ideal(&self) -> &ObjectiveVector;
    fn nadir(&self) -> &ObjectiveVector;

    fn num_variables(&self) -> usize {
        self.bounds().len()
    }

    fn objective(&self, index: usize, x: &DecisionVector) -> ProblemResult<f64> {
        let k = self.num_objectives();
        if index >= k {
            return Err(ProblemError::ObjectiveIndexOutOfRange { index, num_objectives: k });
        }
        let values = self.evaluate(x)?;
        ensure_len("objective vector", k, values.len())?;
        scalar_from_array("objective", &values.slice(s![index..=index]))
    }

    fn objective_names(&self) -> Vec<String> {
        (1..=self.num_objectives()).map(|i| format!("f_{i}")).collect()
    }
}

/// Evaluate `problem` at `x`, checking the input length and that every
/// objective value is finite.
///
/// # Errors
/// - [`ProblemError::DimensionMismatch`] for a wrongly sized `x` or result.
/// - [`ProblemError::NonFiniteObjective`] for a `NaN`/`±∞` objective.
/// - Anything the evaluator itself returns.
pub fn evaluate_checked<P: Problem + ?Sized>(
    problem: &P, x: &DecisionVector,
) -> ProblemResult<ObjectiveVector> {
    if x.len() != problem.num_variables() {
        return Err(ProblemError::DimensionMismatch {
            what: "decision vector",
            expected: problem.num_variables(),
            found: x.len(),
        });
    }
    let values = problem.evaluate(x)?;
    if values.len() != problem.num_objectives() {
        return Err(ProblemError::DimensionMismatch {
            what: "objective vector",
            expected: problem.num_objectives(),
            found: values.len(),
        });
    }
    for (index, &value) in values.iter().enumerate() {
        if !value.is_finite() {
            return Err(ProblemError::NonFiniteObjective { index, value });
        }
    }
    Ok(values)
}
