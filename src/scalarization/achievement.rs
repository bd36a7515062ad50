//! scalarization::achievement — the epigraph form of the achievement
//! scalarizing function.
//!
//! For a problem with objectives `f`, ideal/nadir normalizer `N`, weights
//! `w > 0` and reference point `z`, the constraint list handed to the
//! constrained backend is
//!
//! ```text
//!   c_i(x) = w_i · ( N(f(x))_i − N(z)_i )      for i = 0..k
//! ```
//!
//! and the backend minimizes `α` subject to `c_i(x) ≤ α`. Constraint order
//! is objective order, so multiplier `i` belongs to objective `i`.
//!
//! Construction fails with [`ProblemError`](crate::problem::ProblemError)
//! variants; constraint evaluation wraps them in `OptError::Problem`.
use ndarray::{Array1, Zip};

use crate::{
    optimization::{constrained::traits::EpigraphProblem, errors::OptResult},
    problem::{
        errors::ProblemResult,
        normalize::Normalizer,
        traits::{DecisionVector, ObjectiveVector, Problem, VariableBounds, evaluate_checked},
        weights::Weights,
    },
    utils::{ensure_finite, ensure_len},
};

/// Achievement value `max_i w_i (f_i − z_i)`.
///
/// # Errors
/// `ProblemError::DimensionMismatch` if the three vectors differ in length.
pub fn asf(
    objectives: &Array1<f64>, weights: &Weights, reference: &Array1<f64>,
) -> ProblemResult<f64> {
    ensure_len("objective vector", weights.len(), objectives.len())?;
    ensure_len("reference point", weights.len(), reference.len())?;
    Ok(weighted_deviation(objectives, weights.as_array(), reference)
        .fold(f64::NEG_INFINITY, |acc, &v| acc.max(v)))
}

fn weighted_deviation(f: &Array1<f64>, w: &Array1<f64>, z: &Array1<f64>) -> Array1<f64> {
    Zip::from(f).and(w).and(z).map_collect(|&f, &w, &z| w * (f - z))
}

/// Achievement problem for one `(weights, reference)` pair.
pub struct AchievementProblem<'a, P: Problem + ?Sized> {
    problem: &'a P,
    normalizer: Normalizer,
    weights: &'a Weights,
    reference: Array1<f64>,
}

impl<'a, P: Problem + ?Sized> AchievementProblem<'a, P> {
    /// Build the constraint list for `reference` (internal convention).
    ///
    /// # Errors
    /// - `DegenerateRange` if ideal equals nadir somewhere.
    /// - `DimensionMismatch` / `NonFiniteValue`
    ///   for a reference point or weights of the wrong shape.
    pub fn new(
        problem: &'a P, weights: &'a Weights, reference: &Array1<f64>,
    ) -> ProblemResult<Self> {
        let k = problem.num_objectives();
        weights.check_len(k)?;
        ensure_len("reference point", k, reference.len())?;
        ensure_finite("reference point", reference)?;
        let normalizer = Normalizer::new(problem.ideal(), problem.nadir())?;
        let reference = normalizer.normalize(reference)?;
        Ok(Self { problem, normalizer, weights, reference })
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    /// Normalized reference point.
    pub fn reference(&self) -> &Array1<f64> {
        &self.reference
    }

    /// Evaluate the problem and return `(f(x), c(x))`.
    pub fn evaluate(&self, x: &DecisionVector) -> ProblemResult<(ObjectiveVector, Array1<f64>)> {
        let objectives = evaluate_checked(self.problem, x)?;
        let scaled = self.normalizer.normalize(&objectives)?;
        let constraints = weighted_deviation(&scaled, self.weights.as_array(), &self.reference);
        Ok((objectives, constraints))
    }

    /// Achievement value at `x`: the largest constraint value.
    pub fn achievement(&self, x: &DecisionVector) -> ProblemResult<f64> {
        let (objectives, _) = self.evaluate(x)?;
        asf(&self.normalizer.normalize(&objectives)?, self.weights, &self.reference)
    }
}

impl<'a, P: Problem + ?Sized> EpigraphProblem for AchievementProblem<'a, P> {
    fn bounds(&self) -> &VariableBounds {
        self.problem.bounds()
    }

    fn num_constraints(&self) -> usize {
        self.problem.num_objectives()
    }

    fn constraints(&self, x: &DecisionVector) -> OptResult<Array1<f64>> {
        Ok(self.evaluate(x)?.1)
    }
}
