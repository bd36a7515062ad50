//! scalarization::solver — solve one achievement problem and extract duals.
use ndarray::Array1;
use serde::Serialize;
use tracing::debug;

use crate::{
    optimization::{
        constrained::{AugmentedLagrangian, ConstrainedSolver, SolveControl, SolverOptions},
        errors::OptResult,
    },
    problem::{
        traits::{DecisionVector, ObjectiveVector, Problem},
        weights::Weights,
    },
    scalarization::achievement::{AchievementProblem, asf},
};

/// Solution of one achievement problem.
///
/// - `objectives` is `f(x*)` in the internal (minimize) convention.
/// - `multipliers[i] = λ_i = −μ_i ≤ 0`, where `μ_i ≥ 0` is the backend's
///   KKT multiplier of the achievement constraint of objective `i`. An
///   inactive constraint reports `+0.0`.
/// - `alpha` is the achievement value at `x*`: the largest weighted
///   normalized deviation from the reference point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScalarizationResult {
    pub x: DecisionVector,
    pub objectives: ObjectiveVector,
    pub multipliers: Array1<f64>,
    pub alpha: f64,
    pub iterations: usize,
}

/// Builds achievement problems and delegates them to a constrained backend.
#[derive(Debug, Clone, Default)]
pub struct ScalarizationSolver<S: ConstrainedSolver = AugmentedLagrangian> {
    backend: S,
}

impl ScalarizationSolver<AugmentedLagrangian> {
    /// Use the default augmented-Lagrangian backend.
    pub fn with_options(options: SolverOptions) -> Self {
        Self { backend: AugmentedLagrangian::new(options) }
    }
}

impl<S: ConstrainedSolver> ScalarizationSolver<S> {
    pub fn new(backend: S) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// Find the Pareto-optimal point closest to `reference` in the direction
    /// given by `weights`.
    ///
    /// All vectors use the internal (minimize) convention.
    ///
    /// # Errors
    /// - `OptError::Problem` wrapping `DegenerateRange`, `DimensionMismatch`
    ///   or evaluation failures.
    /// - `OptError::SolverDivergence`, `SolverTimeout`, `SolverCancelled`
    ///   from the backend; no partial result is returned.
    pub fn solve<P: Problem + ?Sized>(
        &self, problem: &P, weights: &Weights, reference: &Array1<f64>,
        start: Option<&DecisionVector>, control: &SolveControl,
    ) -> OptResult<ScalarizationResult> {
        let achievement = AchievementProblem::new(problem, weights, reference)?;
        let solution = self.backend.solve(&achievement, start, control)?;

        let (objectives, _) = achievement.evaluate(&solution.x)?;
        let scaled = achievement.normalizer().normalize(&objectives)?;
        let alpha = asf(&scaled, weights, achievement.reference())?;
        debug!(
            iterations = solution.iterations,
            alpha,
            backend_alpha = solution.alpha,
            violation = solution.violation,
            "achievement problem solved"
        );
        Ok(ScalarizationResult {
            x: solution.x,
            objectives,
            multipliers: solution.multipliers.mapv(|mu| if mu == 0.0 { 0.0 } else { -mu }),
            alpha,
            iterations: solution.iterations,
        })
    }
}
