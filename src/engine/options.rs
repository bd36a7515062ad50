//! engine::options — configuration handed to [`TradeoffEngine`](super::TradeoffEngine).
use serde::{Deserialize, Serialize};

use crate::{
    optimization::constrained::SolverOptions,
    problem::{traits::DecisionVector, weights::Weights},
};

/// Coordinates in which tangent-plane extrapolation and neighborhood
/// exploration run.
///
/// - `Objective`: internal objective values directly, `n = −λ∘w`.
/// - `Normalized`: ideal/nadir-normalized values, mapped back afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtrapolationSpace {
    #[default]
    Objective,
    Normalized,
}

/// Engine configuration.
///
/// `weights: None` means uniform `1/k`. `initial_guess` seeds every solve;
/// `None` starts from the midpoint of the variable bounds.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EngineOptions {
    pub solver: SolverOptions,
    pub weights: Option<Weights>,
    pub initial_guess: Option<DecisionVector>,
    pub extrapolation_space: ExtrapolationSpace,
}

impl EngineOptions {
    pub fn new(solver: SolverOptions) -> Self {
        Self { solver, ..Self::default() }
    }

    pub fn with_weights(mut self, weights: Weights) -> Self {
        self.weights = Some(weights);
        self
    }

    pub fn with_initial_guess(mut self, x0: DecisionVector) -> Self {
        self.initial_guess = Some(x0);
        self
    }

    pub fn with_extrapolation_space(mut self, space: ExtrapolationSpace) -> Self {
        self.extrapolation_space = space;
        self
    }
}
