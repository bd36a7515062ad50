//! engine::explain — the trade-off engine bound to one configured problem.
//!
//! Purpose
//! -------
//! Hold the explicit configuration (problem, settings, sign convention,
//! weights, solver) that the interactive caller builds once, and expose the
//! request-level operations: solve, explain, approximate, explore.
//!
//! Key behaviors
//! -------------
//! - Natural-convention vectors are converted with the [`SignConvention`]
//!   exactly once on the way in (reference points) and once on the way out
//!   (objective and approximate vectors).
//! - [`TradeoffEngine::solve`] and [`TradeoffEngine::explore`] work in the
//!   internal convention so their results can be fed back without
//!   re-flipping.
//! - Every operation takes `&self`; the engine is `Send + Sync` whenever
//!   its backend is, and concurrent requests share it read-only.
//!
//! Downstream usage
//! ----------------
//! - `explain` answers "where do I land and what are the trade-offs".
//! - `approximate` answers "what if I revise my aspiration" without a solve.
//! - `explore` is diagnostic and cross-checks the closed-form matrix.
use std::sync::Arc;

use ndarray::{Array1, Array2};
use serde::Serialize;
use tracing::debug;

use crate::{
    engine::{
        errors::EngineResult,
        options::{EngineOptions, ExtrapolationSpace},
    },
    optimization::constrained::{AugmentedLagrangian, ConstrainedSolver, SolveControl},
    problem::{
        normalize::Normalizer,
        settings::{ProblemDetails, ProblemSettings},
        sign::SignConvention,
        traits::{DecisionVector, ObjectiveVector, Problem},
        weights::Weights,
    },
    scalarization::solver::{ScalarizationResult, ScalarizationSolver},
    sensitivity::{
        sampler::NeighborhoodSampler,
        slope::{PairwiseSlopes, pairwise_slopes},
        tangent::{CrossCheck, TangentPlane, cross_check},
    },
    tradeoffs::{
        extrapolate::{MoveKind, classify_moves, extrapolate, extrapolate_many},
        matrix::{TradeoffMatrix, TradeoffRows, compute_tradeoffs, tradeoff_rows},
    },
    utils::ensure_len,
};

/// Solution of one request, reported in natural convention.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Explanation {
    pub decision: DecisionVector,
    pub objectives: ObjectiveVector,
    /// `λ ≤ 0`, one per objective.
    pub multipliers: Array1<f64>,
    /// Rows of zero multipliers are undefined; see [`TradeoffRows::undefined`].
    pub tradeoffs: TradeoffRows,
    pub alpha: f64,
    pub iterations: usize,
}

/// Extrapolated objective vector for a revised reference point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Approximation {
    pub objectives: ObjectiveVector,
    pub moves: Vec<MoveKind>,
}

/// Outcome of a neighborhood exploration, in the configured space.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlopeReport {
    pub space: ExtrapolationSpace,
    pub samples: Array2<f64>,
    pub projected: Array2<f64>,
    pub pairwise: PairwiseSlopes,
    pub plane: TangentPlane,
    pub cross_check: CrossCheck,
}

pub struct TradeoffEngine<S: ConstrainedSolver = AugmentedLagrangian> {
    problem: Arc<dyn Problem>,
    settings: ProblemSettings,
    convention: SignConvention,
    options: EngineOptions,
    weights: Weights,
    scalarizer: ScalarizationSolver<S>,
}

impl TradeoffEngine<AugmentedLagrangian> {
    /// Engine with the default augmented-Lagrangian backend built from
    /// `options.solver`.
    ///
    /// # Errors
    /// See [`TradeoffEngine::with_backend`].
    pub fn new(
        problem: Arc<dyn Problem>, settings: ProblemSettings, options: EngineOptions,
    ) -> EngineResult<Self> {
        let backend = AugmentedLagrangian::new(options.solver.clone());
        Self::with_backend(problem, settings, options, backend)
    }
}

impl<S: ConstrainedSolver> TradeoffEngine<S> {
    /// # Errors
    /// - `Problem(DimensionMismatch)` when settings, weights or the initial
    ///   guess disagree with the problem's dimensions.
    /// - `Problem(DegenerateRange)` when ideal and nadir coincide somewhere.
    pub fn with_backend(
        problem: Arc<dyn Problem>, settings: ProblemSettings, options: EngineOptions, backend: S,
    ) -> EngineResult<Self> {
        let k = problem.num_objectives();
        settings.validate(k)?;
        Normalizer::new(problem.ideal(), problem.nadir())?;
        let weights = match &options.weights {
            Some(w) => {
                w.check_len(k)?;
                w.clone()
            }
            None => Weights::uniform(k)?,
        };
        if let Some(x0) = &options.initial_guess {
            ensure_len("initial guess", problem.num_variables(), x0.len())?;
        }
        let convention = settings.sign_convention();
        Ok(Self {
            problem,
            settings,
            convention,
            options,
            weights,
            scalarizer: ScalarizationSolver::new(backend),
        })
    }

    pub fn problem(&self) -> &dyn Problem {
        self.problem.as_ref()
    }

    pub fn settings(&self) -> &ProblemSettings {
        &self.settings
    }

    pub fn convention(&self) -> &SignConvention {
        &self.convention
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    pub fn weights(&self) -> &Weights {
        &self.weights
    }

    /// Ideal, nadir (natural signs), names and display settings.
    pub fn details(&self) -> EngineResult<ProblemDetails> {
        Ok(ProblemDetails::describe(self.problem.as_ref(), &self.settings)?)
    }

    /// Solve the achievement problem for a natural-convention reference
    /// point. The result is in the internal convention.
    pub fn solve(
        &self, reference: &Array1<f64>, control: &SolveControl,
    ) -> EngineResult<ScalarizationResult> {
        let reference = self.convention.to_internal(reference)?;
        Ok(self.scalarizer.solve(
            self.problem.as_ref(),
            &self.weights,
            &reference,
            self.options.initial_guess.as_ref(),
            control,
        )?)
    }

    /// Closed-form trade-off matrix of a solved point.
    ///
    /// # Errors
    /// `Tradeoff(UndefinedTradeoff)` when any multiplier is zero.
    pub fn tradeoffs(&self, result: &ScalarizationResult) -> EngineResult<TradeoffMatrix> {
        Ok(compute_tradeoffs(&result.multipliers, &self.weights)?)
    }

    /// Trade-off rows of a solved point; rows of zero multipliers are left
    /// undefined.
    pub fn tradeoff_rows(&self, result: &ScalarizationResult) -> EngineResult<TradeoffRows> {
        Ok(tradeoff_rows(&result.multipliers, &self.weights)?)
    }

    /// Solve, then derive trade-offs, reporting objectives in natural signs.
    ///
    /// An inactive achievement constraint does not fail the request: its
    /// row is reported undefined and the other rows are still returned.
    pub fn explain(
        &self, reference: &Array1<f64>, control: &SolveControl,
    ) -> EngineResult<Explanation> {
        let result = self.solve(reference, control)?;
        let tradeoffs = self.tradeoff_rows(&result)?;
        if !tradeoffs.is_complete() {
            debug!(undefined = ?tradeoffs.undefined(), "trade-off rows undefined");
        }
        Ok(Explanation {
            objectives: self.convention.to_natural(&result.objectives)?,
            decision: result.x,
            multipliers: result.multipliers,
            tradeoffs,
            alpha: result.alpha,
            iterations: result.iterations,
        })
    }

    /// Extrapolate from a solved point (`current`, natural) with multipliers
    /// `multipliers` towards a revised natural reference point.
    ///
    /// `revised == current` returns `current` exactly in either space.
    pub fn approximate(
        &self, current: &Array1<f64>, multipliers: &Array1<f64>, revised: &Array1<f64>,
    ) -> EngineResult<Approximation> {
        let z0 = self.convention.to_internal(current)?;
        let z_new = self.convention.to_internal(revised)?;
        let internal = match self.options.extrapolation_space {
            ExtrapolationSpace::Objective => extrapolate(&z0, multipliers, &self.weights, &z_new)?,
            ExtrapolationSpace::Normalized => {
                let normalizer = self.normalizer()?;
                let z0_scaled = normalizer.normalize(&z0)?;
                let scaled = extrapolate(
                    &z0_scaled,
                    multipliers,
                    &self.weights,
                    &normalizer.normalize(&z_new)?,
                )?;
                // Displacement is applied to the raw point so `revised == current`
                // returns `current` bit for bit.
                &z0 + &normalizer.scale_displacement(&(scaled - &z0_scaled))?
            }
        };
        let moves = classify_moves(current, revised, &self.convention)?;
        debug!(?moves, "approximated revised reference point");
        Ok(Approximation { objectives: self.convention.to_natural(&internal)?, moves })
    }

    /// Sample around a solved point, project the samples onto its tangent
    /// plane, and estimate slopes empirically.
    ///
    /// Everything stays in the internal convention, in the configured
    /// [`ExtrapolationSpace`].
    pub fn explore(
        &self, result: &ScalarizationResult, sampler: &NeighborhoodSampler,
    ) -> EngineResult<SlopeReport> {
        let space = self.options.extrapolation_space;
        let center = match space {
            ExtrapolationSpace::Objective => result.objectives.clone(),
            ExtrapolationSpace::Normalized => self.normalizer()?.normalize(&result.objectives)?,
        };
        let samples = sampler.sample(&center)?;
        let projected = extrapolate_many(&center, &result.multipliers, &self.weights, &samples)?;
        let pairwise = pairwise_slopes(&projected)?;
        let plane = TangentPlane::fit(&projected)?;
        let closed = self.tradeoffs(result)?;
        let cross_check = cross_check(&closed, &plane, &self.weights)?;
        debug!(
            samples = samples.nrows(),
            rank = plane.rank(),
            max_abs_diff = cross_check.max_abs_diff,
            "explored neighborhood"
        );
        Ok(SlopeReport { space, samples, projected, pairwise, plane, cross_check })
    }

    fn normalizer(&self) -> EngineResult<Normalizer> {
        Ok(Normalizer::new(self.problem.ideal(), self.problem.nadir())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        engine::errors::EngineError,
        problem::{ProblemError, ProblemResult, Sense, VariableBounds},
        sensitivity::sampler::SamplingStrategy,
    };
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // - Construction checks, sign handling at the boundary.
    // - explain / approximate / explore on the linear front f = (x, 1 − x).
    // -------------------------------------------------------------------------

    struct Front {
        bounds: VariableBounds,
        ideal: ObjectiveVector,
        nadir: ObjectiveVector,
    }

    impl Problem for Front {
        fn num_objectives(&self) -> usize {
            2
        }
        fn bounds(&self) -> &VariableBounds {
            &self.bounds
        }
        fn evaluate(&self, x: &DecisionVector) -> ProblemResult<ObjectiveVector> {
            Ok(array![x[0], 1.0 - x[0]])
        }
        fn ideal(&self) -> &ObjectiveVector {
            &self.ideal
        }
        fn nadir(&self) -> &ObjectiveVector {
            &self.nadir
        }
    }

    fn front() -> Arc<dyn Problem> {
        Arc::new(Front {
            bounds: VariableBounds::from_pairs(&[(0.0, 1.0)]).unwrap(),
            ideal: array![0.0, 0.0],
            nadir: array![1.0, 1.0],
        })
    }

    fn engine(senses: Vec<Sense>) -> TradeoffEngine {
        let settings = ProblemSettings::new("front", senses);
        TradeoffEngine::new(front(), settings, EngineOptions::default()).unwrap()
    }

    #[test]
    // Purpose
    // -------
    // Mismatched configuration is rejected when the engine is built.
    //
    // Given
    // -----
    // - Three senses for two objectives; three weights; a 2-D initial guess
    //   for a 1-D problem.
    //
    // Expect
    // ------
    // - `EngineError::Problem(DimensionMismatch)` in each case.
    fn construction_validates_dimensions() {
        let three = ProblemSettings::new("front", vec![Sense::Minimize; 3]);
        let two = ProblemSettings::new("front", vec![Sense::Minimize; 2]);
        let bad_weights =
            EngineOptions::default().with_weights(Weights::uniform(3).unwrap());
        let bad_guess = EngineOptions::default().with_initial_guess(array![0.1, 0.2]);
        for result in [
            TradeoffEngine::new(front(), three, EngineOptions::default()),
            TradeoffEngine::new(front(), two.clone(), bad_weights),
            TradeoffEngine::new(front(), two, bad_guess),
        ] {
            assert!(matches!(
                result,
                Err(EngineError::Problem(ProblemError::DimensionMismatch { .. }))
            ));
        }
    }

    #[test]
    // Purpose
    // -------
    // A full explanation: balanced solution, unit trade-offs, natural signs.
    //
    // Given
    // -----
    // - Objective 1 maximized in natural terms (natural = −internal).
    // - Natural reference (0, 0), uniform weights.
    //
    // Expect
    // ------
    // - x = 0.5, natural objectives (−0.5, 0.5), trade-offs −1 off the
    //   diagonal.
    fn explain_reports_natural_objectives_and_tradeoffs() {
        // Arrange
        let engine = engine(vec![Sense::Maximize, Sense::Minimize]);

        // Act
        let out = engine.explain(&array![0.0, 0.0], &SolveControl::unlimited()).unwrap();

        // Assert
        assert_abs_diff_eq!(out.decision[0], 0.5, epsilon = 1e-4);
        assert_abs_diff_eq!(out.objectives[0], -0.5, epsilon = 1e-4);
        assert_abs_diff_eq!(out.objectives[1], 0.5, epsilon = 1e-4);
        assert!(out.tradeoffs.is_complete());
        assert_abs_diff_eq!(out.tradeoffs.get(0, 1).unwrap(), -1.0, epsilon = 1e-3);
        assert_eq!(out.tradeoffs.get(1, 1), Some(1.0));
    }

    #[test]
    // Purpose
    // -------
    // Approximation lands on the tangent line and classifies moves.
    //
    // Given
    // -----
    // - z0 = (0.5, 0.5), λ = (−0.5, −0.5), revised (0.4, 0.5).
    //
    // Expect
    // ------
    // - (0.45, 0.55); moves (Improve, Keep). The normalized space on unit
    //   ranges gives the same point.
    fn approximate_projects_and_classifies() {
        // Arrange
        let objective = engine(vec![Sense::Minimize; 2]);
        let settings = ProblemSettings::new("front", vec![Sense::Minimize; 2]);
        let options =
            EngineOptions::default().with_extrapolation_space(ExtrapolationSpace::Normalized);
        let normalized = TradeoffEngine::new(front(), settings, options).unwrap();
        let (z0, lambda, revised) = (array![0.5, 0.5], array![-0.5, -0.5], array![0.4, 0.5]);

        // Act
        let a = objective.approximate(&z0, &lambda, &revised).unwrap();
        let b = normalized.approximate(&z0, &lambda, &revised).unwrap();

        // Assert
        assert_abs_diff_eq!(a.objectives[0], 0.45, epsilon = 1e-12);
        assert_abs_diff_eq!(a.objectives[1], 0.55, epsilon = 1e-12);
        assert_eq!(a.moves, vec![MoveKind::Improve, MoveKind::Keep]);
        assert_abs_diff_eq!(b.objectives[0], a.objectives[0], epsilon = 1e-12);
        assert_abs_diff_eq!(b.objectives[1], a.objectives[1], epsilon = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Revising nothing returns the current point exactly in normalized mode,
    // even when ranges are not unit and do not start at zero.
    //
    // Given
    // -----
    // - Ideal (0.1, −3.7), nadir (1.3, 2.9); normalized extrapolation.
    // - current = revised = (0.7, −0.3), λ = (−0.3, −0.7).
    //
    // Expect
    // ------
    // - objectives equal current bit for bit; moves (Keep, Keep).
    fn normalized_approximate_is_idempotent() {
        // Arrange
        let problem = Arc::new(Front {
            bounds: VariableBounds::from_pairs(&[(0.0, 1.0)]).unwrap(),
            ideal: array![0.1, -3.7],
            nadir: array![1.3, 2.9],
        });
        let settings = ProblemSettings::new("front", vec![Sense::Maximize, Sense::Minimize]);
        let options =
            EngineOptions::default().with_extrapolation_space(ExtrapolationSpace::Normalized);
        let engine = TradeoffEngine::new(problem, settings, options).unwrap();
        let current = array![0.7, -0.3];

        // Act
        let out = engine.approximate(&current, &array![-0.3, -0.7], &current).unwrap();

        // Assert
        assert_eq!(out.objectives, current);
        assert_eq!(out.moves, vec![MoveKind::Keep, MoveKind::Keep]);
    }

    #[test]
    // Purpose
    // -------
    // An inactive achievement constraint still yields an explanation.
    //
    // Given
    // -----
    // - f = (x, 0.5 + 0.5x) on [0, 1]; both objectives fall together, so the
    //   optimum is x = 0 and only the second constraint binds at reference
    //   (0, 0).
    //
    // Expect
    // ------
    // - The solution is returned with λ_0 = 0, row 0 undefined and row 1
    //   defined with entry [1][0] = 0.
    fn explain_survives_inactive_constraint() {
        // Arrange
        struct Aligned {
            bounds: VariableBounds,
            ideal: ObjectiveVector,
            nadir: ObjectiveVector,
        }
        impl Problem for Aligned {
            fn num_objectives(&self) -> usize {
                2
            }
            fn bounds(&self) -> &VariableBounds {
                &self.bounds
            }
            fn evaluate(&self, x: &DecisionVector) -> ProblemResult<ObjectiveVector> {
                Ok(array![x[0], 0.5 + 0.5 * x[0]])
            }
            fn ideal(&self) -> &ObjectiveVector {
                &self.ideal
            }
            fn nadir(&self) -> &ObjectiveVector {
                &self.nadir
            }
        }
        let problem = Arc::new(Aligned {
            bounds: VariableBounds::from_pairs(&[(0.0, 1.0)]).unwrap(),
            ideal: array![0.0, 0.5],
            nadir: array![1.0, 1.0],
        });
        let settings = ProblemSettings::new("aligned", vec![Sense::Minimize; 2]);
        let engine = TradeoffEngine::new(problem, settings, EngineOptions::default()).unwrap();

        // Act
        let out = engine.explain(&array![0.0, 0.0], &SolveControl::unlimited()).unwrap();

        // Assert
        assert_abs_diff_eq!(out.decision[0], 0.0, epsilon = 1e-3);
        assert_eq!(out.multipliers[0], 0.0);
        assert_eq!(out.tradeoffs.undefined(), vec![0]);
        assert_eq!(out.tradeoffs.get(1, 0), Some(0.0));
        assert_eq!(out.tradeoffs.get(1, 1), Some(1.0));
    }

    #[test]
    // Purpose
    // -------
    // Exploration recovers the closed-form slope of the linear front.
    //
    // Given
    // -----
    // - The solved balanced point and 12 sphere samples of radius 0.05.
    //
    // Expect
    // ------
    // - Pairwise slope ≈ −1 and a small cross-check difference.
    fn explore_cross_checks_closed_form() {
        // Arrange
        let engine = engine(vec![Sense::Minimize; 2]);
        let result = engine.solve(&array![0.0, 0.0], &SolveControl::unlimited()).unwrap();
        let sampler = NeighborhoodSampler::new(SamplingStrategy::Sphere, 12, 0.05, 5).unwrap();

        // Act
        let report = engine.explore(&result, &sampler).unwrap();

        // Assert
        assert_eq!(report.projected.nrows(), 12);
        assert_abs_diff_eq!(report.pairwise.slopes[[0, 1]], -1.0, epsilon = 1e-2);
        assert!(report.cross_check.max_abs_diff < 1e-2);
    }

    #[test]
    // Purpose
    // -------
    // Details come back in natural signs.
    //
    // Given
    // -----
    // - Objective 1 maximized.
    //
    // Expect
    // ------
    // - nadir (−1, 1) and generated short names f_1, f_2.
    fn details_use_natural_signs() {
        let details = engine(vec![Sense::Maximize, Sense::Minimize]).details().unwrap();
        assert_eq!(details.nadir, vec![-1.0, 1.0]);
        assert_eq!(details.num_objectives, 2);
        assert_eq!(details.short_names, vec!["f_1".to_string(), "f_2".to_string()]);
    }
}
