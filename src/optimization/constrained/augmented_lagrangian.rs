//! constrained::augmented_lagrangian — default constrained backend.
//!
//! Purpose
//! -------
//! Solve an [`EpigraphProblem`] with a Powell–Hestenes–Rockafellar
//! augmented Lagrangian: each outer iteration minimizes the penalty
//! function of [`PenaltyAdapter`] with L-BFGS, then updates the multipliers
//! `μ ← max(0, μ + ρ g)` and, when the violation did not shrink enough,
//! grows the penalty `ρ`.
//!
//! Key behaviors
//! -------------
//! - Box bounds are enforced exactly through the logistic reparametrization,
//!   so only the `m` epigraph inequalities carry multipliers.
//! - Convergence is declared when the KKT violation
//!   `max_i |max(g_i, −μ_i/ρ)|` falls below `tol_feasibility`; it measures
//!   primal feasibility and complementarity together.
//! - An inner run that fails inside argmin (typically a line search that
//!   cannot make progress) is retried once with the other line search from
//!   the best point it reached; if that also fails, the outer loop keeps
//!   the best point and relies on the multiplier/penalty update.
//! - Timeouts, cancellation and problem failures abort immediately.
//!
//! Invariants & assumptions
//! ------------------------
//! - Returned multipliers are non-negative, one per constraint, in
//!   constraint order; at a KKT point they sum to one.
//! - No partial result is returned: failing to converge within
//!   `max_outer` iterations yields [`OptError::SolverDivergence`].
//!
//! Conventions
//! -----------
//! - Initial state: `x0` is the caller's start (clamped) or the middle of
//!   the box, `α0 = max_i c_i(x0)`, `μ0 = 1/m`, `ρ0 = initial_penalty`.
//! - Progress is logged with `tracing::debug!` per outer iteration.
use ndarray::{Array1, Zip};
use tracing::{debug, warn};

use crate::{
    optimization::{
        constrained::{
            adapter::{BestPoint, PenaltyAdapter},
            control::{Deadline, SolveControl},
            run::{InnerOutcome, run_inner},
            traits::{ConstrainedSolver, EpigraphProblem, EpigraphSolution, SolverOptions},
            types::{FnEvalMap, Theta},
        },
        errors::{OptError, OptResult},
    },
    problem::traits::DecisionVector,
};

/// Augmented-Lagrangian backend over argmin L-BFGS.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AugmentedLagrangian {
    options: SolverOptions,
}

impl AugmentedLagrangian {
    pub fn new(options: SolverOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &SolverOptions {
        &self.options
    }

    /// One inner minimization with line-search fallback.
    ///
    /// Returns the new iterate and a status string.
    fn minimize_subproblem(
        &self, problem: &dyn EpigraphProblem, theta: &Theta, multipliers: &Array1<f64>,
        penalty: f64, deadline: &Deadline, fn_evals: &mut FnEvalMap,
    ) -> OptResult<(Theta, String)> {
        let primary = self.options.line_searcher;
        let mut current = theta.clone();
        let mut last_err = None;
        for line_searcher in [primary, primary.alternate()] {
            let best = BestPoint::default();
            let adapter =
                PenaltyAdapter::new(problem, multipliers, penalty, deadline).tracking(&best);
            match run_inner(current.clone(), &self.options, line_searcher, adapter) {
                Ok(outcome) => {
                    merge_counts(fn_evals, &outcome);
                    return Ok((outcome.theta, outcome.status));
                }
                Err(err) if err.is_fatal() => return Err(err),
                Err(err) => {
                    debug!(?line_searcher, error = %err, "inner L-BFGS run failed");
                    if let Some((_, reached)) = best.into_inner().ok().flatten() {
                        current = reached;
                    }
                    last_err = Some(err);
                }
            }
        }
        let reason = last_err.map(|e| e.to_string()).unwrap_or_default();
        warn!(penalty, %reason, "both line searches failed; keeping best iterate reached");
        Ok((current, format!("inner solve failed: {reason}")))
    }
}

impl ConstrainedSolver for AugmentedLagrangian {
    fn solve(
        &self, problem: &dyn EpigraphProblem, start: Option<&DecisionVector>,
        control: &SolveControl,
    ) -> OptResult<EpigraphSolution> {
        let deadline = control.start();
        let m = problem.num_constraints();
        if m == 0 {
            return Err(OptError::NoConstraints);
        }
        let bounds = problem.bounds();
        let x0 = match start {
            Some(x) if x.len() != bounds.len() => {
                return Err(OptError::StartPointDimMismatch {
                    expected: bounds.len(),
                    found: x.len(),
                });
            }
            Some(x) => bounds.clamp(x),
            None => bounds.midpoint(),
        };

        let opts = &self.options;
        let mut multipliers = Array1::from_elem(m, 1.0 / m as f64);
        let mut penalty = opts.initial_penalty;
        let mut theta = {
            let adapter = PenaltyAdapter::new(problem, &multipliers, penalty, &deadline);
            let c0 = adapter.constraints_at(&x0)?;
            adapter.encode(&x0, c0.fold(f64::NEG_INFINITY, |acc, &c| acc.max(c)))
        };
        let mut previous_violation = f64::INFINITY;
        let mut status = String::from("Not started");
        let mut fn_evals = FnEvalMap::new();

        for outer in 1..=opts.max_outer {
            deadline.check()?;
            let (next, inner_status) = self.minimize_subproblem(
                problem,
                &theta,
                &multipliers,
                penalty,
                &deadline,
                &mut fn_evals,
            )?;
            theta = next;
            status = inner_status;

            let point = PenaltyAdapter::new(problem, &multipliers, penalty, &deadline)
                .decode(&theta)?;
            let violation = Zip::from(&point.constraints)
                .and(&multipliers)
                .fold(0.0_f64, |acc, &c, &mu| acc.max((c - point.alpha).max(-mu / penalty).abs()));
            multipliers = Zip::from(&point.constraints)
                .and(&multipliers)
                .map_collect(|&c, &mu| (mu + penalty * (c - point.alpha)).max(0.0));
            debug!(
                outer,
                penalty,
                violation,
                alpha = point.alpha,
                status = %status,
                "augmented Lagrangian outer iteration"
            );

            if violation <= opts.tol_feasibility {
                return Ok(EpigraphSolution {
                    x: point.x,
                    alpha: point.alpha,
                    multipliers,
                    constraint_values: point.constraints,
                    iterations: outer,
                    violation,
                    status,
                    fn_evals,
                });
            }
            if violation > 0.25 * previous_violation {
                penalty = (penalty * opts.penalty_growth).min(opts.max_penalty);
            }
            previous_violation = violation;
        }

        Err(OptError::SolverDivergence {
            iterations: opts.max_outer,
            violation: previous_violation,
            status,
        })
    }
}

fn merge_counts(total: &mut FnEvalMap, outcome: &InnerOutcome) {
    for (name, count) in &outcome.fn_evals {
        *total.entry(name.clone()).or_insert(0) += count;
    }
}
