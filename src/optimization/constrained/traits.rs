//! constrained::traits — the constrained-solver collaborator interface.
//!
//! Purpose
//! -------
//! Describe, as narrowly as possible, what a bounded nonlinear solver must
//! offer so the scalarization layer can delegate to it:
//!
//! ```text
//!   minimize    α
//!   over        x ∈ [lower, upper],  α ∈ ℝ
//!   subject to  c_i(x) ≤ α           for i = 0..m
//! ```
//!
//! and report the primal optimum together with one non-negative KKT
//! multiplier per inequality. [`EpigraphProblem`] is the problem side,
//! [`ConstrainedSolver`] the backend side; any backend implementing the
//! latter can replace the default augmented-Lagrangian solver without
//! touching scalarization, trade-off or extrapolation code.
//!
//! Also hosts the backend configuration: [`Tolerances`], [`LineSearcher`]
//! and [`SolverOptions`].
use std::str::FromStr;

use ndarray::Array1;

use crate::{
    optimization::{
        constrained::{
            control::SolveControl,
            types::FnEvalMap,
            validation::{
                verify_penalty, verify_tol_cost, verify_tol_feasibility, verify_tol_grad,
            },
        },
        errors::{OptError, OptResult},
    },
    problem::traits::{DecisionVector, VariableBounds},
};

/// Epigraph-form problem: minimize `α` subject to `c_i(x) ≤ α`.
pub trait EpigraphProblem: Send + Sync {
    /// Box bounds on the decision variables.
    fn bounds(&self) -> &VariableBounds;

    /// Number of inequality constraints `m` (at least one).
    fn num_constraints(&self) -> usize;

    /// Evaluate every `c_i(x)`, in constraint order.
    fn constraints(&self, x: &DecisionVector) -> OptResult<Array1<f64>>;
}

/// A bounded constrained backend with dual extraction.
///
/// Implementations must not share mutable state between concurrent calls.
pub trait ConstrainedSolver: Send + Sync {
    /// Solve `problem`, starting from `start` (clamped into the bounds) or
    /// from the middle of the box.
    ///
    /// # Errors
    /// - [`OptError::SolverDivergence`] if the backend fails to converge.
    /// - [`OptError::SolverTimeout`] / [`OptError::SolverCancelled`] when
    ///   `control` expires.
    fn solve(
        &self, problem: &dyn EpigraphProblem, start: Option<&DecisionVector>,
        control: &SolveControl,
    ) -> OptResult<EpigraphSolution>;
}

/// Primal–dual optimum of an [`EpigraphProblem`].
///
/// - `multipliers[i] ≥ 0` is the KKT multiplier of `c_i(x) ≤ α`: the rate at
///   which the optimal `α` falls when constraint `i` is relaxed by one unit.
/// - `constraint_values[i] = c_i(x)`.
#[derive(Debug, Clone, PartialEq)]
pub struct EpigraphSolution {
    pub x: DecisionVector,
    pub alpha: f64,
    pub multipliers: Array1<f64>,
    pub constraint_values: Array1<f64>,
    pub iterations: usize,
    pub violation: f64,
    pub status: String,
    pub fn_evals: FnEvalMap,
}

/// Line-search algorithm used inside L-BFGS.
///
/// Parsed case-insensitively from `"MoreThuente"` / `"HagerZhang"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineSearcher {
    MoreThuente,
    HagerZhang,
}

impl LineSearcher {
    /// The other line search, used as a fallback when one fails.
    pub fn alternate(self) -> Self {
        match self {
            LineSearcher::MoreThuente => LineSearcher::HagerZhang,
            LineSearcher::HagerZhang => LineSearcher::MoreThuente,
        }
    }
}

impl FromStr for LineSearcher {
    type Err = OptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "morethuente" => Ok(LineSearcher::MoreThuente),
            "hagerzhang" => Ok(LineSearcher::HagerZhang),
            _ => Err(OptError::InvalidLineSearch {
                name: s.to_string(),
                reason: "Valid options are case insensitive 'MoreThuente' or 'HagerZhang'.",
            }),
        }
    }
}

/// Stopping rules for each inner L-BFGS run.
///
/// Any field can be `None` but **at least one** must be provided.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerances {
    pub tol_grad: Option<f64>,
    pub tol_cost: Option<f64>,
    pub max_iter: Option<usize>,
}

impl Tolerances {
    /// Construct validated tolerances.
    ///
    /// # Errors
    /// - [`OptError::NoTolerancesProvided`] if all three are `None`.
    /// - [`OptError::InvalidTolGrad`] / [`OptError::InvalidTolCost`] for
    ///   non-finite or non-positive tolerances.
    /// - [`OptError::InvalidMaxIter`] if `max_iter == 0`.
    pub fn new(
        tol_grad: Option<f64>, tol_cost: Option<f64>, max_iter: Option<usize>,
    ) -> OptResult<Self> {
        if tol_grad.is_none() && tol_cost.is_none() && max_iter.is_none() {
            return Err(OptError::NoTolerancesProvided);
        }
        verify_tol_cost(tol_cost)?;
        verify_tol_grad(tol_grad)?;
        if max_iter == Some(0) {
            return Err(OptError::InvalidMaxIter {
                max_iter: 0,
                reason: "Maximum iterations must be greater than zero.",
            });
        }
        Ok(Self { tol_grad, tol_cost, max_iter })
    }
}

impl Default for Tolerances {
    fn default() -> Self {
        Self { tol_grad: Some(1e-8), tol_cost: None, max_iter: Some(500) }
    }
}

/// Configuration of the augmented-Lagrangian backend.
///
/// Default:
/// - inner `tols`: `tol_grad = 1e-8`, `tol_cost = None`, `max_iter = 500`
/// - `line_searcher`: `MoreThuente`, `lbfgs_mem`: `None` (uses 7)
/// - outer loop: `max_outer = 100`, `tol_feasibility = 1e-7`
/// - penalty: start at 10, grow ×10 on slow progress, cap at 1e8
/// - `verbose`: `false`
#[derive(Debug, Clone, PartialEq)]
pub struct SolverOptions {
    pub tols: Tolerances,
    pub line_searcher: LineSearcher,
    pub lbfgs_mem: Option<usize>,
    pub max_outer: usize,
    pub tol_feasibility: f64,
    pub initial_penalty: f64,
    pub penalty_growth: f64,
    pub max_penalty: f64,
    pub verbose: bool,
}

impl SolverOptions {
    /// Create options with the given inner settings and default outer loop.
    ///
    /// # Errors
    /// [`OptError::InvalidLBFGSMem`] if `lbfgs_mem == Some(0)`.
    pub fn new(
        tols: Tolerances, line_searcher: LineSearcher, lbfgs_mem: Option<usize>,
    ) -> OptResult<Self> {
        if lbfgs_mem == Some(0) {
            return Err(OptError::InvalidLBFGSMem {
                mem: 0,
                reason: "L-BFGS memory must be greater than zero.",
            });
        }
        Ok(Self { tols, line_searcher, lbfgs_mem, ..Self::default() })
    }

    /// Set the outer iteration cap and the feasibility tolerance.
    pub fn with_outer_loop(mut self, max_outer: usize, tol_feasibility: f64) -> OptResult<Self> {
        if max_outer == 0 {
            return Err(OptError::InvalidMaxIter {
                max_iter: 0,
                reason: "Outer iterations must be greater than zero.",
            });
        }
        verify_tol_feasibility(tol_feasibility)?;
        self.max_outer = max_outer;
        self.tol_feasibility = tol_feasibility;
        Ok(self)
    }

    /// Set the penalty schedule.
    pub fn with_penalty(mut self, initial: f64, growth: f64, max: f64) -> OptResult<Self> {
        verify_penalty(initial, growth, max)?;
        self.initial_penalty = initial;
        self.penalty_growth = growth;
        self.max_penalty = max;
        Ok(self)
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            tols: Tolerances::default(),
            line_searcher: LineSearcher::MoreThuente,
            lbfgs_mem: None,
            max_outer: 100,
            tol_feasibility: 1e-7,
            initial_penalty: 10.0,
            penalty_growth: 10.0,
            max_penalty: 1e8,
            verbose: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // - `LineSearcher` parsing and fallback pairing.
    // - `Tolerances` / `SolverOptions` validation.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Line-search names parse case-insensitively; unknown names fail.
    //
    // Given
    // -----
    // - "hagerzhang", "MORETHUENTE", "backtracking".
    //
    // Expect
    // ------
    // - Two successes, one `InvalidLineSearch`, and `alternate` swaps them.
    fn line_searcher_parses_case_insensitively() {
        assert_eq!("hagerzhang".parse::<LineSearcher>(), Ok(LineSearcher::HagerZhang));
        assert_eq!("MORETHUENTE".parse::<LineSearcher>(), Ok(LineSearcher::MoreThuente));
        assert!(matches!(
            "backtracking".parse::<LineSearcher>(),
            Err(OptError::InvalidLineSearch { .. })
        ));
        assert_eq!(LineSearcher::MoreThuente.alternate(), LineSearcher::HagerZhang);
    }

    #[test]
    // Purpose
    // -------
    // At least one stopping rule is required and each must be valid.
    //
    // Given
    // -----
    // - All-None tolerances, a zero max_iter, and a valid triple.
    //
    // Expect
    // ------
    // - `NoTolerancesProvided`, `InvalidMaxIter`, Ok.
    fn tolerances_require_a_valid_stopping_rule() {
        assert_eq!(Tolerances::new(None, None, None), Err(OptError::NoTolerancesProvided));
        assert!(matches!(Tolerances::new(None, None, Some(0)), Err(OptError::InvalidMaxIter { .. })));
        assert!(Tolerances::new(Some(1e-6), None, Some(50)).is_ok());
    }

    #[test]
    // Purpose
    // -------
    // Solver options validate memory, outer loop and penalty settings.
    //
    // Given
    // -----
    // - Zero L-BFGS memory; zero outer iterations; a valid custom schedule.
    //
    // Expect
    // ------
    // - Errors for the invalid inputs, and the custom values stored.
    fn solver_options_validate_settings() {
        // Arrange
        let tols = Tolerances::default();

        // Act
        let zero_mem = SolverOptions::new(tols, LineSearcher::HagerZhang, Some(0));
        let zero_outer = SolverOptions::default().with_outer_loop(0, 1e-6);
        let custom = SolverOptions::new(tols, LineSearcher::HagerZhang, Some(5))
            .and_then(|o| o.with_outer_loop(20, 1e-6))
            .and_then(|o| o.with_penalty(1.0, 5.0, 1e6))
            .unwrap();

        // Assert
        assert!(matches!(zero_mem, Err(OptError::InvalidLBFGSMem { .. })));
        assert!(matches!(zero_outer, Err(OptError::InvalidMaxIter { .. })));
        assert_eq!(custom.max_outer, 20);
        assert_eq!(custom.penalty_growth, 5.0);
        assert_eq!(custom.line_searcher, LineSearcher::HagerZhang);
        assert!(!custom.verbose);
    }
}
