//! constrained — bounded epigraph solver interface and default backend.
//!
//! Purpose
//! -------
//! Solve problems of the form "minimize α over a box subject to
//! c_i(x) ≤ α" and report one KKT multiplier per inequality. The
//! scalarization layer only sees the [`ConstrainedSolver`] trait; the
//! shipped implementation is [`AugmentedLagrangian`], which wraps argmin's
//! L-BFGS (More–Thuente or Hager–Zhang line search) in an outer
//! multiplier loop.
//!
//! Key behaviors
//! -------------
//! - Box bounds handled by a logistic reparametrization of each variable.
//! - Gradients of the penalty subproblem via `finitediff`, with closure
//!   error capture and a forward-difference fallback.
//! - Timeout and cancellation through [`SolveControl`], checked before
//!   each outer iteration and inside every penalty evaluation.
//!
//! Invariants & assumptions
//! ------------------------
//! - Multipliers are reported as `μ_i ≥ 0` in constraint order.
//! - A run that does not reach the feasibility tolerance is an error, never
//!   a partial result.
//!
//! Conventions
//! -----------
//! - Inner parameter layout `θ = (u, α)` (see [`types`]).
//! - Errors are [`OptError`](crate::optimization::errors::OptError); raw
//!   argmin errors are converted at the executor boundary.
//!
//! Testing notes
//! -------------
//! - Adapter tests compare the assembled gradient with finite differences
//!   of the penalty itself.
//! - Backend tests solve linear fronts with known primal and dual
//!   solutions and exercise timeout, cancellation and bad inputs.

pub mod adapter;
pub mod augmented_lagrangian;
pub mod builders;
pub mod control;
pub mod run;
pub mod traits;
pub mod types;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::augmented_lagrangian::AugmentedLagrangian;
pub use self::control::{CancelToken, Deadline, SolveControl};
pub use self::traits::{
    ConstrainedSolver, EpigraphProblem, EpigraphSolution, LineSearcher, SolverOptions, Tolerances,
};
pub use self::types::{DEFAULT_LBFGS_MEM, FnEvalMap};

pub mod prelude {
    pub use super::augmented_lagrangian::AugmentedLagrangian;
    pub use super::control::{CancelToken, SolveControl};
    pub use super::traits::{
        ConstrainedSolver, EpigraphProblem, EpigraphSolution, LineSearcher, SolverOptions,
        Tolerances,
    };
}
