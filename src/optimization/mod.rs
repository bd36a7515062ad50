//! optimization — constrained solving, numerical helpers, and unified
//! error surface.
//!
//! Purpose
//! -------
//! Provide the constrained-optimization collaborator the scalarization
//! layer delegates to: a narrow epigraph-problem interface, an
//! argmin-backed augmented-Lagrangian implementation, caller-controlled
//! timeouts and cancellation, and one error/result surface for all of it.
//!
//! Key behaviors
//! -------------
//! - `constrained`: the [`ConstrainedSolver`](constrained::ConstrainedSolver)
//!   trait and its default backend, configured through
//!   [`SolverOptions`](constrained::SolverOptions).
//! - `numerical_stability`: overflow-safe logistic transforms for box
//!   constraints and the shared singular-value tolerance.
//! - `errors`: [`OptError`](errors::OptError) and `OptResult<T>`, including
//!   conversions from argmin and from problem-level errors.
//!
//! Invariants & assumptions
//! ------------------------
//! - Solvers never return partial results: divergence, timeout and
//!   cancellation are errors.
//! - Backends are stateless between calls and safe to share across threads.
//!
//! Conventions
//! -----------
//! - Vectors are `ndarray::Array1<f64>`.
//! - Public entrypoints return `OptResult<T>`; callers never see raw argmin
//!   errors.
//! - Diagnostics go through `tracing`; nothing here performs I/O except the
//!   optional `obs_slog` observer.
//!
//! Downstream usage
//! ----------------
//! - `scalarization` implements `EpigraphProblem` for the achievement
//!   problem and calls `ConstrainedSolver::solve`.
//!
//! Testing notes
//! -------------
//! - Unit tests live next to each submodule; the full pipeline is covered by
//!   the integration tests in `tests/`.

pub mod constrained;
pub mod errors;
pub mod numerical_stability;

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use explainable_moo::optimization::prelude::*;
//
// to import the main optimization surface in a single line.

pub mod prelude {
    pub use super::constrained::prelude::*;
    pub use super::errors::{OptError, OptResult};
    pub use super::numerical_stability::prelude::*;
}
