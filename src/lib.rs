//! explainable_moo — explainable trade-offs for multiobjective optimization.
//!
//! Purpose
//! -------
//! Given an aspiration ("reference") point in objective space, find the
//! nearest Pareto-optimal solution through achievement scalarization,
//! explain it with pairwise trade-off rates derived from the dual
//! multipliers, and answer "what if I revise my aspiration" by first-order
//! extrapolation along the supporting hyperplane, without solving again.
//!
//! Key behaviors
//! -------------
//! - [`problem`]: the `Problem` collaborator, sign convention, normalization
//!   and weights.
//! - [`optimization`]: the constrained-solver interface and its default
//!   augmented-Lagrangian backend over argmin L-BFGS, with timeout and
//!   cancellation.
//! - [`scalarization`]: the epigraph achievement problem and its solver.
//! - [`tradeoffs`]: the trade-off matrix and tangent-plane extrapolation.
//! - [`sensitivity`]: seeded neighborhood sampling and empirical slopes,
//!   used to cross-check the closed-form trade-offs.
//! - [`engine`]: `TradeoffEngine`, the configuration object callers hold.
//!
//! Invariants & assumptions
//! ------------------------
//! - Inside the crate every objective is minimized; natural
//!   maximize/minimize semantics are converted once at the engine boundary.
//! - Multipliers are reported as `λ ≤ 0`.
//! - Degenerate inputs are typed errors carrying the offending index or
//!   value; no operation returns Inf/NaN in their place.
//!
//! Conventions
//! -----------
//! - Vectors and matrices are `ndarray` types; objective order is shared by
//!   weights, reference points, multipliers and trade-off rows/columns.
//! - Diagnostics go through `tracing`; the library installs no subscriber.
//!
//! Testing notes
//! -------------
//! - Unit tests sit next to each module; `tests/` runs the whole pipeline on
//!   the river-pollution benchmark and on analytic fronts.

pub mod engine;
pub mod optimization;
pub mod problem;
pub mod scalarization;
pub mod sensitivity;
pub mod tradeoffs;
pub mod utils;

pub use self::engine::{EngineError, EngineOptions, EngineResult, TradeoffEngine};

pub mod prelude {
    pub use crate::engine::prelude::*;
    pub use crate::optimization::prelude::*;
    pub use crate::problem::prelude::*;
    pub use crate::scalarization::prelude::*;
    pub use crate::sensitivity::prelude::*;
    pub use crate::tradeoffs::prelude::*;
}
