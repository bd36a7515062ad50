//! scalarization — achievement scalarization in epigraph form.
//!
//! Purpose
//! -------
//! Turn a reference point and a weight vector into a single constrained
//! problem whose optimum is Pareto-optimal, solve it through a pluggable
//! [`ConstrainedSolver`](crate::optimization::constrained::ConstrainedSolver),
//! and return the optimum with one multiplier per objective.
//!
//! Key behaviors
//! -------------
//! - [`AchievementProblem`] builds the constraints
//!   `w_i (N(f(x))_i − N(z)_i) ≤ α` on ideal/nadir-normalized values.
//! - [`ScalarizationSolver`] delegates to the backend and exposes
//!   multipliers as `λ = −μ ≤ 0`.
//! - [`asf`] evaluates the achievement function directly.
//!
//! Invariants & assumptions
//! ------------------------
//! - Weights are strictly positive (guaranteed by `Weights`).
//! - `multipliers` and constraints share objective order.
//! - `alpha` is recomputed at `x*`, so it always equals the maximum
//!   weighted deviation there.

pub mod achievement;
pub mod solver;

pub use self::achievement::{AchievementProblem, asf};
pub use self::solver::{ScalarizationResult, ScalarizationSolver};

pub mod prelude {
    pub use super::achievement::asf;
    pub use super::solver::{ScalarizationResult, ScalarizationSolver};
}
