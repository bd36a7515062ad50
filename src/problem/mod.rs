//! problem — problem definitions, boundary transforms, and weights.
//!
//! Purpose
//! -------
//! Hold everything the trade-off engine needs to know about a concrete
//! multiobjective problem without knowing its formulas: the [`Problem`]
//! collaborator trait, box bounds, the natural ⇄ internal
//! [`SignConvention`], ideal/nadir [`Normalizer`], validated
//! [`Weights`], and the explicit [`ProblemSettings`] record.
//!
//! Key behaviors
//! -------------
//! - Centralize the sign flip between natural maximize/minimize semantics
//!   and the uniform minimize convention used internally.
//! - Reject degenerate normalization ranges and non-positive weights at
//!   construction time, so downstream numerical code never divides by
//!   zero.
//! - Provide an evenly spread simplex lattice of weights for sweeps.
//!
//! Invariants & assumptions
//! ------------------------
//! - Problems are immutable and shared read-only (`Send + Sync`).
//! - Ideal, nadir and every objective vector crossing this module's API
//!   use the internal minimize convention unless a function name says
//!   "natural".
//!
//! Conventions
//! -----------
//! - Vectors are `ndarray::Array1<f64>`; the aliases [`DecisionVector`]
//!   and [`ObjectiveVector`] document which space a vector lives in.
//! - Fallible operations return [`ProblemResult<T>`].
//!
//! Testing notes
//! -------------
//! - Unit tests in each submodule cover validation paths and the exact
//!   arithmetic of the transforms; integration tests exercise a complete
//!   benchmark problem through the engine.

pub mod errors;
pub mod normalize;
pub mod settings;
pub mod sign;
pub mod traits;
pub mod weights;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::errors::{ProblemError, ProblemResult};
pub use self::normalize::{Normalizer, normalize};
pub use self::settings::{ProblemDetails, ProblemSettings};
pub use self::sign::{Sense, SignConvention};
pub use self::traits::{DecisionVector, ObjectiveVector, Problem, VariableBounds, evaluate_checked};
pub use self::weights::{LATTICE_FLOOR, Weights, simplex_lattice};

pub mod prelude {
    pub use super::errors::{ProblemError, ProblemResult};
    pub use super::normalize::Normalizer;
    pub use super::sign::{Sense, SignConvention};
    pub use super::traits::{DecisionVector, ObjectiveVector, Problem, VariableBounds};
    pub use super::weights::Weights;
}
