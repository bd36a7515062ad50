//! tradeoffs — closed-form trade-off rates and tangent-plane extrapolation.
//!
//! Purpose
//! -------
//! Turn the multipliers of a solved achievement problem into explanations:
//! a pairwise trade-off matrix ([`compute_tradeoffs`]) and cheap
//! "what if I revise my aspiration" answers ([`extrapolate`]), plus a
//! per-objective classification of the requested move ([`classify_moves`]).
//!
//! Invariants & assumptions
//! ------------------------
//! - Both operations are pure functions of their arguments.
//! - Degenerate inputs (zero multipliers, zero projection denominator) are
//!   reported as [`TradeoffError`] variants; no Inf/NaN is ever returned.
//!   [`tradeoff_rows`] instead marks the rows of zero multipliers undefined.
//! - Objective vectors are in the internal convention except for
//!   `classify_moves`, which takes natural values and a `SignConvention`.

pub mod errors;
pub mod extrapolate;
pub mod matrix;

pub use self::errors::{TradeoffError, TradeoffResult};
pub use self::extrapolate::{MoveKind, classify_moves, extrapolate, extrapolate_many};
pub use self::matrix::{TradeoffMatrix, TradeoffRows, compute_tradeoffs, tradeoff_row, tradeoff_rows};

pub mod prelude {
    pub use super::errors::{TradeoffError, TradeoffResult};
    pub use super::extrapolate::{MoveKind, extrapolate};
    pub use super::matrix::{TradeoffMatrix, TradeoffRows, compute_tradeoffs, tradeoff_rows};
}
