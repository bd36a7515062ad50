//! numerical_stability — guarded transforms and shared tolerances.
//!
//! Purpose
//! -------
//! Keep the small pieces of numerics that must not overflow in one place:
//! the logistic/logit pair used to turn box-constrained decision variables
//! into unconstrained optimizer coordinates, and the singular-value cutoff
//! shared by rank-revealing fits.
//!
//! Invariants & assumptions
//! ------------------------
//! - Inputs are finite; bounds satisfy `lower < upper` (validated when
//!   `VariableBounds` is built).
//! - This module never logs or touches global state.

pub mod transformations;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::transformations::{
    LOGIT_EPS, SINGULAR_VALUE_TOL, safe_logistic, safe_logit, to_bounded, to_unbounded,
};

pub mod prelude {
    pub use super::transformations::{SINGULAR_VALUE_TOL, to_bounded, to_unbounded};
}
