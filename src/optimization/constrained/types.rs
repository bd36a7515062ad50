//! constrained::types — numeric aliases and inner-solver wiring.
//!
//! The augmented-Lagrangian backend optimizes a stacked parameter
//! `θ = (u, α)`: unconstrained decision coordinates `u` (mapped into the
//! variable box by a logistic) followed by the epigraph scalar `α`. The
//! aliases below fix the `ndarray`/argmin shapes used for that vector and
//! for the L-BFGS inner solver, so the rest of the module never spells out
//! argmin generics.
use argmin::solver::{
    linesearch::{HagerZhangLineSearch, MoreThuenteLineSearch},
    quasinewton::LBFGS,
};
use ndarray::Array1;
use std::collections::HashMap;

/// Stacked inner parameter `θ = (u, α)`.
pub type Theta = Array1<f64>;

/// Gradient of the penalty function, same shape as [`Theta`].
pub type Grad = Array1<f64>;

/// Scalar value of the augmented-Lagrangian penalty function.
pub type Cost = f64;

/// Function-evaluation counters as reported by argmin (`cost_count`,
/// `gradient_count`), summed over all inner runs of a solve.
pub type FnEvalMap = HashMap<String, u64>;

/// Default history size (`m`) for L-BFGS runs.
pub const DEFAULT_LBFGS_MEM: usize = 7;

/// Hager–Zhang line search specialized to this crate’s numeric types.
pub type HagerZhangLS = HagerZhangLineSearch<Theta, Grad, Cost>;

/// More–Thuente line search specialized to this crate’s numeric types.
pub type MoreThuenteLS = MoreThuenteLineSearch<Theta, Grad, Cost>;

/// L-BFGS solver wired to the Hager–Zhang line search.
pub type LbfgsHagerZhang = LBFGS<HagerZhangLS, Theta, Grad, Cost>;

/// L-BFGS solver wired to the More–Thuente line search.
pub type LbfgsMoreThuente = LBFGS<MoreThuenteLS, Theta, Grad, Cost>;
