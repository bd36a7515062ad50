//! Numerical stability utilities.
//!
//! Box-constrained decision variables are optimized in an unconstrained
//! coordinate `u` and mapped into `[lo, hi]` through a guarded logistic.
//!
//! # Provided items
//! - [`safe_logistic(x)`]: `1 / (1 + exp(-x))` without overflow.
//! - [`safe_logit(p)`]: inverse of the logistic with `p` clamped into
//!   `[LOGIT_EPS, 1 - LOGIT_EPS]`, so boundary points map to finite `u`.
//! - [`to_bounded`] / [`to_unbounded`]: elementwise maps between `u`-space
//!   and the box `[lower, upper]`.
//! - [`SINGULAR_VALUE_TOL`]: cutoff below which a singular value counts as
//!   zero in rank-revealing fits.
use ndarray::{Array1, Zip};

/// Clamp applied to probabilities before taking a logit.
pub const LOGIT_EPS: f64 = 1e-12;

/// Singular values at or below this threshold are treated as zero.
pub const SINGULAR_VALUE_TOL: f64 = 1e-10;

/// Numerically stable logistic function.
///
/// For `x ≥ 0` evaluates `1 / (1 + e^{-x})`; for `x < 0` evaluates
/// `e^{x} / (1 + e^{x})`, so `exp` never receives a large positive argument.
pub fn safe_logistic(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}

/// Inverse logistic `ln(p / (1 - p))` with `p` clamped away from 0 and 1.
pub fn safe_logit(p: f64) -> f64 {
    let p = p.clamp(LOGIT_EPS, 1.0 - LOGIT_EPS);
    p.ln() - (-p).ln_1p()
}

/// Map unconstrained coordinates into the box `[lower, upper]`.
///
/// Each output is clamped into its interval so rounding in
/// `lo + (hi - lo)·σ(u)` can never leave the box.
pub fn to_bounded(u: &Array1<f64>, lower: &Array1<f64>, upper: &Array1<f64>) -> Array1<f64> {
    Zip::from(u).and(lower).and(upper).map_collect(|&u, &lo, &hi| {
        (lo + (hi - lo) * safe_logistic(u)).clamp(lo, hi)
    })
}

/// Map a point of the box `[lower, upper]` back to unconstrained coordinates.
///
/// Points on the boundary map to large but finite `u` (see [`LOGIT_EPS`]).
/// A fixed variable (`lo == hi`) maps to `u = 0`; `to_bounded` sends any
/// `u` back to `lo` for it.
pub fn to_unbounded(x: &Array1<f64>, lower: &Array1<f64>, upper: &Array1<f64>) -> Array1<f64> {
    Zip::from(x).and(lower).and(upper).map_collect(|&x, &lo, &hi| {
        if hi > lo { safe_logit((x - lo) / (hi - lo)) } else { 0.0 }
    })
}
