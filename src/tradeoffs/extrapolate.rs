//! tradeoffs::extrapolate — first-order movement along the Pareto front.
//!
//! Purpose
//! -------
//! Given a Pareto-optimal objective vector `z0`, its multipliers `λ`, the
//! weights `w` used to find it, and a revised reference point `z_new`,
//! estimate the Pareto-optimal vector the revision would lead to without
//! solving again:
//!
//! ```text
//!   d     = z_new − z0
//!   n_i   = −λ_i · w_i
//!   w⁻¹_i = 1 / w_i
//!   t     = −(n · d) / (n · w⁻¹)
//!   ẑ     = z0 + d + t · w⁻¹
//! ```
//!
//! `n` is the normal of the supporting hyperplane at `z0`; `t` moves the
//! naively shifted point `z0 + d` back onto that hyperplane along the
//! inverse-weight direction, so `n · (ẑ − z0) = 0`.
//!
//! Invariants & assumptions
//! ------------------------
//! - `z_new == z0` returns `z0` unchanged, for any `λ` and `w`.
//! - A vanishing denominator `n · w⁻¹` is an error, never Inf/NaN.
//! - First order only; accuracy falls with `‖d‖` and front curvature.
use ndarray::{Array1, Array2, Zip};
use serde::Serialize;
use tracing::debug;

use crate::{
    problem::{sign::SignConvention, weights::Weights},
    tradeoffs::errors::{TradeoffError, TradeoffResult},
    utils::{ensure_finite, ensure_len},
};

/// Extrapolate one revised reference point onto the tangent hyperplane.
///
/// # Errors
/// - `Problem(DimensionMismatch | NonFiniteValue)` for malformed inputs.
/// - [`TradeoffError::ExtrapolationUndefined`] when `n · w⁻¹` is zero or not
///   finite.
pub fn extrapolate(
    z0: &Array1<f64>, multipliers: &Array1<f64>, weights: &Weights, z_new: &Array1<f64>,
) -> TradeoffResult<Array1<f64>> {
    let k = weights.len();
    ensure_len("current objective vector", k, z0.len())?;
    ensure_len("multipliers", k, multipliers.len())?;
    ensure_len("revised reference point", k, z_new.len())?;
    ensure_finite("current objective vector", z0)?;
    ensure_finite("revised reference point", z_new)?;

    let d = z_new - z0;
    if d.iter().all(|&v| v == 0.0) {
        return Ok(z0.clone());
    }
    let (normal, w_inv, denominator) = hyperplane(multipliers, weights)?;
    let t = -normal.dot(&d) / denominator;
    let approx = Zip::from(z0).and(&d).and(&w_inv).map_collect(|&z, &d, &wi| z + d + t * wi);
    debug!(t, denominator, "extrapolated along tangent hyperplane");
    Ok(approx)
}

/// Extrapolate every row of `candidates` (one revised point per row).
///
/// # Errors
/// As [`extrapolate`]; additionally a column-count mismatch is a
/// `DimensionMismatch`.
pub fn extrapolate_many(
    z0: &Array1<f64>, multipliers: &Array1<f64>, weights: &Weights, candidates: &Array2<f64>,
) -> TradeoffResult<Array2<f64>> {
    ensure_len("candidate columns", weights.len(), candidates.ncols())?;
    let mut out = Array2::zeros(candidates.raw_dim());
    for (row, mut target) in candidates.outer_iter().zip(out.outer_iter_mut()) {
        target.assign(&extrapolate(z0, multipliers, weights, &row.to_owned())?);
    }
    Ok(out)
}

/// Normal `n = −λ∘w`, inverse weights and the projection denominator.
fn hyperplane(
    multipliers: &Array1<f64>, weights: &Weights,
) -> TradeoffResult<(Array1<f64>, Array1<f64>, f64)> {
    if let Some(index) = multipliers.iter().position(|v| !v.is_finite()) {
        return Err(TradeoffError::NonFiniteMultiplier { index, value: multipliers[index] });
    }
    let normal = Zip::from(multipliers).and(weights.as_array()).map_collect(|&l, &w| -l * w);
    let w_inv = weights.reciprocal();
    let denominator = normal.dot(&w_inv);
    if denominator == 0.0 || !denominator.is_finite() {
        return Err(TradeoffError::ExtrapolationUndefined { denominator });
    }
    Ok((normal, w_inv, denominator))
}

/// Direction a revised reference point asks each objective to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveKind {
    Improve,
    Impair,
    Keep,
}

/// Classify, per objective, the move from `current` to `revised`.
///
/// Both vectors are in natural convention; `convention` decides whether a
/// larger value is an improvement.
///
/// # Errors
/// `Problem(DimensionMismatch)` if lengths differ from the convention.
pub fn classify_moves(
    current: &Array1<f64>, revised: &Array1<f64>, convention: &SignConvention,
) -> TradeoffResult<Vec<MoveKind>> {
    let current = convention.to_internal(current)?;
    let revised = convention.to_internal(revised)?;
    Ok(current
        .iter()
        .zip(revised.iter())
        .map(|(&c, &r)| {
            if r < c {
                MoveKind::Improve
            } else if r > c {
                MoveKind::Impair
            } else {
                MoveKind::Keep
            }
        })
        .collect())
}
