//! constrained::validation — option checks and numeric guards.
//!
//! Option validators return the option-specific error variant so callers
//! can see which knob was wrong. The numeric guards are applied to every
//! value that crosses from the problem collaborator or from argmin back into
//! the solver.
use ndarray::Array1;

use crate::optimization::{
    constrained::types::{Grad, Theta},
    errors::{OptError, OptResult},
};

/// Validate the optional gradient‐norm tolerance.
///
/// # Errors
/// Returns [`OptError::InvalidTolGrad`] if the value is non-finite or ≤ 0.0.
pub fn verify_tol_grad(tol: Option<f64>) -> OptResult<()> {
    if let Some(tol) = tol {
        if !tol.is_finite() {
            return Err(OptError::InvalidTolGrad { tol, reason: "Tolerance must be finite." });
        }
        if tol <= 0.0 {
            return Err(OptError::InvalidTolGrad { tol, reason: "Tolerance must be positive." });
        }
    }
    Ok(())
}

/// Validate the optional cost‐change tolerance.
///
/// # Errors
/// Returns [`OptError::InvalidTolCost`] if the value is non-finite or ≤ 0.0.
pub fn verify_tol_cost(tol: Option<f64>) -> OptResult<()> {
    if let Some(tol) = tol {
        if !tol.is_finite() {
            return Err(OptError::InvalidTolCost { tol, reason: "Tolerance must be finite." });
        }
        if tol <= 0.0 {
            return Err(OptError::InvalidTolCost { tol, reason: "Tolerance must be positive." });
        }
    }
    Ok(())
}

/// Validate the constraint-violation tolerance of the outer loop.
///
/// # Errors
/// Returns [`OptError::InvalidTolFeasibility`] if the value is non-finite or ≤ 0.0.
pub fn verify_tol_feasibility(tol: f64) -> OptResult<()> {
    if !tol.is_finite() {
        return Err(OptError::InvalidTolFeasibility { tol, reason: "Tolerance must be finite." });
    }
    if tol <= 0.0 {
        return Err(OptError::InvalidTolFeasibility { tol, reason: "Tolerance must be positive." });
    }
    Ok(())
}

/// Validate the penalty schedule `(initial, growth, max)`.
///
/// # Errors
/// Returns [`OptError::InvalidPenalty`] unless `0 < initial ≤ max < ∞` and
/// `growth > 1`.
pub fn verify_penalty(initial: f64, growth: f64, max: f64) -> OptResult<()> {
    if !(initial.is_finite() && initial > 0.0) {
        return Err(OptError::InvalidPenalty {
            value: initial,
            reason: "Initial penalty must be finite and positive.",
        });
    }
    if !(growth.is_finite() && growth > 1.0) {
        return Err(OptError::InvalidPenalty {
            value: growth,
            reason: "Penalty growth factor must be finite and greater than one.",
        });
    }
    if !(max.is_finite() && max >= initial) {
        return Err(OptError::InvalidPenalty {
            value: max,
            reason: "Penalty cap must be finite and at least the initial penalty.",
        });
    }
    Ok(())
}

/// Validate a gradient vector against dimension and finiteness.
///
/// # Errors
/// - [`OptError::GradientDimMismatch`] if length does not match `dim`.
/// - [`OptError::InvalidGradient`] for the first non-finite element.
pub fn validate_grad(grad: &Grad, dim: usize) -> OptResult<()> {
    if grad.len() != dim {
        return Err(OptError::GradientDimMismatch { expected: dim, found: grad.len() });
    }
    for (index, &value) in grad.iter().enumerate() {
        if !value.is_finite() {
            return Err(OptError::InvalidGradient {
                index,
                value,
                reason: "Gradient elements must be finite.",
            });
        }
    }
    Ok(())
}

/// Unwrap the best parameter reported by argmin.
///
/// # Errors
/// - [`OptError::MissingParam`] if the state holds none.
/// - [`OptError::NonFiniteCost`] if any element is non-finite (the penalty
///   cannot be finite at such a point).
pub fn validate_param(param: Option<Theta>) -> OptResult<Theta> {
    let param = param.ok_or(OptError::MissingParam)?;
    match param.iter().find(|v| !v.is_finite()) {
        Some(&value) => Err(OptError::NonFiniteCost { value }),
        None => Ok(param),
    }
}

/// Check the constraint vector returned by an epigraph problem.
///
/// # Errors
/// - [`OptError::Problem`] wrapping a dimension mismatch if the length is
///   not `expected`.
/// - [`OptError::NonFiniteConstraint`] for the first non-finite value.
pub fn validate_constraints(values: &Array1<f64>, expected: usize) -> OptResult<()> {
    crate::utils::ensure_len("constraint values", expected, values.len())?;
    match values.iter().position(|v| !v.is_finite()) {
        Some(index) => Err(OptError::NonFiniteConstraint { index, value: values[index] }),
        None => Ok(()),
    }
}
