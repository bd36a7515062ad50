//! Adapter that exposes one augmented-Lagrangian subproblem as an `argmin`
//! problem.
//!
//! For fixed multipliers `μ ≥ 0` and penalty `ρ > 0` the subproblem is the
//! Powell–Hestenes–Rockafellar function over `θ = (u, α)`:
//!
//! ```text
//!   x(u)  = lower + (upper − lower) · σ(u)
//!   g_i   = c_i(x(u)) − α
//!   Φ(θ)  = α + (1 / 2ρ) · Σ_i [ max(0, μ_i + ρ g_i)² − μ_i² ]
//! ```
//!
//! With `p_i = max(0, μ_i + ρ g_i)` the gradient is
//! `∂Φ/∂α = 1 − Σ p_i` and `∂Φ/∂u = ∂/∂u Σ p_i c_i(x(u))` with `p` held
//! fixed, which is finite-differenced as a single scalar function.
use std::{cell::RefCell, sync::Mutex};

use argmin::core::{CostFunction, Error, Gradient};
use finitediff::FiniteDiff;
use ndarray::{Array1, Zip, s};

use crate::{
    optimization::{
        constrained::{
            control::Deadline,
            traits::EpigraphProblem,
            types::{Cost, Grad, Theta},
            validation::{validate_constraints, validate_grad},
        },
        errors::{OptError, OptResult},
        numerical_stability::{to_bounded, to_unbounded},
    },
    problem::traits::DecisionVector,
};

/// Point of the subproblem decoded from `θ`.
#[derive(Debug, Clone, PartialEq)]
pub struct PenaltyPoint {
    pub x: DecisionVector,
    pub alpha: f64,
    pub constraints: Array1<f64>,
}

/// Lowest-cost `θ` seen by an adapter, kept outside argmin so an inner run
/// that errors out still yields its progress.
pub type BestPoint = Mutex<Option<(Cost, Theta)>>;

/// Bridges an [`EpigraphProblem`] and the current multiplier state to
/// `argmin`'s `CostFunction` and `Gradient`.
pub struct PenaltyAdapter<'a, P: EpigraphProblem + ?Sized> {
    pub problem: &'a P,
    pub multipliers: &'a Array1<f64>,
    pub penalty: f64,
    pub deadline: &'a Deadline,
    best: Option<&'a BestPoint>,
}

impl<'a, P: EpigraphProblem + ?Sized> PenaltyAdapter<'a, P> {
    pub fn new(
        problem: &'a P, multipliers: &'a Array1<f64>, penalty: f64, deadline: &'a Deadline,
    ) -> Self {
        Self { problem, multipliers, penalty, deadline, best: None }
    }

    /// Record every evaluated `θ` that lowers the penalty into `best`.
    pub fn tracking(mut self, best: &'a BestPoint) -> Self {
        self.best = Some(best);
        self
    }

    fn record(&self, value: Cost, theta: &Theta) {
        if let Some(Ok(mut slot)) = self.best.map(Mutex::lock) {
            if slot.as_ref().is_none_or(|(best, _)| value < *best) {
                *slot = Some((value, theta.clone()));
            }
        }
    }

    fn num_variables(&self) -> usize {
        self.problem.bounds().len()
    }

    /// Build `θ = (u, α)` from a point of the box and an `α`.
    pub fn encode(&self, x: &DecisionVector, alpha: f64) -> Theta {
        let bounds = self.problem.bounds();
        let n = self.num_variables();
        let mut theta = Theta::zeros(n + 1);
        theta.slice_mut(s![..n]).assign(&to_unbounded(x, bounds.lower(), bounds.upper()));
        theta[n] = alpha;
        theta
    }

    /// Map unconstrained coordinates into the box.
    pub fn decision(&self, u: &Array1<f64>) -> DecisionVector {
        let bounds = self.problem.bounds();
        to_bounded(u, bounds.lower(), bounds.upper())
    }

    /// Evaluate `c(x)` at a decision vector with shape and finiteness checks.
    pub fn constraints_at(&self, x: &DecisionVector) -> OptResult<Array1<f64>> {
        let values = self.problem.constraints(x)?;
        validate_constraints(&values, self.problem.num_constraints())?;
        Ok(values)
    }

    /// Decode `θ` and evaluate the constraints there.
    pub fn decode(&self, theta: &Theta) -> OptResult<PenaltyPoint> {
        let n = self.num_variables();
        let x = self.decision(&theta.slice(s![..n]).to_owned());
        let constraints = self.constraints_at(&x)?;
        Ok(PenaltyPoint { x, alpha: theta[n], constraints })
    }

    /// Shifted multipliers `p_i = max(0, μ_i + ρ (c_i − α))`.
    pub fn shifted_multipliers(&self, point: &PenaltyPoint) -> Array1<f64> {
        Zip::from(self.multipliers)
            .and(&point.constraints)
            .map_collect(|&mu, &c| (mu + self.penalty * (c - point.alpha)).max(0.0))
    }

    /// Penalty value `Φ` at a decoded point.
    pub fn penalty_value(&self, point: &PenaltyPoint) -> f64 {
        let shifted = self.shifted_multipliers(point);
        let correction = Zip::from(&shifted)
            .and(self.multipliers)
            .fold(0.0, |acc, &p, &mu| acc + p * p - mu * mu);
        point.alpha + correction / (2.0 * self.penalty)
    }
}

impl<'a, P: EpigraphProblem + ?Sized> CostFunction for PenaltyAdapter<'a, P> {
    type Param = Theta;
    type Output = Cost;

    /// Evaluate `Φ(θ)`.
    ///
    /// # Errors
    /// - `SolverTimeout` / `SolverCancelled` once the deadline expires.
    /// - `NonFiniteCost` if `Φ` is not finite.
    /// - Any problem or constraint error.
    fn cost(&self, theta: &Self::Param) -> Result<Self::Output, Error> {
        self.deadline.check()?;
        let point = self.decode(theta)?;
        let value = self.penalty_value(&point);
        if !value.is_finite() {
            return Err((OptError::NonFiniteCost { value }).into());
        }
        self.record(value, theta);
        Ok(value)
    }
}

impl<'a, P: EpigraphProblem + ?Sized> Gradient for PenaltyAdapter<'a, P> {
    type Param = Theta;
    type Gradient = Grad;

    /// Evaluate `∇Φ(θ)`.
    ///
    /// The `u` block is a central difference of `u ↦ Σ p_i c_i(x(u))`; if any
    /// evaluation inside the difference fails, the block is recomputed with
    /// forward differences and a persistent failure is returned.
    fn gradient(&self, theta: &Self::Param) -> Result<Self::Gradient, Error> {
        self.deadline.check()?;
        let n = self.num_variables();
        let point = self.decode(theta)?;
        let shifted = self.shifted_multipliers(&point);

        let closure_err: RefCell<Option<Error>> = RefCell::new(None);
        let weighted = |u: &Array1<f64>| -> f64 {
            match self.constraints_at(&self.decision(u)) {
                Ok(c) => shifted.dot(&c),
                Err(e) => {
                    let mut slot = closure_err.borrow_mut();
                    if slot.is_none() {
                        *slot = Some(e.into());
                    }
                    f64::NAN
                }
            }
        };
        let u = theta.slice(s![..n]).to_owned();
        let mut grad_u = u.central_diff(&weighted);
        if closure_err.borrow().is_some() || validate_grad(&grad_u, n).is_err() {
            grad_u = run_fd_diff(&u, &weighted, &closure_err)?;
        }

        let mut grad = Grad::zeros(n + 1);
        grad.slice_mut(s![..n]).assign(&grad_u);
        grad[n] = 1.0 - shifted.sum();
        validate_grad(&grad, n + 1)?;
        Ok(grad)
    }
}

/// Forward-difference gradient of `func` at `u`, with error capture.
///
/// # Errors
/// Returns the first error captured during evaluation of `func`, or the
/// validation error of the resulting gradient.
fn run_fd_diff<G: Fn(&Array1<f64>) -> f64>(
    u: &Array1<f64>, func: &G, closure_err: &RefCell<Option<Error>>,
) -> Result<Array1<f64>, Error> {
    closure_err.replace(None);
    let fd_grad = u.forward_diff(func);
    if let Some(err) = closure_err.take() {
        return Err(err);
    }
    validate_grad(&fd_grad, u.len())?;
    Ok(fd_grad)
}
