use argmin::core::{ArgminError, Error};

use crate::problem::errors::ProblemError;

/// Crate-wide result alias for optimizer operations.
pub type OptResult<T> = Result<T, OptError>;

#[derive(Debug, Clone, PartialEq)]
pub enum OptError {
    // ---- Gradient ----
    /// Gradient dimensions do not match parameter dimensions.
    GradientDimMismatch {
        expected: usize,
        found: usize,
    },

    /// Gradient elements need to be finite
    InvalidGradient {
        index: usize,
        value: f64,
        reason: &'static str,
    },

    // ---- SolverOptions ----
    /// Gradient tolerance needs to be positive and finite.
    InvalidTolGrad {
        tol: f64,
        reason: &'static str,
    },
    /// Cost change tolerance needs to be positive and finite.
    InvalidTolCost {
        tol: f64,
        reason: &'static str,
    },
    /// Maximum iterations needs to be positive.
    InvalidMaxIter {
        max_iter: usize,
        reason: &'static str,
    },
    /// At least one tolerance must be provided.
    NoTolerancesProvided,

    /// Invalid line searcher name.
    InvalidLineSearch {
        name: String,
        reason: &'static str,
    },

    /// lbfgs_mem needs to be at least 1.
    InvalidLBFGSMem {
        mem: usize,
        reason: &'static str,
    },

    /// Feasibility tolerance needs to be positive and finite.
    InvalidTolFeasibility {
        tol: f64,
        reason: &'static str,
    },

    /// Penalty schedule parameters are out of range.
    InvalidPenalty {
        value: f64,
        reason: &'static str,
    },

    /// Timeout must be strictly positive.
    InvalidTimeout,

    // ---- Epigraph problem ----
    /// A constrained problem needs at least one inequality constraint.
    NoConstraints,

    /// Starting point does not match the number of decision variables.
    StartPointDimMismatch {
        expected: usize,
        found: usize,
    },

    /// Constraint `index` evaluated to a non-finite value.
    NonFiniteConstraint {
        index: usize,
        value: f64,
    },

    /// Wrapper for failures raised by the problem collaborator.
    Problem(ProblemError),

    // ---- Cost function ----
    /// Cost function returned a non-finite value.
    NonFiniteCost {
        value: f64,
    },

    // ---- Optimizer outcome ----
    /// Best parameter is missing from the solver state.
    MissingParam,

    /// The outer loop ended without reaching the feasibility tolerance.
    SolverDivergence {
        iterations: usize,
        violation: f64,
        status: String,
    },

    /// The solve ran past its deadline.
    SolverTimeout {
        elapsed_ms: u128,
    },

    /// The caller cancelled the solve.
    SolverCancelled,

    // ---- Argmin ----
    /// Error raised by argmin itself; `kind` names the argmin error class.
    Backend {
        kind: &'static str,
        text: String,
    },
}

impl OptError {
    /// Errors that must stop a solve immediately instead of being retried
    /// with another line search.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            OptError::SolverTimeout { .. }
                | OptError::SolverCancelled
                | OptError::Problem(_)
                | OptError::NonFiniteConstraint { .. }
        )
    }
}

impl std::error::Error for OptError {}

impl std::fmt::Display for OptError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Gradient ----
            OptError::GradientDimMismatch { expected, found } => {
                write!(f, "Gradient dimension mismatch: expected {expected}, found {found}")
            }
            OptError::InvalidGradient { index, value, reason } => {
                write!(f, "Invalid gradient at index {index}: {value}: {reason}")
            }

            // ---- SolverOptions ----
            OptError::InvalidTolGrad { tol, reason } => {
                write!(f, "Invalid gradient tolerance {tol}: {reason}")
            }
            OptError::InvalidTolCost { tol, reason } => {
                write!(f, "Invalid cost function change tolerance {tol}: {reason}")
            }
            OptError::InvalidMaxIter { max_iter, reason } => {
                write!(f, "Invalid maximum iterations {max_iter}: {reason}")
            }
            OptError::NoTolerancesProvided => {
                write!(f, "No tolerances provided")
            }
            OptError::InvalidLineSearch { name, reason } => {
                write!(f, "Invalid line searcher '{name}': {reason}")
            }
            OptError::InvalidLBFGSMem { mem, reason } => {
                write!(f, "Invalid L-BFGS memory {mem}: {reason}")
            }
            OptError::InvalidTolFeasibility { tol, reason } => {
                write!(f, "Invalid feasibility tolerance {tol}: {reason}")
            }
            OptError::InvalidPenalty { value, reason } => {
                write!(f, "Invalid penalty parameter {value}: {reason}")
            }
            OptError::InvalidTimeout => {
                write!(f, "Timeout must be strictly positive")
            }

            // ---- Epigraph problem ----
            OptError::NoConstraints => {
                write!(f, "Constrained problem has no inequality constraints")
            }
            OptError::StartPointDimMismatch { expected, found } => {
                write!(f, "Starting point dimension mismatch: expected {expected}, found {found}")
            }
            OptError::NonFiniteConstraint { index, value } => {
                write!(f, "Constraint {index} evaluated to non-finite value {value}")
            }
            OptError::Problem(err) => {
                write!(f, "Problem evaluation failed: {err}")
            }

            // ---- Cost function ----
            OptError::NonFiniteCost { value } => {
                write!(f, "Non-finite cost value: {value}")
            }

            // ---- Optimizer outcome ----
            OptError::MissingParam => {
                write!(f, "Solver state holds no best parameter")
            }
            OptError::SolverDivergence { iterations, violation, status } => {
                write!(
                    f,
                    "Solver did not converge after {iterations} outer iterations \
                     (constraint violation {violation:e}, last status: {status})"
                )
            }
            OptError::SolverTimeout { elapsed_ms } => {
                write!(f, "Solver timed out after {elapsed_ms} ms")
            }
            OptError::SolverCancelled => {
                write!(f, "Solver run was cancelled")
            }

            // ---- Argmin ----
            OptError::Backend { kind, text } => {
                write!(f, "Optimizer backend error ({kind}): {text}")
            }
        }
    }
}

impl From<Error> for OptError {
    fn from(original_err: Error) -> Self {
        let original_err = match original_err.downcast::<OptError>() {
            Ok(opt_err) => return opt_err,
            Err(err) => err,
        };
        match original_err.downcast::<ArgminError>() {
            Ok(argmin_err) => {
                let kind = match &argmin_err {
                    ArgminError::InvalidParameter { .. } => "invalid parameter",
                    ArgminError::NotImplemented { .. } => "not implemented",
                    ArgminError::NotInitialized { .. } => "not initialized",
                    ArgminError::ConditionViolated { .. } => "condition violated",
                    ArgminError::CheckpointNotFound { .. } => "checkpoint not found",
                    ArgminError::PotentialBug { .. } => "potential bug",
                    ArgminError::ImpossibleError { .. } => "impossible error",
                    _ => "unclassified",
                };
                OptError::Backend { kind, text: argmin_err.to_string() }
            }
            Err(err) => OptError::Backend { kind: "external", text: err.to_string() },
        }
    }
}

impl From<ProblemError> for OptError {
    fn from(err: ProblemError) -> Self {
        OptError::Problem(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // Crate errors raised inside argmin closures come back out unchanged.
    //
    // Given
    // -----
    // - An `OptError::SolverCancelled` boxed into an argmin `Error`.
    //
    // Expect
    // ------
    // - Conversion recovers `SolverCancelled`, not a `Backend` error.
    fn from_argmin_error_recovers_crate_error() {
        // Arrange
        let boxed: Error = OptError::SolverCancelled.into();

        // Act
        let recovered = OptError::from(boxed);

        // Assert
        assert_eq!(recovered, OptError::SolverCancelled);
    }

    #[test]
    // Purpose
    // -------
    // Typed argmin errors map onto their wrapper variants.
    //
    // Given
    // -----
    // - `ArgminError::InvalidParameter` boxed into an argmin `Error`.
    //
    // Expect
    // ------
    // - `OptError::Backend` of kind "invalid parameter" quoting the text.
    fn from_argmin_error_maps_argmin_variants() {
        // Arrange
        let boxed: Error = ArgminError::InvalidParameter { text: "tol".to_string() }.into();

        // Act
        let mapped = OptError::from(boxed);

        // Assert
        match mapped {
            OptError::Backend { kind, text } => {
                assert_eq!(kind, "invalid parameter");
                assert!(text.contains("tol"));
            }
            other => panic!("unexpected mapping: {other}"),
        }
    }

    #[test]
    // Purpose
    // -------
    // Only timeouts, cancellations and problem failures abort a solve.
    //
    // Given
    // -----
    // - A sample of fatal and recoverable errors.
    //
    // Expect
    // ------
    // - `is_fatal` partitions them accordingly.
    fn is_fatal_partitions_errors() {
        assert!(OptError::SolverTimeout { elapsed_ms: 5 }.is_fatal());
        assert!(OptError::SolverCancelled.is_fatal());
        assert!(OptError::Problem(ProblemError::EmptyWeights).is_fatal());
        assert!(!OptError::Backend { kind: "condition violated", text: "ls".into() }.is_fatal());
        assert!(!OptError::NonFiniteCost { value: f64::NAN }.is_fatal());
    }
}
