//! problem::errors — error surface for problem definitions and boundary transforms.
//!
//! Purpose
//! -------
//! Collect the failures that can occur before any optimization starts:
//! malformed bounds, degenerate ideal/nadir ranges, non-positive weights,
//! shape mismatches between vectors that must line up with the number of
//! objectives, and failures raised by user-supplied objective evaluators.
//!
//! Conventions
//! -----------
//! - Indices are 0-based and refer to objective (or variable) positions.
//! - Every variant carries the offending index and value so callers can
//!   correct the input and resubmit; nothing here is ever replaced by a
//!   placeholder `0.0` or `NaN`.

/// Result alias for problem-definition and transform operations.
pub type ProblemResult<T> = Result<T, ProblemError>;

/// ProblemError — validation and evaluation failures on the problem side.
#[derive(Debug, Clone, PartialEq)]
pub enum ProblemError {
    // ---- Normalization ----
    /// Ideal and nadir coincide in one dimension, so the range is empty.
    DegenerateRange { index: usize, ideal: f64, nadir: f64 },

    // ---- Weights ----
    /// A weight is non-positive or non-finite.
    InvalidWeight { index: usize, value: f64 },
    /// No weights were supplied.
    EmptyWeights,
    /// Simplex-lattice generation was asked for an impossible design.
    InvalidLattice { num_objectives: usize, reason: &'static str },

    // ---- Shapes ----
    /// A vector does not have the length required by the problem.
    DimensionMismatch { what: &'static str, expected: usize, found: usize },
    /// A single scalar was required but a vector of another length arrived.
    ShapeMismatch { found: usize },

    // ---- Problem definition ----
    /// Variable bounds are non-finite or inverted.
    InvalidBounds { index: usize, lower: f64, upper: f64 },
    /// A supplied vector contains a non-finite entry.
    NonFiniteValue { what: &'static str, index: usize, value: f64 },
    /// An objective evaluator returned a non-finite value.
    NonFiniteObjective { index: usize, value: f64 },
    /// An objective index beyond `num_objectives` was requested.
    ObjectiveIndexOutOfRange { index: usize, num_objectives: usize },
    /// The objective evaluator itself failed.
    EvaluationFailed { reason: String },
    /// Unknown objective sense name.
    InvalidSense { name: String },
}

impl std::error::Error for ProblemError {}

impl std::fmt::Display for ProblemError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Normalization ----
            ProblemError::DegenerateRange { index, ideal, nadir } => {
                write!(
                    f,
                    "Degenerate range in objective {index}: ideal {ideal} equals nadir {nadir}"
                )
            }

            // ---- Weights ----
            ProblemError::InvalidWeight { index, value } => {
                write!(f, "Invalid weight at index {index}: {value}, must be finite and > 0")
            }
            ProblemError::EmptyWeights => write!(f, "Weight vector is empty"),
            ProblemError::InvalidLattice { num_objectives, reason } => {
                write!(f, "Invalid weight lattice for {num_objectives} objectives: {reason}")
            }

            // ---- Shapes ----
            ProblemError::DimensionMismatch { what, expected, found } => {
                write!(f, "Dimension mismatch for {what}: expected {expected}, found {found}")
            }
            ProblemError::ShapeMismatch { found } => {
                write!(f, "Expected a single scalar value, found {found} elements")
            }

            // ---- Problem definition ----
            ProblemError::InvalidBounds { index, lower, upper } => {
                write!(
                    f,
                    "Invalid bounds for variable {index}: [{lower}, {upper}], must be finite with lower <= upper"
                )
            }
            ProblemError::NonFiniteValue { what, index, value } => {
                write!(f, "Non-finite {what} at index {index}: {value}")
            }
            ProblemError::NonFiniteObjective { index, value } => {
                write!(f, "Objective {index} evaluated to a non-finite value: {value}")
            }
            ProblemError::ObjectiveIndexOutOfRange { index, num_objectives } => {
                write!(f, "Objective index {index} out of range for {num_objectives} objectives")
            }
            ProblemError::EvaluationFailed { reason } => {
                write!(f, "Objective evaluation failed: {reason}")
            }
            ProblemError::InvalidSense { name } => {
                write!(f, "Invalid objective sense '{name}': expected 'min' or 'max'")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Display messages embedding the offending index/value payloads.
    //
    // They intentionally DO NOT cover:
    // - The code paths that raise these errors; those live next to the
    //   validating constructors.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify that `DegenerateRange` names the dimension and both endpoints.
    //
    // Given
    // -----
    // - A `DegenerateRange` at index 2 with ideal = nadir = 1.5.
    //
    // Expect
    // ------
    // - The message mentions "objective 2" and "1.5".
    fn degenerate_range_message_names_dimension() {
        // Arrange
        let err = ProblemError::DegenerateRange { index: 2, ideal: 1.5, nadir: 1.5 };

        // Act
        let msg = err.to_string();

        // Assert
        assert!(msg.contains("objective 2"), "message was: {msg}");
        assert!(msg.contains("1.5"), "message was: {msg}");
    }

    #[test]
    // Purpose
    // -------
    // Verify that `InvalidWeight` carries the offending weight.
    //
    // Given
    // -----
    // - An `InvalidWeight` at index 0 with value -0.25.
    //
    // Expect
    // ------
    // - The message contains "-0.25" and "index 0".
    fn invalid_weight_message_contains_value() {
        // Arrange
        let err = ProblemError::InvalidWeight { index: 0, value: -0.25 };

        // Act
        let msg = err.to_string();

        // Assert
        assert!(msg.contains("-0.25"));
        assert!(msg.contains("index 0"));
    }
}
