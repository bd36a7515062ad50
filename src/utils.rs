//! utils — small typed accessors shared across the crate.
//!
//! Inputs that may arrive as a one-element array go through
//! [`scalar_from_array`], which accepts exactly one finite element and
//! fails with [`ProblemError::ShapeMismatch`] otherwise.
use ndarray::{ArrayBase, Data, Ix1};

use crate::problem::errors::{ProblemError, ProblemResult};

/// Extract the single value held by a one-element array.
///
/// # Errors
/// - [`ProblemError::ShapeMismatch`] when `values` does not hold exactly one
///   element.
/// - [`ProblemError::NonFiniteValue`] labelled with `what` when that element
///   is NaN or ±∞.
pub fn scalar_from_array<S: Data<Elem = f64>>(
    what: &'static str, values: &ArrayBase<S, Ix1>,
) -> ProblemResult<f64> {
    match values.len() {
        1 if values[0].is_finite() => Ok(values[0]),
        1 => Err(ProblemError::NonFiniteValue { what, index: 0, value: values[0] }),
        found => Err(ProblemError::ShapeMismatch { found }),
    }
}

/// Check that a vector has the expected length.
///
/// # Errors
/// Returns [`ProblemError::DimensionMismatch`] labelled with `what`.
pub fn ensure_len(what: &'static str, expected: usize, found: usize) -> ProblemResult<()> {
    if expected != found {
        return Err(ProblemError::DimensionMismatch { what, expected, found });
    }
    Ok(())
}

/// Check that every entry of `values` is finite.
///
/// # Errors
/// Returns [`ProblemError::NonFiniteValue`] for the first offending entry.
pub fn ensure_finite<S: Data<Elem = f64>>(
    what: &'static str, values: &ArrayBase<S, Ix1>,
) -> ProblemResult<()> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(index) => Err(ProblemError::NonFiniteValue { what, index, value: values[index] }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array1, array};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // - The scalar accessor on whole arrays and views.
    // - Length and finiteness checks.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // A one-element input yields its value; any other length is a shape error.
    //
    // Given
    // -----
    // - Inputs of length 1, 0 and 3.
    //
    // Expect
    // ------
    // - Ok(value) for length 1, ShapeMismatch carrying the length otherwise.
    fn scalar_from_array_accepts_exactly_one_element() {
        // Arrange
        let one = array![-1.0];
        let none = Array1::<f64>::zeros(0);
        let three = array![1.0, 2.0, 3.0];

        // Act / Assert
        assert_eq!(scalar_from_array("x", &one), Ok(-1.0));
        assert_eq!(scalar_from_array("x", &none), Err(ProblemError::ShapeMismatch { found: 0 }));
        assert_eq!(scalar_from_array("x", &three), Err(ProblemError::ShapeMismatch { found: 3 }));
        assert_eq!(scalar_from_array("x", &three.slice(ndarray::s![1..2])), Ok(2.0));
    }

    #[test]
    // Purpose
    // -------
    // Non-finite scalars are rejected rather than passed through.
    //
    // Given
    // -----
    // - A one-element array holding NaN.
    //
    // Expect
    // ------
    // - NonFiniteValue at index 0, labelled with the caller's name.
    fn scalar_from_array_rejects_nan() {
        let result = scalar_from_array("objective", &array![f64::NAN]);
        assert!(matches!(
            result,
            Err(ProblemError::NonFiniteValue { what: "objective", index: 0, .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // Length and finiteness helpers report the first problem found.
    //
    // Given
    // -----
    // - Expected length 2 vs found 3; a vector with ∞ at index 1.
    //
    // Expect
    // ------
    // - DimensionMismatch and NonFiniteValue { index: 1 }.
    fn ensure_helpers_report_offending_input() {
        assert!(ensure_len("weights", 2, 2).is_ok());
        assert_eq!(
            ensure_len("weights", 2, 3),
            Err(ProblemError::DimensionMismatch { what: "weights", expected: 2, found: 3 })
        );
        let v = array![0.0, f64::INFINITY];
        assert!(matches!(
            ensure_finite("point", &v),
            Err(ProblemError::NonFiniteValue { what: "point", index: 1, .. })
        ));
    }
}
