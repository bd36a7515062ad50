//! problem::sign — the single place where objective signs are flipped.
//!
//! The engine works internally with "every objective is minimized". A
//! decision-maker thinks in natural terms (maximize dissolved oxygen,
//! minimize cost). [`SignConvention`] converts between the two and is
//! applied exactly once per value entering or leaving the core.
use std::str::FromStr;

use ndarray::{Array1, Zip};
use serde::{Deserialize, Serialize};

use crate::problem::errors::{ProblemError, ProblemResult};

/// Natural optimization sense of one objective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sense {
    Minimize,
    Maximize,
}

impl Sense {
    /// Multiplier mapping a natural value to the internal convention.
    pub fn factor(self) -> f64 {
        match self {
            Sense::Minimize => 1.0,
            Sense::Maximize => -1.0,
        }
    }
}

impl FromStr for Sense {
    type Err = ProblemError;

    /// Accepts `min`/`minimize` and `max`/`maximize`, case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "min" | "minimize" => Ok(Sense::Minimize),
            "max" | "maximize" => Ok(Sense::Maximize),
            _ => Err(ProblemError::InvalidSense { name: s.to_string() }),
        }
    }
}

/// Per-objective senses plus the natural ⇄ internal transform.
///
/// The transform is an involution: `to_natural(to_internal(v)) == v`
/// exactly, since it only multiplies by `±1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignConvention {
    senses: Vec<Sense>,
}

impl SignConvention {
    pub fn new(senses: Vec<Sense>) -> Self {
        Self { senses }
    }

    pub fn all_minimize(num_objectives: usize) -> Self {
        Self::new(vec![Sense::Minimize; num_objectives])
    }

    pub fn all_maximize(num_objectives: usize) -> Self {
        Self::new(vec![Sense::Maximize; num_objectives])
    }

    pub fn len(&self) -> usize {
        self.senses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.senses.is_empty()
    }

    pub fn senses(&self) -> &[Sense] {
        &self.senses
    }

    /// Natural values → internal minimize convention.
    pub fn to_internal(&self, natural: &Array1<f64>) -> ProblemResult<Array1<f64>> {
        self.apply(natural, "natural objective vector")
    }

    /// Internal minimize convention → natural values.
    pub fn to_natural(&self, internal: &Array1<f64>) -> ProblemResult<Array1<f64>> {
        self.apply(internal, "internal objective vector")
    }

    fn apply(&self, values: &Array1<f64>, what: &'static str) -> ProblemResult<Array1<f64>> {
        if values.len() != self.senses.len() {
            return Err(ProblemError::DimensionMismatch {
                what,
                expected: self.senses.len(),
                found: values.len(),
            });
        }
        let factors: Array1<f64> = self.senses.iter().map(|s| s.factor()).collect();
        Ok(Zip::from(values).and(&factors).map_collect(|&v, &s| v * s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    // Purpose
    // -------
    // The transform flips maximize objectives only and round-trips exactly.
    //
    // Given
    // -----
    // - Senses (max, min, max) and natural values (6.0, 2.5, -1.0).
    //
    // Expect
    // ------
    // - Internal values (-6.0, 2.5, 1.0); converting back yields the input.
    fn sign_convention_flips_maximize_and_round_trips() {
        // Arrange
        let convention = SignConvention::new(vec![Sense::Maximize, Sense::Minimize, Sense::Maximize]);
        let natural = array![6.0, 2.5, -1.0];

        // Act
        let internal = convention.to_internal(&natural).unwrap();
        let back = convention.to_natural(&internal).unwrap();

        // Assert
        assert_eq!(internal, array![-6.0, 2.5, 1.0]);
        assert_eq!(back, natural);
    }

    #[test]
    // Purpose
    // -------
    // Length mismatches are reported instead of silently truncated.
    //
    // Given
    // -----
    // - A two-objective convention and a three-element vector.
    //
    // Expect
    // ------
    // - `DimensionMismatch { expected: 2, found: 3, .. }`.
    fn sign_convention_rejects_wrong_length() {
        // Arrange
        let convention = SignConvention::all_maximize(2);

        // Act
        let res = convention.to_internal(&array![1.0, 2.0, 3.0]);

        // Assert
        assert!(matches!(
            res,
            Err(ProblemError::DimensionMismatch { expected: 2, found: 3, .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // Parse senses from configuration strings.
    //
    // Given
    // -----
    // - "MAX", "minimize" and "sideways".
    //
    // Expect
    // ------
    // - Maximize, Minimize and an `InvalidSense` error.
    fn sense_from_str_is_case_insensitive() {
        assert_eq!("MAX".parse::<Sense>().unwrap(), Sense::Maximize);
        assert_eq!("minimize".parse::<Sense>().unwrap(), Sense::Minimize);
        assert!(matches!("sideways".parse::<Sense>(), Err(ProblemError::InvalidSense { .. })));
    }
}
