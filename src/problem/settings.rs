//! problem::settings — explicit, loadable problem configuration.
//!
//! A [`ProblemSettings`] record replaces any process-wide registry of
//! problems: it is deserialized (or built) once by the caller, validated
//! against the [`Problem`] it describes, and passed by reference into the
//! engine. [`ProblemDetails`] is the read-only summary handed back to a
//! presentation layer, with ideal and nadir expressed in natural signs.
use serde::{Deserialize, Serialize};

use crate::problem::{
    errors::{ProblemError, ProblemResult},
    sign::{Sense, SignConvention},
    traits::Problem,
};

fn default_decimal_places() -> usize {
    5
}

/// Configuration record describing how a problem is presented and which
/// natural sense each objective has.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProblemSettings {
    pub name: String,
    pub senses: Vec<Sense>,
    #[serde(default)]
    pub short_names: Vec<String>,
    #[serde(default = "default_decimal_places")]
    pub decimal_places: usize,
}

impl ProblemSettings {
    pub fn new(name: impl Into<String>, senses: Vec<Sense>) -> Self {
        Self {
            name: name.into(),
            senses,
            short_names: Vec::new(),
            decimal_places: default_decimal_places(),
        }
    }

    pub fn with_short_names(mut self, short_names: Vec<String>) -> Self {
        self.short_names = short_names;
        self
    }

    /// Check that the record matches a problem with `num_objectives`.
    ///
    /// # Errors
    /// - [`ProblemError::DimensionMismatch`] if `senses` (or non-empty
    ///   `short_names`) do not have one entry per objective.
    pub fn validate(&self, num_objectives: usize) -> ProblemResult<()> {
        if self.senses.len() != num_objectives {
            return Err(ProblemError::DimensionMismatch {
                what: "objective senses",
                expected: num_objectives,
                found: self.senses.len(),
            });
        }
        if !self.short_names.is_empty() && self.short_names.len() != num_objectives {
            return Err(ProblemError::DimensionMismatch {
                what: "objective short names",
                expected: num_objectives,
                found: self.short_names.len(),
            });
        }
        Ok(())
    }

    pub fn sign_convention(&self) -> SignConvention {
        SignConvention::new(self.senses.clone())
    }

    /// Short names, falling back to `f_1 … f_k` when none were configured.
    pub fn resolved_short_names(&self) -> Vec<String> {
        if self.short_names.is_empty() {
            (1..=self.senses.len()).map(|i| format!("f_{i}")).collect()
        } else {
            self.short_names.clone()
        }
    }
}

/// Summary of a configured problem in natural signs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProblemDetails {
    pub name: String,
    pub ideal: Vec<f64>,
    pub nadir: Vec<f64>,
    pub num_objectives: usize,
    pub objective_names: Vec<String>,
    pub short_names: Vec<String>,
    pub decimal_places: usize,
}

impl ProblemDetails {
    /// Assemble details for `problem`, flipping ideal/nadir to natural signs.
    pub fn describe<P: Problem + ?Sized>(
        problem: &P, settings: &ProblemSettings,
    ) -> ProblemResult<Self> {
        settings.validate(problem.num_objectives())?;
        let convention = settings.sign_convention();
        Ok(Self {
            name: settings.name.clone(),
            ideal: convention.to_natural(problem.ideal())?.to_vec(),
            nadir: convention.to_natural(problem.nadir())?.to_vec(),
            num_objectives: problem.num_objectives(),
            objective_names: problem.objective_names(),
            short_names: settings.resolved_short_names(),
            decimal_places: settings.decimal_places,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // Settings deserialize from JSON with defaults for optional fields.
    //
    // Given
    // -----
    // - A JSON record with name and senses only.
    //
    // Expect
    // ------
    // - Five decimal places, empty short names resolved to f_1, f_2.
    fn settings_deserialize_with_defaults() {
        // Arrange
        let json = r#"{ "name": "RPP", "senses": ["maximize", "minimize"] }"#;

        // Act
        let settings: ProblemSettings = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(settings.senses, vec![Sense::Maximize, Sense::Minimize]);
        assert_eq!(settings.decimal_places, 5);
        assert_eq!(settings.resolved_short_names(), vec!["f_1", "f_2"]);
        assert!(settings.validate(2).is_ok());
    }

    #[test]
    // Purpose
    // -------
    // A settings record for the wrong number of objectives is rejected.
    //
    // Given
    // -----
    // - Two senses, three short names, validated against k = 2 and k = 3.
    //
    // Expect
    // ------
    // - Short-name mismatch for k = 2; sense mismatch for k = 3.
    fn settings_validate_lengths() {
        // Arrange
        let settings = ProblemSettings::new("toy", vec![Sense::Minimize; 2])
            .with_short_names(vec!["a".into(), "b".into(), "c".into()]);

        // Act
        let two = settings.validate(2);
        let three = settings.validate(3);

        // Assert
        assert!(matches!(
            two,
            Err(ProblemError::DimensionMismatch { what: "objective short names", .. })
        ));
        assert!(matches!(
            three,
            Err(ProblemError::DimensionMismatch { what: "objective senses", .. })
        ));
    }
}
