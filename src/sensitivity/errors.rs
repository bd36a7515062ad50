use crate::{problem::errors::ProblemError, tradeoffs::errors::TradeoffError};

/// Result alias for neighborhood sampling and slope estimation.
pub type SamplingResult<T> = Result<T, SamplingError>;

#[derive(Debug, Clone, PartialEq)]
pub enum SamplingError {
    // ---- Sampler configuration ----
    /// At least one sample must be requested.
    InvalidSampleCount { count: usize },

    /// Radius must be finite and strictly positive.
    InvalidRadius { radius: f64 },

    /// Per-dimension range needs `min < max`, both finite.
    InvalidRange { index: usize, min: f64, max: f64 },

    // ---- Estimation ----
    /// Not enough points for the requested fit.
    TooFewPoints { needed: usize, found: usize },

    /// Regressor column has zero variance, so the slope is undefined.
    ZeroVariance { index: usize },

    /// Tangent normal component `index` is zero, so slopes against it are
    /// undefined.
    UndefinedSlope { index: usize },

    /// The SVD did not produce right singular vectors.
    DecompositionFailed,

    /// statrs rejected a distribution parameter.
    Distribution { text: String },

    // ---- Wrapped ----
    Problem(ProblemError),
    Tradeoff(TradeoffError),
}

impl std::error::Error for SamplingError {}

impl std::fmt::Display for SamplingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SamplingError::InvalidSampleCount { count } => {
                write!(f, "Invalid sample count {count}: must be at least 1")
            }
            SamplingError::InvalidRadius { radius } => {
                write!(f, "Invalid sampling radius {radius}: must be finite and > 0")
            }
            SamplingError::InvalidRange { index, min, max } => {
                write!(f, "Invalid range [{min}, {max}] for dimension {index}: need min < max")
            }
            SamplingError::TooFewPoints { needed, found } => {
                write!(f, "Too few points for fit: need {needed}, found {found}")
            }
            SamplingError::ZeroVariance { index } => {
                write!(f, "Objective {index} has zero variance across the sample")
            }
            SamplingError::UndefinedSlope { index } => {
                write!(f, "Tangent normal component {index} is zero; slope undefined")
            }
            SamplingError::DecompositionFailed => {
                write!(f, "Singular value decomposition did not return V^T")
            }
            SamplingError::Distribution { text } => {
                write!(f, "Distribution error: {text}")
            }
            SamplingError::Problem(err) => write!(f, "{err}"),
            SamplingError::Tradeoff(err) => write!(f, "{err}"),
        }
    }
}

impl From<ProblemError> for SamplingError {
    fn from(err: ProblemError) -> Self {
        SamplingError::Problem(err)
    }
}

impl From<TradeoffError> for SamplingError {
    fn from(err: TradeoffError) -> Self {
        SamplingError::Tradeoff(err)
    }
}
