use crate::{
    optimization::errors::OptError, problem::errors::ProblemError,
    sensitivity::errors::SamplingError, tradeoffs::errors::TradeoffError,
};

/// Result alias for [`TradeoffEngine`](super::TradeoffEngine) operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors surfaced by the engine, one variant per area.
///
/// Problem-level errors nested inside other areas are flattened into
/// [`EngineError::Problem`] so callers match on them in one place.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineError {
    Problem(ProblemError),
    Optimization(OptError),
    Tradeoff(TradeoffError),
    Sampling(SamplingError),
}

impl std::error::Error for EngineError {}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineError::Problem(err) => write!(f, "Problem error: {err}"),
            EngineError::Optimization(err) => write!(f, "Optimization error: {err}"),
            EngineError::Tradeoff(err) => write!(f, "Trade-off error: {err}"),
            EngineError::Sampling(err) => write!(f, "Sampling error: {err}"),
        }
    }
}

impl From<ProblemError> for EngineError {
    fn from(err: ProblemError) -> Self {
        EngineError::Problem(err)
    }
}

impl From<OptError> for EngineError {
    fn from(err: OptError) -> Self {
        match err {
            OptError::Problem(inner) => EngineError::Problem(inner),
            other => EngineError::Optimization(other),
        }
    }
}

impl From<TradeoffError> for EngineError {
    fn from(err: TradeoffError) -> Self {
        match err {
            TradeoffError::Problem(inner) => EngineError::Problem(inner),
            other => EngineError::Tradeoff(other),
        }
    }
}

impl From<SamplingError> for EngineError {
    fn from(err: SamplingError) -> Self {
        match err {
            SamplingError::Problem(inner) => EngineError::Problem(inner),
            SamplingError::Tradeoff(inner) => inner.into(),
            other => EngineError::Sampling(other),
        }
    }
}
