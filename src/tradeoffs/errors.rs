use crate::problem::errors::ProblemError;

/// Result alias for trade-off and extrapolation operations.
pub type TradeoffResult<T> = Result<T, TradeoffError>;

#[derive(Debug, Clone, PartialEq)]
pub enum TradeoffError {
    /// Multiplier `index` is zero, so row `index` of the trade-off matrix
    /// would divide by zero.
    UndefinedTradeoff { index: usize },

    /// The projection denominator `n · w⁻¹` vanished (or is not finite).
    ExtrapolationUndefined { denominator: f64 },

    /// Multiplier `index` is NaN or infinite.
    NonFiniteMultiplier { index: usize, value: f64 },

    /// Wrapper for shape and sign-convention failures.
    Problem(ProblemError),
}

impl std::error::Error for TradeoffError {}

impl std::fmt::Display for TradeoffError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TradeoffError::UndefinedTradeoff { index } => {
                write!(f, "Trade-off undefined: multiplier {index} is zero")
            }
            TradeoffError::ExtrapolationUndefined { denominator } => {
                write!(
                    f,
                    "Extrapolation undefined: projection denominator n·w_inv = {denominator}"
                )
            }
            TradeoffError::NonFiniteMultiplier { index, value } => {
                write!(f, "Multiplier {index} must be finite, got {value}")
            }
            TradeoffError::Problem(err) => write!(f, "{err}"),
        }
    }
}

impl From<ProblemError> for TradeoffError {
    fn from(err: ProblemError) -> Self {
        TradeoffError::Problem(err)
    }
}
