//! engine — the explicit configuration object the interactive caller holds.
//!
//! Purpose
//! -------
//! Bind a [`Problem`](crate::problem::Problem), its [`ProblemSettings`](crate::problem::ProblemSettings)
//! and [`EngineOptions`] into a [`TradeoffEngine`] built once and passed by
//! reference, in place of any global problem registry.
//!
//! Key behaviors
//! -------------
//! - Stateless per request: no caching, no retries; errors are returned as
//!   [`EngineError`] with the originating area preserved.
//! - The sign convention is applied at the engine boundary only.
pub mod errors;
pub mod explain;
pub mod options;

pub use self::errors::{EngineError, EngineResult};
pub use self::explain::{Approximation, Explanation, SlopeReport, TradeoffEngine};
pub use self::options::{EngineOptions, ExtrapolationSpace};

pub mod prelude {
    pub use super::errors::{EngineError, EngineResult};
    pub use super::explain::{Approximation, Explanation, TradeoffEngine};
    pub use super::options::{EngineOptions, ExtrapolationSpace};
}
