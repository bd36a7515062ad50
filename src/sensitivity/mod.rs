//! sensitivity — sampling-based cross-check of the closed-form trade-offs.
//!
//! Purpose
//! -------
//! Sample neighbors of a solved point, project them onto the local tangent
//! plane, and estimate slopes empirically, either pairwise by least squares
//! or all at once from an SVD hyperplane fit.
//!
//! Key behaviors
//! -------------
//! - [`NeighborhoodSampler`] draws seeded sphere or Latin hypercube
//!   neighbors, optionally filtered by [`DominanceFilter`].
//! - [`pairwise_slopes`] regresses each objective on each other one.
//! - [`TangentPlane::fit`] recovers the plane normal, and [`cross_check`]
//!   compares its slopes with a [`TradeoffMatrix`](crate::tradeoffs::TradeoffMatrix).
//!
//! Invariants & assumptions
//! ------------------------
//! - Output is deterministic for a fixed sampler seed.
//! - Points are in the internal (all-minimized) convention.
pub mod dominance;
pub mod errors;
pub mod sampler;
pub mod slope;
pub mod tangent;

pub use self::dominance::{DominanceFilter, dominates};
pub use self::errors::{SamplingError, SamplingResult};
pub use self::sampler::{NeighborhoodSampler, SamplingStrategy};
pub use self::slope::{LinearFit, PairwiseSlopes, linregress, pairwise_slopes};
pub use self::tangent::{CrossCheck, TangentPlane, cross_check};

pub mod prelude {
    pub use super::dominance::DominanceFilter;
    pub use super::errors::{SamplingError, SamplingResult};
    pub use super::sampler::{NeighborhoodSampler, SamplingStrategy};
    pub use super::tangent::{CrossCheck, TangentPlane};
}
