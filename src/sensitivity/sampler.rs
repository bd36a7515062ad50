//! sensitivity::sampler — seeded sampling around a solved point.
//!
//! Purpose
//! -------
//! Produce candidate reference points on a sphere of radius `r` around a
//! center `z0`, for projection through the tangent-plane extrapolation and
//! empirical slope fitting.
//!
//! Key behaviors
//! -------------
//! - `Sphere`: Gaussian directions (`statrs::Normal`) normalized to unit
//!   length, which are uniform on the sphere.
//! - `LatinHypercube`: one stratum per sample in every dimension on
//!   `[−1, 1)`, then projected onto the sphere.
//! - `ScaledLatinHypercube`: as above, with dimension `j` first stretched by
//!   `(max_j − min_j) / 2`, so directions favour wide ranges.
//! - An optional [`DominanceFilter`] runs on the raw samples.
//!
//! Invariants & assumptions
//! ------------------------
//! - The generator is `StdRng::seed_from_u64(seed)`, drawn in a fixed
//!   order, so a given sampler returns identical samples on every call.
//! - A direction of zero length leaves its sample at the center.
use ndarray::{Array1, Array2, Axis};
use rand::{Rng, SeedableRng, distributions::Distribution, rngs::StdRng, seq::SliceRandom};
use statrs::distribution::Normal;

use crate::{
    sensitivity::{
        dominance::DominanceFilter,
        errors::{SamplingError, SamplingResult},
    },
    utils::{ensure_finite, ensure_len},
};

/// How sample directions are generated.
#[derive(Debug, Clone, PartialEq)]
pub enum SamplingStrategy {
    Sphere,
    LatinHypercube,
    /// Per-dimension `(min, max)` ranges used to stretch directions.
    ScaledLatinHypercube { ranges: Vec<(f64, f64)> },
}

/// Seeded generator of neighbors around a center point.
#[derive(Debug, Clone, PartialEq)]
pub struct NeighborhoodSampler {
    strategy: SamplingStrategy,
    count: usize,
    radius: f64,
    seed: u64,
    filter: Option<DominanceFilter>,
}

impl NeighborhoodSampler {
    /// # Errors
    /// - [`SamplingError::InvalidSampleCount`] for `count == 0`.
    /// - [`SamplingError::InvalidRadius`] unless `radius` is finite and > 0.
    /// - [`SamplingError::InvalidRange`] for a scaled strategy with a range
    ///   that is not finite or has `min >= max`.
    pub fn new(
        strategy: SamplingStrategy, count: usize, radius: f64, seed: u64,
    ) -> SamplingResult<Self> {
        if count == 0 {
            return Err(SamplingError::InvalidSampleCount { count });
        }
        if !(radius.is_finite() && radius > 0.0) {
            return Err(SamplingError::InvalidRadius { radius });
        }
        if let SamplingStrategy::ScaledLatinHypercube { ranges } = &strategy {
            for (index, &(min, max)) in ranges.iter().enumerate() {
                if !(min.is_finite() && max.is_finite() && min < max) {
                    return Err(SamplingError::InvalidRange { index, min, max });
                }
            }
        }
        Ok(Self { strategy, count, radius, seed, filter: None })
    }

    pub fn with_filter(mut self, filter: DominanceFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn strategy(&self) -> &SamplingStrategy {
        &self.strategy
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn filter(&self) -> Option<DominanceFilter> {
        self.filter
    }

    /// Sample around `center`, then apply the dominance filter if any.
    ///
    /// # Errors
    /// Shape errors for a non-finite center or mismatched range count.
    pub fn sample(&self, center: &Array1<f64>) -> SamplingResult<Array2<f64>> {
        ensure_finite("sampling center", center)?;
        let mut points = self.directions(center.len())? * self.radius;
        points += &center.view().insert_axis(Axis(0));
        Ok(match self.filter {
            Some(filter) => filter.apply(&points),
            None => points,
        })
    }

    /// Unit (or zero) direction rows, `count × k`.
    pub fn directions(&self, k: usize) -> SamplingResult<Array2<f64>> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut raw = match &self.strategy {
            SamplingStrategy::Sphere => {
                let normal = Normal::new(0.0, 1.0)
                    .map_err(|e| SamplingError::Distribution { text: e.to_string() })?;
                Array2::from_shape_fn((self.count, k), |_| normal.sample(&mut rng))
            }
            SamplingStrategy::LatinHypercube => latin_hypercube(&mut rng, self.count, k),
            SamplingStrategy::ScaledLatinHypercube { ranges } => {
                ensure_len("sampling ranges", k, ranges.len())?;
                let mut lhs = latin_hypercube(&mut rng, self.count, k);
                for (mut column, &(min, max)) in lhs.columns_mut().into_iter().zip(ranges) {
                    column *= (max - min) / 2.0;
                }
                lhs
            }
        };
        for mut row in raw.rows_mut() {
            let norm = row.dot(&row).sqrt();
            if norm > 0.0 {
                row /= norm;
            } else {
                row.fill(0.0);
            }
        }
        Ok(raw)
    }
}

/// Latin hypercube design on `[−1, 1)^k`: in every column each of the
/// `count` strata holds exactly one sample.
fn latin_hypercube(rng: &mut StdRng, count: usize, k: usize) -> Array2<f64> {
    let mut out = Array2::zeros((count, k));
    let mut strata: Vec<usize> = (0..count).collect();
    for mut column in out.columns_mut() {
        strata.shuffle(rng);
        for (value, &stratum) in column.iter_mut().zip(&strata) {
            let u = (stratum as f64 + rng.gen_range(0.0..1.0)) / count as f64;
            *value = 2.0 * u - 1.0;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // - Determinism under a fixed seed for every strategy.
    // - Samples lie on the sphere; LHS strata are filled once each.
    // - Configuration validation and the dominance filter hook.
    // -------------------------------------------------------------------------

    fn strategies() -> Vec<SamplingStrategy> {
        vec![
            SamplingStrategy::Sphere,
            SamplingStrategy::LatinHypercube,
            SamplingStrategy::ScaledLatinHypercube { ranges: vec![(0.0, 1.0), (0.0, 4.0), (-1.0, 1.0)] },
        ]
    }

    #[test]
    // Purpose
    // -------
    // A fixed seed yields identical samples; a different seed does not.
    //
    // Given
    // -----
    // - Each strategy with seed 42 sampled twice, and once with seed 43.
    //
    // Expect
    // ------
    // - Bitwise-equal repeats; the seed-43 run differs.
    fn sampling_is_deterministic_under_seed() {
        let center = array![1.0, -2.0, 0.5];
        for strategy in strategies() {
            let a = NeighborhoodSampler::new(strategy.clone(), 20, 0.1, 42).unwrap();
            let b = NeighborhoodSampler::new(strategy, 20, 0.1, 43).unwrap();
            let first = a.sample(&center).unwrap();
            assert_eq!(first, a.sample(&center).unwrap());
            assert_ne!(first, b.sample(&center).unwrap());
        }
    }

    #[test]
    // Purpose
    // -------
    // Every sample sits at distance `radius` from the center.
    //
    // Given
    // -----
    // - Each strategy, radius 0.25, 50 samples in three dimensions.
    //
    // Expect
    // ------
    // - ‖sample − center‖ = 0.25 within 1e-12.
    fn samples_lie_on_sphere() {
        let center = array![1.0, -2.0, 0.5];
        for strategy in strategies() {
            let sampler = NeighborhoodSampler::new(strategy, 50, 0.25, 7).unwrap();
            let points = sampler.sample(&center).unwrap();
            assert_eq!(points.nrows(), 50);
            for row in points.outer_iter() {
                let d = &row - &center;
                assert_abs_diff_eq!(d.dot(&d).sqrt(), 0.25, epsilon = 1e-12);
            }
        }
    }

    #[test]
    // Purpose
    // -------
    // The Latin hypercube puts exactly one sample in each stratum per column.
    //
    // Given
    // -----
    // - 10 samples in 2 dimensions.
    //
    // Expect
    // ------
    // - Sorted stratum indices of each column are 0..10.
    fn latin_hypercube_fills_each_stratum_once() {
        let mut rng = StdRng::seed_from_u64(3);
        let design = latin_hypercube(&mut rng, 10, 2);
        for column in design.columns() {
            let mut strata: Vec<usize> =
                column.iter().map(|&v| (((v + 1.0) / 2.0) * 10.0).floor() as usize).collect();
            strata.sort_unstable();
            assert_eq!(strata, (0..10).collect::<Vec<_>>());
        }
    }

    #[test]
    // Purpose
    // -------
    // Invalid configurations are rejected at construction.
    //
    // Given
    // -----
    // - Zero count, negative radius, an inverted range.
    //
    // Expect
    // ------
    // - The matching error variants.
    fn new_validates_configuration() {
        assert!(matches!(
            NeighborhoodSampler::new(SamplingStrategy::Sphere, 0, 1.0, 0),
            Err(SamplingError::InvalidSampleCount { count: 0 })
        ));
        assert!(matches!(
            NeighborhoodSampler::new(SamplingStrategy::Sphere, 5, -1.0, 0),
            Err(SamplingError::InvalidRadius { .. })
        ));
        let inverted = SamplingStrategy::ScaledLatinHypercube { ranges: vec![(1.0, 0.0)] };
        assert!(matches!(
            NeighborhoodSampler::new(inverted, 5, 1.0, 0),
            Err(SamplingError::InvalidRange { index: 0, .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // With a filter attached, no retained sample dominates another.
    //
    // Given
    // -----
    // - 40 sphere samples in 2-D with `DropComparable`.
    //
    // Expect
    // ------
    // - Fewer than 40 rows, and no pair in a dominance relation.
    fn filter_removes_comparable_samples() {
        use crate::sensitivity::dominance::dominates;
        let sampler = NeighborhoodSampler::new(SamplingStrategy::Sphere, 40, 1.0, 11)
            .unwrap()
            .with_filter(DominanceFilter::DropComparable);
        let points = sampler.sample(&array![0.0, 0.0]).unwrap();
        assert!(points.nrows() < 40);
        for a in points.outer_iter() {
            for b in points.outer_iter() {
                assert!(!dominates(a, b));
            }
        }
    }
}
