//! sensitivity::tangent — hyperplane fit through sampled front points.
//!
//! Purpose
//! -------
//! Recover the local tangent plane of the front from projected samples and
//! compare its slopes with the closed-form trade-off matrix.
//!
//! Key behaviors
//! -------------
//! - The difference matrix `rows[1..] − rows[0]` is copied into a
//!   `nalgebra::DMatrix`; the right singular vector of the smallest singular
//!   value is the plane normal.
//! - The normal is unit length with a non-negative component sum.
//! - A numerical rank below `k − 1` flags the fit as rank deficient and is
//!   logged; the normal is still returned.
//!
//! Conventions
//! -----------
//! - `slopes()[[i, j]] = ∂z_j/∂z_i = −n_i / n_j`.
//! - The closed-form matrix measures movement in scaled coordinates, so
//!   [`cross_check`] rescales it by `w_j / w_i` before comparing.
use nalgebra::DMatrix;
use ndarray::{Array1, Array2};
use tracing::warn;

use crate::{
    optimization::numerical_stability::SINGULAR_VALUE_TOL,
    problem::weights::Weights,
    sensitivity::errors::{SamplingError, SamplingResult},
    tradeoffs::matrix::TradeoffMatrix,
};

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct TangentPlane {
    normal: Array1<f64>,
    singular_values: Array1<f64>,
    rank: usize,
    rank_deficient: bool,
}

impl TangentPlane {
    /// Fit a hyperplane through `points` (`m × k`, `m ≥ k + 1`).
    ///
    /// # Errors
    /// - [`SamplingError::TooFewPoints`] for fewer than `k + 1` rows.
    /// - [`SamplingError::DecompositionFailed`] if the SVD yields no `Vᵀ`.
    pub fn fit(points: &Array2<f64>) -> SamplingResult<Self> {
        let (m, k) = points.dim();
        if k == 0 || m < k + 1 {
            return Err(SamplingError::TooFewPoints { needed: k + 1, found: m });
        }
        let diffs = DMatrix::<f64>::from_fn(m - 1, k, |i, j| points[[i + 1, j]] - points[[0, j]]);
        let svd = diffs.svd(false, true);
        let v_t = svd.v_t.ok_or(SamplingError::DecompositionFailed)?;
        let singular_values: Array1<f64> = svd.singular_values.iter().copied().collect();

        let smallest = singular_values
            .iter()
            .enumerate()
            .min_by(|a, b| a.1.total_cmp(b.1))
            .map(|(idx, _)| idx)
            .ok_or(SamplingError::DecompositionFailed)?;
        let mut normal: Array1<f64> = v_t.row(smallest).iter().copied().collect();
        let norm = normal.dot(&normal).sqrt();
        if norm > 0.0 {
            normal /= norm;
        }
        if normal.sum() < 0.0 {
            normal.mapv_inplace(|v| -v);
        }

        let rank = singular_values.iter().filter(|&&s| s > SINGULAR_VALUE_TOL).count();
        let rank_deficient = rank + 1 < k;
        if rank_deficient {
            warn!(rank, expected = k - 1, "sampled points do not span a hyperplane");
        }
        Ok(Self { normal, singular_values, rank, rank_deficient })
    }

    pub fn normal(&self) -> &Array1<f64> {
        &self.normal
    }

    pub fn singular_values(&self) -> &Array1<f64> {
        &self.singular_values
    }

    pub fn rank(&self) -> usize {
        self.rank
    }

    pub fn is_rank_deficient(&self) -> bool {
        self.rank_deficient
    }

    /// Slopes implied by the normal: `[i][j] = −n_i / n_j`, diagonal 1.
    ///
    /// # Errors
    /// [`SamplingError::UndefinedSlope`] when some `n_j` is numerically zero.
    pub fn slopes(&self) -> SamplingResult<Array2<f64>> {
        let k = self.normal.len();
        if let Some(index) = self.normal.iter().position(|n| n.abs() <= SINGULAR_VALUE_TOL) {
            return Err(SamplingError::UndefinedSlope { index });
        }
        Ok(Array2::from_shape_fn((k, k), |(i, j)| {
            if i == j { 1.0 } else { -self.normal[i] / self.normal[j] }
        }))
    }
}

/// Side-by-side comparison of closed-form and fitted trade-offs.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct CrossCheck {
    /// Closed-form rates rescaled to objective units, `[i][j] = ∂z_i/∂z_j`.
    pub expected: Array2<f64>,
    /// Tangent-plane rates in the same layout (the transpose of
    /// [`TangentPlane::slopes`]).
    pub empirical: Array2<f64>,
    pub max_abs_diff: f64,
}

/// cross_check — compare a trade-off matrix with a fitted tangent plane.
///
/// # Errors
/// Length mismatches between the three inputs, or undefined plane slopes.
pub fn cross_check(
    closed: &TradeoffMatrix, plane: &TangentPlane, weights: &Weights,
) -> SamplingResult<CrossCheck> {
    let k = closed.len();
    weights.check_len(k)?;
    crate::utils::ensure_len("tangent normal", k, plane.normal().len())?;
    let w = weights.as_array();
    let closed = closed.as_array();
    let expected = Array2::from_shape_fn((k, k), |(i, j)| closed[[i, j]] * w[j] / w[i]);
    let plane_slopes = plane.slopes()?;
    let empirical = Array2::from_shape_fn((k, k), |(i, j)| plane_slopes[[j, i]]);
    let max_abs_diff =
        expected.iter().zip(empirical.iter()).map(|(a, b)| (a - b).abs()).fold(0.0, f64::max);
    Ok(CrossCheck { expected, empirical, max_abs_diff })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tradeoffs::matrix::compute_tradeoffs;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // - Normal recovery on an exact plane, rank reporting and slope layout.
    // - Cross-check agreement with the closed-form matrix.
    // -------------------------------------------------------------------------

    fn plane_points() -> Array2<f64> {
        // Basis (2, −1, 0) and (3, 0, −1) spans the plane with normal (1, 2, 3).
        let z0 = array![1.0, 1.0, 1.0];
        let b1 = array![2.0, -1.0, 0.0];
        let b2 = array![3.0, 0.0, -1.0];
        let coeffs = [(0.0, 0.0), (0.1, 0.0), (0.0, 0.1), (0.1, 0.1), (-0.1, 0.2)];
        let mut out = Array2::zeros((coeffs.len(), 3));
        for (mut row, &(a, c)) in out.rows_mut().into_iter().zip(&coeffs) {
            row.assign(&(&z0 + &(&b1 * a) + &(&b2 * c)));
        }
        out
    }

    #[test]
    // Purpose
    // -------
    // The fitted normal of exact plane points is the plane's normal.
    //
    // Given
    // -----
    // - Five points on the plane with normal (1, 2, 3).
    //
    // Expect
    // ------
    // - normal = (1, 2, 3)/√14, rank 2, not deficient.
    fn fit_recovers_normal() {
        let plane = TangentPlane::fit(&plane_points()).unwrap();
        let scale = 14f64.sqrt();
        for (got, want) in plane.normal().iter().zip([1.0, 2.0, 3.0]) {
            assert_abs_diff_eq!(*got, want / scale, epsilon = 1e-9);
        }
        assert_eq!(plane.rank(), 2);
        assert!(!plane.is_rank_deficient());
    }

    #[test]
    // Purpose
    // -------
    // Slopes follow `−n_i / n_j`.
    //
    // Given
    // -----
    // - The (1, 2, 3) plane.
    //
    // Expect
    // ------
    // - [0][1] = −0.5, [2][0] = −3, diagonal 1.
    fn slopes_follow_normal_ratios() {
        let slopes = TangentPlane::fit(&plane_points()).unwrap().slopes().unwrap();
        assert_abs_diff_eq!(slopes[[0, 1]], -0.5, epsilon = 1e-9);
        assert_abs_diff_eq!(slopes[[2, 0]], -3.0, epsilon = 1e-9);
        assert_eq!(slopes[[1, 1]], 1.0);
    }

    #[test]
    // Purpose
    // -------
    // Too few or collinear points are reported.
    //
    // Given
    // -----
    // - Three points in 3-D; four collinear points in 3-D.
    //
    // Expect
    // ------
    // - TooFewPoints; a rank-deficient fit.
    fn fit_reports_degenerate_samples() {
        let few = array![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];
        assert!(matches!(
            TangentPlane::fit(&few),
            Err(SamplingError::TooFewPoints { needed: 4, found: 3 })
        ));
        let line = array![[0.0, 0.0, 0.0], [1.0, 1.0, 1.0], [2.0, 2.0, 2.0], [3.0, 3.0, 3.0]];
        let plane = TangentPlane::fit(&line).unwrap();
        assert_eq!(plane.rank(), 1);
        assert!(plane.is_rank_deficient());
    }

    #[test]
    // Purpose
    // -------
    // A plane with normal `−λ∘w` agrees with the closed-form matrix after
    // the weight rescaling.
    //
    // Given
    // -----
    // - λ = (−0.2, −0.8), w = (1, 0.25); points on 0.2·z1 + 0.2·z2 = c.
    //
    // Expect
    // ------
    // - max_abs_diff ≈ 0 and empirical [0][1] = −1.
    fn cross_check_agrees_on_weighted_plane() {
        // Arrange
        let weights = Weights::from_slice(&[1.0, 0.25]).unwrap();
        let closed = compute_tradeoffs(&array![-0.2, -0.8], &weights).unwrap();
        let points = array![[0.0, 1.0], [0.5, 0.5], [1.0, 0.0], [0.25, 0.75]];

        // Act
        let plane = TangentPlane::fit(&points).unwrap();
        let check = cross_check(&closed, &plane, &weights).unwrap();

        // Assert
        assert_abs_diff_eq!(check.max_abs_diff, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(check.empirical[[0, 1]], -1.0, epsilon = 1e-9);
    }
}
