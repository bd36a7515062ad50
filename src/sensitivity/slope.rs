//! sensitivity::slope — ordinary least squares slopes between objectives.
//!
//! Purpose
//! -------
//! Estimate `∂z_j/∂z_i` empirically from sampled and projected points by
//! regressing objective `j` on objective `i`, with the usual diagnostics
//! (correlation, two-sided p-value, slope standard error).
//!
//! Conventions
//! -----------
//! - `slopes[[i, j]]` is the slope of `z_j` regressed on `z_i`; the
//!   diagonal is 1 with `r = 1`, `p = 0` and zero standard error.
//! - The p-value tests `slope = 0` against Student's t with `n − 2`
//!   degrees of freedom.
//! - With more than two objectives a pairwise regression mixes the
//!   movement of the remaining objectives into the slope; compare with the
//!   tangent-plane slopes for the partial derivative.
use ndarray::{Array2, ArrayView1};
use statrs::distribution::{ContinuousCDF, StudentsT};

use crate::sensitivity::errors::{SamplingError, SamplingResult};

/// Result of a simple linear regression `y = slope·x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
    /// Pearson correlation, clamped to `[−1, 1]`.
    pub r: f64,
    pub p_value: f64,
    /// Standard error of `slope`.
    pub std_err: f64,
}

/// linregress — least squares fit of `y` on `x`.
///
/// # Errors
/// - [`SamplingError::TooFewPoints`] when fewer than 3 pairs are given or
///   the lengths differ.
/// - [`SamplingError::ZeroVariance`] (index 0) when `x` is constant.
pub fn linregress(x: ArrayView1<'_, f64>, y: ArrayView1<'_, f64>) -> SamplingResult<LinearFit> {
    let n = x.len();
    if n < 3 || y.len() != n {
        return Err(SamplingError::TooFewPoints { needed: 3, found: n.min(y.len()) });
    }
    let nf = n as f64;
    let x_mean = x.sum() / nf;
    let y_mean = y.sum() / nf;
    let (mut sxx, mut syy, mut sxy) = (0.0, 0.0, 0.0);
    for (&xi, &yi) in x.iter().zip(y.iter()) {
        let dx = xi - x_mean;
        let dy = yi - y_mean;
        sxx += dx * dx;
        syy += dy * dy;
        sxy += dx * dy;
    }
    if sxx == 0.0 {
        return Err(SamplingError::ZeroVariance { index: 0 });
    }

    let slope = sxy / sxx;
    let intercept = y_mean - slope * x_mean;
    let r = if syy == 0.0 { 0.0 } else { (sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0) };
    let df = nf - 2.0;

    if r.abs() == 1.0 {
        return Ok(LinearFit { slope, intercept, r, p_value: 0.0, std_err: 0.0 });
    }
    let t = r * (df / (1.0 - r * r)).sqrt();
    let dist = StudentsT::new(0.0, 1.0, df)
        .map_err(|e| SamplingError::Distribution { text: e.to_string() })?;
    let p_value = 2.0 * (1.0 - dist.cdf(t.abs()));
    let std_err = ((1.0 - r * r) * syy / sxx / df).sqrt();
    Ok(LinearFit { slope, intercept, r, p_value, std_err })
}

/// Pairwise regression results over all objective pairs.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct PairwiseSlopes {
    pub slopes: Array2<f64>,
    pub r_values: Array2<f64>,
    pub p_values: Array2<f64>,
    pub std_errors: Array2<f64>,
}

/// pairwise_slopes — regress every objective column on every other.
///
/// # Errors
/// - [`SamplingError::TooFewPoints`] for fewer than 3 rows.
/// - [`SamplingError::ZeroVariance`] naming the constant column.
pub fn pairwise_slopes(points: &Array2<f64>) -> SamplingResult<PairwiseSlopes> {
    let k = points.ncols();
    let mut out = PairwiseSlopes {
        slopes: Array2::eye(k),
        r_values: Array2::eye(k),
        p_values: Array2::zeros((k, k)),
        std_errors: Array2::zeros((k, k)),
    };
    for i in 0..k {
        for j in (0..k).filter(|&j| j != i) {
            let fit = linregress(points.column(i), points.column(j)).map_err(|err| match err {
                SamplingError::ZeroVariance { .. } => SamplingError::ZeroVariance { index: i },
                other => other,
            })?;
            out.slopes[[i, j]] = fit.slope;
            out.r_values[[i, j]] = fit.r;
            out.p_values[[i, j]] = fit.p_value;
            out.std_errors[[i, j]] = fit.std_err;
        }
    }
    Ok(out)
}
