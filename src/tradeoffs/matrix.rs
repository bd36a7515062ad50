//! tradeoffs::matrix — closed-form pairwise trade-off rates.
//!
//! At a Pareto-optimal point with multipliers `λ` (one per achievement
//! constraint), the marginal rate between objectives `i` and `j` is
//!
//! ```text
//!   tradeoff[i][j] = −λ_j / λ_i      (i ≠ j),      tradeoff[i][i] = 1
//! ```
//!
//! read as "improving objective `i` by one unit forces objective `j` to
//! worsen by `tradeoff[i][j]` units here".
use ndarray::{Array1, Array2};
use serde::Serialize;

use crate::{
    problem::{errors::ProblemError, weights::Weights},
    tradeoffs::errors::{TradeoffError, TradeoffResult},
    utils::ensure_len,
};

/// Dense `k × k` trade-off matrix with unit diagonal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TradeoffMatrix(Array2<f64>);

impl TradeoffMatrix {
    pub fn len(&self) -> usize {
        self.0.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        self.0.get((i, j)).copied()
    }

    pub fn as_array(&self) -> &Array2<f64> {
        &self.0
    }

    pub fn into_array(self) -> Array2<f64> {
        self.0
    }

    /// Row-major nested vectors, for presentation layers.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.0.outer_iter().map(|row| row.to_vec()).collect()
    }
}

/// Compute the trade-off matrix for multipliers `λ` and weights `w`.
///
/// The weights fix the expected dimension; the rates themselves depend on
/// `λ` only. The matrix is produced as a whole; see [`tradeoff_rows`] for
/// a result that tolerates zero multipliers.
///
/// # Errors
/// - `Problem(DimensionMismatch)` if `λ` and `w` differ in length.
/// - [`TradeoffError::NonFiniteMultiplier`] for NaN or infinite entries.
/// - [`TradeoffError::UndefinedTradeoff`] naming the first zero multiplier.
pub fn compute_tradeoffs(
    multipliers: &Array1<f64>, weights: &Weights,
) -> TradeoffResult<TradeoffMatrix> {
    tradeoff_rows(multipliers, weights)?.into_matrix()
}

/// Per-objective trade-off rows; a row is `None` when its multiplier is
/// zero and the rates out of that objective are undefined.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TradeoffRows {
    rows: Vec<Option<Array1<f64>>>,
}

impl TradeoffRows {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, i: usize) -> Option<&Array1<f64>> {
        self.rows.get(i).and_then(Option::as_ref)
    }

    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        self.row(i).and_then(|row| row.get(j).copied())
    }

    /// Indices of the undefined rows, ascending.
    pub fn undefined(&self) -> Vec<usize> {
        self.rows.iter().enumerate().filter(|(_, r)| r.is_none()).map(|(i, _)| i).collect()
    }

    pub fn is_complete(&self) -> bool {
        self.rows.iter().all(Option::is_some)
    }

    /// Assemble the full matrix.
    ///
    /// # Errors
    /// [`TradeoffError::UndefinedTradeoff`] naming the first undefined row.
    pub fn into_matrix(self) -> TradeoffResult<TradeoffMatrix> {
        let k = self.rows.len();
        let mut matrix = Array2::zeros((k, k));
        for (index, row) in self.rows.into_iter().enumerate() {
            let row = row.ok_or(TradeoffError::UndefinedTradeoff { index })?;
            matrix.row_mut(index).assign(&row);
        }
        Ok(TradeoffMatrix(matrix))
    }
}

fn check_multipliers(multipliers: &Array1<f64>, weights: &Weights) -> TradeoffResult<()> {
    ensure_len("multipliers", weights.len(), multipliers.len())?;
    match multipliers.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        Some((index, &value)) => Err(TradeoffError::NonFiniteMultiplier { index, value }),
        None => Ok(()),
    }
}

fn row_unchecked(multipliers: &Array1<f64>, i: usize) -> Option<Array1<f64>> {
    let lambda_i = multipliers[i];
    if lambda_i == 0.0 {
        return None;
    }
    Some(Array1::from_shape_fn(multipliers.len(), |j| {
        if i == j { 1.0 } else { -multipliers[j] / lambda_i }
    }))
}

/// Row `i` of the trade-off matrix: the rates at which every objective
/// moves per unit improvement of objective `i`.
///
/// A zero `λ_j` with `j ≠ i` gives an entry of zero: objective `j` is not
/// affected by a move along objective `i`.
///
/// # Errors
/// - `Problem(DimensionMismatch)` and [`TradeoffError::NonFiniteMultiplier`]
///   as in [`compute_tradeoffs`].
/// - `Problem(ObjectiveIndexOutOfRange)` when `i ≥ k`.
/// - [`TradeoffError::UndefinedTradeoff`] when `λ_i` is zero.
pub fn tradeoff_row(
    multipliers: &Array1<f64>, weights: &Weights, index: usize,
) -> TradeoffResult<Array1<f64>> {
    check_multipliers(multipliers, weights)?;
    if index >= multipliers.len() {
        return Err(ProblemError::ObjectiveIndexOutOfRange {
            index,
            num_objectives: multipliers.len(),
        }
        .into());
    }
    row_unchecked(multipliers, index).ok_or(TradeoffError::UndefinedTradeoff { index })
}

/// Every row of the trade-off matrix, leaving the rows of zero multipliers
/// undefined instead of failing.
///
/// # Errors
/// `Problem(DimensionMismatch)` and [`TradeoffError::NonFiniteMultiplier`].
pub fn tradeoff_rows(multipliers: &Array1<f64>, weights: &Weights) -> TradeoffResult<TradeoffRows> {
    check_multipliers(multipliers, weights)?;
    let rows = (0..multipliers.len()).map(|i| row_unchecked(multipliers, i)).collect();
    Ok(TradeoffRows { rows })
}
