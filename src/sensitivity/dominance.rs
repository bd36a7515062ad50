//! sensitivity::dominance — Pareto dominance filters for sample sets.
//!
//! All comparisons use the internal convention (every objective
//! minimized).
use ndarray::{Array2, ArrayView1, Axis};

/// `a` dominates `b`: no worse in every objective, better in at least one.
pub fn dominates(a: ArrayView1<'_, f64>, b: ArrayView1<'_, f64>) -> bool {
    let no_worse = a.iter().zip(b.iter()).all(|(x, y)| x <= y);
    no_worse && a.iter().zip(b.iter()).any(|(x, y)| x < y)
}

/// Which sampled points to discard before fitting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DominanceFilter {
    /// Drop points dominated by another sample.
    DropDominated,
    /// Drop points that dominate, or are dominated by, another sample.
    DropComparable,
}

impl DominanceFilter {
    /// Rows of `points` that survive the filter, in their original order.
    pub fn apply(self, points: &Array2<f64>) -> Array2<f64> {
        let rows: Vec<ArrayView1<'_, f64>> = points.outer_iter().collect();
        let kept: Vec<usize> = (0..rows.len())
            .filter(|&i| {
                rows.iter().enumerate().filter(|&(j, _)| j != i).all(|(_, other)| match self {
                    DominanceFilter::DropDominated => !dominates(*other, rows[i]),
                    DominanceFilter::DropComparable => {
                        !dominates(*other, rows[i]) && !dominates(rows[i], *other)
                    }
                })
            })
            .collect();
        points.select(Axis(0), &kept)
    }
}
