//! Pairwise distances between observations
//!
//! Observations are the rows of a 2-D array. [`pdist_euclidean`] returns the
//! condensed upper triangle, [`pairwise_euclidean`] the full square matrix
//! with a zero diagonal.

use ndarray::{Array2, ArrayView1, ArrayView2};

fn euclidean(a: ArrayView1<f64>, b: ArrayView1<f64>) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}

/// Condensed Euclidean distances between the rows of `observations`.
///
/// The entry for rows `i < j` is stored at
/// `n * i - i * (i + 1) / 2 + (j - i - 1)`, i.e. the upper triangle read row
/// by row.
pub fn pdist_euclidean(observations: ArrayView2<f64>) -> Vec<f64> {
    let n = observations.nrows();
    let mut condensed = Vec::with_capacity(n * n.saturating_sub(1) / 2);
    for i in 0..n {
        for j in (i + 1)..n {
            condensed.push(euclidean(observations.row(i), observations.row(j)));
        }
    }
    condensed
}

/// Square matrix of Euclidean distances between the rows of `observations`.
///
/// The result is symmetric by construction and its diagonal is exactly zero,
/// even for rows containing `NaN`.
pub fn pairwise_euclidean(observations: ArrayView2<f64>) -> Array2<f64> {
    let n = observations.nrows();
    let condensed = pdist_euclidean(observations);
    let mut square = Array2::zeros((n, n));
    let mut k = 0;
    for i in 0..n {
        for j in (i + 1)..n {
            square[[i, j]] = condensed[k];
            square[[j, i]] = condensed[k];
            k += 1;
        }
    }
    square
}
