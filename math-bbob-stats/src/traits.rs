//! Numeric backend abstraction
//!
//! The analysis code only needs three numeric operations. They are grouped in
//! [`NumericBackend`] so an alternative implementation (another crate, a
//! reference implementation for cross-checking) can be plugged in without
//! touching the callers. [`NativeBackend`] forwards to the routines of this
//! crate.

use ndarray::{Array2, ArrayView2};

use crate::error::Result;
use crate::pearson::PearsonTest;

/// Numeric operations used by the benchmark analysis.
pub trait NumericBackend {
    /// Area under `y(x)` by the trapezoid rule, for a monotonic `x`.
    fn integrate(&self, x: &[f64], y: &[f64]) -> Result<f64>;

    /// Square matrix of Euclidean distances between the rows of `observations`.
    fn pairwise_distance(&self, observations: ArrayView2<f64>) -> Array2<f64>;

    /// Pearson coefficient and two-sided p-value.
    fn pearson_test(&self, x: &[f64], y: &[f64]) -> Result<PearsonTest>;
}

/// Pure-Rust implementation of [`NumericBackend`].
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeBackend;

impl NumericBackend for NativeBackend {
    fn integrate(&self, x: &[f64], y: &[f64]) -> Result<f64> {
        crate::integrate::auc(x, y)
    }

    fn pairwise_distance(&self, observations: ArrayView2<f64>) -> Array2<f64> {
        crate::distance::pairwise_euclidean(observations)
    }

    fn pearson_test(&self, x: &[f64], y: &[f64]) -> Result<PearsonTest> {
        crate::pearson::pearson_test(x, y)
    }
}

impl<B: NumericBackend + ?Sized> NumericBackend for &B {
    fn integrate(&self, x: &[f64], y: &[f64]) -> Result<f64> {
        (**self).integrate(x, y)
    }

    fn pairwise_distance(&self, observations: ArrayView2<f64>) -> Array2<f64> {
        (**self).pairwise_distance(observations)
    }

    fn pearson_test(&self, x: &[f64], y: &[f64]) -> Result<PearsonTest> {
        (**self).pearson_test(x, y)
    }
}
