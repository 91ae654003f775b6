//! Numeric kernels for benchmark post-processing
//!
//! This crate provides the small set of numeric routines needed to summarize
//! optimizer benchmark data and compare algorithms with each other:
//!
//! - **Integration**: trapezoid rule, plus an area-under-curve variant that
//!   requires a monotonic abscissa
//! - **Distances**: pairwise Euclidean distance between the rows of a matrix
//! - **Correlation**: Pearson coefficient with its two-sided p-value
//! - **Special functions**: log-gamma and the regularized incomplete beta
//!
//! The routines are reachable as free functions and through the
//! [`NumericBackend`] trait, so that callers can swap in another numeric
//! implementation without changing the analysis code.
//!
//! # Example
//!
//! ```
//! use math_bbob_stats::{NativeBackend, NumericBackend};
//!
//! let backend = NativeBackend;
//! let test = backend
//!     .pearson_test(&[1.0, 2.0, 3.0, 4.0, 5.0], &[2.0, 1.0, 4.0, 3.0, 5.0])
//!     .unwrap();
//! assert!((test.coefficient - 0.8).abs() < 1e-12);
//! ```

#![warn(missing_docs)]

pub mod describe;
pub mod distance;
pub mod error;
pub mod integrate;
pub mod pearson;
pub mod special;
pub mod traits;

pub use describe::{mean, mean_with_floor};
pub use distance::{pairwise_euclidean, pdist_euclidean};
pub use error::{Result, StatsError};
pub use integrate::{auc, linspace, trapezoid};
pub use pearson::{PearsonTest, pearson_test};
pub use traits::{NativeBackend, NumericBackend};

/// Library version
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
