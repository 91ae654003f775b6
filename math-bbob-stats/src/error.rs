//! Error types for the numeric kernels.

use thiserror::Error;

/// Errors raised when a numeric routine is called on inputs for which the
/// result is undefined.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StatsError {
    /// Two paired sequences do not have the same length.
    #[error("length mismatch: x has {x_len} elements, y has {y_len}")]
    LengthMismatch {
        /// Length of the first sequence
        x_len: usize,
        /// Length of the second sequence
        y_len: usize,
    },

    /// Not enough points for the requested statistic.
    #[error("{operation} needs at least {required} points, got {got}")]
    InsufficientPoints {
        /// Name of the operation that failed
        operation: &'static str,
        /// Minimum number of points
        required: usize,
        /// Number of points provided
        got: usize,
    },

    /// The abscissa of a curve is neither increasing nor decreasing.
    #[error("x is neither increasing nor decreasing (first offending step at index {index})")]
    NonMonotonic {
        /// Index of the first step going against the curve direction
        index: usize,
    },
}

/// A specialized `Result` type for numeric operations.
pub type Result<T> = std::result::Result<T, StatsError>;

impl StatsError {
    /// Returns `true` if the inputs were too short or of unequal length.
    pub fn is_shape_error(&self) -> bool {
        matches!(
            self,
            StatsError::LengthMismatch { .. } | StatsError::InsufficientPoints { .. }
        )
    }
}
