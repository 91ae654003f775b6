//! Numerical integration of sampled curves
//!
//! [`trapezoid`] is the plain composite trapezoid rule over arbitrary sample
//! positions. [`auc`] wraps it with the checks used when the curve is an
//! empirical performance profile: at least two points and a monotonic
//! abscissa, with decreasing abscissae giving a positive area.

use crate::error::{Result, StatsError};

/// `n` evenly spaced samples from `start` to `stop`, both included.
///
/// `n == 1` yields `[start]` and `n == 0` an empty vector. The last sample is
/// exactly `stop`.
pub fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n - 1) as f64;
            let mut values: Vec<f64> = (0..n).map(|i| start + step * i as f64).collect();
            values[n - 1] = stop;
            values
        }
    }
}

/// Integrate `y` over `x` with the composite trapezoid rule.
///
/// Fewer than two samples integrate to `0.0`. Repeated abscissae contribute a
/// zero-width panel and non-finite samples propagate into the result.
pub fn trapezoid(x: &[f64], y: &[f64]) -> Result<f64> {
    if x.len() != y.len() {
        return Err(StatsError::LengthMismatch {
            x_len: x.len(),
            y_len: y.len(),
        });
    }
    let area = x
        .windows(2)
        .zip(y.windows(2))
        .map(|(xs, ys)| (xs[1] - xs[0]) * (ys[0] + ys[1]) / 2.0)
        .sum();
    Ok(area)
}

/// Area under the curve `y(x)` for a monotonic `x`.
///
/// If every step of `x` is non-increasing the sign of the trapezoid integral
/// is flipped so the area stays positive. A curve whose abscissa moves in
/// both directions is rejected. Steps involving `NaN` count as neither
/// increasing nor decreasing.
pub fn auc(x: &[f64], y: &[f64]) -> Result<f64> {
    if x.len() != y.len() {
        return Err(StatsError::LengthMismatch {
            x_len: x.len(),
            y_len: y.len(),
        });
    }
    if x.len() < 2 {
        return Err(StatsError::InsufficientPoints {
            operation: "area under curve",
            required: 2,
            got: x.len(),
        });
    }

    let steps: Vec<f64> = x.windows(2).map(|w| w[1] - w[0]).collect();
    let mut direction = 1.0;
    if steps.iter().any(|&dx| dx < 0.0) {
        match steps.iter().position(|&dx| dx > 0.0 || dx.is_nan()) {
            None => direction = -1.0,
            Some(index) => return Err(StatsError::NonMonotonic { index }),
        }
    }

    Ok(direction * trapezoid(x, y)?)
}
