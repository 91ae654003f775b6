//! Pearson product-moment correlation with a two-sided significance test
//!
//! Under the null hypothesis of no correlation, `r` computed from `n` normal
//! samples follows a symmetric beta distribution on [-1, 1]. The two-sided
//! p-value is therefore `I_{1 - r²}((n - 2) / 2, 1 / 2)`.

use crate::error::{Result, StatsError};
use crate::special::regularized_incomplete_beta;

/// Outcome of a Pearson correlation test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PearsonTest {
    /// Correlation coefficient in [-1, 1] (`NaN` for constant input)
    pub coefficient: f64,
    /// Two-sided p-value
    pub p_value: f64,
}

/// Pearson correlation between two paired samples.
///
/// Both sequences must have the same length and at least two elements.
/// A constant sequence yields `NaN` for both the coefficient and the p-value.
pub fn pearson_test(x: &[f64], y: &[f64]) -> Result<PearsonTest> {
    if x.len() != y.len() {
        return Err(StatsError::LengthMismatch {
            x_len: x.len(),
            y_len: y.len(),
        });
    }
    let n = x.len();
    if n < 2 {
        return Err(StatsError::InsufficientPoints {
            operation: "pearson correlation",
            required: 2,
            got: n,
        });
    }

    let mean_x = x.iter().sum::<f64>() / n as f64;
    let mean_y = y.iter().sum::<f64>() / n as f64;

    let mut sxy = 0.0;
    let mut sxx = 0.0;
    let mut syy = 0.0;
    for (&xi, &yi) in x.iter().zip(y.iter()) {
        let dx = xi - mean_x;
        let dy = yi - mean_y;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }

    let r = sxy / (sxx.sqrt() * syy.sqrt());
    let coefficient = if r.is_nan() { r } else { r.clamp(-1.0, 1.0) };

    let p_value = if n == 2 {
        // two points always lie on a line
        1.0
    } else {
        let dof = (n - 2) as f64;
        regularized_incomplete_beta(dof / 2.0, 0.5, 1.0 - coefficient * coefficient)
    };

    Ok(PearsonTest {
        coefficient,
        p_value,
    })
}
