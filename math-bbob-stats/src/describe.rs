//! Descriptive statistics over raw samples.

/// Arithmetic mean of `values`.
///
/// An empty slice yields `NaN`, and any `NaN` sample makes the mean `NaN`.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Arithmetic mean of `values` where every sample `<= floor` counts as zero.
///
/// Used to treat runs that reached the final target as error-free.
pub fn mean_with_floor(values: &[f64], floor: f64) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    let total: f64 = values
        .iter()
        .map(|&v| if v <= floor { 0.0 } else { v })
        .sum();
    total / values.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_mean() {
        assert_relative_eq!(mean(&[1.0, 2.0, 3.0, 4.0]), 2.5);
        assert!(mean(&[]).is_nan());
        assert!(mean(&[1.0, f64::NAN]).is_nan());
    }

    #[test]
    fn test_mean_with_floor() {
        let values = [1e-9, 1e-8, 2e-8, 3.0];
        assert_relative_eq!(mean_with_floor(&values, 1e-8), (2e-8 + 3.0) / 4.0);
        assert!(mean_with_floor(&[], 1e-8).is_nan());
    }

    #[test]
    fn test_floor_never_increases_mean() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let n = rng.random_range(1..40);
            let mut values: Vec<f64> = (0..n)
                .map(|_| 10f64.powf(rng.random_range(-12.0..3.0)))
                .collect();
            values[0] = 1e-10;
            assert!(mean_with_floor(&values, 1e-8) <= mean(&values));
        }
    }
}
