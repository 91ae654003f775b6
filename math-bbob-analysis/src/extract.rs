//! Reduction of a performance record to its summary metrics
//!
//! For a record of dimension `d`:
//!
//! - **ERT at precision p**: `ert[i] / d` where `targets[i] == p` exactly.
//!   A precision the algorithm never reached gives `NaN`.
//! - **ERT area**: with `x = log10(ert) / d` and `y` a ramp from 0 to 1 of
//!   the same length, the trapezoid area under `y(x)`.
//! - **Mean error**: mean of the final precision gaps.
//! - **Bounded mean error**: same, with gaps `<= 1e-8` counted as 0.

use math_bbob_stats::{NativeBackend, NumericBackend, linspace, mean, mean_with_floor};

use crate::error::{AnalysisError, Result};
use crate::metrics::{FunctionLabel, MetricRow, NUM_PRECISIONS};
use crate::record::PerformanceRecord;

/// Final gaps at or below this value count as solved.
pub const SOLVED_GAP: f64 = 1e-8;

/// Algorithm name without its `_Author` suffix.
pub fn short_algorithm_name(name: &str) -> &str {
    name.split('_').next().unwrap_or(name)
}

/// ERT / `dimension` at `precision`, or `NaN` if the target was never reached.
pub fn ert_at_precision(record: &PerformanceRecord, precision: f64, dimension: usize) -> f64 {
    record
        .targets
        .iter()
        .position(|&t| t == precision)
        .map(|idx| record.ert[idx] / dimension as f64)
        .unwrap_or(f64::NAN)
}

/// Computes [`MetricRow`]s from [`PerformanceRecord`]s.
#[derive(Debug, Clone, Default)]
pub struct MetricExtractor<B: NumericBackend = NativeBackend> {
    backend: B,
}

impl MetricExtractor<NativeBackend> {
    /// Extractor using the pure-Rust numeric backend.
    pub fn new() -> Self {
        Self {
            backend: NativeBackend,
        }
    }
}

impl<B: NumericBackend> MetricExtractor<B> {
    /// Extractor using a custom numeric backend.
    pub fn with_backend(backend: B) -> Self {
        Self { backend }
    }

    /// Area under the `log10(ert) / dimension` profile.
    pub fn ert_area(&self, ert: &[f64], dimension: usize) -> Result<f64> {
        let x: Vec<f64> = ert.iter().map(|v| v.log10() / dimension as f64).collect();
        let y = linspace(0.0, 1.0, x.len());
        Ok(self.backend.integrate(&x, &y)?)
    }

    /// Summary metrics of `record`, which must be of dimension `dimension`.
    pub fn extract(
        &self,
        record: &PerformanceRecord,
        dimension: usize,
        precisions: &[f64; NUM_PRECISIONS],
    ) -> Result<MetricRow> {
        if record.dimension != dimension {
            return Err(AnalysisError::DimensionMismatch {
                algorithm: record.algorithm.clone(),
                function_id: record.function_id,
                expected: dimension,
                got: record.dimension,
            });
        }

        let ert = precisions.map(|p| ert_at_precision(record, p, dimension));
        let log10_ert_area = self.ert_area(&record.ert, dimension)?;

        let row = MetricRow {
            algorithm: short_algorithm_name(&record.algorithm).to_string(),
            function: FunctionLabel::new(record.function_id, dimension),
            ert,
            log10_ert_area,
            error_avg: mean(&record.final_gaps),
            error_bounded_avg: mean_with_floor(&record.final_gaps, SOLVED_GAP),
        };
        log::debug!(
            "{} {}: ert={:?} area={:.4} error={:.3e}",
            row.algorithm,
            row.function,
            row.ert,
            row.log10_ert_area,
            row.error_avg
        );
        Ok(row)
    }
}
