//! Performance profiles: one metric pivoted to a function × algorithm matrix

use ndarray::{Array2, ArrayView2, s};

use crate::error::{AnalysisError, Result};
use crate::extract::SOLVED_GAP;
use crate::metric_table::MetricTable;
use crate::metrics::{FunctionLabel, MetricKind};

/// Floor of the log10 error scale, used for solved runs.
pub const LOG_ERROR_FLOOR: f64 = -8.0;

/// Map a mean error to the log10 scale, with solved values pinned to -8.
pub fn log_error(value: f64) -> f64 {
    if value <= SOLVED_GAP {
        LOG_ERROR_FLOOR
    } else {
        value.log10()
    }
}

/// A named, half-open range of function rows.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FunctionGroup {
    /// Display name, e.g. `Functions 1-5`
    pub name: String,
    /// First row (0-based, inclusive)
    pub start: usize,
    /// Last row (0-based, exclusive)
    pub end: usize,
}

impl FunctionGroup {
    /// Group covering rows `start..end`.
    pub fn new(name: &str, start: usize, end: usize) -> Self {
        Self {
            name: name.to_string(),
            start,
            end,
        }
    }

    /// The whole suite plus the five BBOB function classes.
    pub fn bbob_groups() -> Vec<Self> {
        vec![
            Self::new("Functions 1-24", 0, 24),
            Self::new("Functions 1-5", 0, 5),
            Self::new("Functions 6-9", 5, 9),
            Self::new("Functions 10-14", 9, 14),
            Self::new("Functions 15-19", 14, 19),
            Self::new("Functions 20-24", 19, 24),
        ]
    }

    /// Row range clamped to `len` rows.
    pub fn clamped(&self, len: usize) -> std::ops::Range<usize> {
        let end = self.end.min(len);
        self.start.min(end)..end
    }
}

/// Values of one metric at one dimension, rows = functions, columns = algorithms.
#[derive(Debug, Clone, PartialEq)]
pub struct PerformanceProfile {
    /// Problem dimension
    pub dimension: usize,
    /// Metric the values come from
    pub metric: MetricKind,
    /// Row labels
    pub functions: Vec<FunctionLabel>,
    /// Column labels
    pub algorithms: Vec<String>,
    /// Metric values, `functions.len() × algorithms.len()`
    pub values: Array2<f64>,
}

impl PerformanceProfile {
    /// Pivot `metric` out of `table`.
    ///
    /// Mean errors are mapped to the log10 scale with [`log_error`]; other
    /// metrics are taken as is. Every (algorithm, function) pair must have
    /// exactly one row.
    pub fn from_table(table: &MetricTable, metric: MetricKind) -> Result<Self> {
        let functions = table.functions();
        let algorithms = table.algorithms();
        let mut values = Array2::from_elem((functions.len(), algorithms.len()), f64::NAN);

        for (j, algorithm) in algorithms.iter().enumerate() {
            for (i, &function) in functions.iter().enumerate() {
                let mut matching = table
                    .rows
                    .iter()
                    .filter(|row| row.algorithm == *algorithm && row.function == function);
                let row = matching.next().ok_or_else(|| {
                    AnalysisError::IncompleteTable(format!("{algorithm} has no row for {function}"))
                })?;
                if matching.next().is_some() {
                    return Err(AnalysisError::DuplicateRow {
                        algorithm: algorithm.clone(),
                        function: function.to_string(),
                    });
                }
                let value = metric.value(row);
                values[[i, j]] = match metric {
                    MetricKind::ErrorAvg => log_error(value),
                    _ => value,
                };
            }
        }

        Ok(Self {
            dimension: table.dimension,
            metric,
            functions,
            algorithms,
            values,
        })
    }

    /// Same profile with columns in `order`.
    pub fn reordered(&self, order: &[String]) -> Result<Self> {
        let mut values = Array2::zeros((self.functions.len(), order.len()));
        for (j, name) in order.iter().enumerate() {
            let source = self
                .algorithms
                .iter()
                .position(|a| a == name)
                .ok_or_else(|| AnalysisError::UnknownAlgorithm(name.clone()))?;
            values.column_mut(j).assign(&self.values.column(source));
        }
        Ok(Self {
            dimension: self.dimension,
            metric: self.metric,
            functions: self.functions.clone(),
            algorithms: order.to_vec(),
            values,
        })
    }

    /// Rows of `group`, clamped to the functions present.
    pub fn slice(&self, group: &FunctionGroup) -> ArrayView2<'_, f64> {
        let rows = group.clamped(self.functions.len());
        self.values.slice(s![rows, ..])
    }

    /// Rows of `group` multiplied by the problem dimension.
    pub fn scaled_slice(&self, group: &FunctionGroup) -> Array2<f64> {
        let dim = self.dimension as f64;
        self.slice(group).mapv(|v| v * dim)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::MetricRow;

    fn table() -> MetricTable {
        let mut table = MetricTable::new(10, [1e-8, 1e-5, 1e-3]);
        for (algorithm, base) in [("A", 1.0), ("B", 2.0)] {
            for fid in 1..=3 {
                table.rows.push(MetricRow {
                    algorithm: algorithm.to_string(),
                    function: FunctionLabel::new(fid, 10),
                    ert: [f64::NAN; 3],
                    log10_ert_area: base + fid as f64,
                    error_avg: if fid == 1 { 1e-9 } else { base * 100.0 },
                    error_bounded_avg: 0.0,
                });
            }
        }
        table
    }

    #[test]
    fn test_pivot() {
        let profile = PerformanceProfile::from_table(&table(), MetricKind::Log10ErtArea).unwrap();
        assert_eq!(profile.values.dim(), (3, 2));
        assert_eq!(profile.algorithms, vec!["A", "B"]);
        assert_eq!(profile.values[[0, 0]], 2.0);
        assert_eq!(profile.values[[2, 1]], 5.0);
    }

    #[test]
    fn test_error_log_scale() {
        let profile = PerformanceProfile::from_table(&table(), MetricKind::ErrorAvg).unwrap();
        assert_eq!(profile.values[[0, 0]], -8.0);
        assert!((profile.values[[1, 0]] - 2.0).abs() < 1e-12);
        assert!((profile.values[[1, 1]] - 200f64.log10()).abs() < 1e-12);
        assert!(log_error(f64::NAN).is_nan());
    }

    #[test]
    fn test_incomplete_table() {
        let mut t = table();
        t.rows.pop();
        let err = PerformanceProfile::from_table(&t, MetricKind::Log10ErtArea).unwrap_err();
        assert!(matches!(err, AnalysisError::IncompleteTable(_)));
    }

    #[test]
    fn test_duplicate_row_rejected() {
        let mut t = table();
        let copy = t.rows[1].clone();
        t.rows.push(copy);
        let err = PerformanceProfile::from_table(&t, MetricKind::Log10ErtArea).unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::DuplicateRow { ref algorithm, ref function }
                if algorithm == "A" && function == "f2d10"
        ));
    }

    #[test]
    fn test_reorder_and_slice() {
        let profile = PerformanceProfile::from_table(&table(), MetricKind::Log10ErtArea).unwrap();
        let order = vec!["B".to_string(), "A".to_string()];
        let reordered = profile.reordered(&order).unwrap();
        assert_eq!(reordered.values[[0, 0]], 3.0);
        assert_eq!(reordered.values[[0, 1]], 2.0);

        let group = FunctionGroup::new("first two", 0, 2);
        let scaled = reordered.scaled_slice(&group);
        assert_eq!(scaled.dim(), (2, 2));
        assert_eq!(scaled[[1, 1]], 30.0);

        let missing = vec!["C".to_string()];
        assert!(matches!(
            profile.reordered(&missing),
            Err(AnalysisError::UnknownAlgorithm(_))
        ));
    }

    #[test]
    fn test_group_clamping() {
        let groups = FunctionGroup::bbob_groups();
        assert_eq!(groups.len(), 6);
        assert_eq!(groups[0].clamped(24), 0..24);
        assert_eq!(groups[5].clamped(22), 19..22);
        assert_eq!(groups[5].clamped(10), 10..10);
    }
}
