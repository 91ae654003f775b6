//! Summary metrics of one algorithm on one benchmark function
//!
//! A [`MetricRow`] is the reduced form of a
//! [`PerformanceRecord`](crate::record::PerformanceRecord). Its columns have a
//! fixed order:
//!
//! | column | meaning |
//! |---|---|
//! | `algorithm` | algorithm short name |
//! | `function` | [`FunctionLabel`], e.g. `f7d10` |
//! | `ert_m8`, `ert_m5`, `ert_m3` | ERT / dimension at each precision |
//! | `log10ert_area` | area under the log-ERT profile |
//! | `error_avg` | mean final precision gap |
//! | `errorbounded_avg` | same, with gaps <= 1e-8 counted as 0 |
//!
//! The ERT column names are derived from the precisions, see
//! [`precision_label`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{AnalysisError, Result};

/// Number of target precisions reported per row.
pub const NUM_PRECISIONS: usize = 3;

/// Column name of the ERT area metric.
pub const ERT_AREA_COLUMN: &str = "log10ert_area";
/// Column name of the mean final gap.
pub const ERROR_AVG_COLUMN: &str = "error_avg";
/// Column name of the bounded mean final gap.
pub const ERROR_BOUNDED_AVG_COLUMN: &str = "errorbounded_avg";

/// Benchmark function at a given dimension, rendered as `f{id}d{dim}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FunctionLabel {
    /// Benchmark function id
    pub function_id: usize,
    /// Problem dimension
    pub dimension: usize,
}

impl FunctionLabel {
    /// Label for `function_id` at `dimension`.
    pub fn new(function_id: usize, dimension: usize) -> Self {
        Self {
            function_id,
            dimension,
        }
    }
}

impl fmt::Display for FunctionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "f{}d{}", self.function_id, self.dimension)
    }
}

impl FromStr for FunctionLabel {
    type Err = String;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let rest = s
            .strip_prefix('f')
            .ok_or_else(|| format!("function label '{s}' must start with 'f'"))?;
        let (fid, dim) = rest
            .split_once('d')
            .ok_or_else(|| format!("function label '{s}' has no 'd' separator"))?;
        let function_id = fid
            .parse()
            .map_err(|_| format!("invalid function id in '{s}'"))?;
        let dimension = dim
            .parse()
            .map_err(|_| format!("invalid dimension in '{s}'"))?;
        Ok(Self::new(function_id, dimension))
    }
}

/// Column suffix for a target precision: `1e-8` → `m8`, `0.25` → `2.5em1`.
pub fn precision_label(precision: f64) -> String {
    let sci = format!("{precision:e}");
    match sci.strip_prefix("1e-") {
        Some(exponent) => format!("m{exponent}"),
        None => sci.replace('-', "m"),
    }
}

/// Inverse of [`precision_label`].
pub fn parse_precision_label(label: &str) -> Option<f64> {
    let sci = match label.strip_prefix('m') {
        Some(exponent) => format!("1e-{exponent}"),
        None => label.replace('m', "-"),
    };
    sci.parse().ok()
}

/// Name of the ERT column for `precision`.
pub fn ert_column(precision: f64) -> String {
    format!("ert_{}", precision_label(precision))
}

/// Summary metrics of one algorithm on one function at one dimension.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricRow {
    /// Algorithm short name
    pub algorithm: String,
    /// Function and dimension
    pub function: FunctionLabel,
    /// ERT / dimension at each precision, `NaN` if never reached
    pub ert: [f64; NUM_PRECISIONS],
    /// Area under the log10(ERT) / dimension profile
    pub log10_ert_area: f64,
    /// Mean final precision gap
    pub error_avg: f64,
    /// Mean final precision gap with solved runs counted as 0
    pub error_bounded_avg: f64,
}

/// A metric column that can be analysed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricKind {
    /// ERT at the precision with this index
    Ert(usize),
    /// Area under the log-ERT profile
    Log10ErtArea,
    /// Mean final gap, analysed on a log10 scale
    ErrorAvg,
    /// Bounded mean final gap
    ErrorBoundedAvg,
}

impl MetricKind {
    /// Resolve a column name, using `precisions` for the ERT columns.
    pub fn resolve(name: &str, precisions: &[f64; NUM_PRECISIONS]) -> Result<Self> {
        match name {
            ERT_AREA_COLUMN => Ok(MetricKind::Log10ErtArea),
            ERROR_AVG_COLUMN => Ok(MetricKind::ErrorAvg),
            ERROR_BOUNDED_AVG_COLUMN => Ok(MetricKind::ErrorBoundedAvg),
            _ => precisions
                .iter()
                .position(|&p| ert_column(p) == name)
                .map(MetricKind::Ert)
                .ok_or_else(|| AnalysisError::UnknownMetric(name.to_string())),
        }
    }

    /// Column name of this metric.
    pub fn column_name(&self, precisions: &[f64; NUM_PRECISIONS]) -> String {
        match self {
            MetricKind::Ert(slot) => ert_column(precisions[*slot]),
            MetricKind::Log10ErtArea => ERT_AREA_COLUMN.to_string(),
            MetricKind::ErrorAvg => ERROR_AVG_COLUMN.to_string(),
            MetricKind::ErrorBoundedAvg => ERROR_BOUNDED_AVG_COLUMN.to_string(),
        }
    }

    /// Human readable name used in figure titles and file names.
    pub fn display_name(&self, precisions: &[f64; NUM_PRECISIONS]) -> String {
        match self {
            MetricKind::Ert(slot) => format!("ERT {:e}", precisions[*slot]),
            MetricKind::Log10ErtArea => "ERT Area".to_string(),
            MetricKind::ErrorAvg => "Error".to_string(),
            MetricKind::ErrorBoundedAvg => "Bounded Error".to_string(),
        }
    }

    /// Value of this metric in `row`.
    pub fn value(&self, row: &MetricRow) -> f64 {
        match self {
            MetricKind::Ert(slot) => row.ert[*slot],
            MetricKind::Log10ErtArea => row.log10_ert_area,
            MetricKind::ErrorAvg => row.error_avg,
            MetricKind::ErrorBoundedAvg => row.error_bounded_avg,
        }
    }
}

/// Turn a display name into something usable in a file name.
pub fn slug(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '.' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
