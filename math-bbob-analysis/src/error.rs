//! Error types for the BBOB analysis pipeline.
//!
//! Errors fall in three families: problems with the external inputs (record
//! archives, component tables, metric CSVs, configuration), violations of the
//! processing contract (a record processed at the wrong dimension, matrices
//! whose labels do not line up) and numeric routines called on degenerate
//! input.

use math_bbob_stats::StatsError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while extracting metrics or analysing similarity.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// A record was handed to the extractor for another problem dimension.
    #[error(
        "dimension mismatch for {algorithm} on f{function_id}: expected {expected}D, record is {got}D"
    )]
    DimensionMismatch {
        /// Algorithm of the offending record
        algorithm: String,
        /// Function id of the offending record
        function_id: usize,
        /// Dimension requested by the caller
        expected: usize,
        /// Dimension stored in the record
        got: usize,
    },

    /// The archive has no record for a requested (algorithm, dimension, function).
    #[error("no record for {algorithm} on f{function_id} in {dimension}D")]
    MissingRecord {
        /// Algorithm name as stored in the archive
        algorithm: String,
        /// Problem dimension
        dimension: usize,
        /// Function id
        function_id: usize,
    },

    /// The archive contains the same (algorithm, dimension, function) twice.
    #[error("duplicate record for {algorithm} on f{function_id} in {dimension}D")]
    DuplicateRecord {
        /// Algorithm name as stored in the archive
        algorithm: String,
        /// Problem dimension
        dimension: usize,
        /// Function id
        function_id: usize,
    },

    /// Two archive algorithms reduce to the same short name.
    #[error("algorithms '{first}' and '{second}' share the short name '{short}'")]
    DuplicateAlgorithm {
        /// Shared short name
        short: String,
        /// First archive name
        first: String,
        /// Second archive name
        second: String,
    },

    /// A metric table holds more than one row for an (algorithm, function).
    #[error("duplicate metric row for {algorithm} on {function}")]
    DuplicateRow {
        /// Algorithm short name
        algorithm: String,
        /// Function label, e.g. `f3d10`
        function: String,
    },

    /// A record is internally inconsistent.
    #[error("malformed record for {algorithm} on f{function_id}: {reason}")]
    MalformedRecord {
        /// Algorithm name as stored in the archive
        algorithm: String,
        /// Function id
        function_id: usize,
        /// What is wrong with it
        reason: String,
    },

    /// A tabular input file could not be parsed.
    #[error("{}:{line}: {message}", path.display())]
    Parse {
        /// File being parsed
        path: PathBuf,
        /// 1-based line number
        line: usize,
        /// Description of the problem
        message: String,
    },

    /// An algorithm name is not present where it is required.
    #[error("unknown algorithm '{0}'")]
    UnknownAlgorithm(String),

    /// A design component name is not present in the component table.
    #[error("unknown component '{0}'")]
    UnknownComponent(String),

    /// A metric name does not match any metric table column.
    #[error("unknown metric '{0}'")]
    UnknownMetric(String),

    /// Two similarity matrices do not cover the same algorithms in the same order.
    #[error("label mismatch: {left:?} vs {right:?}")]
    LabelMismatch {
        /// Labels of the first matrix
        left: Vec<String>,
        /// Labels of the second matrix
        right: Vec<String>,
    },

    /// A metric table does not have one value per (algorithm, function).
    #[error("incomplete metric table: {0}")]
    IncompleteTable(String),

    /// The configuration is inconsistent.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A numeric routine received degenerate input.
    #[error(transparent)]
    Stats(#[from] StatsError),

    /// Reading or writing a file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized `Result` type for analysis operations.
pub type Result<T> = std::result::Result<T, AnalysisError>;

impl AnalysisError {
    /// Returns `true` if the error comes from malformed or incomplete inputs.
    ///
    /// This includes record archives, component tables, metric CSVs and JSON
    /// files, but not I/O failures.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            AnalysisError::MissingRecord { .. }
                | AnalysisError::DuplicateRecord { .. }
                | AnalysisError::DuplicateAlgorithm { .. }
                | AnalysisError::DuplicateRow { .. }
                | AnalysisError::MalformedRecord { .. }
                | AnalysisError::Parse { .. }
                | AnalysisError::UnknownAlgorithm(_)
                | AnalysisError::UnknownComponent(_)
                | AnalysisError::UnknownMetric(_)
                | AnalysisError::IncompleteTable(_)
                | AnalysisError::InvalidConfig(_)
                | AnalysisError::Json(_)
        )
    }

    /// Returns `true` if a processing contract was violated.
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            AnalysisError::DimensionMismatch { .. } | AnalysisError::LabelMismatch { .. }
        )
    }

    /// Returns `true` if a numeric routine rejected its input.
    pub fn is_numeric_error(&self) -> bool {
        matches!(self, AnalysisError::Stats(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AnalysisError::DimensionMismatch {
            algorithm: "HE-ES".to_string(),
            function_id: 3,
            expected: 10,
            got: 20,
        };
        assert_eq!(
            err.to_string(),
            "dimension mismatch for HE-ES on f3: expected 10D, record is 20D"
        );

        let err = AnalysisError::Parse {
            path: PathBuf::from("data/alg_components.csv"),
            line: 4,
            message: "expected 5 cells, got 3".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "data/alg_components.csv:4: expected 5 cells, got 3"
        );
    }

    #[test]
    fn test_categories() {
        let contract = AnalysisError::LabelMismatch {
            left: vec!["a".to_string()],
            right: vec!["b".to_string()],
        };
        let input = AnalysisError::UnknownMetric("foo".to_string());
        let numeric = AnalysisError::from(StatsError::LengthMismatch { x_len: 1, y_len: 2 });

        assert!(contract.is_contract_violation());
        assert!(!contract.is_input_error());
        assert!(input.is_input_error());
        assert!(!input.is_numeric_error());
        assert!(numeric.is_numeric_error());
        assert!(!numeric.is_contract_violation());
    }
}
