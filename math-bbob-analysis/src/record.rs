//! Per-function performance records and the archive that groups them
//!
//! A [`PerformanceRecord`] holds what the post-processing of one algorithm on
//! one benchmark function at one dimension produced: the expected running
//! time for each target precision and the final distance to the optimum of
//! every independent run.
//!
//! Records are produced outside this crate. [`JsonRecordSource`] reads them
//! from a JSON export, an array of objects with the fields of
//! [`PerformanceRecord`]:
//!
//! ```json
//! [{"algorithm": "HE-ES_Glasmachers", "function_id": 1, "dimension": 10,
//!   "targets": [100.0, 1e-8], "ert": [12.0, 1530.0],
//!   "final_gaps": [3e-9, 8e-9]}]
//! ```

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{AnalysisError, Result};

/// One algorithm evaluated on one benchmark function at one dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceRecord {
    /// Algorithm name, possibly followed by `_Author`
    pub algorithm: String,
    /// Benchmark function id (1-based)
    pub function_id: usize,
    /// Problem dimension
    pub dimension: usize,
    /// Target precisions (distance to the optimum)
    pub targets: Vec<f64>,
    /// Expected running time, in function evaluations, for each target
    pub ert: Vec<f64>,
    /// Final precision gap of every independent run
    pub final_gaps: Vec<f64>,
}

impl PerformanceRecord {
    fn validate(&self) -> Result<()> {
        if self.targets.len() != self.ert.len() {
            return Err(AnalysisError::MalformedRecord {
                algorithm: self.algorithm.clone(),
                function_id: self.function_id,
                reason: format!(
                    "{} targets but {} ERT values",
                    self.targets.len(),
                    self.ert.len()
                ),
            });
        }
        if self.dimension == 0 {
            return Err(AnalysisError::MalformedRecord {
                algorithm: self.algorithm.clone(),
                function_id: self.function_id,
                reason: "dimension must be positive".to_string(),
            });
        }
        Ok(())
    }
}

/// Records grouped by algorithm, then dimension, then function id.
///
/// Algorithms keep the order in which they first appear in the input.
#[derive(Debug, Clone, Default)]
pub struct RecordArchive {
    algorithms: Vec<String>,
    records: HashMap<String, BTreeMap<(usize, usize), PerformanceRecord>>,
}

impl RecordArchive {
    /// Build an archive, rejecting malformed and duplicated records.
    pub fn new(records: Vec<PerformanceRecord>) -> Result<Self> {
        let mut archive = Self::default();
        for record in records {
            record.validate()?;
            let key = (record.dimension, record.function_id);
            if !archive.records.contains_key(&record.algorithm) {
                archive.algorithms.push(record.algorithm.clone());
            }
            let by_key = archive.records.entry(record.algorithm.clone()).or_default();
            if by_key.contains_key(&key) {
                return Err(AnalysisError::DuplicateRecord {
                    algorithm: record.algorithm,
                    dimension: key.0,
                    function_id: key.1,
                });
            }
            by_key.insert(key, record);
        }
        Ok(archive)
    }

    /// Load an archive from a JSON export.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let records: Vec<PerformanceRecord> = serde_json::from_str(&contents)?;
        Self::new(records)
    }

    /// Algorithm names in first-appearance order.
    pub fn algorithms(&self) -> &[String] {
        &self.algorithms
    }

    /// Dimensions available for `algorithm`, in increasing order.
    pub fn dimensions(&self, algorithm: &str) -> Vec<usize> {
        let mut dims: Vec<usize> = self
            .records
            .get(algorithm)
            .map(|by_key| by_key.keys().map(|&(dim, _)| dim).collect())
            .unwrap_or_default();
        dims.dedup();
        dims
    }

    /// Record of `algorithm` on `function_id` at `dimension`, if present.
    pub fn get(
        &self,
        algorithm: &str,
        dimension: usize,
        function_id: usize,
    ) -> Option<&PerformanceRecord> {
        self.records
            .get(algorithm)
            .and_then(|by_key| by_key.get(&(dimension, function_id)))
    }

    /// Like [`get`](Self::get), but a missing record is an error.
    pub fn require(
        &self,
        algorithm: &str,
        dimension: usize,
        function_id: usize,
    ) -> Result<&PerformanceRecord> {
        self.get(algorithm, dimension, function_id)
            .ok_or_else(|| AnalysisError::MissingRecord {
                algorithm: algorithm.to_string(),
                dimension,
                function_id,
            })
    }

    /// Total number of records.
    pub fn len(&self) -> usize {
        self.records.values().map(BTreeMap::len).sum()
    }

    /// Whether the archive holds no record.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Something that can supply a [`RecordArchive`].
pub trait RecordSource {
    /// Load every record this source provides.
    fn load(&self) -> Result<RecordArchive>;
}

/// Reads records from a JSON export on disk.
#[derive(Debug, Clone)]
pub struct JsonRecordSource {
    path: PathBuf,
}

impl JsonRecordSource {
    /// Source reading from `path`.
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }
}

impl RecordSource for JsonRecordSource {
    fn load(&self) -> Result<RecordArchive> {
        log::info!("Loading performance records from {}", self.path.display());
        let archive = RecordArchive::from_json_file(&self.path)?;
        log::info!(
            "Loaded {} records for {} algorithms",
            archive.len(),
            archive.algorithms().len()
        );
        Ok(archive)
    }
}

impl RecordSource for RecordArchive {
    fn load(&self) -> Result<RecordArchive> {
        Ok(self.clone())
    }
}
