//! Correlation between component similarity and performance similarity

use math_bbob_stats::{NumericBackend, PearsonTest};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{AnalysisError, Result};
use crate::metrics::slug;
use crate::similarity::SimilarityMatrix;

/// Pearson correlation of one function group.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CorrelationResult {
    /// Pearson coefficient
    pub coefficient: f64,
    /// Two-sided p-value
    pub p_value: f64,
}

impl From<PearsonTest> for CorrelationResult {
    fn from(test: PearsonTest) -> Self {
        Self {
            coefficient: test.coefficient,
            p_value: test.p_value,
        }
    }
}

/// Correlate a component similarity matrix with a performance similarity matrix.
///
/// `excluded` (typically the random-search baseline) is removed from
/// `performance` first; nothing happens if it is absent. The remaining labels
/// must equal the labels of `component`, in the same order.
pub fn correlate<B: NumericBackend>(
    backend: &B,
    component: &SimilarityMatrix,
    performance: &SimilarityMatrix,
    excluded: &str,
) -> Result<CorrelationResult> {
    let performance = performance.without(excluded);
    if performance.labels() != component.labels() {
        return Err(AnalysisError::LabelMismatch {
            left: component.labels().to_vec(),
            right: performance.labels().to_vec(),
        });
    }

    let x = performance.flatten();
    let y = component.flatten();
    Ok(backend.pearson_test(&x, &y)?.into())
}

/// [`correlate`] for every named performance matrix, in order.
pub fn correlate_groups<B: NumericBackend>(
    backend: &B,
    component: &SimilarityMatrix,
    groups: &[(String, SimilarityMatrix)],
    excluded: &str,
) -> Result<Vec<(String, CorrelationResult)>> {
    groups
        .iter()
        .map(|(name, performance)| {
            let result = correlate(backend, component, performance, excluded)?;
            log::debug!(
                "{name}: r={:.4} p={:.4e}",
                result.coefficient,
                result.p_value
            );
            Ok((name.clone(), result))
        })
        .collect()
}

/// Correlations of every function group for one (dimension, metric).
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationTable {
    /// Problem dimension
    pub dimension: usize,
    /// Display name of the metric
    pub metric: String,
    /// (group name, result), in group order
    pub entries: Vec<(String, CorrelationResult)>,
}

impl CorrelationTable {
    /// File name, e.g. `pearson_ERT_Area_10D.csv`.
    pub fn file_name(&self) -> String {
        format!("pearson_{}_{}D.csv", slug(&self.metric), self.dimension)
    }

    /// Result of the group called `name`.
    pub fn get(&self, name: &str) -> Option<&CorrelationResult> {
        self.entries
            .iter()
            .find(|(group, _)| group == name)
            .map(|(_, result)| result)
    }

    /// Write the table: a `statistic` header with one column per group,
    /// then a `corr` and a `pvalue` row. `NaN` is written as an empty cell.
    pub fn write_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let mut file = BufWriter::new(File::create(path)?);

        write!(file, "statistic")?;
        for (name, _) in &self.entries {
            write!(file, ",{name}")?;
        }
        writeln!(file)?;

        let rows: [(&str, fn(&CorrelationResult) -> f64); 2] = [
            ("corr", |r: &CorrelationResult| r.coefficient),
            ("pvalue", |r: &CorrelationResult| r.p_value),
        ];
        for (label, value) in rows {
            write!(file, "{label}")?;
            for (_, result) in &self.entries {
                let v = value(result);
                if v.is_nan() {
                    write!(file, ",")?;
                } else {
                    write!(file, ",{v:?}")?;
                }
            }
            writeln!(file)?;
        }

        file.flush()?;
        log::info!("Wrote correlations to {}", path.display());
        Ok(())
    }

    /// Write into `dir` under [`file_name`](Self::file_name).
    pub fn write_to_dir<P: AsRef<Path>>(&self, dir: P) -> Result<PathBuf> {
        fs::create_dir_all(dir.as_ref())?;
        let path = dir.as_ref().join(self.file_name());
        self.write_csv(&path)?;
        Ok(path)
    }
}
