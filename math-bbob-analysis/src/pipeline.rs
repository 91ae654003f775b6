//! Two-stage orchestration: records → metric tables → similarity and correlation
//!
//! Stage one ([`Pipeline::extract_metrics`]) reduces a [`RecordArchive`] to one
//! [`MetricTable`] per dimension. Stage two ([`Pipeline::analyze`]) takes those
//! tables and the component table and produces an [`AnalysisReport`]: the
//! component similarity, one performance similarity per (dimension, metric,
//! function group), and their correlations.

use math_bbob_stats::{NativeBackend, NumericBackend};
use std::path::{Path, PathBuf};

use crate::component::{ComponentMatrix, component_similarity_matrix};
use crate::config::PipelineConfig;
use crate::correlation::{CorrelationTable, correlate_groups};
use crate::error::{AnalysisError, Result};
use crate::extract::{MetricExtractor, short_algorithm_name};
use crate::heatmap::{
    COMPONENT_FIGURE, performance_figure_name, performance_figure_title, write_heatmap,
};
use crate::metric_table::MetricTable;
use crate::metrics::MetricKind;
use crate::profile::PerformanceProfile;
use crate::record::RecordArchive;
use crate::similarity::{SimilarityMatrix, performance_similarity};

/// Runs both stages with a fixed configuration.
#[derive(Debug, Clone)]
pub struct Pipeline<B: NumericBackend = NativeBackend> {
    config: PipelineConfig,
    backend: B,
}

impl Pipeline<NativeBackend> {
    /// Pipeline using the pure-Rust numeric backend.
    pub fn new(config: PipelineConfig) -> Result<Self> {
        Self::with_backend(config, NativeBackend)
    }
}

impl<B: NumericBackend> Pipeline<B> {
    /// Pipeline using a custom numeric backend.
    pub fn with_backend(config: PipelineConfig, backend: B) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, backend })
    }

    /// Configuration in use.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Stage one: one metric table per configured dimension.
    ///
    /// Rows follow the archive's algorithm order, then function id. Every
    /// included algorithm must have a record for every function id
    /// `1..=num_functions` at every dimension, and no two included archive
    /// names may share a short name.
    pub fn extract_metrics(&self, archive: &RecordArchive) -> Result<Vec<MetricTable>> {
        let extraction = &self.config.extraction;
        let extractor = MetricExtractor::with_backend(&self.backend);

        let included: Vec<&String> = archive
            .algorithms()
            .iter()
            .filter(|name| {
                extraction.algorithms.is_empty()
                    || extraction
                        .algorithms
                        .iter()
                        .any(|a| a == short_algorithm_name(name))
            })
            .collect();
        for (i, name) in included.iter().enumerate() {
            let short = short_algorithm_name(name);
            if let Some(other) = included[..i]
                .iter()
                .find(|prev| short_algorithm_name(prev) == short)
            {
                return Err(AnalysisError::DuplicateAlgorithm {
                    short: short.to_string(),
                    first: other.to_string(),
                    second: name.to_string(),
                });
            }
        }
        log::info!(
            "Extracting metrics for {} of {} algorithms",
            included.len(),
            archive.algorithms().len()
        );

        let mut tables = Vec::with_capacity(extraction.dimensions.len());
        for &dimension in &extraction.dimensions {
            let mut table = MetricTable::new(dimension, extraction.precisions);
            for algorithm in &included {
                for function_id in 1..=extraction.num_functions {
                    let record = archive.require(algorithm, dimension, function_id)?;
                    table
                        .rows
                        .push(extractor.extract(record, dimension, &extraction.precisions)?);
                }
            }
            log::info!("{}D: {} metric rows", dimension, table.rows.len());
            tables.push(table);
        }
        Ok(tables)
    }

    /// Stage two: similarity matrices and correlations for every configured
    /// (dimension, metric).
    ///
    /// `tables` must hold a table for every analysed dimension. The component
    /// table must list every algorithm of the configured order except the
    /// baseline.
    pub fn analyze(
        &self,
        components: &ComponentMatrix,
        tables: &[MetricTable],
    ) -> Result<AnalysisReport> {
        let analysis = &self.config.analysis;

        let reduced = components.without_components(&analysis.excluded_components)?;
        let component_similarity = component_similarity_matrix(&reduced)?;
        if !analysis.algorithm_order.contains(&analysis.baseline) {
            log::warn!(
                "Baseline '{}' is not part of the algorithm order",
                analysis.baseline
            );
        }
        let compared = component_similarity.reindexed(&analysis.compared_algorithms())?;

        let mut analyses = Vec::new();
        for &dimension in &analysis.dimensions {
            let table = tables
                .iter()
                .find(|t| t.dimension == dimension)
                .ok_or_else(|| {
                    AnalysisError::IncompleteTable(format!("no metric table for {dimension}D"))
                })?;

            for name in &analysis.metrics {
                let kind = MetricKind::resolve(name, &table.precisions)?;
                let metric = kind.display_name(&table.precisions);
                let profile = PerformanceProfile::from_table(table, kind)?
                    .reordered(&analysis.algorithm_order)?;

                let groups = analysis
                    .function_groups
                    .iter()
                    .map(|group| {
                        let data = profile.scaled_slice(group);
                        let similarity = performance_similarity(
                            &self.backend,
                            data.view(),
                            &profile.algorithms,
                        )?;
                        Ok((group.name.clone(), similarity))
                    })
                    .collect::<Result<Vec<_>>>()?;

                let entries =
                    correlate_groups(&self.backend, &compared, &groups, &analysis.baseline)?;
                log::info!("{dimension}D {metric}: correlated {} groups", entries.len());

                analyses.push(MetricAnalysis {
                    dimension,
                    kind,
                    groups,
                    correlation: CorrelationTable {
                        dimension,
                        metric,
                        entries,
                    },
                });
            }
        }

        Ok(AnalysisReport {
            component_similarity,
            analyses,
        })
    }
}

/// Result of one (dimension, metric) analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricAnalysis {
    /// Problem dimension
    pub dimension: usize,
    /// Analysed metric
    pub kind: MetricKind,
    /// Performance similarity per function group, in group order
    pub groups: Vec<(String, SimilarityMatrix)>,
    /// Correlation with the component similarity per function group
    pub correlation: CorrelationTable,
}

impl MetricAnalysis {
    /// Display name of the metric.
    pub fn metric(&self) -> &str {
        &self.correlation.metric
    }
}

/// Everything stage two produces.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisReport {
    /// Component similarity of every algorithm in the component table
    pub component_similarity: SimilarityMatrix,
    /// One entry per (dimension, metric)
    pub analyses: Vec<MetricAnalysis>,
}

impl AnalysisReport {
    /// Render the heatmaps into `figures_dir` and the correlation tables into
    /// `correlation_dir`. Returns the written paths.
    pub fn write<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        figures_dir: P,
        correlation_dir: Q,
    ) -> Result<Vec<PathBuf>> {
        let figures_dir = figures_dir.as_ref();
        let mut written = vec![write_heatmap(
            &self.component_similarity,
            "Component similarity",
            figures_dir.join(COMPONENT_FIGURE),
        )?];

        for analysis in &self.analyses {
            for (group, matrix) in &analysis.groups {
                let title = performance_figure_title(analysis.dimension, analysis.metric(), group);
                let name = performance_figure_name(analysis.dimension, analysis.metric(), group);
                written.push(write_heatmap(matrix, &title, figures_dir.join(name))?);
            }
            written.push(analysis.correlation.write_to_dir(correlation_dir.as_ref())?);
        }
        Ok(written)
    }
}
