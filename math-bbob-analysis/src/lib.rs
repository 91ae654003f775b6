//! BBOB/COCO benchmark post-processing
//!
//! This crate turns per-function benchmark results of black-box optimizers
//! into summary metrics, then relates how similarly algorithms *perform* to
//! how similarly they are *built*.
//!
//! # Stages
//!
//! 1. **Metric extraction**: every [`PerformanceRecord`] is reduced to a
//!    [`MetricRow`] (ERT at three precisions, area under the log-ERT profile,
//!    mean and bounded mean final error). Rows of one dimension form a
//!    [`MetricTable`], persisted as `bbob_fall_{dim}d.csv`.
//! 2. **Similarity analysis**: algorithms are compared by their design
//!    components ([`component_similarity_matrix`]) and by the distance between
//!    their performance profiles ([`performance_similarity`]). Both are
//!    correlated per function group ([`correlate`]) with the random-search
//!    baseline left out.
//!
//! [`Pipeline`] runs both stages from a [`PipelineConfig`].
//!
//! # Example
//!
//! ```
//! use math_bbob_analysis::{FunctionLabel, short_algorithm_name};
//!
//! assert_eq!(short_algorithm_name("CMA-ES-pycma_Gharafi"), "CMA-ES-pycma");
//! assert_eq!(FunctionLabel::new(7, 10).to_string(), "f7d10");
//! ```

#![warn(missing_docs)]

pub mod component;
pub mod config;
pub mod correlation;
pub mod error;
pub mod extract;
pub mod heatmap;
pub mod metric_table;
pub mod metrics;
pub mod pipeline;
pub mod profile;
pub mod record;
pub mod similarity;

pub use component::{
    ComponentMatrix, ComponentValue, NOT_APPLICABLE, component_similarity,
    component_similarity_matrix,
};
pub use config::{AnalysisConfig, DataLayout, ExtractionConfig, PipelineConfig};
pub use correlation::{CorrelationResult, CorrelationTable, correlate, correlate_groups};
pub use error::{AnalysisError, Result};
pub use extract::{MetricExtractor, short_algorithm_name};
pub use heatmap::{similarity_heatmap, write_heatmap};
pub use metric_table::{MetricTable, table_file_name};
pub use metrics::{FunctionLabel, MetricKind, MetricRow};
pub use pipeline::{AnalysisReport, MetricAnalysis, Pipeline};
pub use profile::{FunctionGroup, PerformanceProfile};
pub use record::{JsonRecordSource, PerformanceRecord, RecordArchive, RecordSource};
pub use similarity::{SimilarityMatrix, performance_similarity};

/// Library version
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
