//! JSON configuration for both pipeline stages
//!
//! Every field has a default, so `{}` is a valid configuration that
//! reproduces the reference study: 10D, the `log10ert_area` metric and the
//! ten CMA-ES variants plus random search.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::component::NOT_APPLICABLE;
use crate::error::{AnalysisError, Result};
use crate::metrics::{ERT_AREA_COLUMN, MetricKind, NUM_PRECISIONS};
use crate::profile::FunctionGroup;

/// Complete pipeline configuration loaded from JSON
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Stage one: metric extraction
    #[serde(default)]
    pub extraction: ExtractionConfig,
    /// Stage two: similarity and correlation
    #[serde(default)]
    pub analysis: AnalysisConfig,
}

/// Metric extraction configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Dimensions to extract
    #[serde(default = "default_dimensions")]
    pub dimensions: Vec<usize>,
    /// Target precisions of the three ERT columns
    #[serde(default = "default_precisions")]
    pub precisions: [f64; NUM_PRECISIONS],
    /// Function ids `1..=num_functions` are extracted
    #[serde(default = "default_num_functions")]
    pub num_functions: usize,
    /// Algorithm short names to keep; empty keeps all
    #[serde(default)]
    pub algorithms: Vec<String>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            dimensions: default_dimensions(),
            precisions: default_precisions(),
            num_functions: default_num_functions(),
            algorithms: Vec::new(),
        }
    }
}

fn default_dimensions() -> Vec<usize> {
    vec![10]
}

fn default_precisions() -> [f64; NUM_PRECISIONS] {
    [1e-8, 1e-5, 1e-3]
}

fn default_num_functions() -> usize {
    24
}

/// Similarity and correlation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Dimensions to analyse
    #[serde(default = "default_dimensions")]
    pub dimensions: Vec<usize>,
    /// Metric column names to analyse
    #[serde(default = "default_metrics")]
    pub metrics: Vec<String>,
    /// Algorithm order of figures and matrices
    #[serde(default = "default_algorithm_order")]
    pub algorithm_order: Vec<String>,
    /// Algorithm left out of the correlation
    #[serde(default = "default_baseline")]
    pub baseline: String,
    /// Not-applicable marker of the component table
    #[serde(default = "default_not_applicable")]
    pub not_applicable: String,
    /// Components ignored by the component similarity
    #[serde(default = "default_excluded_components")]
    pub excluded_components: Vec<String>,
    /// Function row groups, one figure and one correlation each
    #[serde(default = "FunctionGroup::bbob_groups")]
    pub function_groups: Vec<FunctionGroup>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            dimensions: default_dimensions(),
            metrics: default_metrics(),
            algorithm_order: default_algorithm_order(),
            baseline: default_baseline(),
            not_applicable: default_not_applicable(),
            excluded_components: default_excluded_components(),
            function_groups: FunctionGroup::bbob_groups(),
        }
    }
}

fn default_metrics() -> Vec<String> {
    vec![ERT_AREA_COLUMN.to_string()]
}

fn default_algorithm_order() -> Vec<String> {
    [
        "CMA-ES-Akimoto",
        "CMA-ES-pycma",
        "DD-CMA-ES-Akimoto",
        "DD-CMA-ES-pycma",
        "CMAES-APOP-Var1",
        "CMAES-APOP-KMA",
        "CMAES-APOP-KP",
        "CMAES-APOP-MA",
        "HE-ES",
        "RANDOMSEARCH",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_baseline() -> String {
    "RANDOMSEARCH".to_string()
}

fn default_not_applicable() -> String {
    NOT_APPLICABLE.to_string()
}

fn default_excluded_components() -> Vec<String> {
    vec![
        "Sampling".to_string(),
        "Ranking".to_string(),
        "Step-size Adaptation".to_string(),
    ]
}

impl AnalysisConfig {
    /// Algorithm order without the baseline: the rows of the correlated matrices.
    pub fn compared_algorithms(&self) -> Vec<String> {
        self.algorithm_order
            .iter()
            .filter(|a| **a != self.baseline)
            .cloned()
            .collect()
    }
}

impl PipelineConfig {
    /// Load configuration from JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: PipelineConfig = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to JSON file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Metrics to analyse, resolved against the extraction precisions.
    pub fn metric_kinds(&self) -> Result<Vec<MetricKind>> {
        self.analysis
            .metrics
            .iter()
            .map(|name| MetricKind::resolve(name, &self.extraction.precisions))
            .collect()
    }

    /// Check the configuration for consistency.
    pub fn validate(&self) -> Result<()> {
        let extraction = &self.extraction;
        if extraction.dimensions.contains(&0) || self.analysis.dimensions.contains(&0) {
            return Err(AnalysisError::InvalidConfig(
                "dimensions must be positive".to_string(),
            ));
        }
        if extraction.num_functions == 0 {
            return Err(AnalysisError::InvalidConfig(
                "num_functions must be positive".to_string(),
            ));
        }

        let p = extraction.precisions;
        if p.iter().any(|v| !(v.is_finite() && *v > 0.0)) {
            return Err(AnalysisError::InvalidConfig(format!(
                "precisions must be positive, got {p:?}"
            )));
        }
        if p[0] == p[1] || p[0] == p[2] || p[1] == p[2] {
            return Err(AnalysisError::InvalidConfig(format!(
                "precisions must be distinct, got {p:?}"
            )));
        }

        self.metric_kinds()?;

        if let Some(group) = self
            .analysis
            .function_groups
            .iter()
            .find(|g| g.start >= g.end)
        {
            return Err(AnalysisError::InvalidConfig(format!(
                "function group '{}' is empty",
                group.name
            )));
        }
        Ok(())
    }
}

/// Where the two stages read and write their files.
///
/// ```text
/// <root>/alg_components.csv   component table
/// <root>/1_csv/               metric tables (stage one output)
/// <root>/2_figures/           heatmaps
/// <root>/3_pearson/           correlation tables
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataLayout {
    root: PathBuf,
}

impl DataLayout {
    /// Layout rooted at `root`.
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    /// Layout under the per-user cache directory, if one can be determined.
    pub fn user_default() -> Option<Self> {
        project_dirs().map(|dirs| Self::new(dirs.cache_dir().join("data")))
    }

    /// Root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Default component table.
    pub fn components_file(&self) -> PathBuf {
        self.root.join("alg_components.csv")
    }

    /// Metric tables.
    pub fn csv_dir(&self) -> PathBuf {
        self.root.join("1_csv")
    }

    /// Heatmaps.
    pub fn figures_dir(&self) -> PathBuf {
        self.root.join("2_figures")
    }

    /// Correlation tables.
    pub fn correlation_dir(&self) -> PathBuf {
        self.root.join("3_pearson")
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("org", "spinorama", "math-bbob")
}

/// Per-test scratch directory under the user cache directory.
#[cfg(test)]
pub(crate) fn test_data_dir(name: &str) -> PathBuf {
    let proj_dirs = project_dirs().expect("Failed to determine project directories");
    let dir = proj_dirs.cache_dir().join("tests").join(name);
    fs::create_dir_all(&dir).expect("Failed to create test directory");
    dir
}
