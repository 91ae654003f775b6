//! End-to-end tests: records on disk → metric tables → similarity → correlation

use approx::assert_relative_eq;
use directories::ProjectDirs;
use math_bbob_analysis::{
    AnalysisError, ComponentMatrix, DataLayout, FunctionGroup, FunctionLabel, JsonRecordSource,
    MetricTable, NOT_APPLICABLE, PerformanceRecord, Pipeline, PipelineConfig, RecordArchive,
    RecordSource, component_similarity_matrix, table_file_name,
};
use std::fs;
use std::path::PathBuf;

/// Get the data directory using the directories crate
fn get_data_dir(name: &str) -> PathBuf {
    let proj_dirs = ProjectDirs::from("org", "spinorama", "math-bbob")
        .expect("Failed to determine project directories");
    let dir = proj_dirs.cache_dir().join("tests").join(name);
    fs::create_dir_all(&dir).expect("Failed to create test directory");
    dir
}

fn record(algorithm: &str, function_id: usize, targets: &[f64], ert: &[f64]) -> PerformanceRecord {
    PerformanceRecord {
        algorithm: algorithm.to_string(),
        function_id,
        dimension: 2,
        targets: targets.to_vec(),
        ert: ert.to_vec(),
        final_gaps: vec![1e-9, 2e-9],
    }
}

/// A reaches every precision, B stops at a gap of 1.
fn solved_and_unsolved() -> Vec<PerformanceRecord> {
    let solved = [1e-3, 1e-5, 1e-8];
    let unsolved = [10.0, 1.0];
    vec![
        record("A_author", 1, &solved, &[10.0, 100.0, 1000.0]),
        record("A_author", 2, &solved, &[20.0, 200.0, 2000.0]),
        record("B_author", 1, &unsolved, &[20.0, 200.0]),
        record("B_author", 2, &unsolved, &[40.0, 400.0]),
    ]
}

fn two_function_config() -> PipelineConfig {
    let mut config = PipelineConfig::default();
    config.extraction.dimensions = vec![2];
    config.extraction.num_functions = 2;
    config.analysis.dimensions = vec![2];
    config.analysis.algorithm_order = vec!["A".to_string(), "B".to_string()];
    config.analysis.excluded_components = Vec::new();
    config.analysis.function_groups = vec![FunctionGroup::new("Functions 1-2", 0, 2)];
    config
}

#[test]
fn test_solved_and_unsolved_algorithms() {
    let dir = get_data_dir("solved_and_unsolved");
    let layout = DataLayout::new(&dir);

    let records_path = dir.join("records.json");
    fs::write(
        &records_path,
        serde_json::to_string_pretty(&solved_and_unsolved()).unwrap(),
    )
    .unwrap();
    fs::write(
        layout.components_file(),
        "algorithm,Recombination,Restart,Sampling\nA,weighted,IPOP,gaussian\nB,weighted,IPOP,mirrored\n",
    )
    .unwrap();

    // stage one
    let pipeline = Pipeline::new(two_function_config()).unwrap();
    let archive = JsonRecordSource::new(&records_path).load().unwrap();
    let tables = pipeline.extract_metrics(&archive).unwrap();
    assert_eq!(tables.len(), 1);
    let path = tables[0].write_to_dir(layout.csv_dir()).unwrap();
    assert_eq!(path, layout.csv_dir().join(table_file_name(2)));

    let table = MetricTable::read_csv(&path).unwrap();
    for fid in 1..=2 {
        let a = table.row("A", FunctionLabel::new(fid, 2)).unwrap();
        let b = table.row("B", FunctionLabel::new(fid, 2)).unwrap();
        assert!(a.ert.iter().all(|v| v.is_finite()));
        assert!(b.ert.iter().all(|v| v.is_nan()));
        assert_eq!(a.function.to_string(), format!("f{fid}d2"));
        assert_relative_eq!(a.log10_ert_area, 0.5, epsilon = 1e-12);
        assert_relative_eq!(b.log10_ert_area, 0.25, epsilon = 1e-12);
    }
    assert_eq!(
        table.row("A", FunctionLabel::new(1, 2)).unwrap().ert,
        [500.0, 50.0, 5.0]
    );

    // stage two
    let components = ComponentMatrix::from_csv(layout.components_file(), NOT_APPLICABLE).unwrap();
    let report = pipeline.analyze(&components, &[table]).unwrap();
    let analysis = &report.analyses[0];
    let (_, performance) = &analysis.groups[0];

    // areas × dimension: A = [1, 1], B = [0.5, 0.5]
    let distance = (0.5f64 * 0.5 * 2.0).sqrt();
    assert_relative_eq!(
        performance.get("A", "B").unwrap(),
        1.0 / (1.0 + distance),
        epsilon = 1e-12
    );
    assert_eq!(performance.get("A", "A"), Some(1.0));
    assert!(performance.is_symmetric(0.0));

    // both matrices are [[1, s], [s, 1]]
    let result = analysis.correlation.get("Functions 1-2").unwrap();
    assert_relative_eq!(result.coefficient, 1.0, epsilon = 1e-12);
    assert!(result.p_value < 1e-6);

    let written = report
        .write(layout.figures_dir(), layout.correlation_dir())
        .unwrap();
    assert_eq!(written.len(), 3);
    assert!(layout.figures_dir().join("component_sim.html").exists());
    assert!(layout.figures_dir().join("2D_ERT_Area_Functions_1-2.html").exists());

    let csv_path = layout.correlation_dir().join("pearson_ERT_Area_2D.csv");
    let csv = fs::read_to_string(csv_path).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines[0], "statistic,Functions 1-2");
    assert!(lines[1].starts_with("corr,"));
    assert!(lines[2].starts_with("pvalue,"));
}

#[test]
fn test_component_similarity_scenario() {
    let dir = get_data_dir("component_similarity");
    let path = dir.join("alg_components.csv");
    fs::write(
        &path,
        "algorithm,Recombination,Restart,Mirroring\n\
         A,weighted,IPOP,X\n\
         B,weighted,IPOP,X\n\
         C,uniform,BIPOP,pairwise\n",
    )
    .unwrap();

    let components = ComponentMatrix::from_csv(&path, NOT_APPLICABLE).unwrap();
    let sim = component_similarity_matrix(&components).unwrap();

    assert_eq!(sim.get("A", "B"), Some(1.0));
    assert_eq!(sim.get("A", "C"), Some(0.0));
    assert_eq!(sim.get("B", "C"), Some(0.0));
    assert_eq!(sim.get("C", "A"), Some(0.0));
    for name in ["A", "B", "C"] {
        assert_eq!(sim.get(name, name), Some(1.0));
    }
}

#[test]
fn test_missing_record_is_reported() {
    let mut records = solved_and_unsolved();
    records.pop();
    let archive = RecordArchive::new(records).unwrap();
    let err = Pipeline::new(two_function_config())
        .unwrap()
        .extract_metrics(&archive)
        .unwrap_err();
    assert!(matches!(
        err,
        AnalysisError::MissingRecord { ref algorithm, function_id: 2, .. } if algorithm == "B_author"
    ));
    assert!(err.is_input_error());
}

#[test]
fn test_shipped_config_matches_defaults() {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("configs/default.json");
    let config = PipelineConfig::from_file(path).unwrap();
    assert_eq!(config, PipelineConfig::default());
}
