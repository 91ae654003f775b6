use clap::Parser;
use math_bbob_analysis::{
    ComponentMatrix, DataLayout, MetricTable, Pipeline, PipelineConfig, table_file_name,
};
use std::path::PathBuf;

/// CLI arguments for the similarity analysis
#[derive(Parser, Debug)]
#[command(name = "bbob-figures")]
#[command(about = "Similarity heatmaps and component/performance correlation for BBOB metrics")]
struct Args {
    /// Component table (CSV); defaults to <data-dir>/alg_components.csv
    #[arg(long)]
    components: Option<PathBuf>,

    /// Path to JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Data directory holding 1_csv; figures and correlations are written next to it
    #[arg(short, long)]
    data_dir: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => {
            println!("Loading configuration from: {}", path.display());
            PipelineConfig::from_file(path)?
        }
        None => PipelineConfig::default(),
    };

    let layout = match args.data_dir {
        Some(dir) => DataLayout::new(dir),
        None => DataLayout::user_default().ok_or("Failed to determine project directories")?,
    };

    let components_path = args
        .components
        .unwrap_or_else(|| layout.components_file());
    let components = ComponentMatrix::from_csv(&components_path, &config.analysis.not_applicable)?;

    let tables = config
        .analysis
        .dimensions
        .iter()
        .map(|&dim| MetricTable::read_csv(layout.csv_dir().join(table_file_name(dim))))
        .collect::<Result<Vec<_>, _>>()?;

    let pipeline = Pipeline::new(config)?;
    let report = pipeline.analyze(&components, &tables)?;
    let written = report.write(layout.figures_dir(), layout.correlation_dir())?;

    for analysis in &report.analyses {
        println!("{}D, {} metric:", analysis.dimension, analysis.metric());
        for (group, result) in &analysis.correlation.entries {
            println!(
                "  {:<16} r = {:>7.4}  p = {:.3e}",
                group, result.coefficient, result.p_value
            );
        }
    }
    println!(
        "Wrote {} files under {}",
        written.len(),
        layout.root().display()
    );

    Ok(())
}
