use clap::Parser;
use math_bbob_analysis::{DataLayout, JsonRecordSource, Pipeline, PipelineConfig, RecordSource};
use std::path::PathBuf;

/// CLI arguments for metric extraction
#[derive(Parser, Debug)]
#[command(name = "bbob-process")]
#[command(about = "Extract ERT and error metrics from BBOB performance records")]
struct Args {
    /// JSON export of the performance records
    #[arg(short, long)]
    records: PathBuf,

    /// Path to JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Data directory; metric tables go to <data-dir>/1_csv
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

    let archive = JsonRecordSource::new(&args.records).load()?;
    let pipeline = Pipeline::new(config)?;
    let tables = pipeline.extract_metrics(&archive)?;

    for table in &tables {
        let path = table.write_to_dir(layout.csv_dir())?;
        println!(
            "{}D: {} rows, {} algorithms -> {}",
            table.dimension,
            table.rows.len(),
            table.algorithms().len(),
            path.display()
        );
    }

    Ok(())
}
