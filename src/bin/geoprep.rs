//! geoprep - GEO data preparation CLI
//!
//! Turns the raw series-matrix and platform-annotation exports into the
//! three processed CSV artifacts. Runs end to end with zero arguments
//! using the conventional Data/Raw and Data/Processed directories.

use clap::Parser;
use env_logger::Env;
use geoprep::error::Result;
use geoprep::pipeline::{run_prepare, PrepareConfig};
use std::path::PathBuf;

/// Prepare GEO expression data for downstream analysis
#[derive(Parser)]
#[command(name = "geoprep")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory holding the raw compressed GEO exports
    #[arg(long, default_value = "Data/Raw")]
    raw_dir: PathBuf,

    /// Directory to write the processed CSV files into
    #[arg(long, default_value = "Data/Processed")]
    out_dir: PathBuf,
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let config = PrepareConfig {
        raw_dir: cli.raw_dir,
        processed_dir: cli.out_dir,
    };

    if let Err(e) = cmd_prepare(&config) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn cmd_prepare(config: &PrepareConfig) -> Result<()> {
    println!("Preparing GEO data");
    println!("  raw:       {:?}", config.raw_dir);
    println!("  processed: {:?}", config.processed_dir);

    let summary = run_prepare(config)?;

    println!();
    println!(
        "Expression matrix: {} probes x {} samples -> {:?}",
        summary.n_probes, summary.n_samples, summary.raw_counts
    );
    println!(
        "Probe annotations: {} probes -> {:?}",
        summary.n_annotations, summary.probe_to_gene
    );
    let (normal, tumor, unknown) = summary.label_counts;
    println!(
        "Sample metadata:   {} Normal / {} Tumor / {} Unknown -> {:?}",
        normal, tumor, unknown, summary.metadata
    );
    println!();
    println!("All data prepared successfully.");

    Ok(())
}
