//! Sequential orchestration of the three extraction stages.

use crate::container::ContainerFile;
use crate::error::Result;
use crate::extract::{
    extract_expression_matrix, extract_probe_annotations, extract_sample_metadata, SampleType,
};
use log::info;
use std::fs;
use std::path::PathBuf;

/// Series-matrix input file name.
pub const SERIES_MATRIX_FILE: &str = "GSE103512_series_matrix.txt.gz";
/// Platform-annotation input file name.
pub const PLATFORM_ANNOTATION_FILE: &str = "GPL13158.annot.gz";

/// Expression-matrix output file name.
pub const RAW_COUNTS_FILE: &str = "raw_counts.csv";
/// Probe-to-gene output file name.
pub const PROBE_TO_GENE_FILE: &str = "probe_to_gene.csv";
/// Sample-classification output file name.
pub const METADATA_FILE: &str = "metadata.csv";

/// Input and output directories for a pipeline run.
///
/// Computed once at the entry point and passed in; the extractors never
/// derive paths on their own.
#[derive(Debug, Clone)]
pub struct PrepareConfig {
    /// Directory holding the raw compressed GEO exports.
    pub raw_dir: PathBuf,
    /// Directory the processed CSV artifacts are written to. Created if
    /// absent, outputs overwritten on every run.
    pub processed_dir: PathBuf,
}

impl Default for PrepareConfig {
    fn default() -> Self {
        Self {
            raw_dir: PathBuf::from("Data/Raw"),
            processed_dir: PathBuf::from("Data/Processed"),
        }
    }
}

/// What a completed run produced, for operator reporting.
#[derive(Debug, Clone)]
pub struct PrepareSummary {
    pub raw_counts: PathBuf,
    pub probe_to_gene: PathBuf,
    pub metadata: PathBuf,
    /// Probes (rows) in the expression matrix.
    pub n_probes: usize,
    /// Sample columns in the expression matrix.
    pub n_samples: usize,
    /// Probes in the annotation table.
    pub n_annotations: usize,
    /// Classified samples per label: (Normal, Tumor, Unknown).
    pub label_counts: (usize, usize, usize),
}

/// Run the full preparation pipeline: expression matrix, probe
/// annotation, sample metadata.
///
/// The three stages run strictly in sequence and share nothing but the
/// output directory; the first fatal error aborts the whole run with no
/// partial output for the failing stage. The metadata stage re-opens the
/// series-matrix container independently of the matrix stage.
pub fn run_prepare(config: &PrepareConfig) -> Result<PrepareSummary> {
    fs::create_dir_all(&config.processed_dir)?;

    let series_path = config.raw_dir.join(SERIES_MATRIX_FILE);
    let annot_path = config.raw_dir.join(PLATFORM_ANNOTATION_FILE);

    info!("[1/3] extracting expression matrix from {:?}", series_path);
    let series = ContainerFile::open(&series_path)?;
    let matrix = extract_expression_matrix(&series)?;
    let raw_counts = config.processed_dir.join(RAW_COUNTS_FILE);
    matrix.write_csv(&raw_counts)?;
    info!("saved expression matrix -> {:?}", raw_counts);

    info!("[2/3] extracting probe annotations from {:?}", annot_path);
    let platform = ContainerFile::open(&annot_path)?;
    let annotations = extract_probe_annotations(&platform)?;
    let probe_to_gene = config.processed_dir.join(PROBE_TO_GENE_FILE);
    annotations.write_csv(&probe_to_gene)?;
    info!("saved probe annotations -> {:?}", probe_to_gene);

    info!("[3/3] extracting sample metadata from {:?}", series_path);
    let series = ContainerFile::open(&series_path)?;
    let samples = extract_sample_metadata(&series)?;
    let metadata = config.processed_dir.join(METADATA_FILE);
    samples.write_csv(&metadata)?;
    info!("saved sample metadata -> {:?}", metadata);

    Ok(PrepareSummary {
        raw_counts,
        probe_to_gene,
        metadata,
        n_probes: matrix.n_rows(),
        n_samples: matrix.n_columns().saturating_sub(1),
        n_annotations: annotations.len(),
        label_counts: (
            samples.count_of(SampleType::Normal),
            samples.count_of(SampleType::Tumor),
            samples.count_of(SampleType::Unknown),
        ),
    })
}
