//! Error types for the geoprep library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the library.
#[derive(Error, Debug)]
pub enum GeoError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Input file {path:?} not found. Run the GEO download step first.")]
    MissingInput { path: PathBuf },

    #[error("Could not locate table between '{begin}' and '{end}' in {path:?}")]
    TableNotFound {
        begin: &'static str,
        end: &'static str,
        path: PathBuf,
    },

    #[error("Row {row} has {actual} fields, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("No {role} column found in annotation table; tried {candidates:?}")]
    MissingColumn {
        role: &'static str,
        candidates: Vec<&'static str>,
    },

    #[error(
        "Sample accession line has {accessions} entries but characteristics line has {characteristics}"
    )]
    SampleCountMismatch {
        accessions: usize,
        characteristics: usize,
    },
}

/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, GeoError>;
