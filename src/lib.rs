//! GEO data preparation pipeline.
//!
//! Converts two compressed GEO archive exports, a tab-delimited
//! series-matrix file and a platform-annotation file, into three clean
//! CSV artifacts for downstream analysis:
//!
//! - **raw_counts.csv**: row-per-probe, column-per-sample expression
//!   matrix,
//! - **probe_to_gene.csv**: probe identifier, gene symbol, Entrez gene ID,
//! - **metadata.csv**: sample identifier plus a Tumor/Normal/Unknown label
//!   derived from the sample characteristics line.
//!
//! The crate is organized into small modules:
//!
//! - **container**: gzip directive-line containers, table-span and
//!   directive-line location
//! - **table**: generic tab-decoded tables and CSV persistence
//! - **extract**: the three extractors (matrix, annotation, metadata)
//! - **pipeline**: sequential orchestration and directory configuration
//!
//! # Example
//!
//! ```no_run
//! use geoprep::prelude::*;
//!
//! let config = PrepareConfig::default();
//! let summary = run_prepare(&config).unwrap();
//! println!("{} probes x {} samples", summary.n_probes, summary.n_samples);
//! ```

pub mod container;
pub mod error;
pub mod extract;
pub mod pipeline;
pub mod table;

/// Convenient re-exports for common usage.
pub mod prelude {
    pub use crate::container::ContainerFile;
    pub use crate::error::{GeoError, Result};
    pub use crate::extract::{
        extract_expression_matrix, extract_probe_annotations, extract_sample_metadata,
        AnnotationTable, ProbeAnnotation, SampleMetadata, SampleRecord, SampleType,
    };
    pub use crate::pipeline::{run_prepare, PrepareConfig, PrepareSummary};
    pub use crate::table::DelimitedTable;
}
