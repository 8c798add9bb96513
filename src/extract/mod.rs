//! The three extractors: expression matrix, probe annotation, sample
//! metadata.

mod annotation;
mod matrix;
mod metadata;

pub use annotation::{
    extract_probe_annotations, AnnotationTable, ProbeAnnotation, ENTREZ_ALIASES,
    ENTREZ_PLACEHOLDER, GENE_SYMBOL_ALIASES, PLATFORM_TABLE_BEGIN, PLATFORM_TABLE_END,
    PROBE_ID_ALIASES,
};
pub use matrix::{
    extract_expression_matrix, PROBE_ID_COLUMN, SERIES_TABLE_BEGIN, SERIES_TABLE_END,
};
pub use metadata::{
    extract_sample_metadata, SampleMetadata, SampleRecord, SampleType,
    SAMPLE_ACCESSION_PREFIX, SAMPLE_CHARACTERISTICS_PREFIX,
};
