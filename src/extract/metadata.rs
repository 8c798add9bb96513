//! Sample metadata extraction: tumor/normal classification from the
//! series-matrix characteristics line.

use crate::container::ContainerFile;
use crate::error::{GeoError, Result};
use log::warn;
use serde::Serialize;
use std::path::Path;

/// Directive line carrying the ordered sample accession identifiers.
pub const SAMPLE_ACCESSION_PREFIX: &str = "!Sample_geo_accession";
/// Directive line carrying one free-text descriptor per sample.
pub const SAMPLE_CHARACTERISTICS_PREFIX: &str = "!Sample_characteristics_ch1";

/// Classification derived from a sample's characteristics descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SampleType {
    Normal,
    Tumor,
    Unknown,
}

impl SampleType {
    /// Classify a raw characteristics descriptor.
    ///
    /// Quote characters are removed, the string is trimmed and
    /// lower-cased, then classified by substring containment. The
    /// descriptor may carry arbitrary surrounding content (units, extra
    /// key-value pairs); only the keyword substring matters. The Normal
    /// check precedes the Tumor check.
    pub fn from_descriptor(raw: &str) -> Self {
        let normalized = raw.replace('"', "").trim().to_lowercase();
        if normalized.contains("normal: yes") {
            SampleType::Normal
        } else if normalized.contains("normal: no") {
            SampleType::Tumor
        } else {
            SampleType::Unknown
        }
    }

    /// Label as written to the output table.
    pub fn as_str(&self) -> &'static str {
        match self {
            SampleType::Normal => "Normal",
            SampleType::Tumor => "Tumor",
            SampleType::Unknown => "Unknown",
        }
    }
}

/// One sample's identifier and derived classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SampleRecord {
    #[serde(rename = "SampleID")]
    pub sample_id: String,
    #[serde(rename = "SampleType")]
    pub sample_type: SampleType,
}

/// The per-sample classification table.
#[derive(Debug, Clone, Default)]
pub struct SampleMetadata {
    records: Vec<SampleRecord>,
}

impl SampleMetadata {
    /// Sample records, in container order (never resorted).
    pub fn records(&self) -> &[SampleRecord] {
        &self.records
    }

    /// Number of classified samples.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when no samples were found.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of samples carrying the given label.
    pub fn count_of(&self, label: SampleType) -> usize {
        self.records
            .iter()
            .filter(|r| r.sample_type == label)
            .count()
    }

    /// Persist as CSV with the fixed `SampleID,SampleType` header and no
    /// index column.
    pub fn write_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        // Header is written by hand so it also appears for zero records;
        // the serializer must not emit its own copy.
        let mut writer = csv::WriterBuilder::new().has_headers(false).from_path(path)?;
        writer.write_record(["SampleID", "SampleType"])?;
        for record in &self.records {
            writer.serialize(record)?;
        }
        writer.flush()?;
        Ok(())
    }
}

/// Extract sample identifiers and derive tumor/normal labels from a
/// series-matrix container.
///
/// Only the first accession line and the first characteristics line are
/// used; the two field lists are order-aligned and zipped positionally.
/// If either directive line is absent the result has zero rows (logged,
/// downstream consumers must handle an empty table). If both are present
/// with differing field counts the container is misaligned and the run
/// aborts rather than silently zipping.
pub fn extract_sample_metadata(container: &ContainerFile) -> Result<SampleMetadata> {
    let Some(sample_ids) = container.directive_fields(SAMPLE_ACCESSION_PREFIX) else {
        warn!(
            "no {} line in {:?}; metadata will be empty",
            SAMPLE_ACCESSION_PREFIX,
            container.path()
        );
        return Ok(SampleMetadata::default());
    };
    let Some(descriptors) = container.directive_fields(SAMPLE_CHARACTERISTICS_PREFIX) else {
        warn!(
            "no {} line in {:?}; metadata will be empty",
            SAMPLE_CHARACTERISTICS_PREFIX,
            container.path()
        );
        return Ok(SampleMetadata::default());
    };
    if sample_ids.len() != descriptors.len() {
        return Err(GeoError::SampleCountMismatch {
            accessions: sample_ids.len(),
            characteristics: descriptors.len(),
        });
    }

    let records = sample_ids
        .into_iter()
        .zip(&descriptors)
        .map(|(sample_id, descriptor)| SampleRecord {
            sample_id,
            sample_type: SampleType::from_descriptor(descriptor),
        })
        .collect();

    Ok(SampleMetadata { records })
}
