//! Probe-to-gene annotation extraction from a platform container.
//!
//! Annotation exports do not use stable column names across platform
//! versions, so the logical fields are resolved through ordered alias
//! lists: the first alias present in the decoded column set wins, and
//! list order is priority order. The lists are configuration data:
//! extend them here when a new platform variant shows up, never with
//! inline conditionals at the call site.

use crate::container::ContainerFile;
use crate::error::{GeoError, Result};
use crate::table::DelimitedTable;
use log::warn;
use serde::Serialize;
use std::path::Path;

/// Sentinel marking the start of the embedded platform table.
pub const PLATFORM_TABLE_BEGIN: &str = "!platform_table_begin";
/// Sentinel marking the end of the embedded platform table.
pub const PLATFORM_TABLE_END: &str = "!platform_table_end";

/// Known names for the probe-identifier column, in priority order.
pub const PROBE_ID_ALIASES: &[&str] = &["ID", "ID_REF"];

/// Known names for the gene-symbol column, in priority order. A gene
/// symbol is mandatory for downstream biomarker work; no match is fatal.
pub const GENE_SYMBOL_ALIASES: &[&str] = &[
    "Gene symbol",
    "gene_symbol",
    "GENE_SYMBOL",
    "Gene.symbol",
    "Symbol",
];

/// Known names for the Entrez gene-identifier column, in priority order.
/// Optional: a platform without one is degraded, not broken.
pub const ENTREZ_ALIASES: &[&str] = &["Gene ID", "ENTREZ_GENE_ID", "Entrez Gene", "EntrezID"];

/// Placeholder written for every probe when no Entrez column exists.
pub const ENTREZ_PLACEHOLDER: &str = "NA";

/// One probe's normalized annotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProbeAnnotation {
    #[serde(rename = "ProbeID")]
    pub probe_id: String,
    #[serde(rename = "Gene Symbol")]
    pub gene_symbol: String,
    #[serde(rename = "ENTREZ_GENE_ID")]
    pub entrez_id: String,
}

/// The normalized three-column annotation table.
#[derive(Debug, Clone, Default)]
pub struct AnnotationTable {
    records: Vec<ProbeAnnotation>,
}

impl AnnotationTable {
    /// Annotation records, in source order.
    pub fn records(&self) -> &[ProbeAnnotation] {
        &self.records
    }

    /// Number of annotated probes.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when no probes were annotated.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Persist as CSV with the fixed `ProbeID,Gene Symbol,ENTREZ_GENE_ID`
    /// header and no index column.
    pub fn write_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        // Header is written by hand so it also appears for zero records;
        // the serializer must not emit its own copy.
        let mut writer = csv::WriterBuilder::new().has_headers(false).from_path(path)?;
        writer.write_record(["ProbeID", "Gene Symbol", "ENTREZ_GENE_ID"])?;
        for record in &self.records {
            writer.serialize(record)?;
        }
        writer.flush()?;
        Ok(())
    }
}

/// Extract and normalize the probe annotation table from a platform
/// container.
///
/// All fields are read as text (identifiers may carry leading zeros) and
/// column names are whitespace-trimmed before alias resolution. A missing
/// gene-symbol column aborts; a missing Entrez column is logged and filled
/// with [`ENTREZ_PLACEHOLDER`].
pub fn extract_probe_annotations(container: &ContainerFile) -> Result<AnnotationTable> {
    let span = container.table_span(PLATFORM_TABLE_BEGIN, PLATFORM_TABLE_END)?;
    let mut table = DelimitedTable::from_lines(span)?;
    table.trim_column_names();

    let probe_idx = table
        .resolve_column(PROBE_ID_ALIASES)
        .ok_or_else(|| GeoError::MissingColumn {
            role: "probe identifier",
            candidates: PROBE_ID_ALIASES.to_vec(),
        })?;
    let gene_idx = table
        .resolve_column(GENE_SYMBOL_ALIASES)
        .ok_or_else(|| GeoError::MissingColumn {
            role: "gene symbol",
            candidates: GENE_SYMBOL_ALIASES.to_vec(),
        })?;
    let entrez_idx = table.resolve_column(ENTREZ_ALIASES);
    if entrez_idx.is_none() {
        warn!(
            "no Entrez ID column found in {:?}; filling ENTREZ_GENE_ID with '{}'",
            container.path(),
            ENTREZ_PLACEHOLDER
        );
    }

    let records = table
        .rows()
        .iter()
        .map(|row| ProbeAnnotation {
            probe_id: row[probe_idx].clone(),
            gene_symbol: row[gene_idx].clone(),
            entrez_id: match entrez_idx {
                Some(idx) => row[idx].clone(),
                None => ENTREZ_PLACEHOLDER.to_string(),
            },
        })
        .collect();

    Ok(AnnotationTable { records })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn container(body: &str) -> ContainerFile {
        let text = format!(
            "!Platform_title\t\"x\"\n{}\n{}{}\n",
            PLATFORM_TABLE_BEGIN, body, PLATFORM_TABLE_END
        );
        ContainerFile::from_text("annot.gz", &text)
    }

    #[test]
    fn test_extract_with_all_columns() {
        let c = container("ID\tGene symbol\tGene ID\n200001_at\tTP53\t7157\n");
        let annot = extract_probe_annotations(&c).unwrap();
        assert_eq!(
            annot.records(),
            &[ProbeAnnotation {
                probe_id: "200001_at".to_string(),
                gene_symbol: "TP53".to_string(),
                entrez_id: "7157".to_string(),
            }]
        );
    }

    #[test]
    fn test_column_names_are_trimmed() {
        let c = container(" ID \t Gene symbol \t Gene ID \n200001_at\tTP53\t7157\n");
        let annot = extract_probe_annotations(&c).unwrap();
        assert_eq!(annot.records()[0].gene_symbol, "TP53");
    }

    #[test]
    fn test_gene_symbol_alias_priority() {
        // Both "Symbol" and "GENE_SYMBOL" present: the alias listed
        // earlier in priority ("GENE_SYMBOL") wins even though "Symbol"
        // comes first physically.
        let c = container("ID\tSymbol\tGENE_SYMBOL\n200001_at\twrong\tTP53\n");
        let annot = extract_probe_annotations(&c).unwrap();
        assert_eq!(annot.records()[0].gene_symbol, "TP53");
    }

    #[test]
    fn test_missing_gene_symbol_fatal() {
        let c = container("ID\tGene ID\n200001_at\t7157\n");
        let err = extract_probe_annotations(&c).unwrap_err();
        assert!(matches!(
            err,
            GeoError::MissingColumn {
                role: "gene symbol",
                ..
            }
        ));
    }

    #[test]
    fn test_missing_probe_id_fatal() {
        let c = container("Probe\tGene symbol\np1\tTP53\n");
        let err = extract_probe_annotations(&c).unwrap_err();
        assert!(matches!(
            err,
            GeoError::MissingColumn {
                role: "probe identifier",
                ..
            }
        ));
    }

    #[test]
    fn test_entrez_fallback_is_uniform_placeholder() {
        let c = container("ID\tGene symbol\n200001_at\tTP53\n200002_at\tBRCA1\n");
        let annot = extract_probe_annotations(&c).unwrap();
        assert!(annot.records().iter().all(|r| r.entrez_id == "NA"));
    }

    #[test]
    fn test_leading_zeros_preserved() {
        let c = container("ID\tGene symbol\tGene ID\n007_at\tMYC\t004609\n");
        let annot = extract_probe_annotations(&c).unwrap();
        assert_eq!(annot.records()[0].probe_id, "007_at");
        assert_eq!(annot.records()[0].entrez_id, "004609");
    }

    #[test]
    fn test_write_csv_exact_bytes() {
        let c = container("ID\tGene symbol\tGene ID\n200001_at\tTP53\t7157\n");
        let annot = extract_probe_annotations(&c).unwrap();
        let file = NamedTempFile::new().unwrap();
        annot.write_csv(file.path()).unwrap();
        let content = std::fs::read_to_string(file.path()).unwrap();
        assert_eq!(
            content,
            "ProbeID,Gene Symbol,ENTREZ_GENE_ID\n200001_at,TP53,7157\n"
        );
    }

    #[test]
    fn test_write_csv_header_only_when_empty() {
        let c = container("ID\tGene symbol\tGene ID\n");
        let annot = extract_probe_annotations(&c).unwrap();
        assert!(annot.is_empty());
        let file = NamedTempFile::new().unwrap();
        annot.write_csv(file.path()).unwrap();
        let content = std::fs::read_to_string(file.path()).unwrap();
        assert_eq!(content, "ProbeID,Gene Symbol,ENTREZ_GENE_ID\n");
    }
}
