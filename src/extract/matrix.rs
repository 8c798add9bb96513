//! Expression-matrix extraction from a series-matrix container.

use crate::container::ContainerFile;
use crate::error::Result;
use crate::table::DelimitedTable;

/// Sentinel marking the start of the embedded expression table.
pub const SERIES_TABLE_BEGIN: &str = "!series_matrix_table_begin";
/// Sentinel marking the end of the embedded expression table.
pub const SERIES_TABLE_END: &str = "!series_matrix_table_end";

/// Canonical name for the probe-identifier column in all outputs.
pub const PROBE_ID_COLUMN: &str = "ProbeID";

/// Extract the expression matrix embedded in a series-matrix container.
///
/// The table is the span strictly between the begin/end sentinels, decoded
/// as tab-delimited header plus rows. The first column arrives under a
/// container-specific name (`ID_REF` in GEO exports) and is renamed to
/// [`PROBE_ID_COLUMN`]; sample columns pass through unchanged.
pub fn extract_expression_matrix(container: &ContainerFile) -> Result<DelimitedTable> {
    let span = container.table_span(SERIES_TABLE_BEGIN, SERIES_TABLE_END)?;
    let mut table = DelimitedTable::from_lines(span)?;
    table.rename_first_column(PROBE_ID_COLUMN);
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GeoError;

    fn container(body: &str) -> ContainerFile {
        let text = format!(
            "!Series_title\t\"x\"\n{}\n{}{}\n",
            SERIES_TABLE_BEGIN, body, SERIES_TABLE_END
        );
        ContainerFile::from_text("series.txt.gz", &text)
    }

    #[test]
    fn test_extract_renames_probe_column() {
        let c = container("ID_REF\tGSM1\tGSM2\n101\t5.2\t3.1\n");
        let matrix = extract_expression_matrix(&c).unwrap();
        assert_eq!(matrix.columns(), &["ProbeID", "GSM1", "GSM2"]);
        assert_eq!(matrix.n_rows(), 1);
        assert_eq!(matrix.rows()[0], vec!["101", "5.2", "3.1"]);
    }

    #[test]
    fn test_extract_empty_table() {
        let c = container("");
        let matrix = extract_expression_matrix(&c).unwrap();
        assert_eq!(matrix.n_rows(), 0);
        assert_eq!(matrix.n_columns(), 0);
    }

    #[test]
    fn test_missing_markers_fatal() {
        let c = ContainerFile::from_text("series.txt.gz", "!Series_title\t\"x\"\n");
        let err = extract_expression_matrix(&c).unwrap_err();
        assert!(matches!(err, GeoError::TableNotFound { .. }));
    }
}
