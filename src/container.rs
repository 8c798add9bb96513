//! Gzip-compressed directive-line containers (GEO series matrix and
//! platform annotation files).
//!
//! Both input formats pair `!`-prefixed directive lines with one embedded
//! tab-delimited table bracketed by sentinel marker lines
//! (`!<name>_table_begin` / `!<name>_table_end`). The whole file is
//! decompressed and buffered in memory before any scanning; data scale is
//! small enough that streaming would buy nothing.

use crate::error::{GeoError, Result};
use flate2::read::GzDecoder;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

/// A decompressed container file, held as a vector of lines.
#[derive(Debug, Clone)]
pub struct ContainerFile {
    path: PathBuf,
    lines: Vec<String>,
}

impl ContainerFile {
    /// Open and fully decompress a gzip container.
    ///
    /// A missing file is reported as [`GeoError::MissingInput`] so the
    /// operator is told to run the acquisition step, not shown a bare
    /// ENOENT. Decoding is lossy: the annotation exports are only
    /// UTF-8-ish and stray bytes must not abort the run.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(GeoError::MissingInput {
                path: path.to_path_buf(),
            });
        }
        let file = File::open(path)?;
        let mut decoder = GzDecoder::new(BufReader::new(file));
        let mut raw = Vec::new();
        decoder.read_to_end(&mut raw)?;
        let text = String::from_utf8_lossy(&raw);
        Ok(Self::from_text(path, &text))
    }

    /// Build a container from already-decompressed text.
    ///
    /// Lines are split with [`str::lines`], which also handles CRLF
    /// endings.
    pub fn from_text<P: AsRef<Path>>(path: P, text: &str) -> Self {
        let lines = text.lines().map(str::to_string).collect();
        Self {
            path: path.as_ref().to_path_buf(),
            lines,
        }
    }

    /// Path this container was read from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All lines of the decompressed container.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Locate the lines strictly between a begin and end marker.
    ///
    /// Markers are matched by string prefix, not full-line equality. The
    /// begin marker is searched from the top, the end marker only after
    /// the begin; an empty span (markers on adjacent lines) is valid and
    /// yields an empty slice. A missing marker on either side means the
    /// file is not in the expected format and is fatal.
    pub fn table_span(&self, begin: &'static str, end: &'static str) -> Result<&[String]> {
        let start = self
            .lines
            .iter()
            .position(|l| l.starts_with(begin))
            .map(|i| i + 1);
        let stop = start.and_then(|s| {
            self.lines[s..]
                .iter()
                .position(|l| l.starts_with(end))
                .map(|i| s + i)
        });
        match (start, stop) {
            (Some(s), Some(e)) => Ok(&self.lines[s..e]),
            _ => Err(GeoError::TableNotFound {
                begin,
                end,
                path: self.path.clone(),
            }),
        }
    }

    /// Fields of the first directive line starting with `prefix`, with the
    /// leading key cell dropped.
    ///
    /// Returns `None` when no line matches; the caller decides whether an
    /// absent directive is degraded data or an error. Scanning stops at
    /// the first match.
    pub fn directive_fields(&self, prefix: &str) -> Option<Vec<String>> {
        self.lines
            .iter()
            .find(|l| l.starts_with(prefix))
            .map(|line| {
                line.trim()
                    .split('\t')
                    .skip(1)
                    .map(str::to_string)
                    .collect()
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> ContainerFile {
        let text = "\
!Series_title\t\"Some study\"
!Sample_geo_accession\tGSM1\tGSM2
!Sample_characteristics_ch1\t\"normal: yes\"\t\"normal: no\"
!series_matrix_table_begin
ID_REF\tGSM1\tGSM2
101\t5.2\t3.1
102\t1.0\t2.0
!series_matrix_table_end
";
        ContainerFile::from_text("test.txt.gz", text)
    }

    #[test]
    fn test_table_span_excludes_markers() {
        let c = fixture();
        let span = c
            .table_span("!series_matrix_table_begin", "!series_matrix_table_end")
            .unwrap();
        assert_eq!(span.len(), 3);
        assert_eq!(span[0], "ID_REF\tGSM1\tGSM2");
        assert_eq!(span[2], "102\t1.0\t2.0");
    }

    #[test]
    fn test_table_span_empty() {
        let c = ContainerFile::from_text("t.gz", "!t_begin\n!t_end\n");
        let span = c.table_span("!t_begin", "!t_end").unwrap();
        assert!(span.is_empty());
    }

    #[test]
    fn test_table_span_prefix_match() {
        // Markers carry trailing content in real exports; matching is by
        // prefix only.
        let c = ContainerFile::from_text("t.gz", "!t_begin extra\ta\n!t_end extra\n");
        let span = c.table_span("!t_begin", "!t_end").unwrap();
        assert!(span.is_empty());
    }

    #[test]
    fn test_table_span_missing_begin() {
        let c = ContainerFile::from_text("t.gz", "a\nb\n!t_end\n");
        let err = c.table_span("!t_begin", "!t_end").unwrap_err();
        assert!(matches!(err, GeoError::TableNotFound { .. }));
    }

    #[test]
    fn test_table_span_missing_end() {
        let c = ContainerFile::from_text("t.gz", "!t_begin\na\nb\n");
        let err = c.table_span("!t_begin", "!t_end").unwrap_err();
        assert!(matches!(err, GeoError::TableNotFound { .. }));
    }

    #[test]
    fn test_end_marker_only_searched_after_begin() {
        let c = ContainerFile::from_text("t.gz", "!t_end\n!t_begin\nrow\n!t_end\n");
        let span = c.table_span("!t_begin", "!t_end").unwrap();
        assert_eq!(span, ["row".to_string()]);
    }

    #[test]
    fn test_directive_fields() {
        let c = fixture();
        let ids = c.directive_fields("!Sample_geo_accession").unwrap();
        assert_eq!(ids, vec!["GSM1", "GSM2"]);
    }

    #[test]
    fn test_directive_fields_first_match_only() {
        let c = ContainerFile::from_text("t.gz", "!key\ta\tb\n!key\tc\td\n");
        assert_eq!(c.directive_fields("!key").unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn test_directive_fields_absent() {
        let c = fixture();
        assert!(c.directive_fields("!Sample_no_such_line").is_none());
    }

    #[test]
    fn test_missing_input_error() {
        let err = ContainerFile::open("no/such/file.txt.gz").unwrap_err();
        assert!(matches!(err, GeoError::MissingInput { .. }));
    }

    #[test]
    fn test_crlf_lines_are_normalized() {
        let c = ContainerFile::from_text("t.gz", "!t_begin\r\nID\tG1\r\n!t_end\r\n");
        let span = c.table_span("!t_begin", "!t_end").unwrap();
        assert_eq!(span, ["ID\tG1".to_string()]);
    }
}
