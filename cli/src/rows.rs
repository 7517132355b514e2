//! Row source: semicolon-delimited input with TAG/PREFIX/LINK columns.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

/// Column names that must appear in the input header.
const REQUIRED_COLUMNS: &[&str] = &["TAG", "PREFIX", "LINK"];

/// One input row.
///
/// `prefix` is pass-through metadata kept for forward compatibility;
/// rendering never reads it.
#[derive(Debug, Clone, Deserialize)]
pub struct Row {
    #[serde(rename = "TAG")]
    pub identifier: String,
    #[serde(rename = "PREFIX")]
    pub prefix: String,
    #[serde(rename = "LINK")]
    pub link: String,
}

/// Errors from opening or iterating the row file.
#[derive(Debug, thiserror::Error)]
pub enum RowError {
    #[error("Cannot open input file {path}: {source}")]
    Open {
        path: String,
        source: std::io::Error,
    },

    #[error("Input header is missing required column {0:?}")]
    MissingColumn(&'static str),

    #[error("Malformed row data: {0}")]
    Csv(#[from] csv::Error),
}

/// Forward-only reader over the input rows, in file order.
#[derive(Debug)]
pub struct RowSource<R: Read> {
    reader: csv::Reader<R>,
}

impl RowSource<File> {
    /// Open the input file and validate its header eagerly, so a
    /// malformed header fails before any image is produced.
    pub fn open(path: &Path) -> Result<Self, RowError> {
        let file = File::open(path).map_err(|source| RowError::Open {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_reader(file)
    }
}

impl<R: Read> RowSource<R> {
    /// Build a row source from any reader; validates the header.
    pub fn from_reader(input: R) -> Result<Self, RowError> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b';')
            .has_headers(true)
            .from_reader(input);

        let headers = reader.headers()?;
        for column in REQUIRED_COLUMNS {
            if !headers.iter().any(|h| h == *column) {
                return Err(RowError::MissingColumn(column));
            }
        }

        Ok(Self { reader })
    }

    /// Lazy iteration over the remaining rows.
    pub fn rows(&mut self) -> impl Iterator<Item = Result<Row, RowError>> + '_ {
        self.reader
            .deserialize()
            .map(|result| result.map_err(RowError::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_rows_in_file_order() {
        let data = "TAG;PREFIX;LINK\n\
                    TAG-0001;X;https://example.com/a\n\
                    TAG-0002;Y;https://example.com/b\n\
                    TAG-0003;Z;https://example.com/c\n";
        let mut source = RowSource::from_reader(data.as_bytes()).unwrap();
        let rows: Vec<Row> = source.rows().collect::<Result<_, _>>().unwrap();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].identifier, "TAG-0001");
        assert_eq!(rows[0].prefix, "X");
        assert_eq!(rows[0].link, "https://example.com/a");
        assert_eq!(rows[2].identifier, "TAG-0003");
    }

    #[test]
    fn missing_link_column_is_rejected_up_front() {
        let data = "TAG;PREFIX\nTAG-0001;X\n";
        let err = RowSource::from_reader(data.as_bytes()).unwrap_err();
        assert!(matches!(err, RowError::MissingColumn("LINK")));
    }

    #[test]
    fn missing_tag_column_is_rejected_up_front() {
        let data = "PREFIX;LINK\nX;https://example.com\n";
        let err = RowSource::from_reader(data.as_bytes()).unwrap_err();
        assert!(matches!(err, RowError::MissingColumn("TAG")));
    }

    #[test]
    fn extra_columns_are_ignored() {
        let data = "TAG;PREFIX;LINK;NOTES\nTAG-0001;X;https://example.com/a;hi\n";
        let mut source = RowSource::from_reader(data.as_bytes()).unwrap();
        let rows: Vec<Row> = source.rows().collect::<Result<_, _>>().unwrap();
        assert_eq!(rows[0].link, "https://example.com/a");
    }

    #[test]
    fn column_order_does_not_matter() {
        let data = "LINK;TAG;PREFIX\nhttps://example.com/a;TAG-0001;X\n";
        let mut source = RowSource::from_reader(data.as_bytes()).unwrap();
        let rows: Vec<Row> = source.rows().collect::<Result<_, _>>().unwrap();
        assert_eq!(rows[0].identifier, "TAG-0001");
    }

    #[test]
    fn empty_link_field_is_a_valid_row() {
        let data = "TAG;PREFIX;LINK\nTAG-0001;X;\n";
        let mut source = RowSource::from_reader(data.as_bytes()).unwrap();
        let rows: Vec<Row> = source.rows().collect::<Result<_, _>>().unwrap();
        assert_eq!(rows[0].link, "");
    }

    #[test]
    fn open_missing_file_reports_path() {
        let err = RowSource::open(Path::new("/nonexistent/TAGS.csv")).unwrap_err();
        match err {
            RowError::Open { path, .. } => assert!(path.contains("TAGS.csv")),
            other => panic!("unexpected error: {other}"),
        }
    }
}
