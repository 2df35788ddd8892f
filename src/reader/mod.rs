use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use crate::error::{ConfGenError, Result};

/// One CSV data line, keyed by the header's column names in header order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    pub fields: Vec<(String, String)>,
    /// 1-based line number of the record in the source file.
    pub line: u64,
}

impl Row {
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == column)
            .map(|(_, v)| v.as_str())
    }
}

/// Open `path` and parse it as a header-driven CSV table.
///
/// The file handle is released before returning.
pub fn read_rows(path: &Path) -> Result<Vec<Row>> {
    let file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => ConfGenError::FileNotFound(path.display().to_string()),
        _ => ConfGenError::Io(e),
    })?;
    let rows = parse_rows(file)?;
    tracing::debug!(path = %path.display(), rows = rows.len(), "parsed csv");
    Ok(rows)
}

/// Parse CSV text from any reader. Every data row must carry exactly as
/// many values as the header has columns.
pub fn parse_rows<R: Read>(input: R) -> Result<Vec<Row>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(input);

    let headers: Vec<String> = reader.headers()?.iter().map(String::from).collect();
    let mut rows = Vec::new();

    for record in reader.records() {
        let record = record?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();
        if record.len() != headers.len() {
            return Err(ConfGenError::RowLength {
                line,
                expected: headers.len(),
                found: record.len(),
            });
        }
        let fields = headers
            .iter()
            .cloned()
            .zip(record.iter().map(String::from))
            .collect();
        rows.push(Row { fields, line });
    }

    Ok(rows)
}
