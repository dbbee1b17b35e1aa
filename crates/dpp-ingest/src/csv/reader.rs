//! CSV file reading into header-keyed rows.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use dpp_model::Row;

use crate::error::{IngestError, Result};

use super::header::{dedupe_headers, normalize_header};

/// Maximum file size for CSV loading (500 MB default).
pub const MAX_CSV_FILE_SIZE: u64 = 500 * 1024 * 1024;

/// Headers in file order and one map per data row.
///
/// A row lacks keys for trailing cells that a short record did not supply.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub rows: Vec<Row>,
}

impl CsvTable {
    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Check file size before loading.
pub fn check_file_size(path: &Path) -> Result<()> {
    check_file_size_with_limit(path, MAX_CSV_FILE_SIZE)
}

/// Check file size against a custom limit.
pub fn check_file_size_with_limit(path: &Path, max_size: u64) -> Result<()> {
    let metadata = std::fs::metadata(path).map_err(|e| IngestError::open(path, e))?;

    if metadata.len() > max_size {
        return Err(IngestError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size,
        });
    }

    Ok(())
}

/// Reads a CSV file with a single header row.
pub fn read_csv(path: &Path) -> Result<CsvTable> {
    check_file_size(path)?;
    let file = File::open(path).map_err(|e| IngestError::open(path, e))?;
    read_csv_from_reader(file, path)
}

/// Reads CSV text from any reader. `path` is only used in errors and logs.
pub fn read_csv_from_reader<R: Read>(input: R, path: &Path) -> Result<CsvTable> {
    let mut reader = ::csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(input);

    let raw_headers: Vec<String> = reader
        .headers()
        .map_err(|e| csv_error(path, &e))?
        .iter()
        .map(normalize_header)
        .collect();
    if raw_headers.iter().all(String::is_empty) {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }
    let headers = dedupe_headers(raw_headers);

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| csv_error(path, &e))?;
        // Spreadsheet exports often end with rows of bare separators.
        if record.iter().all(|value| value.trim().is_empty()) {
            continue;
        }
        let row: Row = headers
            .iter()
            .zip(record.iter())
            .map(|(header, value)| (header.clone(), value.to_string()))
            .collect();
        rows.push(row);
    }

    tracing::debug!(
        path = %path.display(),
        headers = headers.len(),
        rows = rows.len(),
        "loaded CSV"
    );
    Ok(CsvTable { headers, rows })
}

fn csv_error(path: &Path, error: &::csv::Error) -> IngestError {
    IngestError::CsvParse {
        path: path.to_path_buf(),
        message: error.to_string(),
    }
}
