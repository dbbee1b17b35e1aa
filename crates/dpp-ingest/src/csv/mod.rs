//! CSV reading utilities.

mod header;
mod reader;

pub use header::{dedupe_headers, normalize_header};
pub use reader::{
    CsvTable, MAX_CSV_FILE_SIZE, check_file_size, check_file_size_with_limit, read_csv,
    read_csv_from_reader,
};
