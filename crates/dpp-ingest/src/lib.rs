//! DPP data ingestion utilities.
//!
//! This crate is the file-facing edge of the workspace. It loads the inputs
//! the mapping engine consumes as plain data.
//!
//! # Features
//!
//! - **CSV Loading**: headers and header-keyed rows via the `csv` crate
//! - **Schema Fields**: flattened field descriptor lists from JSON
//! - **Mappings**: saved header-to-path mappings from JSON
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use dpp_ingest::{load_schema_fields, read_csv};
//!
//! let table = read_csv(Path::new("products.csv"))?;
//! let fields = load_schema_fields(Path::new("battery-fields.json"))?;
//! ```

mod csv;
mod error;
mod mapping;
mod schema;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading ===
pub use self::csv::{
    CsvTable, MAX_CSV_FILE_SIZE, check_file_size, check_file_size_with_limit, dedupe_headers,
    normalize_header, read_csv, read_csv_from_reader,
};

// === JSON Inputs ===
pub use mapping::{load_mapping, parse_mapping};
pub use schema::{load_schema_fields, parse_schema_fields};
