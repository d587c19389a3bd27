//! Dataset ingestion for column classification.
//!
//! This crate turns a tabular source into a [`Dataset`]: it decides whether
//! the first row is a header, assigns synthetic positional identifiers to
//! every column, keeps the original labels for display, and computes each
//! column's cardinality once at load time.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use colclass_ingest::load_csv;
//!
//! let dataset = load_csv(Path::new("data/iris.csv"))?;
//! for column in dataset.columns() {
//!     println!("{}: {} unique values", column.id(), column.cardinality());
//! }
//! ```

mod csv;
mod dataset;
mod error;

// === Error Types ===
pub use error::{LoadError, Result};

// === Header Detection ===
pub use self::csv::{CsvHeaders, is_header_row, is_numeric_cell};

// === CSV Reading ===
pub use self::csv::{
    MAX_CSV_FILE_SIZE, check_file_size, check_file_size_with_limit, check_record_widths,
    read_first_record, validate_encoding,
};

// === Dataset Model ===
pub use dataset::{Dataset, DatasetColumn, MISSING_LABEL, load_csv};
