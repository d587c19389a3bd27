//! CSV reading and header detection.

mod header;
mod reader;

pub use header::{CsvHeaders, is_header_row, is_numeric_cell};
pub use reader::{
    MAX_CSV_FILE_SIZE, check_file_size, check_file_size_with_limit, check_record_widths,
    read_csv_frame, read_first_record, validate_encoding,
};
