//! CSV file reading.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use polars::prelude::*;

use crate::error::{LoadError, Result};

/// Maximum file size for CSV loading (500 MB default).
pub const MAX_CSV_FILE_SIZE: u64 = 500 * 1024 * 1024;

fn open_error(path: &Path, e: std::io::Error) -> LoadError {
    if e.kind() == std::io::ErrorKind::NotFound {
        LoadError::FileNotFound {
            path: path.to_path_buf(),
        }
    } else {
        LoadError::FileRead {
            path: path.to_path_buf(),
            source: e,
        }
    }
}

/// Check file size before loading.
pub fn check_file_size(path: &Path) -> Result<()> {
    check_file_size_with_limit(path, MAX_CSV_FILE_SIZE)
}

/// Check file size against a custom limit.
pub fn check_file_size_with_limit(path: &Path, max_size: u64) -> Result<()> {
    let metadata = std::fs::metadata(path).map_err(|e| open_error(path, e))?;

    if metadata.len() > max_size {
        return Err(LoadError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size,
        });
    }

    Ok(())
}

/// Detect encoding and validate it's supported (UTF-8 only).
///
/// Checks for UTF-16 BOM markers which are not supported.
pub fn validate_encoding(path: &Path) -> Result<()> {
    let mut file = File::open(path).map_err(|e| open_error(path, e))?;

    let mut buffer = [0u8; 2];
    let bytes_read = file.read(&mut buffer).map_err(|e| LoadError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    if bytes_read == 2 {
        match buffer {
            [0xFF, 0xFE] => {
                return Err(LoadError::UnsupportedEncoding {
                    path: path.to_path_buf(),
                    encoding: "UTF-16 LE",
                });
            }
            [0xFE, 0xFF] => {
                return Err(LoadError::UnsupportedEncoding {
                    path: path.to_path_buf(),
                    encoding: "UTF-16 BE",
                });
            }
            _ => {}
        }
    }

    Ok(())
}

/// Reads the first record of a CSV file as raw cells.
///
/// Returns `None` when the file holds no records.
pub fn read_first_record(path: &Path) -> Result<Option<Vec<String>>> {
    let file = File::open(path).map_err(|e| open_error(path, e))?;
    let mut reader = ::csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(file);

    match reader.records().next() {
        None => Ok(None),
        Some(Ok(record)) => Ok(Some(
            record
                .iter()
                .enumerate()
                .map(|(idx, cell)| {
                    // Skip BOM if present
                    if idx == 0 {
                        cell.trim_start_matches('\u{feff}').to_string()
                    } else {
                        cell.to_string()
                    }
                })
                .collect(),
        )),
        Some(Err(e)) => Err(LoadError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        }),
    }
}

/// Checks that every record of a CSV file has `width` fields.
///
/// Fails with [`LoadError::RaggedRow`] naming the first offending line.
pub fn check_record_widths(path: &Path, width: usize) -> Result<()> {
    let file = File::open(path).map_err(|e| open_error(path, e))?;
    let mut reader = ::csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(file);
    for (idx, record) in reader.records().enumerate() {
        let record = record.map_err(|e| LoadError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        if record.len() != width {
            let row = record
                .position()
                .map_or(idx + 1, |pos| pos.line() as usize);
            return Err(LoadError::RaggedRow {
                row,
                expected: width,
                found: record.len(),
            });
        }
    }
    Ok(())
}

/// Reads a CSV file into a Polars DataFrame.
///
/// With `has_header = false` the first row is read as data.
pub fn read_csv_frame(path: &Path, has_header: bool) -> Result<DataFrame> {
    let parse_error = |e: PolarsError| LoadError::CsvParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    };

    CsvReadOptions::default()
        .with_has_header(has_header)
        .with_infer_schema_length(None)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(parse_error)?
        .finish()
        .map_err(parse_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_read_first_record() {
        let file = create_temp_csv("A,B,C\n1,2,3\n");
        let record = read_first_record(file.path()).unwrap();
        assert_eq!(record, Some(vec!["A".to_string(), "B".to_string(), "C".to_string()]));
    }

    #[test]
    fn test_read_first_record_with_bom() {
        let file = create_temp_csv("\u{feff}A,B\n1,2\n");
        let record = read_first_record(file.path()).unwrap().unwrap();
        assert_eq!(record[0], "A");
    }

    #[test]
    fn test_read_first_record_quoted() {
        let file = create_temp_csv("\"hello, world\",b\n");
        let record = read_first_record(file.path()).unwrap().unwrap();
        assert_eq!(record, vec!["hello, world", "b"]);
    }

    #[test]
    fn test_read_first_record_empty_file() {
        let file = create_temp_csv("");
        assert_eq!(read_first_record(file.path()).unwrap(), None);
    }

    #[test]
    fn test_missing_file() {
        let result = read_first_record(Path::new("/definitely/not/here.csv"));
        assert!(matches!(result, Err(LoadError::FileNotFound { .. })));
    }

    #[test]
    fn test_utf16_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&[0xFF, 0xFE, b'A', 0x00]).unwrap();
        let result = validate_encoding(file.path());
        assert!(matches!(
            result,
            Err(LoadError::UnsupportedEncoding {
                encoding: "UTF-16 LE",
                ..
            })
        ));
    }

    #[test]
    fn test_record_widths() {
        let file = create_temp_csv("a,b\n1,2\n3,4\n");
        assert!(check_record_widths(file.path(), 2).is_ok());

        let file = create_temp_csv("a,b\n1,2\n3\n");
        assert!(matches!(
            check_record_widths(file.path(), 2),
            Err(LoadError::RaggedRow {
                row: 3,
                expected: 2,
                found: 1
            })
        ));
    }

    #[test]
    fn test_file_size_limit() {
        let file = create_temp_csv("A,B\n1,2\n");
        assert!(check_file_size(file.path()).is_ok());
        assert!(matches!(
            check_file_size_with_limit(file.path(), 2),
            Err(LoadError::FileTooLarge { .. })
        ));
    }

    #[test]
    fn test_read_csv_frame_headerless() {
        let file = create_temp_csv("1,2,3\n4,5,6\n");
        let df = read_csv_frame(file.path(), false).unwrap();
        assert_eq!(df.height(), 2);
        assert_eq!(df.width(), 3);
    }

    #[test]
    fn test_read_csv_frame_with_header() {
        let file = create_temp_csv("A,B,C\n1,2,3\n4,5,6\n");
        let df = read_csv_frame(file.path(), true).unwrap();
        assert_eq!(df.height(), 2);
        assert_eq!(df.width(), 3);
    }
}
