//! Header row detection.
//!
//! A first row is treated as data when every cell reads as a number and as
//! a header as soon as one cell does not.

/// Result of header analysis on the first row of a source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvHeaders {
    /// Original column labels, present only when the first row is a header.
    pub labels: Option<Vec<String>>,
    /// Number of cells in the first row.
    pub width: usize,
    /// Number of rows to skip before data (1 with a header, 0 without).
    pub skip_rows: usize,
}

impl CsvHeaders {
    /// Analyzes the first row of a source.
    pub fn detect<S: AsRef<str>>(first_row: &[S]) -> Self {
        if is_header_row(first_row) {
            Self::header(first_row.iter().map(|cell| normalize_header(cell.as_ref())).collect())
        } else {
            Self::headerless(first_row.len())
        }
    }

    /// Creates a CsvHeaders for a source whose first row holds labels.
    pub fn header(labels: Vec<String>) -> Self {
        Self {
            width: labels.len(),
            labels: Some(labels),
            skip_rows: 1,
        }
    }

    /// Creates a CsvHeaders for a source whose first row is already data.
    pub fn headerless(width: usize) -> Self {
        Self {
            labels: None,
            width,
            skip_rows: 0,
        }
    }

    /// Returns true if the first row was classified as a header.
    pub fn has_header(&self) -> bool {
        self.labels.is_some()
    }

    /// Returns the label at `index` if a header was detected.
    pub fn label_at(&self, index: usize) -> Option<&str> {
        self.labels
            .as_ref()
            .and_then(|labels| labels.get(index).map(String::as_str))
    }
}

/// Returns true if the row is a header row.
///
/// Every cell is run through [`is_numeric_cell`]; a single failure makes the
/// row a header. An empty row is vacuously numeric and is therefore *not* a
/// header.
pub fn is_header_row<S: AsRef<str>>(row: &[S]) -> bool {
    !row.iter().all(|cell| is_numeric_cell(cell.as_ref()))
}

/// Returns true if a raw cell reads as a number.
///
/// Empty cells are missing values and count as numeric.
pub fn is_numeric_cell(cell: &str) -> bool {
    let trimmed = cell.trim();
    trimmed.is_empty() || trimmed.parse::<f64>().is_ok()
}

/// Normalizes a header value by trimming whitespace and a leading BOM.
pub fn normalize_header(value: &str) -> String {
    value.trim_start_matches('\u{feff}').trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_detected_when_any_cell_is_text() {
        assert!(is_header_row(&["x", "1", "2"]));
        assert!(is_header_row(&["1", "2", "total"]));
    }

    #[test]
    fn test_numeric_row_is_data() {
        assert!(!is_header_row(&["1", "2", "3"]));
        assert!(!is_header_row(&["-1.5", "2e3", " 4 "]));
    }

    #[test]
    fn test_empty_row_is_not_header() {
        let row: [&str; 0] = [];
        assert!(!is_header_row(&row));
    }

    #[test]
    fn test_missing_cells_count_as_numeric() {
        assert!(!is_header_row(&["1", "", "3"]));
        assert!(is_numeric_cell("   "));
    }

    #[test]
    fn test_special_float_spellings() {
        assert!(is_numeric_cell("NaN"));
        assert!(is_numeric_cell("inf"));
        assert!(!is_numeric_cell("1,5"));
    }

    #[test]
    fn test_detect_keeps_labels() {
        let headers = CsvHeaders::detect(&["  age ", "\u{feff}sex"]);
        assert!(headers.has_header());
        assert_eq!(headers.skip_rows, 1);
        assert_eq!(headers.label_at(0), Some("age"));
        assert_eq!(headers.label_at(1), Some("sex"));
        assert_eq!(headers.label_at(2), None);
    }

    #[test]
    fn test_detect_headerless() {
        let headers = CsvHeaders::detect(&["1", "2"]);
        assert!(!headers.has_header());
        assert_eq!(headers.width, 2);
        assert_eq!(headers.skip_rows, 0);
        assert_eq!(headers.label_at(0), None);
    }
}
