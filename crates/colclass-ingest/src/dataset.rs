//! The loaded dataset and its column metadata.

use std::path::{Path, PathBuf};

use colclass_model::ColumnId;
use polars::prelude::*;
use tracing::{debug, info};

use crate::csv::{
    CsvHeaders, check_file_size, check_record_widths, read_csv_frame, read_first_record,
    validate_encoding,
};
use crate::error::{LoadError, Result};

/// Text shown in place of a label when the source had no header row.
pub const MISSING_LABEL: &str = "NaN";

/// Source name used in errors for datasets built from in-memory rows.
const IN_MEMORY_SOURCE: &str = "<rows>";

/// Metadata for one loaded column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetColumn {
    id: ColumnId,
    label: Option<String>,
    cardinality: usize,
}

impl DatasetColumn {
    /// Synthetic identifier.
    pub fn id(&self) -> ColumnId {
        self.id
    }

    /// Original header label, if the source had a header row.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Label for display, [`MISSING_LABEL`] when absent.
    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(MISSING_LABEL)
    }

    /// Number of distinct values, a missing value counting as one.
    pub fn cardinality(&self) -> usize {
        self.cardinality
    }
}

/// A loaded table with synthetic column identifiers.
///
/// Built once per load and replaced wholesale by the next one. The frame's
/// column names are the synthetic identifiers (`Feature #0`, ...), original
/// labels live in [`DatasetColumn::label`].
#[derive(Debug, Clone)]
pub struct Dataset {
    columns: Vec<DatasetColumn>,
    frame: DataFrame,
    source: PathBuf,
}

/// Loads a CSV file, detecting whether its first row is a header.
pub fn load_csv(path: &Path) -> Result<Dataset> {
    check_file_size(path)?;
    validate_encoding(path)?;

    let first_row = read_first_record(path)?.ok_or_else(|| LoadError::EmptyCsv {
        path: path.to_path_buf(),
    })?;
    let headers = CsvHeaders::detect(first_row.as_slice());
    debug!(
        path = %path.display(),
        has_header = headers.has_header(),
        width = headers.width,
        "header detection complete"
    );
    check_record_widths(path, headers.width)?;

    let frame = read_csv_frame(path, headers.has_header())?;
    let dataset = Dataset::from_frame(frame, headers.labels, path.to_path_buf())?;
    info!(
        path = %path.display(),
        rows = dataset.height(),
        columns = dataset.width(),
        has_header = dataset.has_header(),
        "dataset loaded"
    );
    Ok(dataset)
}

impl Dataset {
    /// Builds a dataset from raw string rows.
    ///
    /// The first row goes through header detection exactly like a file
    /// would. Empty cells are missing values. A column whose present cells
    /// all read as numbers is stored as `Float64`, any other as text.
    pub fn from_rows<S: AsRef<str>>(rows: &[Vec<S>]) -> Result<Self> {
        let source = PathBuf::from(IN_MEMORY_SOURCE);
        let Some(first) = rows.first() else {
            return Err(LoadError::EmptyCsv { path: source });
        };
        let headers = CsvHeaders::detect(first.as_slice());
        let width = headers.width;

        let data = &rows[headers.skip_rows..];
        for (offset, row) in data.iter().enumerate() {
            let found = row.len();
            if found != width {
                return Err(LoadError::RaggedRow {
                    row: offset + headers.skip_rows + 1,
                    expected: width,
                    found,
                });
            }
        }

        let columns: Vec<Column> = (0..width)
            .map(|idx| {
                let cells: Vec<Option<&str>> = data
                    .iter()
                    .map(|row| {
                        let cell = row[idx].as_ref();
                        (!cell.trim().is_empty()).then_some(cell)
                    })
                    .collect();
                build_column(ColumnId::new(idx).name(), &cells)
            })
            .collect();

        let frame = DataFrame::new(columns)?;
        Self::from_frame(frame, headers.labels, source)
    }

    /// Wraps a parsed frame, renaming columns to synthetic identifiers and
    /// computing cardinalities.
    fn from_frame(
        mut frame: DataFrame,
        labels: Option<Vec<String>>,
        source: PathBuf,
    ) -> Result<Self> {
        if frame.height() == 0 {
            return Err(LoadError::EmptyDataFrame { path: source });
        }

        let names: Vec<String> = (0..frame.width()).map(|idx| ColumnId::new(idx).name()).collect();
        frame.set_column_names(names)?;

        let mut columns = Vec::with_capacity(frame.width());
        for (idx, col) in frame.get_columns().iter().enumerate() {
            let label = labels
                .as_ref()
                .and_then(|labels| labels.get(idx).cloned());
            columns.push(DatasetColumn {
                id: ColumnId::new(idx),
                label,
                cardinality: col.n_unique()?,
            });
        }

        Ok(Self {
            columns,
            frame,
            source,
        })
    }

    /// Number of data rows.
    pub fn height(&self) -> usize {
        self.frame.height()
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Columns in their original left-to-right order.
    pub fn columns(&self) -> &[DatasetColumn] {
        &self.columns
    }

    /// Column identifiers in their original order.
    pub fn column_ids(&self) -> impl Iterator<Item = ColumnId> + '_ {
        self.columns.iter().map(DatasetColumn::id)
    }

    /// Looks up a column by identifier.
    pub fn column(&self, id: ColumnId) -> Option<&DatasetColumn> {
        self.columns.get(id.index())
    }

    /// Distinct-value count of a column.
    pub fn cardinality(&self, id: ColumnId) -> Option<usize> {
        self.column(id).map(DatasetColumn::cardinality)
    }

    /// Original label of a column, if the source had a header.
    pub fn label(&self, id: ColumnId) -> Option<&str> {
        self.column(id).and_then(DatasetColumn::label)
    }

    /// Returns true if the first row of the source was a header.
    pub fn has_header(&self) -> bool {
        self.columns.iter().any(|col| col.label.is_some())
    }

    /// Resolves a user-supplied column reference.
    ///
    /// Accepts a synthetic identifier (`Feature #2`), a bare index, or an
    /// original label (exact match first, then case-insensitive).
    pub fn resolve(&self, name: &str) -> Option<ColumnId> {
        if let Ok(id) = name.parse::<ColumnId>()
            && self.column(id).is_some()
        {
            return Some(id);
        }
        let name = name.trim();
        self.columns
            .iter()
            .find(|col| col.label() == Some(name))
            .or_else(|| {
                self.columns.iter().find(|col| {
                    col.label()
                        .is_some_and(|label| label.eq_ignore_ascii_case(name))
                })
            })
            .map(DatasetColumn::id)
    }

    /// Read-only view of the values, columns named by synthetic identifier.
    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    /// Where the dataset was loaded from.
    pub fn source(&self) -> &Path {
        &self.source
    }
}

/// Builds a typed column from raw cells.
///
/// Integers stay `Int64` so they are written back unchanged, other numbers
/// become `Float64`, anything else is text.
fn build_column(name: String, cells: &[Option<&str>]) -> Column {
    let present = || cells.iter().flatten().map(|cell| cell.trim());

    if present().all(|cell| cell.parse::<i64>().is_ok()) {
        let values: Vec<Option<i64>> = cells
            .iter()
            .map(|cell| cell.and_then(|value| value.trim().parse::<i64>().ok()))
            .collect();
        Series::new(name.into(), values).into_column()
    } else if present().all(|cell| cell.parse::<f64>().is_ok()) {
        let values: Vec<Option<f64>> = cells
            .iter()
            .map(|cell| cell.and_then(|value| value.trim().parse::<f64>().ok()))
            .collect();
        Series::new(name.into(), values).into_column()
    } else {
        Series::new(name.into(), cells).into_column()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rows_with_header() {
        let dataset = Dataset::from_rows(&[
            vec!["x", "1", "2"],
            vec!["a", "3", "4"],
            vec!["b", "3", "5"],
        ])
        .unwrap();

        assert!(dataset.has_header());
        assert_eq!(dataset.height(), 2);
        assert_eq!(dataset.width(), 3);
        assert_eq!(dataset.label(ColumnId::new(0)), Some("x"));
        assert_eq!(dataset.label(ColumnId::new(2)), Some("2"));
        assert_eq!(dataset.cardinality(ColumnId::new(1)), Some(1));
        assert_eq!(dataset.cardinality(ColumnId::new(2)), Some(2));
    }

    #[test]
    fn test_from_rows_without_header() {
        let dataset = Dataset::from_rows(&[vec!["1", "2"], vec!["1", "3"]]).unwrap();

        assert!(!dataset.has_header());
        assert_eq!(dataset.height(), 2);
        assert_eq!(dataset.label(ColumnId::new(0)), None);
        assert_eq!(dataset.columns()[0].display_label(), MISSING_LABEL);
        assert_eq!(dataset.cardinality(ColumnId::new(0)), Some(1));
        assert_eq!(dataset.cardinality(ColumnId::new(1)), Some(2));
    }

    #[test]
    fn test_frame_uses_synthetic_names() {
        let dataset = Dataset::from_rows(&[vec!["age", "sex"], vec!["30", "F"]]).unwrap();
        let names: Vec<String> = dataset
            .frame()
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect();
        assert_eq!(names, vec!["Feature #0", "Feature #1"]);
    }

    #[test]
    fn test_missing_counts_as_one_value() {
        let dataset =
            Dataset::from_rows(&[vec!["a"], vec!["x"], vec![""], vec![""], vec!["y"]]).unwrap();
        assert_eq!(dataset.cardinality(ColumnId::new(0)), Some(3));
    }

    #[test]
    fn test_numeric_columns_are_float() {
        let dataset = Dataset::from_rows(&[vec!["v", "w"], vec!["1", "a"], vec!["2.5", "b"]]).unwrap();
        let frame = dataset.frame();
        assert_eq!(frame.column("Feature #0").unwrap().dtype(), &DataType::Float64);
        assert_eq!(frame.column("Feature #1").unwrap().dtype(), &DataType::String);
    }

    #[test]
    fn test_integer_columns_stay_integer() {
        let dataset =
            Dataset::from_rows(&[vec!["age", "n"], vec!["30", "-2"], vec!["41", ""]]).unwrap();
        let frame = dataset.frame();
        assert_eq!(frame.column("Feature #0").unwrap().dtype(), &DataType::Int64);
        assert_eq!(frame.column("Feature #1").unwrap().dtype(), &DataType::Int64);
        assert_eq!(dataset.cardinality(ColumnId::new(1)), Some(2));
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let result = Dataset::from_rows(&[vec!["a", "b"], vec!["1"]]);
        assert!(matches!(
            result,
            Err(LoadError::RaggedRow {
                row: 2,
                expected: 2,
                found: 1
            })
        ));
    }

    #[test]
    fn test_empty_rows_rejected() {
        let rows: Vec<Vec<&str>> = Vec::new();
        assert!(matches!(
            Dataset::from_rows(&rows),
            Err(LoadError::EmptyCsv { .. })
        ));
    }

    #[test]
    fn test_header_only_rejected() {
        let result = Dataset::from_rows(&[vec!["a", "b"]]);
        assert!(matches!(result, Err(LoadError::EmptyDataFrame { .. })));
    }

    #[test]
    fn test_resolve() {
        let dataset = Dataset::from_rows(&[vec!["Age", "Sex"], vec!["30", "F"]]).unwrap();
        assert_eq!(dataset.resolve("Feature #1"), Some(ColumnId::new(1)));
        assert_eq!(dataset.resolve("0"), Some(ColumnId::new(0)));
        assert_eq!(dataset.resolve("Sex"), Some(ColumnId::new(1)));
        assert_eq!(dataset.resolve("age"), Some(ColumnId::new(0)));
        assert_eq!(dataset.resolve("Feature #9"), None);
        assert_eq!(dataset.resolve("weight"), None);
    }
}
