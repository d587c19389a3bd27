//! Header-less CSV export of the planned column order.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use colclass_ingest::Dataset;
use colclass_model::ClassifyError;
use polars::prelude::*;
use thiserror::Error;
use tracing::info;

use crate::plan::ExportPlan;

/// Errors that can occur while exporting.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The gate was closed or the plan referenced an unknown column.
    #[error(transparent)]
    Classify(#[from] ClassifyError),

    /// Output file exists and overwriting was not requested.
    #[error("output file already exists: {path}")]
    AlreadyExists { path: PathBuf },

    /// Failed to create or write the output file.
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<PolarsError> for ExportError {
    fn from(err: PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for export operations.
pub type Result<T> = std::result::Result<T, ExportError>;

/// Export behaviour switches.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExportOptions {
    /// Replace an existing output file.
    pub overwrite: bool,
}

/// Selects the dataset's columns in planned order.
pub fn export_frame(dataset: &Dataset, plan: &ExportPlan) -> Result<DataFrame> {
    Ok(dataset.frame().select(plan.ordered_names())?)
}

/// Writes the planned columns as CSV without a header row.
pub fn write_export_to<W: Write>(
    dataset: &Dataset,
    plan: &ExportPlan,
    writer: W,
) -> Result<()> {
    let mut frame = export_frame(dataset, plan)?;
    CsvWriter::new(writer)
        .include_header(false)
        .finish(&mut frame)?;
    Ok(())
}

/// Writes the planned columns to `path`.
pub fn write_export(
    dataset: &Dataset,
    plan: &ExportPlan,
    path: &Path,
    options: ExportOptions,
) -> Result<PathBuf> {
    if path.exists() && !options.overwrite {
        return Err(ExportError::AlreadyExists {
            path: path.to_path_buf(),
        });
    }

    let write_error = |e: std::io::Error| ExportError::Write {
        path: path.to_path_buf(),
        source: e,
    };
    let file = File::create(path).map_err(write_error)?;
    let mut writer = BufWriter::new(file);
    write_export_to(dataset, plan, &mut writer)?;
    writer.flush().map_err(write_error)?;

    info!(
        path = %path.display(),
        rows = dataset.height(),
        columns = plan.len(),
        "data exported"
    );
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::ClassificationRegistry;
    use colclass_model::{ColumnId, ColumnType, Threshold};
    use tempfile::TempDir;

    fn planned() -> (Dataset, ExportPlan) {
        let dataset = Dataset::from_rows(&[
            vec!["age", "sex", "grade"],
            vec!["30", "F", "low"],
            vec!["41", "M", "high"],
        ])
        .unwrap();
        let mut registry = ClassificationRegistry::initialize(&dataset, Threshold::new(0));
        registry.set_type(ColumnId::new(1), ColumnType::Nominal).unwrap();
        registry.set_type(ColumnId::new(2), ColumnType::Ordinal).unwrap();
        let plan = ExportPlan::build(&dataset, &registry).unwrap();
        (dataset, plan)
    }

    #[test]
    fn test_export_has_no_header_and_reordered_values() {
        let (dataset, plan) = planned();
        let mut buffer = Vec::new();
        write_export_to(&dataset, &plan, &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(text, "F,low,30\nM,high,41\n");
    }

    #[test]
    fn test_rows_and_file_export_the_same_values() {
        let content = "age,sex,score\n30,F,1.5\n41,M,2.5\n";
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("input.csv");
        std::fs::write(&input, content).unwrap();

        let from_file = colclass_ingest::load_csv(&input).unwrap();
        let from_rows = Dataset::from_rows(&[
            vec!["age", "sex", "score"],
            vec!["30", "F", "1.5"],
            vec!["41", "M", "2.5"],
        ])
        .unwrap();

        let export = |dataset: &Dataset| {
            let mut registry = ClassificationRegistry::initialize(dataset, Threshold::new(0));
            registry.set_type(ColumnId::new(1), ColumnType::Nominal).unwrap();
            let plan = ExportPlan::build(dataset, &registry).unwrap();
            let mut buffer = Vec::new();
            write_export_to(dataset, &plan, &mut buffer).unwrap();
            String::from_utf8(buffer).unwrap()
        };

        assert_eq!(export(&from_rows), "F,30,1.5\nM,41,2.5\n");
        assert_eq!(export(&from_file), export(&from_rows));
    }

    #[test]
    fn test_write_export_refuses_overwrite() {
        let (dataset, plan) = planned();
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.csv");

        write_export(&dataset, &plan, &path, ExportOptions::default()).unwrap();
        let second = write_export(&dataset, &plan, &path, ExportOptions::default());
        assert!(matches!(second, Err(ExportError::AlreadyExists { .. })));

        let forced = write_export(&dataset, &plan, &path, ExportOptions { overwrite: true });
        assert!(forced.is_ok());
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 2);
    }
}
