//! Classification report: a snapshot of the session for display.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use serde::Serialize;

use colclass_core::Session;
use colclass_model::{ClassifyError, ColumnType, TypeColor};

/// Marker shown next to flagged columns.
pub const WARNING_MARK: &str = "⚠";

/// Per-column line of a report.
#[derive(Debug, Clone, Serialize)]
pub struct ColumnReport {
    pub id: String,
    pub label: Option<String>,
    pub cardinality: usize,
    pub column_type: ColumnType,
    pub warning: bool,
}

/// Everything the shell shows about the loaded dataset.
#[derive(Debug, Clone, Serialize)]
pub struct ClassificationReport {
    pub source: String,
    pub rows: usize,
    pub columns: usize,
    pub has_header: bool,
    pub threshold: u64,
    pub can_proceed: bool,
    pub entries: Vec<ColumnReport>,
}

impl ClassificationReport {
    pub fn from_session(session: &Session) -> Result<Self, ClassifyError> {
        let (Some(dataset), Some(registry)) = (session.dataset(), session.registry()) else {
            return Err(ClassifyError::NoDataset);
        };

        let entries = dataset
            .columns()
            .iter()
            .map(|col| ColumnReport {
                id: col.id().name(),
                label: col.label().map(str::to_string),
                cardinality: col.cardinality(),
                column_type: registry.column_type(col.id()).unwrap_or_default(),
                warning: registry.is_flagged(col.id()),
            })
            .collect();

        Ok(Self {
            source: dataset.source().display().to_string(),
            rows: dataset.height(),
            columns: dataset.width(),
            has_header: dataset.has_header(),
            threshold: registry.threshold().value(),
            can_proceed: session.can_proceed(),
            entries,
        })
    }

    pub fn warning_count(&self) -> usize {
        self.entries.iter().filter(|entry| entry.warning).count()
    }

    /// One-line dataset summary.
    pub fn info_line(&self) -> String {
        format!("Dataset Info: {} rows, {} columns", self.rows, self.columns)
    }
}

/// Builds the column table.
pub fn render_table(report: &ClassificationReport) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Label"),
        header_cell("Unique values"),
        header_cell("Type"),
        header_cell("Warning"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Center);

    for entry in &report.entries {
        table.add_row(vec![
            Cell::new(&entry.id),
            Cell::new(entry.label.as_deref().unwrap_or(colclass_ingest::MISSING_LABEL)),
            Cell::new(entry.cardinality),
            type_cell(entry.column_type),
            warning_cell(entry.warning),
        ]);
    }
    table
}

/// Prints the dataset summary, the column table and the gate status.
pub fn print_report(report: &ClassificationReport) {
    println!("{}", report.info_line());
    println!("Threshold: {}", report.threshold);
    println!("{}", render_table(report));
    if report.can_proceed {
        println!("All warnings resolved: run and export are enabled.");
    } else {
        println!(
            "{} column(s) below the threshold: classify them to enable run and export.",
            report.warning_count()
        );
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label).add_attribute(Attribute::Bold)
}

fn type_cell(column_type: ColumnType) -> Cell {
    let color = match column_type.color() {
        TypeColor::Blue => Color::Blue,
        TypeColor::Green => Color::Green,
        TypeColor::Red => Color::Red,
    };
    Cell::new(column_type).fg(color)
}

fn warning_cell(flagged: bool) -> Cell {
    if flagged {
        Cell::new(WARNING_MARK)
            .fg(Color::Red)
            .add_attribute(Attribute::Bold)
    } else {
        Cell::new("")
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use colclass_model::Threshold;

    fn session() -> Session {
        let mut session = Session::new(Threshold::new(2));
        session
            .load_rows(&[vec!["age", "sex"], vec!["30", "F"], vec!["41", "F"]])
            .unwrap();
        session
    }

    #[test]
    fn test_report_requires_dataset() {
        let result = ClassificationReport::from_session(&Session::default());
        assert!(matches!(result, Err(ClassifyError::NoDataset)));
    }

    #[test]
    fn test_report_counts_warnings() {
        let report = ClassificationReport::from_session(&session()).unwrap();
        assert_eq!(report.warning_count(), 1);
        assert_eq!(report.info_line(), "Dataset Info: 2 rows, 2 columns");
        assert!(!report.can_proceed);
    }

    #[test]
    fn test_table_marks_flagged_columns() {
        let report = ClassificationReport::from_session(&session()).unwrap();
        let rendered = render_table(&report).to_string();
        assert!(rendered.contains("Feature #1"));
        assert!(rendered.contains("sex"));
        assert!(rendered.contains(WARNING_MARK));
        assert!(rendered.contains("Numeric"));
    }
}
