//! Integration tests for CSV loading.

use std::io::Write;

use colclass_ingest::{LoadError, MISSING_LABEL, load_csv};
use colclass_model::ColumnId;
use tempfile::NamedTempFile;

fn create_temp_csv(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", content).unwrap();
    file
}

#[test]
fn load_with_header_keeps_labels() {
    let file = create_temp_csv("age,sex,score\n30,F,1.5\n41,M,2.5\n30,F,3.5\n");
    let dataset = load_csv(file.path()).unwrap();

    assert!(dataset.has_header());
    assert_eq!(dataset.height(), 3);
    assert_eq!(dataset.width(), 3);
    assert_eq!(dataset.label(ColumnId::new(1)), Some("sex"));
    assert_eq!(dataset.cardinality(ColumnId::new(0)), Some(2));
    assert_eq!(dataset.cardinality(ColumnId::new(1)), Some(2));
    assert_eq!(dataset.cardinality(ColumnId::new(2)), Some(3));
    assert_eq!(dataset.source(), file.path());
}

#[test]
fn load_without_header_reads_first_row_as_data() {
    let file = create_temp_csv("1,2,3\n4,5,6\n");
    let dataset = load_csv(file.path()).unwrap();

    assert!(!dataset.has_header());
    assert_eq!(dataset.height(), 2);
    for column in dataset.columns() {
        assert_eq!(column.label(), None);
        assert_eq!(column.display_label(), MISSING_LABEL);
        assert_eq!(column.cardinality(), 2);
    }
}

#[test]
fn load_mixed_header_row_is_header() {
    let file = create_temp_csv("x,1,2\n7,8,9\n");
    let dataset = load_csv(file.path()).unwrap();

    assert!(dataset.has_header());
    assert_eq!(dataset.height(), 1);
    assert_eq!(dataset.label(ColumnId::new(0)), Some("x"));
}

#[test]
fn load_missing_values_count_once() {
    let file = create_temp_csv("a,b\n1,\n2,\n3,x\n");
    let dataset = load_csv(file.path()).unwrap();

    assert_eq!(dataset.cardinality(ColumnId::new(1)), Some(2));
}

#[test]
fn load_empty_file_fails() {
    let file = create_temp_csv("");
    assert!(matches!(
        load_csv(file.path()),
        Err(LoadError::EmptyCsv { .. })
    ));
}

#[test]
fn load_header_only_fails() {
    let file = create_temp_csv("a,b,c\n");
    assert!(matches!(
        load_csv(file.path()),
        Err(LoadError::EmptyDataFrame { .. })
    ));
}

#[test]
fn load_missing_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.csv");
    assert!(matches!(
        load_csv(&path),
        Err(LoadError::FileNotFound { .. })
    ));
}

#[test]
fn load_ragged_headerless_file_fails() {
    let file = create_temp_csv("1,2\n3,4,5\n");
    assert!(matches!(
        load_csv(file.path()),
        Err(LoadError::RaggedRow {
            row: 2,
            expected: 2,
            found: 3
        })
    ));
}

#[test]
fn load_short_row_after_header_fails() {
    let file = create_temp_csv("a,b,c\n1,2,3\n4,5\n");
    assert!(matches!(
        load_csv(file.path()),
        Err(LoadError::RaggedRow {
            row: 3,
            expected: 3,
            found: 2
        })
    ));
}
