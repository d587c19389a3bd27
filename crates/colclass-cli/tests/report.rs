//! Report rendering for the inspect command.

use std::fs;

use colclass_cli::report::{ClassificationReport, WARNING_MARK, render_table};
use colclass_cli::settings::load_settings;
use colclass_core::Session;
use colclass_model::Threshold;

fn flagged_session() -> Session {
    let mut session = Session::new(Threshold::new(2));
    session
        .load_rows(&[vec!["age", "sex"], vec!["30", "F"], vec!["41", "F"]])
        .unwrap();
    session
}

#[test]
fn json_report_lists_columns_and_gate() {
    let report = ClassificationReport::from_session(&flagged_session()).unwrap();
    insta::assert_json_snapshot!(report, @r#"
    {
      "source": "<rows>",
      "rows": 2,
      "columns": 2,
      "has_header": true,
      "threshold": 2,
      "can_proceed": false,
      "entries": [
        {
          "id": "Feature #0",
          "label": "age",
          "cardinality": 2,
          "column_type": "numeric",
          "warning": false
        },
        {
          "id": "Feature #1",
          "label": "sex",
          "cardinality": 1,
          "column_type": "numeric",
          "warning": true
        }
      ]
    }
    "#);
}

#[test]
fn classifying_clears_marker_and_opens_gate() {
    let mut session = flagged_session();
    session.classify("sex", "nominal").unwrap();
    let report = ClassificationReport::from_session(&session).unwrap();

    assert!(report.can_proceed);
    assert_eq!(report.warning_count(), 0);
    assert!(!render_table(&report).to_string().contains(WARNING_MARK));
}

#[test]
fn headerless_columns_render_missing_label() {
    let mut session = Session::new(Threshold::new(0));
    session.load_rows(&[vec!["1", "2"], vec!["3", "4"]]).unwrap();
    let report = ClassificationReport::from_session(&session).unwrap();

    assert!(!report.has_header);
    assert!(report.entries.iter().all(|entry| entry.label.is_none()));
    assert!(render_table(&report).to_string().contains("NaN"));
}

#[test]
fn settings_threshold_seeds_session() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.toml");
    fs::write(&path, "[classification]\nthreshold = 3\n").unwrap();
    let settings = load_settings(Some(&path));

    let mut session = Session::new(settings.classification.threshold);
    session
        .load_rows(&[vec!["a"], vec!["x"], vec!["y"], vec!["y"]])
        .unwrap();
    let report = ClassificationReport::from_session(&session).unwrap();
    assert_eq!(report.threshold, 3);
    assert_eq!(report.warning_count(), 1);
}
