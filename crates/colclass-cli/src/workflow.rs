//! Session steps shared by the subcommands.

use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use tracing::{info, warn};

use colclass_core::{AverageHandle, ExportOptions, Session, TaskOutcome};
use colclass_model::ClassifyError;

use crate::settings::Settings;

/// How often a running task is polled.
pub const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// One `--type COLUMN=TYPE` argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeAssignment {
    pub column: String,
    pub column_type: String,
}

/// Splits on the last `=` so labels may themselves contain `=`.
pub fn parse_type_assignment(raw: &str) -> std::result::Result<TypeAssignment, String> {
    let (column, column_type) = raw
        .rsplit_once('=')
        .ok_or_else(|| format!("expected COLUMN=TYPE, got '{raw}'"))?;
    if column.trim().is_empty() {
        return Err(format!("missing column in '{raw}'"));
    }
    Ok(TypeAssignment {
        column: column.trim().to_string(),
        column_type: column_type.trim().to_string(),
    })
}

/// Loads `input`, then applies the threshold and the type assignments in
/// that order.
pub fn prepare_session(
    input: &Path,
    threshold: Option<&str>,
    types: &[TypeAssignment],
    settings: &Settings,
) -> Result<Session> {
    let mut session = Session::new(settings.classification.threshold);
    session
        .load_csv(input)
        .with_context(|| format!("load {}", input.display()))?;

    if let Some(raw) = threshold {
        let threshold = session.set_threshold(raw)?;
        info!(threshold = threshold.value(), "threshold applied");
    }
    for assignment in types {
        let id = session
            .classify(&assignment.column, &assignment.column_type)
            .with_context(|| format!("classify '{}'", assignment.column))?;
        info!(column = %id, column_type = %assignment.column_type, "column classified");
    }
    Ok(session)
}

/// Fails with the user-facing reason while warnings remain.
pub fn ensure_export_allowed(session: &Session) -> Result<()> {
    let status = session.gate_status().ok_or(ClassifyError::NoDataset)?;
    if let Some(reason) = status.reason() {
        warn!("export refused: {reason}");
        bail!(reason);
    }
    Ok(())
}

/// What an export wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub path: PathBuf,
    /// Columns in written order, `Feature #n (label)` when labelled.
    pub columns: Vec<String>,
}

/// Checks the gate, then writes the reordered data to `output`.
pub fn export_session(
    session: &Session,
    output: &Path,
    options: ExportOptions,
) -> Result<ExportSummary> {
    ensure_export_allowed(session)?;
    let path = session
        .export(output, options)
        .with_context(|| format!("export to {}", output.display()))?;
    let plan = session.plan()?;
    let dataset = session.dataset().ok_or(ClassifyError::NoDataset)?;

    let columns = plan
        .ordered()
        .into_iter()
        .map(|id| match dataset.label(id) {
            Some(label) => format!("{id} ({label})"),
            None => id.to_string(),
        })
        .collect();
    Ok(ExportSummary { path, columns })
}

/// Polls `handle` until it finishes, cancelling it once `timeout` elapses.
///
/// `on_tick` receives the elapsed time between polls.
pub fn wait_with_timeout(
    mut handle: AverageHandle,
    timeout: Option<Duration>,
    mut on_tick: impl FnMut(Duration),
) -> TaskOutcome {
    loop {
        if let Some(limit) = timeout
            && handle.elapsed() >= limit
            && !handle.is_cancelled()
        {
            warn!(timeout_ms = limit.as_millis() as u64, "averaging timed out");
            handle.cancel();
        }
        handle.poll();
        if handle.outcome().is_some() {
            return handle.wait();
        }
        on_tick(handle.elapsed());
        thread::sleep(POLL_INTERVAL);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_type_assignment() {
        assert_eq!(
            parse_type_assignment("sex=nominal").unwrap(),
            TypeAssignment {
                column: "sex".to_string(),
                column_type: "nominal".to_string(),
            }
        );
        let with_equals = parse_type_assignment("a=b=Ordinal").unwrap();
        assert_eq!(with_equals.column, "a=b");
        assert_eq!(with_equals.column_type, "Ordinal");
    }

    #[test]
    fn test_parse_type_assignment_rejects_malformed() {
        assert!(parse_type_assignment("nominal").is_err());
        assert!(parse_type_assignment("=nominal").is_err());
    }

    #[test]
    fn test_export_refused_without_dataset() {
        let error = ensure_export_allowed(&Session::default()).unwrap_err();
        assert_eq!(error.to_string(), "no dataset loaded");
    }
}
