//! Enablement of downstream actions.

use std::fmt;

use colclass_model::{ClassifyError, ColumnId, Result};
use tracing::warn;

use crate::registry::ClassificationRegistry;

/// A downstream action guarded by the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Start the averaging task.
    Run,
    /// Write the reordered columns.
    Export,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Run => f.write_str("run"),
            Action::Export => f.write_str("export"),
        }
    }
}

/// Outcome of evaluating the gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateStatus {
    Open,
    Blocked { pending: Vec<ColumnId> },
}

impl GateStatus {
    pub fn is_open(&self) -> bool {
        matches!(self, GateStatus::Open)
    }

    /// User-facing explanation when blocked.
    pub fn reason(&self) -> Option<String> {
        match self {
            GateStatus::Open => None,
            GateStatus::Blocked { pending } => Some(format!(
                "Please address the features with warnings first ({} remaining).",
                pending.len()
            )),
        }
    }
}

/// Read-only view deciding whether run/export may proceed.
///
/// The rule is a single one: the registry's warning set must be empty.
#[derive(Debug, Clone, Copy)]
pub struct TaskGate<'a> {
    registry: &'a ClassificationRegistry,
}

impl<'a> TaskGate<'a> {
    pub fn new(registry: &'a ClassificationRegistry) -> Self {
        Self { registry }
    }

    pub fn can_proceed(&self) -> bool {
        self.registry.warnings().is_empty()
    }

    pub fn status(&self) -> GateStatus {
        if self.can_proceed() {
            GateStatus::Open
        } else {
            GateStatus::Blocked {
                pending: self.registry.warnings().iter().copied().collect(),
            }
        }
    }

    /// Fails with [`ClassifyError::GateNotSatisfied`] unless the gate is open.
    pub fn ensure(&self, action: Action) -> Result<()> {
        match self.status() {
            GateStatus::Open => Ok(()),
            GateStatus::Blocked { pending } => {
                warn!(%action, pending = pending.len(), "action refused: warnings outstanding");
                Err(ClassifyError::GateNotSatisfied {
                    pending: pending.iter().map(|id| id.name()).collect(),
                })
            }
        }
    }
}
