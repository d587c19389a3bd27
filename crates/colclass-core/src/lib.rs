//! Column classification state machine.
//!
//! The pieces, leaf first:
//!
//! - [`ClassificationRegistry`]: per-column types and the warning set
//! - [`TaskGate`]: whether downstream actions may run
//! - [`ExportPlan`]: the Nominal / Ordinal / Numeric output order
//! - [`write_export`]: header-less CSV output of the planned order
//! - [`AverageTask`]: the cancellable background statistic
//! - [`Session`]: owner of the current dataset and registry
//!
//! None of the mutating operations are thread-safe. Callers serialize them,
//! which [`Session`] enforces by taking `&mut self`. Only [`AverageTask`]
//! runs off the calling thread, against its own read-only snapshot.

mod average;
mod export;
mod gate;
mod plan;
mod registry;
mod session;

pub use average::{AverageHandle, AverageResult, AverageTask, TaskError, TaskOutcome, TaskUpdate, grand_mean};
pub use export::{ExportError, ExportOptions, export_frame, write_export, write_export_to};
pub use gate::{Action, GateStatus, TaskGate};
pub use plan::ExportPlan;
pub use registry::{ClassificationRegistry, RegistryEntry};
pub use session::Session;
