//! CLI library components for the column classifier.

pub mod logging;
pub mod report;
pub mod settings;
pub mod workflow;
