//! Error types for classification operations.

use thiserror::Error;

/// Errors raised by the classification registry, task gate and planner.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassifyError {
    /// Threshold input was not a non-negative integer.
    #[error("invalid threshold '{input}': expected a non-negative whole number")]
    InvalidThreshold { input: String },

    /// Column identifier is not present in the registry.
    #[error("unknown column '{column}'")]
    UnknownColumn { column: String },

    /// Type name is not one of Numeric, Nominal or Ordinal.
    #[error("unknown column type '{value}': expected Numeric, Nominal or Ordinal")]
    UnknownColumnType { value: String },

    /// An operation needs a dataset but none has been loaded.
    #[error("no dataset loaded")]
    NoDataset,

    /// A downstream action was requested while warnings are outstanding.
    #[error("{} column(s) still have low-cardinality warnings: {}", .pending.len(), .pending.join(", "))]
    GateNotSatisfied { pending: Vec<String> },
}

/// Result type for classification operations.
pub type Result<T> = std::result::Result<T, ClassifyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ClassifyError::GateNotSatisfied {
            pending: vec!["Feature #0".to_string(), "Feature #2".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "2 column(s) still have low-cardinality warnings: Feature #0, Feature #2"
        );
    }

    #[test]
    fn test_invalid_threshold_display() {
        let err = ClassifyError::InvalidThreshold {
            input: "abc".to_string(),
        };
        assert!(err.to_string().contains("'abc'"));
    }
}
