//! Cardinality threshold.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ClassifyError;

/// Minimum cardinality a column needs to escape a warning.
///
/// Columns with strictly fewer distinct values are flagged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Threshold(u64);

impl Threshold {
    /// Threshold used until the user enters another one.
    pub const DEFAULT: Threshold = Threshold(20);

    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }

    /// Returns true if a column with `cardinality` distinct values is flagged.
    #[must_use]
    pub fn flags(self, cardinality: usize) -> bool {
        (cardinality as u64) < self.0
    }
}

impl Default for Threshold {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Threshold {
    type Err = ClassifyError;

    /// Parses user input; only plain non-negative integers are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ClassifyError::InvalidThreshold {
                input: s.to_string(),
            });
        }
        trimmed
            .parse::<u64>()
            .map(Self)
            .map_err(|_| ClassifyError::InvalidThreshold {
                input: s.to_string(),
            })
    }
}
