//! Column identifiers and semantic column types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ClassifyError;

/// Prefix of the synthetic column name (`Feature #0`, `Feature #1`, ...).
const FEATURE_PREFIX: &str = "Feature #";

/// Synthetic, positional column identifier.
///
/// Assigned once at load time from the column's position and never
/// changed afterwards. Independent of any header label the file carried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnId(usize);

impl ColumnId {
    /// Creates the identifier for the column at `index`.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Zero-based column position.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }

    /// Synthetic display name, e.g. `Feature #3`.
    #[must_use]
    pub fn name(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{FEATURE_PREFIX}{}", self.0)
    }
}

impl FromStr for ColumnId {
    type Err = ClassifyError;

    /// Accepts `Feature #<n>` (case-insensitive prefix) or a bare index.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = match trimmed.get(..FEATURE_PREFIX.len()) {
            Some(prefix) if prefix.eq_ignore_ascii_case(FEATURE_PREFIX) => {
                &trimmed[FEATURE_PREFIX.len()..]
            }
            _ => trimmed,
        };
        digits
            .trim()
            .parse::<usize>()
            .map(Self)
            .map_err(|_| ClassifyError::UnknownColumn {
                column: trimmed.to_string(),
            })
    }
}

/// Semantic type assigned to a column.
///
/// Every column starts out as [`ColumnType::Numeric`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    /// Continuous or count values.
    #[default]
    Numeric,
    /// Unordered categories.
    Nominal,
    /// Ordered categories.
    Ordinal,
}

/// Display colour associated with a column type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeColor {
    Blue,
    Green,
    Red,
}

impl ColumnType {
    /// All types, in the order they are offered to the user.
    pub const ALL: [ColumnType; 3] = [ColumnType::Numeric, ColumnType::Nominal, ColumnType::Ordinal];

    /// Returns the canonical name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ColumnType::Numeric => "Numeric",
            ColumnType::Nominal => "Nominal",
            ColumnType::Ordinal => "Ordinal",
        }
    }

    /// Position of this type's bucket in exported output.
    ///
    /// Nominal columns are written first, then Ordinal, then Numeric.
    #[must_use]
    pub const fn export_rank(&self) -> u8 {
        match self {
            ColumnType::Nominal => 0,
            ColumnType::Ordinal => 1,
            ColumnType::Numeric => 2,
        }
    }

    /// Colour used when rendering a column of this type.
    #[must_use]
    pub const fn color(&self) -> TypeColor {
        match self {
            ColumnType::Numeric => TypeColor::Blue,
            ColumnType::Nominal => TypeColor::Green,
            ColumnType::Ordinal => TypeColor::Red,
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColumnType {
    type Err = ClassifyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "numeric" => Ok(ColumnType::Numeric),
            "nominal" => Ok(ColumnType::Nominal),
            "ordinal" => Ok(ColumnType::Ordinal),
            _ => Err(ClassifyError::UnknownColumnType {
                value: s.to_string(),
            }),
        }
    }
}
