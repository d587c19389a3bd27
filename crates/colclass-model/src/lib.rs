//! Shared types for column classification.
//!
//! This crate holds the vocabulary used by every other crate in the
//! workspace:
//!
//! - [`ColumnId`]: the synthetic, positional identifier assigned at load time
//! - [`ColumnType`]: the semantic type a user assigns to a column
//! - [`Threshold`]: the cardinality bound below which a column is flagged
//! - [`ClassifyError`]: failures raised by classification operations

mod column;
mod error;
mod threshold;

pub use column::{ColumnId, ColumnType, TypeColor};
pub use error::{ClassifyError, Result};
pub use threshold::Threshold;
