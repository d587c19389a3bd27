//! Per-column type assignments and the warning set.

use std::collections::BTreeSet;

use colclass_ingest::Dataset;
use colclass_model::{ClassifyError, ColumnId, ColumnType, Result, Threshold};
use tracing::{debug, info, warn};

/// One column's classification state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistryEntry {
    pub id: ColumnId,
    pub cardinality: usize,
    pub column_type: ColumnType,
}

/// Tracks the type of every loaded column and which columns are flagged.
///
/// Warning membership is recomputed from scratch only when the threshold
/// changes. Classifying a column clears its warning without looking at the
/// cardinality again, and the warning stays cleared until the next full
/// recompute.
#[derive(Debug, Clone)]
pub struct ClassificationRegistry {
    threshold: Threshold,
    entries: Vec<RegistryEntry>,
    warnings: BTreeSet<ColumnId>,
}

impl ClassificationRegistry {
    /// Seeds the registry for a freshly loaded dataset.
    ///
    /// Every column starts as [`ColumnType::Numeric`].
    pub fn initialize(dataset: &Dataset, threshold: Threshold) -> Self {
        let entries = dataset
            .columns()
            .iter()
            .map(|col| RegistryEntry {
                id: col.id(),
                cardinality: col.cardinality(),
                column_type: ColumnType::default(),
            })
            .collect();
        let mut registry = Self {
            threshold,
            entries,
            warnings: BTreeSet::new(),
        };
        registry.recompute();
        registry
    }

    /// Current threshold.
    pub fn threshold(&self) -> Threshold {
        self.threshold
    }

    /// Parses and applies a threshold entered as text.
    ///
    /// On failure nothing changes.
    pub fn set_threshold(&mut self, input: &str) -> Result<Threshold> {
        let threshold: Threshold = input.parse()?;
        self.apply_threshold(threshold);
        Ok(threshold)
    }

    /// Applies a validated threshold and recomputes every warning.
    ///
    /// Types are left alone.
    pub fn apply_threshold(&mut self, threshold: Threshold) {
        let previous = self.threshold;
        self.threshold = threshold;
        self.recompute();
        info!(
            previous = previous.value(),
            threshold = threshold.value(),
            flagged = self.warnings.len(),
            "threshold updated"
        );
    }

    /// Assigns a type to a column and resolves its warning.
    pub fn set_type(&mut self, id: ColumnId, column_type: ColumnType) -> Result<()> {
        let Some(entry) = self
            .entries
            .get_mut(id.index())
            .filter(|entry| entry.id == id)
        else {
            warn!(
                column = %id,
                columns = self.entries.len(),
                "classification refused: unknown column"
            );
            return Err(ClassifyError::UnknownColumn { column: id.name() });
        };
        entry.column_type = column_type;
        let resolved = self.warnings.remove(&id);
        debug!(column = %id, %column_type, resolved, "column classified");
        Ok(())
    }

    /// Like [`set_type`](Self::set_type) with the type given as text.
    pub fn set_type_str(&mut self, id: ColumnId, column_type: &str) -> Result<()> {
        let column_type: ColumnType = column_type.parse()?;
        self.set_type(id, column_type)
    }

    /// Type currently assigned to a column.
    pub fn column_type(&self, id: ColumnId) -> Option<ColumnType> {
        self.entry(id).map(|entry| entry.column_type)
    }

    pub fn entry(&self, id: ColumnId) -> Option<&RegistryEntry> {
        self.entries.get(id.index()).filter(|entry| entry.id == id)
    }

    /// All entries in column order.
    pub fn entries(&self) -> &[RegistryEntry] {
        &self.entries
    }

    /// Columns currently flagged, in column order.
    pub fn warnings(&self) -> &BTreeSet<ColumnId> {
        &self.warnings
    }

    pub fn is_flagged(&self, id: ColumnId) -> bool {
        self.warnings.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn recompute(&mut self) {
        let threshold = self.threshold;
        self.warnings = self
            .entries
            .iter()
            .filter(|entry| threshold.flags(entry.cardinality))
            .map(|entry| entry.id)
            .collect();
        debug!(
            threshold = threshold.value(),
            flagged = self.warnings.len(),
            columns = self.entries.len(),
            "warnings recomputed"
        );
    }
}
