//! Output column ordering.

use colclass_ingest::Dataset;
use colclass_model::{ClassifyError, ColumnId, ColumnType, Result};
use tracing::debug;

use crate::gate::{Action, TaskGate};
use crate::registry::ClassificationRegistry;

/// Columns grouped into type buckets for export.
///
/// The bucket order is fixed: Nominal, then Ordinal, then Numeric. Within a
/// bucket columns keep their original left-to-right order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportPlan {
    nominal: Vec<ColumnId>,
    ordinal: Vec<ColumnId>,
    numeric: Vec<ColumnId>,
}

impl ExportPlan {
    /// Partitions the dataset's columns by their assigned type.
    ///
    /// Refuses with [`ClassifyError::GateNotSatisfied`] while any warning is
    /// outstanding.
    pub fn build(dataset: &Dataset, registry: &ClassificationRegistry) -> Result<Self> {
        TaskGate::new(registry).ensure(Action::Export)?;

        let mut plan = Self {
            nominal: Vec::new(),
            ordinal: Vec::new(),
            numeric: Vec::new(),
        };
        for id in dataset.column_ids() {
            let column_type = registry
                .column_type(id)
                .ok_or_else(|| ClassifyError::UnknownColumn { column: id.name() })?;
            plan.bucket_mut(column_type).push(id);
        }

        debug!(
            nominal = plan.nominal.len(),
            ordinal = plan.ordinal.len(),
            numeric = plan.numeric.len(),
            "export plan built"
        );
        Ok(plan)
    }

    fn bucket_mut(&mut self, column_type: ColumnType) -> &mut Vec<ColumnId> {
        match column_type {
            ColumnType::Nominal => &mut self.nominal,
            ColumnType::Ordinal => &mut self.ordinal,
            ColumnType::Numeric => &mut self.numeric,
        }
    }

    pub fn nominal(&self) -> &[ColumnId] {
        &self.nominal
    }

    pub fn ordinal(&self) -> &[ColumnId] {
        &self.ordinal
    }

    pub fn numeric(&self) -> &[ColumnId] {
        &self.numeric
    }

    /// The buckets concatenated in export order.
    pub fn ordered(&self) -> Vec<ColumnId> {
        self.nominal
            .iter()
            .chain(&self.ordinal)
            .chain(&self.numeric)
            .copied()
            .collect()
    }

    /// Synthetic names of [`ordered`](Self::ordered), for frame selection.
    pub fn ordered_names(&self) -> Vec<String> {
        self.ordered().into_iter().map(ColumnId::name).collect()
    }

    pub fn len(&self) -> usize {
        self.nominal.len() + self.ordinal.len() + self.numeric.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
