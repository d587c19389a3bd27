//! Shell-facing owner of the loaded dataset and its registry.

use std::path::{Path, PathBuf};

use colclass_ingest::{Dataset, LoadError, load_csv};
use colclass_model::{ClassifyError, ColumnId, ColumnType, Result, Threshold};
use tracing::info;

use crate::average::{AverageHandle, AverageTask};
use crate::export::{self, ExportError, ExportOptions};
use crate::gate::{Action, GateStatus, TaskGate};
use crate::plan::ExportPlan;
use crate::registry::ClassificationRegistry;

#[derive(Debug, Clone)]
struct Loaded {
    dataset: Dataset,
    registry: ClassificationRegistry,
}

/// Holds at most one dataset and the classification state seeded from it.
///
/// Loading replaces both wholesale. A failed load keeps whatever was
/// loaded before. The threshold outlives individual datasets.
#[derive(Debug, Clone, Default)]
pub struct Session {
    threshold: Threshold,
    loaded: Option<Loaded>,
}

impl Session {
    pub fn new(threshold: Threshold) -> Self {
        Self {
            threshold,
            loaded: None,
        }
    }

    /// Loads a CSV file and reseeds the registry.
    pub fn load_csv(&mut self, path: &Path) -> std::result::Result<&Dataset, LoadError> {
        let dataset = load_csv(path)?;
        Ok(self.install(dataset))
    }

    /// Loads raw rows and reseeds the registry.
    pub fn load_rows<S: AsRef<str>>(
        &mut self,
        rows: &[Vec<S>],
    ) -> std::result::Result<&Dataset, LoadError> {
        let dataset = Dataset::from_rows(rows)?;
        Ok(self.install(dataset))
    }

    /// Replaces the current dataset with `dataset`.
    pub fn install(&mut self, dataset: Dataset) -> &Dataset {
        let registry = ClassificationRegistry::initialize(&dataset, self.threshold);
        info!(
            columns = dataset.width(),
            flagged = registry.warnings().len(),
            threshold = self.threshold.value(),
            "registry seeded"
        );
        let loaded = self.loaded.insert(Loaded { dataset, registry });
        &loaded.dataset
    }

    pub fn dataset(&self) -> Option<&Dataset> {
        self.loaded.as_ref().map(|loaded| &loaded.dataset)
    }

    pub fn registry(&self) -> Option<&ClassificationRegistry> {
        self.loaded.as_ref().map(|loaded| &loaded.registry)
    }

    pub fn threshold(&self) -> Threshold {
        self.threshold
    }

    /// Parses and applies a threshold entered as text.
    ///
    /// Without a dataset the value is only remembered for the next load.
    pub fn set_threshold(&mut self, input: &str) -> Result<Threshold> {
        let threshold: Threshold = input.parse()?;
        self.apply_threshold(threshold);
        Ok(threshold)
    }

    pub fn apply_threshold(&mut self, threshold: Threshold) {
        self.threshold = threshold;
        if let Some(loaded) = self.loaded.as_mut() {
            loaded.registry.apply_threshold(threshold);
        }
    }

    pub fn set_type(&mut self, id: ColumnId, column_type: ColumnType) -> Result<()> {
        self.loaded_mut()?.registry.set_type(id, column_type)
    }

    /// Resolves a column reference and a type name, then classifies.
    pub fn classify(&mut self, column: &str, column_type: &str) -> Result<ColumnId> {
        let column_type: ColumnType = column_type.parse()?;
        let loaded = self.loaded_mut()?;
        let id = loaded
            .dataset
            .resolve(column)
            .ok_or_else(|| ClassifyError::UnknownColumn {
                column: column.to_string(),
            })?;
        loaded.registry.set_type(id, column_type)?;
        Ok(id)
    }

    pub fn cardinality(&self, id: ColumnId) -> Option<usize> {
        self.dataset().and_then(|dataset| dataset.cardinality(id))
    }

    /// False until a dataset is loaded, then true iff no warnings remain.
    pub fn can_proceed(&self) -> bool {
        self.registry()
            .is_some_and(|registry| TaskGate::new(registry).can_proceed())
    }

    pub fn gate_status(&self) -> Option<GateStatus> {
        self.registry().map(|registry| TaskGate::new(registry).status())
    }

    /// Builds the export order for the current dataset.
    pub fn plan(&self) -> Result<ExportPlan> {
        let loaded = self.loaded()?;
        ExportPlan::build(&loaded.dataset, &loaded.registry)
    }

    /// Plans and writes the export.
    pub fn export(
        &self,
        path: &Path,
        options: ExportOptions,
    ) -> std::result::Result<PathBuf, ExportError> {
        let plan = self.plan()?;
        let loaded = self.loaded()?;
        export::write_export(&loaded.dataset, &plan, path, options)
    }

    /// Starts the averaging task against a snapshot of the current data.
    pub fn start_average(&self) -> Result<AverageHandle> {
        let loaded = self.loaded()?;
        TaskGate::new(&loaded.registry).ensure(Action::Run)?;
        Ok(AverageTask::spawn(loaded.dataset.frame().clone()))
    }

    fn loaded(&self) -> Result<&Loaded> {
        self.loaded.as_ref().ok_or(ClassifyError::NoDataset)
    }

    fn loaded_mut(&mut self) -> Result<&mut Loaded> {
        self.loaded.as_mut().ok_or(ClassifyError::NoDataset)
    }
}
