//! Explicit application state and the per-interaction pipeline cycle.
//!
//! A [`CoverageSession`] owns what survives between interactions: the
//! datasets read at startup and the [`CoverageOverrides`] store. Every
//! interaction re-runs the whole pipeline from the raw tables:
//!
//! 1. fuse population and rail tables
//! 2. apply the session's stored flags
//! 3. apply the submitted edits, if any
//! 4. annotate boundaries, aggregate, build the table
//!
//! Nothing is cached between cycles; the dataset is small enough that a
//! full recompute is the simplest correct behaviour.

use railmap_loader::Datasets;
use railmap_types::{AggregateSummary, RegionEdit, RegionRow};
use serde_json::Value;

use crate::aggregate::aggregate;
use crate::annotate::{AnnotatedMap, annotate};
use crate::edit::{CoverageOverrides, EditOutcome, apply_edits};
use crate::error::CoreError;
use crate::fusion::{FusedDataset, fuse};
use crate::table::region_table;

/// What happened to the edits of a cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditStatus {
    /// The cycle carried no edit submission.
    NotSubmitted,
    /// A submission matched the current flags; nothing changed.
    Unchanged,
    /// A submission changed the flags of `changed` departments.
    Applied {
        /// Number of departments whose flags changed.
        changed: usize,
    },
}

impl EditStatus {
    /// Whether the flags changed during this cycle.
    pub const fn updated(self) -> bool {
        matches!(self, Self::Applied { .. })
    }
}

/// Everything a shell needs to render one interaction.
#[derive(Debug, Clone, PartialEq)]
pub struct CycleOutput {
    /// The dataset the cycle ran on.
    pub dataset: FusedDataset,
    /// Boundaries annotated with the fused attributes.
    pub map: AnnotatedMap,
    /// Population totals by category.
    pub summary: AggregateSummary,
    /// Tabular view, most populated first.
    pub table: Vec<RegionRow>,
    /// Outcome of the edit submission.
    pub edit: EditStatus,
}

/// Process-lifetime application state.
#[derive(Debug, Clone)]
pub struct CoverageSession {
    datasets: Datasets,
    overrides: CoverageOverrides,
}

impl CoverageSession {
    /// Create a session, seeding the flag store from the first fusion.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Fusion`] if the tables cannot be fused.
    pub fn new(datasets: Datasets) -> Result<Self, CoreError> {
        let fused = fuse(&datasets.population, &datasets.rail)?;
        let overrides = CoverageOverrides::from_dataset(&fused);
        tracing::info!(regions = fused.len(), "Coverage session initialized");
        Ok(Self {
            datasets,
            overrides,
        })
    }

    /// The datasets read at startup.
    pub const fn datasets(&self) -> &Datasets {
        &self.datasets
    }

    /// The line network overlay, if one was loaded.
    pub const fn lines(&self) -> Option<&Value> {
        self.datasets.lines.as_ref()
    }

    /// The session's stored flags.
    pub const fn overrides(&self) -> &CoverageOverrides {
        &self.overrides
    }

    /// Fuse the raw tables and apply the stored flags.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Fusion`] if the tables cannot be fused.
    pub fn current_dataset(&self) -> Result<FusedDataset, CoreError> {
        let fused = fuse(&self.datasets.population, &self.datasets.rail)?;
        Ok(fused.with_coverage(&self.overrides))
    }

    /// Run one full cycle without edits.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Fusion`] if the tables cannot be fused.
    pub fn run_cycle(&self) -> Result<CycleOutput, CoreError> {
        let dataset = self.current_dataset()?;
        Ok(self.render(dataset, EditStatus::NotSubmitted))
    }

    /// Run one full cycle carrying an edit submission.
    ///
    /// On rejection the stored flags are left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Fusion`] if the tables cannot be fused and
    /// [`CoreError::Edit`] if the submission is rejected.
    pub fn submit_edits(&mut self, edits: &[RegionEdit]) -> Result<CycleOutput, CoreError> {
        let current = self.current_dataset()?;
        let output = match apply_edits(&current, &mut self.overrides, edits)? {
            EditOutcome::Unchanged => self.render(current, EditStatus::Unchanged),
            EditOutcome::Applied { dataset, changed } => {
                self.render(dataset, EditStatus::Applied { changed })
            }
        };
        Ok(output)
    }

    fn render(&self, dataset: FusedDataset, edit: EditStatus) -> CycleOutput {
        let map = annotate(&dataset, &self.datasets.geometry);
        let summary = aggregate(&dataset);
        let table = region_table(&dataset);
        tracing::debug!(
            regions = dataset.len(),
            features = map.len(),
            total = summary.total,
            ?edit,
            "Pipeline cycle complete"
        );
        CycleOutput {
            dataset,
            map,
            summary,
            table,
            edit,
        }
    }
}
