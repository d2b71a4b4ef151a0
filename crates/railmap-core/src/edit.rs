//! Coverage edits and the session store that keeps them.
//!
//! An edit submission is a full replacement: the shell renders one flag
//! pair per department and sends every pair back on each interaction.
//! [`apply_edits`] checks that the submission covers the dataset exactly,
//! compares it with the current flags, and when anything differs writes
//! all submitted values into the [`CoverageOverrides`] store and builds
//! the new dataset.
//!
//! The store lives as long as the process. It is seeded once from the
//! first fused dataset and then re-applied on top of every later fusion,
//! so edits survive recomputations triggered by unrelated interactions.

use std::collections::{BTreeMap, HashSet};

use railmap_types::{CoverageFlags, RegionCode, RegionEdit};
use serde::Serialize;

use crate::fusion::FusedDataset;

/// Errors that reject an edit submission. Nothing is written on error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    /// The submission names a department that is not in the dataset.
    #[error("unknown department {0}")]
    UnknownRegion(RegionCode),

    /// The submission names a department twice.
    #[error("department {0} edited twice")]
    DuplicateEdit(RegionCode),

    /// The submission leaves out a department of the dataset.
    #[error("no edit for department {0}")]
    MissingRegion(RegionCode),
}

/// Process-scoped store of edited coverage flags, keyed by code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CoverageOverrides {
    values: BTreeMap<RegionCode, CoverageFlags>,
}

impl CoverageOverrides {
    /// Seed the store with the flags of a freshly fused dataset.
    pub fn from_dataset(dataset: &FusedDataset) -> Self {
        Self {
            values: dataset.coverage(),
        }
    }

    /// Stored flags for a department.
    pub fn get(&self, code: &RegionCode) -> Option<CoverageFlags> {
        self.values.get(code).copied()
    }

    /// Store flags for a department.
    pub fn set(&mut self, code: RegionCode, flags: CoverageFlags) {
        self.values.insert(code, flags);
    }

    /// Number of stored departments.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate stored flags in code order.
    pub fn iter(&self) -> impl Iterator<Item = (&RegionCode, &CoverageFlags)> {
        self.values.iter()
    }
}

/// Result of an accepted edit submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    /// Every submitted pair matched the current flags; nothing recomputed.
    Unchanged,
    /// At least one pair differed; the store was updated.
    Applied {
        /// Dataset carrying the submitted flags.
        dataset: FusedDataset,
        /// Number of departments whose flags differ from before.
        changed: usize,
    },
}

/// Apply a full edit submission against the current dataset.
///
/// # Errors
///
/// Returns [`EditError::UnknownRegion`], [`EditError::DuplicateEdit`] or
/// [`EditError::MissingRegion`] when the submission does not cover the
/// dataset exactly once.
pub fn apply_edits(
    current: &FusedDataset,
    overrides: &mut CoverageOverrides,
    edits: &[RegionEdit],
) -> Result<EditOutcome, EditError> {
    let mut seen: HashSet<&RegionCode> = HashSet::with_capacity(edits.len());
    for edit in edits {
        if !current.contains(&edit.code) {
            return Err(EditError::UnknownRegion(edit.code.clone()));
        }
        if !seen.insert(&edit.code) {
            return Err(EditError::DuplicateEdit(edit.code.clone()));
        }
    }
    if let Some(missing) = current.iter().find(|r| !seen.contains(&r.code)) {
        return Err(EditError::MissingRegion(missing.code.clone()));
    }

    let changed = edits
        .iter()
        .filter(|e| current.get(&e.code).is_some_and(|r| r.flags() != e.flags()))
        .count();

    if changed == 0 {
        tracing::debug!(edits = edits.len(), "Edit submission matches current coverage");
        return Ok(EditOutcome::Unchanged);
    }

    for edit in edits {
        overrides.set(edit.code.clone(), edit.flags());
    }

    tracing::info!(changed, "Coverage edits applied");

    Ok(EditOutcome::Applied {
        dataset: current.with_coverage(overrides),
        changed,
    })
}
