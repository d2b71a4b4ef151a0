//! Core record types: departments, edits, and aggregate statistics.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::code::RegionCode;
use crate::enums::CoverageCategory;

// ---------------------------------------------------------------------------
// Coverage flags
// ---------------------------------------------------------------------------

/// The two editable coverage attributes of a department.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct CoverageFlags {
    /// A high-speed line crosses the department.
    pub has_line: bool,
    /// High-speed trains stop in the department.
    pub has_service: bool,
}

impl CoverageFlags {
    /// Build a flag pair.
    pub const fn new(has_line: bool, has_service: bool) -> Self {
        Self {
            has_line,
            has_service,
        }
    }

    /// Coverage category for these flags.
    pub const fn category(self) -> CoverageCategory {
        CoverageCategory::from_flags(self.has_line, self.has_service)
    }
}

// ---------------------------------------------------------------------------
// Region
// ---------------------------------------------------------------------------

/// A department after fusion of the population and rail tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Region {
    /// Normalized department code.
    pub code: RegionCode,
    /// Display name.
    pub name: String,
    /// Total population, 0 when unknown.
    pub population: u64,
    /// A high-speed line crosses the department.
    pub has_line: bool,
    /// High-speed trains stop in the department.
    pub has_service: bool,
}

impl Region {
    /// Current coverage flags.
    pub const fn flags(&self) -> CoverageFlags {
        CoverageFlags::new(self.has_line, self.has_service)
    }

    /// Current coverage category.
    pub const fn category(&self) -> CoverageCategory {
        CoverageCategory::from_flags(self.has_line, self.has_service)
    }
}

/// One row of an edit submission: the new flags for a department.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct RegionEdit {
    /// Department being edited.
    pub code: RegionCode,
    /// New value of the line flag.
    pub has_line: bool,
    /// New value of the service flag.
    pub has_service: bool,
}

impl RegionEdit {
    /// The submitted flags.
    pub const fn flags(&self) -> CoverageFlags {
        CoverageFlags::new(self.has_line, self.has_service)
    }
}

/// A department as shown in the tabular view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct RegionRow {
    /// Normalized department code.
    pub code: RegionCode,
    /// Display name.
    pub name: String,
    /// Total population.
    pub population: u64,
    /// Population with a space as thousands separator.
    pub population_display: String,
    /// A high-speed line crosses the department.
    pub has_line: bool,
    /// High-speed trains stop in the department.
    pub has_service: bool,
    /// Derived coverage category.
    pub category: CoverageCategory,
}

// ---------------------------------------------------------------------------
// Aggregates
// ---------------------------------------------------------------------------

/// Population of a subset of departments and its share of the total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct CategoryShare {
    /// Summed population.
    pub population: u64,
    /// Percentage of the total population, two decimal places.
    #[ts(as = "String")]
    pub percentage: Decimal,
}

/// Population totals over a fused dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct AggregateSummary {
    /// Population of every department.
    pub total: u64,
    /// Population per coverage category. Always holds all four categories.
    pub by_category: BTreeMap<CoverageCategory, CategoryShare>,
    /// Departments crossed by a line (`Full` + `LineOnly`).
    pub with_line: CategoryShare,
    /// Departments with a stop (`Full` + `ServiceOnly`).
    pub with_service: CategoryShare,
}

impl AggregateSummary {
    /// Share of a single category, zero when absent.
    pub fn share(&self, category: CoverageCategory) -> CategoryShare {
        self.by_category.get(&category).copied().unwrap_or_default()
    }
}
