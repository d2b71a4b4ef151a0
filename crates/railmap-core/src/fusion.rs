//! Fusion of the population and rail service tables.
//!
//! [`fuse`] left-joins the rail table onto the population table by
//! normalized department code. The population table decides which
//! departments exist and in which order; the rail table only contributes
//! the two coverage flags. Absence is resolved with defaults, never with
//! an error:
//!
//! - no rail row, or an unknown flag: `false`
//! - an unparseable, negative or empty population: `0`
//!
//! Only a row without a code, or a code seen twice in the same table,
//! aborts the fusion.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::str::FromStr;

use railmap_loader::{PopulationRecord, RailRecord};
use railmap_types::{CoverageFlags, Region, RegionCode};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::edit::CoverageOverrides;

/// Which input table a fusion error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    /// The population table.
    Population,
    /// The rail service table.
    Rail,
}

impl core::fmt::Display for Table {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Population => f.write_str("population"),
            Self::Rail => f.write_str("rail service"),
        }
    }
}

/// Errors that abort a fusion run.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FusionError {
    /// A row has no department code.
    #[error("row {row} of the {table} table has no department code")]
    MissingCode {
        /// Offending table.
        table: Table,
        /// Zero-based row position.
        row: usize,
    },

    /// A department code appears twice in the same table.
    #[error("department {code} appears twice in the {table} table")]
    DuplicateCode {
        /// Offending table.
        table: Table,
        /// The repeated code.
        code: RegionCode,
    },
}

/// Departments after fusion, in population-table order, indexed by code.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FusedDataset {
    /// Departments in input order.
    regions: Vec<Region>,
    /// Position of each department in `regions`.
    index: HashMap<RegionCode, usize>,
}

impl FusedDataset {
    /// Build a dataset from regions already known to have unique codes.
    fn from_regions(regions: Vec<Region>) -> Self {
        let index = regions
            .iter()
            .enumerate()
            .map(|(i, r)| (r.code.clone(), i))
            .collect();
        Self { regions, index }
    }

    /// Look up a department by code.
    pub fn get(&self, code: &RegionCode) -> Option<&Region> {
        self.index.get(code).and_then(|&i| self.regions.get(i))
    }

    /// Whether the dataset holds this department.
    pub fn contains(&self, code: &RegionCode) -> bool {
        self.index.contains_key(code)
    }

    /// Iterate departments in input order.
    pub fn iter(&self) -> impl Iterator<Item = &Region> {
        self.regions.iter()
    }

    /// Departments in input order.
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Number of departments.
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Current coverage flags keyed by code.
    pub fn coverage(&self) -> BTreeMap<RegionCode, CoverageFlags> {
        self.regions
            .iter()
            .map(|r| (r.code.clone(), r.flags()))
            .collect()
    }

    /// A new dataset with the flags replaced by `overrides`.
    ///
    /// Departments absent from `overrides` keep their flags.
    pub fn with_coverage(&self, overrides: &CoverageOverrides) -> Self {
        let regions = self
            .regions
            .iter()
            .map(|r| {
                let flags = overrides.get(&r.code).unwrap_or_else(|| r.flags());
                Region {
                    has_line: flags.has_line,
                    has_service: flags.has_service,
                    ..r.clone()
                }
            })
            .collect();
        Self {
            regions,
            index: self.index.clone(),
        }
    }
}

/// Left-join the rail table onto the population table.
///
/// # Errors
///
/// Returns [`FusionError::MissingCode`] for a row of either table
/// without a code and [`FusionError::DuplicateCode`] for a code repeated
/// within one table.
pub fn fuse(
    population: &[PopulationRecord],
    rail: &[RailRecord],
) -> Result<FusedDataset, FusionError> {
    let mut service: HashMap<RegionCode, CoverageFlags> = HashMap::with_capacity(rail.len());
    for (row, record) in rail.iter().enumerate() {
        let code = record.region_code().ok_or(FusionError::MissingCode {
            table: Table::Rail,
            row,
        })?;
        let flags = CoverageFlags::new(
            record.has_line.unwrap_or(false),
            record.has_service.unwrap_or(false),
        );
        if service.insert(code.clone(), flags).is_some() {
            return Err(FusionError::DuplicateCode {
                table: Table::Rail,
                code,
            });
        }
    }

    let mut regions = Vec::with_capacity(population.len());
    let mut seen: HashSet<RegionCode> = HashSet::with_capacity(population.len());
    let mut unmatched: usize = 0;
    for (row, record) in population.iter().enumerate() {
        let code = record.region_code().ok_or(FusionError::MissingCode {
            table: Table::Population,
            row,
        })?;
        if !seen.insert(code.clone()) {
            return Err(FusionError::DuplicateCode {
                table: Table::Population,
                code,
            });
        }

        let flags = service.get(&code).copied().unwrap_or_else(|| {
            unmatched = unmatched.saturating_add(1);
            CoverageFlags::default()
        });

        regions.push(Region {
            code,
            name: record.name.clone().unwrap_or_default(),
            population: parse_population(record.population.as_deref()),
            has_line: flags.has_line,
            has_service: flags.has_service,
        });
    }

    tracing::debug!(
        regions = regions.len(),
        rail_rows = rail.len(),
        unmatched,
        "Fusion complete"
    );

    Ok(FusedDataset::from_regions(regions))
}

/// Coerce a raw population cell to a count.
///
/// Decimal text is truncated toward zero. Empty, non-numeric, negative
/// or out-of-range values give `0`.
pub fn parse_population(raw: Option<&str>) -> u64 {
    raw.map(str::trim)
        .and_then(|s| Decimal::from_str(s).ok())
        .filter(|d| !d.is_sign_negative())
        .and_then(|d| d.trunc().to_u64())
        .unwrap_or(0)
}
