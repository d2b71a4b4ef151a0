//! Population table loader.
//!
//! The table is a delimited text file (`;` by default) with one row per
//! department. Only three columns matter: `DEP` (code), `Département`
//! (name) and `PTOT` (total population). Code and population are kept as
//! the raw text found in the file; normalizing and coercing them is the
//! fusion step's job, so a malformed value surfaces there with the
//! documented default rather than here.

use std::io::Read;
use std::path::Path;

use railmap_types::RegionCode;
use serde::Deserialize;

use crate::error::LoadError;

/// Column holding the department code.
pub const CODE_COLUMN: &str = "DEP";

/// Column holding the department name.
pub const NAME_COLUMN: &str = "Département";

/// Column holding the total population.
pub const POPULATION_COLUMN: &str = "PTOT";

/// One row of the population table, as read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PopulationRecord {
    /// Raw department code; `None` when the cell is empty.
    #[serde(rename = "DEP")]
    pub code: Option<String>,
    /// Department name.
    #[serde(rename = "Département")]
    pub name: Option<String>,
    /// Raw population cell.
    #[serde(rename = "PTOT")]
    pub population: Option<String>,
}

impl PopulationRecord {
    /// Build a record from raw cells.
    pub fn new(code: &str, name: &str, population: &str) -> Self {
        Self {
            code: Some(code.to_owned()),
            name: Some(name.to_owned()),
            population: Some(population.to_owned()),
        }
    }

    /// Normalized code, when the row has one.
    pub fn region_code(&self) -> Option<RegionCode> {
        self.code.as_deref().and_then(RegionCode::normalize)
    }
}

/// Read and parse the population table.
///
/// # Errors
///
/// Returns [`LoadError::Io`] if the file cannot be opened, and any error
/// of [`parse_population`].
pub fn load_population(
    path: &Path,
    delimiter: u8,
    excluded: &[RegionCode],
) -> Result<Vec<PopulationRecord>, LoadError> {
    let file = std::fs::File::open(path).map_err(|e| LoadError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse_population(path, file, delimiter, excluded)
}

/// Parse a population table from any reader, dropping excluded rows.
///
/// Rows without a code are kept so the fusion step can reject them.
///
/// # Errors
///
/// Returns [`LoadError::MissingColumn`] when a required header is absent
/// and [`LoadError::Csv`] on malformed rows.
pub fn parse_population<R: Read>(
    source: &Path,
    reader: R,
    delimiter: u8,
    excluded: &[RegionCode],
) -> Result<Vec<PopulationRecord>, LoadError> {
    let csv_error = |e: csv::Error| LoadError::Csv {
        path: source.to_path_buf(),
        source: e,
    };

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader.headers().map_err(csv_error)?;
    for column in [CODE_COLUMN, NAME_COLUMN, POPULATION_COLUMN] {
        if !headers.iter().any(|h| h == column) {
            return Err(LoadError::MissingColumn {
                path: source.to_path_buf(),
                column,
            });
        }
    }

    let mut records = Vec::new();
    let mut dropped: usize = 0;
    for row in reader.deserialize::<PopulationRecord>() {
        let record = row.map_err(csv_error)?;
        if record
            .region_code()
            .is_some_and(|code| excluded.contains(&code))
        {
            dropped = dropped.saturating_add(1);
            continue;
        }
        records.push(record);
    }

    tracing::debug!(
        path = %source.display(),
        rows = records.len(),
        dropped,
        "Population table parsed"
    );

    Ok(records)
}
