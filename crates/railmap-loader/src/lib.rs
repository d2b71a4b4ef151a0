//! Dataset loaders for the high-speed rail coverage map.
//!
//! Three static files feed the pipeline and a fourth is drawn on top of
//! it:
//!
//! - [`geometry`] -- department boundaries (`GeoJSON`), excluded
//!   departments removed
//! - [`population`] -- population table (delimited text)
//! - [`rail`] -- rail service flags per department (JSON)
//! - [`lines`] -- the high-speed line network overlay (`GeoJSON`, optional)
//!
//! Loading never joins anything; see `railmap-core` for fusion.

pub mod error;
pub mod geometry;
pub mod lines;
pub mod population;
pub mod rail;

use std::path::{Path, PathBuf};

use railmap_types::RegionCode;
use serde_json::Value;

pub use error::LoadError;
pub use geometry::{FeatureCollection, GeoFeature, load_geometry, parse_geometry};
pub use lines::{load_lines, parse_lines};
pub use population::{PopulationRecord, load_population, parse_population};
pub use rail::{RailRecord, load_rail, parse_flag, parse_rail};

/// Where the datasets live and how to read them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetSources {
    /// Department boundaries.
    pub geometry: PathBuf,
    /// Population table.
    pub population: PathBuf,
    /// Rail service table.
    pub rail: PathBuf,
    /// Line network overlay, if any.
    pub lines: Option<PathBuf>,
    /// Field delimiter of the population table.
    pub csv_delimiter: u8,
    /// Departments removed from every dataset.
    pub excluded_codes: Vec<RegionCode>,
}

/// Everything read from disk for one process lifetime.
#[derive(Debug, Clone, PartialEq)]
pub struct Datasets {
    /// Department boundaries, excluded departments removed.
    pub geometry: FeatureCollection,
    /// Population rows, excluded departments removed.
    pub population: Vec<PopulationRecord>,
    /// Rail service rows, excluded departments removed.
    pub rail: Vec<RailRecord>,
    /// Line network overlay.
    pub lines: Option<Value>,
}

/// Load every dataset named by `sources`.
///
/// # Errors
///
/// Returns the first [`LoadError`] encountered; nothing is returned
/// partially.
pub fn load_datasets(sources: &DatasetSources) -> Result<Datasets, LoadError> {
    let excluded = &sources.excluded_codes;

    let geometry = load_geometry(&sources.geometry, excluded)?;
    let population = load_population(&sources.population, sources.csv_delimiter, excluded)?;
    let rail = load_rail(&sources.rail, excluded)?;
    let lines = sources.lines.as_deref().map(load_lines).transpose()?;

    tracing::info!(
        features = geometry.len(),
        population_rows = population.len(),
        rail_rows = rail.len(),
        lines = lines.is_some(),
        "Datasets loaded"
    );

    Ok(Datasets {
        geometry,
        population,
        rail,
        lines,
    })
}

/// Read a whole UTF-8 file, tagging failures with the path.
pub(crate) fn read_file(path: &Path) -> Result<String, LoadError> {
    std::fs::read_to_string(path).map_err(|e| LoadError::Io {
        path: path.to_path_buf(),
        source: e,
    })
}
