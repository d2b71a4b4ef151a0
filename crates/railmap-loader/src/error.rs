//! Error types for the `railmap-loader` crate.
//!
//! Every loader failure is fatal for the pipeline run: no partial
//! dataset is ever returned.

use std::path::PathBuf;

/// Errors that can occur while reading a dataset.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// File being read.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The file is not valid JSON or does not match the expected shape.
    #[error("invalid JSON in {}: {source}", path.display())]
    Json {
        /// File being parsed.
        path: PathBuf,
        /// The underlying parse error.
        source: serde_json::Error,
    },

    /// The CSV table is malformed or misses a required column.
    #[error("invalid CSV in {}: {source}", path.display())]
    Csv {
        /// File being parsed.
        path: PathBuf,
        /// The underlying CSV error.
        source: csv::Error,
    },

    /// A `GeoJSON` document is not a `FeatureCollection`.
    #[error("{} is not a GeoJSON FeatureCollection", path.display())]
    NotFeatureCollection {
        /// File being parsed.
        path: PathBuf,
    },

    /// A boundary feature has no department code.
    #[error("feature #{index} in {} has no department code", path.display())]
    MissingFeatureCode {
        /// File being parsed.
        path: PathBuf,
        /// Zero-based position of the feature in the collection.
        index: usize,
    },

    /// A required CSV column is absent from the header row.
    #[error("{} has no `{column}` column", path.display())]
    MissingColumn {
        /// File being parsed.
        path: PathBuf,
        /// Name of the absent column.
        column: &'static str,
    },
}
