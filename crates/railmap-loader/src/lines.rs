//! High-speed line overlay loader.
//!
//! The line network is drawn on top of the department map and is never
//! joined with anything, so the whole document stays opaque JSON. The
//! only check is that it is a `FeatureCollection`.

use std::path::Path;

use serde_json::Value;

use crate::error::LoadError;
use crate::geometry::is_feature_collection;
use crate::read_file;

/// Read and validate the line overlay.
///
/// # Errors
///
/// Returns [`LoadError::Io`] if the file cannot be read, and any error
/// of [`parse_lines`].
pub fn load_lines(path: &Path) -> Result<Value, LoadError> {
    let contents = read_file(path)?;
    parse_lines(path, &contents)
}

/// Parse the line overlay.
///
/// # Errors
///
/// Returns [`LoadError::Json`] on malformed JSON and
/// [`LoadError::NotFeatureCollection`] for any other JSON document.
pub fn parse_lines(source: &Path, json: &str) -> Result<Value, LoadError> {
    let value: Value = serde_json::from_str(json).map_err(|e| LoadError::Json {
        path: source.to_path_buf(),
        source: e,
    })?;

    match value.as_object() {
        Some(members) if is_feature_collection(members) => Ok(value),
        _ => Err(LoadError::NotFeatureCollection {
            path: source.to_path_buf(),
        }),
    }
}
