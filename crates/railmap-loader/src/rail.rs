//! Rail service table loader.
//!
//! The table is a JSON array with one object per department:
//!
//! ```json
//! [{"code": "1", "ligne_grande_vitesse": true, "desserte_tgv": false}]
//! ```
//!
//! The file is hand-maintained, so codes may be numbers and flags may be
//! strings or `null`. Flags that cannot be read are kept as `None`
//! ("unknown"); fusion turns unknown into `false`.

use std::path::Path;

use railmap_types::RegionCode;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::LoadError;
use crate::read_file;

/// One row of the rail service table, as read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RailRecord {
    /// Raw department code; `None` when absent or not a string/number.
    #[serde(default, deserialize_with = "lenient_code")]
    pub code: Option<String>,
    /// A high-speed line crosses the department.
    #[serde(rename = "ligne_grande_vitesse", default, deserialize_with = "lenient_flag")]
    pub has_line: Option<bool>,
    /// High-speed trains stop in the department.
    #[serde(rename = "desserte_tgv", default, deserialize_with = "lenient_flag")]
    pub has_service: Option<bool>,
}

impl RailRecord {
    /// Build a record with known flags.
    pub fn new(code: &str, has_line: bool, has_service: bool) -> Self {
        Self {
            code: Some(code.to_owned()),
            has_line: Some(has_line),
            has_service: Some(has_service),
        }
    }

    /// Normalized code, when the row has one.
    pub fn region_code(&self) -> Option<RegionCode> {
        self.code.as_deref().and_then(RegionCode::normalize)
    }
}

/// Read and parse the rail service table.
///
/// # Errors
///
/// Returns [`LoadError::Io`] if the file cannot be read, and any error
/// of [`parse_rail`].
pub fn load_rail(path: &Path, excluded: &[RegionCode]) -> Result<Vec<RailRecord>, LoadError> {
    let contents = read_file(path)?;
    parse_rail(path, &contents, excluded)
}

/// Parse the rail service JSON, dropping excluded rows.
///
/// # Errors
///
/// Returns [`LoadError::Json`] when the document is not an array of
/// objects.
pub fn parse_rail(
    source: &Path,
    json: &str,
    excluded: &[RegionCode],
) -> Result<Vec<RailRecord>, LoadError> {
    let mut records: Vec<RailRecord> =
        serde_json::from_str(json).map_err(|e| LoadError::Json {
            path: source.to_path_buf(),
            source: e,
        })?;

    let total = records.len();
    records.retain(|r| r.region_code().is_none_or(|code| !excluded.contains(&code)));

    tracing::debug!(
        path = %source.display(),
        total,
        kept = records.len(),
        "Rail service table parsed"
    );

    Ok(records)
}

/// Interpret a boolean-like JSON value.
///
/// Accepts booleans, numbers (non-zero is `true`) and the strings
/// `true/yes/oui/1` and `false/no/non/0/""` in any case. Anything else,
/// `null` included, is unknown.
pub fn parse_flag(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_f64().map(|f| f.abs() > f64::EPSILON),
        Value::String(s) => match s.trim().to_lowercase().as_str() {
            "true" | "yes" | "oui" | "1" => Some(true),
            "false" | "no" | "non" | "0" | "" => Some(false),
            _ => None,
        },
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn lenient_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(parse_flag(&value))
}

fn lenient_code<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        _ => Ok(None),
    }
}
