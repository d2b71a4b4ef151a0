//! Department boundary loader.
//!
//! Boundaries come as a `GeoJSON` `FeatureCollection`. Geometry is never
//! interpreted: each [`GeoFeature`] keeps its `geometry` and any other
//! member as raw JSON so it can be handed back to a map renderer exactly
//! as read. Only `properties.code` is inspected, to key the feature and
//! to drop the excluded departments.

use std::path::Path;

use railmap_types::RegionCode;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::LoadError;
use crate::read_file;

/// Property holding the department code.
pub const CODE_PROPERTY: &str = "code";

/// Property holding the department display name.
pub const NAME_PROPERTY: &str = "nom";

/// A single boundary feature with opaque geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoFeature {
    /// Property bag (`code`, `nom`, ...).
    #[serde(default, deserialize_with = "null_as_empty")]
    pub properties: Map<String, Value>,
    /// Boundary geometry, passed through unchanged. `None` when the
    /// feature has no `geometry` member; an explicit `null` is kept.
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub geometry: Option<Value>,
    /// Every other member of the feature (`type`, `id`, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl GeoFeature {
    /// Normalized department code, when the feature carries one.
    ///
    /// Both string and numeric codes are accepted.
    pub fn code(&self) -> Option<RegionCode> {
        match self.properties.get(CODE_PROPERTY)? {
            Value::String(s) => RegionCode::normalize(s),
            Value::Number(n) => RegionCode::normalize(&n.to_string()),
            _ => None,
        }
    }

    /// Display name, when present.
    pub fn name(&self) -> Option<&str> {
        self.properties.get(NAME_PROPERTY).and_then(Value::as_str)
    }
}

/// A `GeoJSON` `FeatureCollection` of department boundaries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureCollection {
    /// Boundary features, in file order.
    pub features: Vec<GeoFeature>,
    /// Every other member of the collection (`type`, `crs`, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FeatureCollection {
    /// Number of features.
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Whether the collection holds no feature.
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

/// Read and parse a boundary file, dropping the excluded departments.
///
/// # Errors
///
/// Returns [`LoadError::Io`] if the file cannot be read, and any error
/// of [`parse_geometry`].
pub fn load_geometry(path: &Path, excluded: &[RegionCode]) -> Result<FeatureCollection, LoadError> {
    let contents = read_file(path)?;
    parse_geometry(path, &contents, excluded)
}

/// Parse boundary `GeoJSON`, dropping the excluded departments.
///
/// `source` only labels errors.
///
/// # Errors
///
/// Returns [`LoadError::Json`] on malformed JSON,
/// [`LoadError::NotFeatureCollection`] when the document is some other
/// `GeoJSON` object, and [`LoadError::MissingFeatureCode`] when a feature
/// has no usable `code` property.
pub fn parse_geometry(
    source: &Path,
    json: &str,
    excluded: &[RegionCode],
) -> Result<FeatureCollection, LoadError> {
    let mut collection: FeatureCollection =
        serde_json::from_str(json).map_err(|e| LoadError::Json {
            path: source.to_path_buf(),
            source: e,
        })?;

    if !is_feature_collection(&collection.extra) {
        return Err(LoadError::NotFeatureCollection {
            path: source.to_path_buf(),
        });
    }

    let total = collection.features.len();
    let mut kept = Vec::with_capacity(total);
    for (index, feature) in collection.features.into_iter().enumerate() {
        let Some(code) = feature.code() else {
            return Err(LoadError::MissingFeatureCode {
                path: source.to_path_buf(),
                index,
            });
        };
        if !excluded.contains(&code) {
            kept.push(feature);
        }
    }
    collection.features = kept;

    tracing::debug!(
        path = %source.display(),
        total,
        kept = collection.features.len(),
        "Boundary features parsed"
    );

    Ok(collection)
}

/// Whether the `type` member names a feature collection.
pub(crate) fn is_feature_collection(members: &Map<String, Value>) -> bool {
    members.get("type").and_then(Value::as_str) == Some("FeatureCollection")
}

/// Treat a JSON `null` property bag as an empty one.
fn null_as_empty<'de, D>(deserializer: D) -> Result<Map<String, Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Map<String, Value>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Keep any member that is present, `null` included, as `Some`.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}
