//! Geometry annotation.
//!
//! [`annotate`] pairs every boundary feature with a typed
//! [`RegionAnnotation`] built from the fused dataset. The boundary data
//! itself is cloned, never touched; the annotation is only merged into the
//! feature's property bag when rendering to `GeoJSON`
//! ([`AnnotatedMap::to_geojson`]), under these keys:
//!
//! | key | value |
//! |-----|-------|
//! | `ligne_grande_vitesse` | line flag |
//! | `desserte_tgv` | service flag |
//! | `PTOT` | population, integer |
//! | `population` | population, thousands grouped with spaces |

use railmap_loader::{FeatureCollection, GeoFeature};
use railmap_types::{CoverageCategory, Region};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::format::format_population;
use crate::fusion::FusedDataset;

/// Property key for the line flag.
pub const LINE_PROPERTY: &str = "ligne_grande_vitesse";

/// Property key for the service flag.
pub const SERVICE_PROPERTY: &str = "desserte_tgv";

/// Property key for the raw population.
pub const RAW_POPULATION_PROPERTY: &str = "PTOT";

/// Property key for the formatted population.
pub const POPULATION_PROPERTY: &str = "population";

/// Fused attributes attached to a boundary feature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegionAnnotation {
    /// A high-speed line crosses the department.
    pub has_line: bool,
    /// High-speed trains stop in the department.
    pub has_service: bool,
    /// Total population.
    pub population: u64,
    /// Population with a space as thousands separator.
    pub population_display: String,
}

impl RegionAnnotation {
    /// Annotation for a fused department.
    pub fn from_region(region: &Region) -> Self {
        Self {
            has_line: region.has_line,
            has_service: region.has_service,
            population: region.population,
            population_display: format_population(region.population),
        }
    }

    /// Coverage category of the annotated department.
    pub const fn category(&self) -> CoverageCategory {
        CoverageCategory::from_flags(self.has_line, self.has_service)
    }

    /// Write the four annotation keys into a property bag.
    fn merge_into(&self, properties: &mut Map<String, Value>) {
        properties.insert(LINE_PROPERTY.to_owned(), Value::Bool(self.has_line));
        properties.insert(SERVICE_PROPERTY.to_owned(), Value::Bool(self.has_service));
        properties.insert(
            RAW_POPULATION_PROPERTY.to_owned(),
            Value::from(self.population),
        );
        properties.insert(
            POPULATION_PROPERTY.to_owned(),
            Value::String(self.population_display.clone()),
        );
    }
}

impl Default for RegionAnnotation {
    /// Used for features with no fused department: population 0, no coverage.
    fn default() -> Self {
        Self {
            has_line: false,
            has_service: false,
            population: 0,
            population_display: format_population(0),
        }
    }
}

/// A boundary feature and its annotation, kept side by side.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotatedFeature {
    /// The boundary feature as loaded.
    pub feature: GeoFeature,
    /// Fused attributes for the feature's department.
    pub annotation: RegionAnnotation,
}

impl AnnotatedFeature {
    /// Render as a `GeoJSON` feature with the annotation merged in.
    pub fn to_geojson(&self) -> Value {
        let mut properties = self.feature.properties.clone();
        self.annotation.merge_into(&mut properties);

        let mut members = self.feature.extra.clone();
        members.insert("properties".to_owned(), Value::Object(properties));
        if let Some(geometry) = &self.feature.geometry {
            members.insert("geometry".to_owned(), geometry.clone());
        }
        Value::Object(members)
    }
}

/// Annotated boundary collection.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotatedMap {
    /// Annotated features in boundary-file order.
    pub features: Vec<AnnotatedFeature>,
    /// Collection-level members of the boundary file (`type`, `crs`, ...).
    members: Map<String, Value>,
}

impl AnnotatedMap {
    /// Number of features.
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Whether the map holds no feature.
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Render as a `GeoJSON` `FeatureCollection` ready for a map renderer.
    pub fn to_geojson(&self) -> Value {
        let mut members = self.members.clone();
        members.insert(
            "features".to_owned(),
            Value::Array(self.features.iter().map(AnnotatedFeature::to_geojson).collect()),
        );
        Value::Object(members)
    }
}

/// Pair every boundary feature with its fused attributes.
///
/// Features whose department is missing from `dataset` receive
/// [`RegionAnnotation::default`].
pub fn annotate(dataset: &FusedDataset, geometry: &FeatureCollection) -> AnnotatedMap {
    let mut unmatched: usize = 0;
    let features = geometry
        .features
        .iter()
        .map(|feature| {
            let annotation = feature
                .code()
                .and_then(|code| dataset.get(&code))
                .map_or_else(
                    || {
                        unmatched = unmatched.saturating_add(1);
                        RegionAnnotation::default()
                    },
                    RegionAnnotation::from_region,
                );
            AnnotatedFeature {
                feature: feature.clone(),
                annotation,
            }
        })
        .collect::<Vec<_>>();

    if unmatched > 0 {
        tracing::debug!(unmatched, "Boundary features without fused attributes");
    }

    AnnotatedMap {
        features,
        members: geometry.extra.clone(),
    }
}
