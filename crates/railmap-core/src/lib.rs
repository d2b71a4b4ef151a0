//! Data fusion and coverage statistics for the high-speed rail map.
//!
//! This crate owns the pipeline that turns the loaded tables into what a
//! map shell displays: fuse -> classify -> annotate -> aggregate, re-run
//! in full on every interaction.
//!
//! # Modules
//!
//! - [`aggregate`] -- total and per-category population with percentages
//! - [`annotate`] -- boundary features paired with fused attributes
//! - [`classify`] -- coverage category from the two flags
//! - [`config`] -- `railmap-config.yaml` loading into typed structs
//! - [`edit`] -- edit submissions and the session flag store
//! - [`error`] -- [`CoreError`], wrapping every failure of a cycle
//! - [`format`] -- thousands grouping and percentage rendering
//! - [`fusion`] -- left join of the rail table onto the population table
//! - [`session`] -- [`CoverageSession`], the explicit application state
//! - [`table`] -- tabular view sorted by population
//!
//! [`CoverageSession`]: session::CoverageSession

pub mod aggregate;
pub mod annotate;
pub mod classify;
pub mod config;
pub mod edit;
pub mod error;
pub mod format;
pub mod fusion;
pub mod session;
pub mod table;

// Re-export primary types at crate root.
pub use aggregate::{aggregate, percentage};
pub use annotate::{AnnotatedFeature, AnnotatedMap, RegionAnnotation, annotate};
pub use classify::classify;
pub use config::{ConfigError, RailmapConfig};
pub use edit::{CoverageOverrides, EditError, EditOutcome, apply_edits};
pub use error::CoreError;
pub use format::{format_percentage, format_population};
pub use fusion::{FusedDataset, FusionError, fuse};
pub use session::{CoverageSession, CycleOutput, EditStatus};
pub use table::region_table;
