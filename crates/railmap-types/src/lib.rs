//! Shared type definitions for the high-speed rail coverage map.
//!
//! Every crate in the workspace speaks these types. They flow downstream
//! to `TypeScript` via `ts-rs` for whatever shell renders the map.
//!
//! # Modules
//!
//! - [`code`] -- [`RegionCode`], the normalized department code used as
//!   the join key everywhere
//! - [`enums`] -- [`CoverageCategory`] and its truth table
//! - [`structs`] -- departments, edit rows, table rows and aggregates

pub mod code;
pub mod enums;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use code::{CODE_WIDTH, EmptyRegionCode, RegionCode};
pub use enums::CoverageCategory;
pub use structs::{
    AggregateSummary, CategoryShare, CoverageFlags, Region, RegionEdit, RegionRow,
};
