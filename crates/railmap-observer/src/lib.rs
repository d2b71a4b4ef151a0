//! Observer API server for the department coverage map.
//!
//! This crate provides an Axum HTTP server that exposes:
//!
//! - **Map endpoints** returning the annotated department boundaries and
//!   the high-speed line overlay as `GeoJSON`
//! - **Statistics endpoints** for the population summary and the
//!   per-department table
//! - **Coverage endpoints** to read the stored flags and submit edits
//! - **Minimal HTML page** (`GET /`) showing the headline percentages
//!
//! # Architecture
//!
//! A single [`CoverageSession`](railmap_core::CoverageSession) lives
//! behind a read-write lock in [`AppState`]. Every request runs a full
//! pipeline cycle; edit submissions hold the write lock for the whole
//! cycle so they are applied one at a time.

pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod state;

pub use router::build_router;
pub use server::{ServerConfig, ServerError, start_server};
pub use state::{AppState, ObservedSession};
