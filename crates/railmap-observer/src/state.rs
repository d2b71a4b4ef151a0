//! Shared application state for the Observer API server.
//!
//! The [`CoverageSession`] sits behind a single read-write lock. Reads
//! run a full pipeline cycle under the read guard; an edit submission
//! takes the write guard, so one edit is fully processed before the next
//! one starts.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use railmap_core::CoverageSession;
use tokio::sync::RwLock;

/// The session plus bookkeeping about its edits.
#[derive(Debug)]
pub struct ObservedSession {
    /// The pipeline state.
    pub session: CoverageSession,
    /// When an edit submission last changed the flags.
    pub last_edit_at: Option<DateTime<Utc>>,
    /// Number of submissions that changed the flags.
    pub edits_applied: u64,
}

/// Shared state for the Axum application.
///
/// Wrapped in [`Arc`] and injected via Axum's `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The coverage session and its edit bookkeeping.
    pub session: Arc<RwLock<ObservedSession>>,
    /// When the datasets were loaded.
    pub loaded_at: DateTime<Utc>,
}

impl AppState {
    /// Wrap a freshly built session.
    pub fn new(session: CoverageSession) -> Self {
        Self {
            session: Arc::new(RwLock::new(ObservedSession {
                session,
                last_edit_at: None,
                edits_applied: 0,
            })),
            loaded_at: Utc::now(),
        }
    }
}
