//! Error types for the engine binary.
//!
//! [`EngineError`] is the top-level error type that wraps all possible
//! failure modes during startup and serving.

/// Top-level error for the engine binary.
///
/// Each variant wraps a specific subsystem error, providing a single
/// error type that `main` can propagate with `?`.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: railmap_core::ConfigError,
    },

    /// A dataset could not be read or parsed.
    #[error("load error: {source}")]
    Load {
        /// The underlying loader error.
        #[from]
        source: railmap_loader::LoadError,
    },

    /// The pipeline rejected the loaded datasets.
    #[error("pipeline error: {source}")]
    Core {
        /// The underlying pipeline error.
        #[from]
        source: railmap_core::CoreError,
    },

    /// Observer API server failed to start or stopped with an error.
    #[error("observer error: {source}")]
    Observer {
        /// The underlying server error.
        #[from]
        source: railmap_observer::ServerError,
    },
}
