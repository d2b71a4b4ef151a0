//! Error types for the `railmap-core` crate.

use railmap_loader::LoadError;

use crate::config::ConfigError;
use crate::edit::EditError;
use crate::fusion::FusionError;

/// Errors that can stop a pipeline run.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Configuration could not be loaded or resolved.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: ConfigError,
    },

    /// A dataset could not be loaded.
    #[error("load error: {source}")]
    Load {
        /// The underlying load error.
        #[from]
        source: LoadError,
    },

    /// The population and rail tables could not be fused.
    #[error("fusion error: {source}")]
    Fusion {
        /// The underlying fusion error.
        #[from]
        source: FusionError,
    },

    /// An edit submission was rejected.
    #[error("edit rejected: {source}")]
    Edit {
        /// The underlying edit error.
        #[from]
        source: EditError,
    },
}
