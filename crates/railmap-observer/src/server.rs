//! Binding and serving the coverage API.
//!
//! [`start_server`] listens on the address from the `server` section of
//! `railmap-config.yaml` and serves [`build_router`] until the process
//! exits. There is no graceful shutdown: the session holds no state that
//! needs flushing.

use std::net::SocketAddr;
use std::sync::Arc;

use railmap_core::config::ServerSection;
use tokio::net::TcpListener;
use tracing::info;

use crate::router::build_router;
use crate::state::AppState;

/// Listen address of the coverage API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Host or IP literal, e.g. `0.0.0.0`.
    pub host: String,
    /// TCP port.
    pub port: u16,
}

impl ServerConfig {
    /// Resolve host and port into a socket address.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::Bind`] when the host is not an IP literal.
    pub fn socket_addr(&self) -> Result<SocketAddr, ServerError> {
        let raw = format!("{}:{}", self.host, self.port);
        raw.parse()
            .map_err(|e| ServerError::Bind(format!("invalid address {raw}: {e}")))
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::from(&ServerSection::default())
    }
}

impl From<&ServerSection> for ServerConfig {
    fn from(section: &ServerSection) -> Self {
        Self {
            host: section.host.clone(),
            port: section.port,
        }
    }
}

/// Serve the coverage API on `config` until the process exits.
///
/// # Errors
///
/// Returns [`ServerError::Bind`] when the address is invalid or taken,
/// and [`ServerError::Serve`] when the accept loop fails.
pub async fn start_server(config: &ServerConfig, state: Arc<AppState>) -> Result<(), ServerError> {
    let addr = config.socket_addr()?;

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| ServerError::Bind(format!("bind failed on {addr}: {e}")))?;

    info!(%addr, "Coverage API listening");

    axum::serve(listener, build_router(state))
        .await
        .map_err(|e| ServerError::Serve(e.to_string()))
}

/// Failures of the coverage API server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// The listen address is invalid or could not be bound.
    #[error("bind error: {0}")]
    Bind(String),

    /// The accept loop stopped with an I/O error.
    #[error("serve error: {0}")]
    Serve(String),
}
