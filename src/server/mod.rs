//! Dashboard HTTP API

mod error;
mod handlers;
mod routes;
mod state;

pub use error::ApiError;
pub use state::AppState;

use crate::store::{CsvStore, StoreError};
use std::sync::Arc;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Server host address (default: "127.0.0.1")
    pub host: String,
    /// Server port (default: 3000)
    pub port: u16,
    /// Directory holding the three input CSVs
    pub data_dir: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 3000,
            data_dir: "data".to_string(),
        }
    }
}

impl ServerConfig {
    /// Creates a new server configuration
    pub fn new(host: impl Into<String>, port: u16, data_dir: impl Into<String>) -> Self {
        ServerConfig {
            host: host.into(),
            port,
            data_dir: data_dir.into(),
        }
    }
}

/// Runs the dashboard API server
///
/// The datasets are loaded once at startup and treated as read-only for the
/// lifetime of the process. A missing input file does not abort the server:
/// the process starts, and every data endpoint responds with a blocking
/// missing-data message until the files exist and the server is restarted.
pub async fn run_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_target(false)
        .compact()
        .init();

    // Load datasets up front; absence of a file is a degraded start, not a crash
    let state = match CsvStore::new(&config.data_dir).load() {
        Ok(datasets) => {
            tracing::info!(
                activity_rows = datasets.activity.len(),
                feedback_rows = datasets.feedback.len(),
                feature_rows = datasets.features.len(),
                "Datasets loaded from {}",
                config.data_dir
            );
            Arc::new(AppState::new(datasets))
        }
        Err(StoreError::MissingInput(path)) => {
            tracing::warn!("Input file missing: {}; serving blocking errors", path.display());
            Arc::new(AppState::missing_input(path.display().to_string()))
        }
        Err(other) => return Err(Box::new(other)),
    };

    // Create router
    let app = routes::create_router(state);

    // Build server address
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on http://{}", addr);

    // Run server
    axum::serve(listener, app).await?;

    Ok(())
}
