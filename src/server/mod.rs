//! Web server for the Classify map client.
//!
//! Serves two read-only JSON queries over the static redlining dataset:
//! - `/searchDescriptions`: keyword search over area descriptions
//! - `/redlining`: features intersecting a bounding box

mod error;
mod handlers;
mod routes;

pub use error::ApiError;
pub use routes::create_router;

use std::sync::Arc;

use tokio::signal;

use crate::config::Settings;
use crate::dataset::Dataset;
use crate::services::QueryService;

/// Shared state for the web server.
#[derive(Clone)]
pub struct AppState {
    pub query: QueryService,
}

impl AppState {
    /// Load the dataset and build the configured index.
    pub async fn new(settings: &Settings) -> anyhow::Result<Self> {
        let dataset = Dataset::load(&settings.dataset_path).await?;
        Ok(Self::from_dataset(dataset, settings))
    }

    pub fn from_dataset(dataset: Dataset, settings: &Settings) -> Self {
        let query = QueryService::new(Arc::new(dataset), settings.index);
        tracing::info!("Using {} index", query.index_name());
        Self { query }
    }
}

/// Start the web server and run until Ctrl+C or SIGTERM.
pub async fn serve(settings: &Settings, host: &str, port: u16) -> anyhow::Result<()> {
    let state = AppState::new(settings).await?;
    let app = create_router(state);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Starting server at http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
        tracing::info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
                tracing::info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
