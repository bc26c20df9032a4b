//! Startup orchestration.
//!
//! # Responsibilities
//! - Build the route table from validated configuration
//! - Start the metrics endpoint
//! - Bind the listener and begin accepting traffic
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - The route table is built before anything binds a port
//! - Listener starts last (traffic only when ready)

use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::ServiceConfig;
use crate::http::HttpServer;
use crate::lifecycle::Shutdown;
use crate::notifications::NotificationHandlers;
use crate::observability::metrics;
use crate::routing::ConfigurationError;

/// Errors that abort startup.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("route table: {0}")]
    Routes(#[from] ConfigurationError),

    #[error("metrics: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Start serving `config` with `handlers` until `shutdown` fires.
///
/// `config` is expected to have passed `validate_config` already.
pub async fn run(
    config: ServiceConfig,
    handlers: &NotificationHandlers,
    shutdown: &Shutdown,
) -> Result<(), StartupError> {
    let server = HttpServer::new(config, handlers)?;
    let config = server.config().clone();

    if config.observability.metrics_enabled {
        metrics::init_metrics(config.observability.metrics_address)?;
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(
        address = %listener.local_addr()?,
        "Listening for connections"
    );

    server.run(listener, shutdown.subscribe()).await?;
    Ok(())
}
