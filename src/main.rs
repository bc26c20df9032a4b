//! Notification routes server.
//!
//! ```text
//!   Client Request
//!   ──────────────▶ request ID → trace → timeout/limits → dispatch
//!                                                           │
//!                                     RouteTable::resolve(path)
//!                                     ┌─────────┴──────────┐
//!                                  NotFound             RouteMatch
//!                                     │                     │
//!                                    404            route handler
//! ```
//!
//! Serves the notification route table with the echo handlers bound to
//! every endpoint. Applications embedding the library supply their own
//! `NotificationHandlers` instead.

use std::path::PathBuf;

use clap::Parser;

use notification_routes::config::load_or_default;
use notification_routes::http::echo_handlers;
use notification_routes::lifecycle::{signals, startup, Shutdown};
use notification_routes::observability::logging;

#[derive(Parser)]
#[command(name = "notification-routes")]
#[command(about = "HTTP server for the notification route table", long_about = None)]
struct Args {
    /// Path to a TOML config file. Defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = load_or_default(args.config.as_deref())?;

    logging::init_logging(&config.observability)?;
    tracing::info!("notification-routes v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        config_file = ?args.config,
        bind_address = %config.listener.bind_address,
        mount_path = %config.mount_path,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    let shutdown = Shutdown::new();
    tokio::spawn(signals::shutdown_on_signal(shutdown.clone()));

    if let Err(e) = startup::run(config, &echo_handlers(), &shutdown).await {
        tracing::error!(error = %e, "Fatal error");
        return Err(e.into());
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
