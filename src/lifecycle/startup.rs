//! Startup orchestration.
//!
//! # Responsibilities
//! - Start the metrics endpoint when enabled
//! - Build the HTTP server and bind its listener
//! - Run until a signal arrives, then drain within the grace period
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Listener binds last (traffic only when ready)
//! - Draining past `timeouts.shutdown_secs` is abandoned

use std::time::Duration;

use tokio::net::TcpListener;

use crate::config::RedirectorConfig;
use crate::http::HttpServer;
use crate::lifecycle::{signals, Shutdown};
use crate::observability::metrics;

/// Run the redirector with a validated configuration.
pub async fn run(config: RedirectorConfig) -> Result<(), Box<dyn std::error::Error>> {
    if config.observability.metrics_enabled {
        let addr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr)?;
    }

    let grace = Duration::from_secs(config.timeouts.shutdown_secs);
    let bind_address = config.listener.bind_address.clone();
    let server = HttpServer::new(config)?;

    let listener = TcpListener::bind(&bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let mut server_task = tokio::spawn(server.run(listener, shutdown.subscribe()));

    tokio::select! {
        joined = &mut server_task => {
            joined??;
            return Ok(());
        }
        _ = signals::wait_for_shutdown() => {}
    }

    shutdown.trigger();
    match tokio::time::timeout(grace, server_task).await {
        Ok(joined) => joined??,
        Err(_) => tracing::warn!(
            grace_secs = grace.as_secs(),
            "Connections still open after grace period, exiting"
        ),
    }

    Ok(())
}
