//! Locale-aware legacy redirect service.
//!
//! Sits in front of a localized site and answers every request whose path
//! is not a static asset with a permanent redirect under the canonical host.
//!
//! # Architecture Overview
//!
//! ```text
//!                   ┌──────────────────────────────────────────────────────┐
//!                   │                  LOCALE REDIRECTOR                    │
//!                   │                                                       │
//!   Client Request  │  ┌─────────┐    ┌────────────┐    ┌───────────────┐  │
//!   ────────────────┼─▶│  http   │───▶│  redirect  │───▶│   routing     │  │
//!                   │  │ server  │    │ middleware │    │ filter+resolve│  │
//!                   │  └─────────┘    └─────┬──────┘    └───────────────┘  │
//!                   │                       │                               │
//!   301 + Location  │              RedirectTo │ PassThrough                 │
//!   ◀───────────────┼───────────────────────┘ └──▶ health / upstream / 404  │
//!                   │                                                       │
//!                   │  ┌─────────┐ ┌──────────────┐ ┌───────────┐          │
//!                   │  │ config  │ │observability │ │ lifecycle │          │
//!                   │  └─────────┘ └──────────────┘ └───────────┘          │
//!                   └──────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use locale_redirector::config::{load_config, RedirectorConfig};
use locale_redirector::lifecycle::startup;
use locale_redirector::observability::init_logging;

#[derive(Parser)]
#[command(name = "locale-redirector")]
#[command(about = "Permanent redirects for legacy and localized site paths", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file. Defaults are used when omitted.
    #[arg(short, long, env = "REDIRECTOR_CONFIG")]
    config: Option<PathBuf>,

    /// Override `listener.bind_address`.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => RedirectorConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }

    init_logging(&config.observability);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        config = ?cli.config,
        bind_address = %config.listener.bind_address,
        canonical_host = %config.site.canonical_host,
        locales = ?config.site.locales,
        redirects = config.redirects.entries.len(),
        "locale-redirector starting"
    );

    if let Err(e) = startup::run(config).await {
        tracing::error!(error = %e, "Fatal error");
        return Err(e);
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
