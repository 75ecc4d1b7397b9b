//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (redirects, tracing, timeout, request ID)
//! - Bind server to listener
//! - Hand pass-through traffic to the upstream or answer 404
//! - Graceful shutdown

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware,
    response::Response,
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::RedirectorConfig;
use crate::http::middleware::redirect_middleware;
use crate::http::request::{propagate_request_id_layer, set_request_id_layer, RequestIdExt};
use crate::http::response::not_found;
use crate::http::upstream::Upstream;
use crate::routing::Router as RedirectRouter;

/// Application state injected into handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    pub router: Arc<RedirectRouter>,
    pub upstream: Option<Upstream>,
}

/// HTTP server for the redirector.
pub struct HttpServer {
    router: Router,
    config: RedirectorConfig,
}

impl HttpServer {
    /// Create a new HTTP server from validated configuration.
    pub fn new(config: RedirectorConfig) -> Result<Self, axum::http::uri::InvalidUri> {
        let upstream = config
            .upstream
            .address
            .as_deref()
            .map(Upstream::new)
            .transpose()?;

        let state = AppState {
            router: Arc::new(RedirectRouter::from_config(&config)),
            upstream,
        };

        let router = Self::build_router(&config, state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &RedirectorConfig, state: AppState) -> Router {
        Router::new()
            .route(&config.filter.health_path, get(health_handler))
            .fallback(pass_through_handler)
            .layer(middleware::from_fn_with_state(state.clone(), redirect_middleware))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(propagate_request_id_layer())
            .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                tracing::info_span!(
                    "request",
                    request_id = %request.request_id(),
                    method = %request.method(),
                    path = %request.uri().path(),
                )
            }))
            .layer(set_request_id_layer())
    }

    /// The fully layered router, for in-process use.
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Run the server until a shutdown signal is received.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            canonical_host = %self.config.site.canonical_host,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received, draining connections");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &RedirectorConfig {
        &self.config
    }
}

async fn health_handler() -> &'static str {
    "ok"
}

/// Requests the router let through: forward upstream, or 404.
async fn pass_through_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    match &state.upstream {
        Some(upstream) => upstream.forward(request).await,
        None => not_found(),
    }
}
