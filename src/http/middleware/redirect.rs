//! Redirect middleware.
//! Runs the routing decision ahead of every handler.

use std::time::Instant;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};

use crate::http::request::RequestIdExt;
use crate::http::response::redirect_response;
use crate::http::server::AppState;
use crate::observability::metrics;

pub async fn redirect_middleware(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let start = Instant::now();
    let decision = state.router.route(req.uri().path());
    let outcome = decision.outcome();

    if let Some(response) = redirect_response(&decision) {
        tracing::debug!(
            request_id = %req.request_id(),
            path = %req.uri().path(),
            location = decision.location().unwrap_or_default(),
            outcome,
            "Redirecting"
        );
        metrics::record_request(outcome, response.status().as_u16(), start);
        return response;
    }

    let response = next.run(req).await;
    metrics::record_request(outcome, response.status().as_u16(), start);
    response
}
