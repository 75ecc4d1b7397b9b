//! Response construction.
//!
//! # Responsibilities
//! - Turn a redirect decision into an HTTP response
//! - Provide the fixed responses for health and unrouted traffic
//!
//! # Design Decisions
//! - Redirects carry an absolute `Location` and an empty body
//! - A `Location` that is not a valid header value becomes a 500

use axum::{
    body::Body,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};

use crate::routing::RoutingDecision;

/// Build the response for a decision, or `None` for pass-through.
pub fn redirect_response(decision: &RoutingDecision) -> Option<Response> {
    match decision {
        RoutingDecision::RedirectTo { location, status, .. } => {
            let response = match HeaderValue::from_str(location) {
                Ok(value) => {
                    let mut response = Response::new(Body::empty());
                    *response.status_mut() = *status;
                    response.headers_mut().insert(header::LOCATION, value);
                    response
                }
                Err(_) => {
                    tracing::error!(location = %location, "Redirect location is not a valid header value");
                    StatusCode::INTERNAL_SERVER_ERROR.into_response()
                }
            };
            Some(response)
        }
        RoutingDecision::PassThrough => None,
    }
}

/// Response for pass-through traffic when no upstream is configured.
pub fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "Not Found").into_response()
}
