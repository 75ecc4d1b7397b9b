//! Pass-through forwarding.
//!
//! # Responsibilities
//! - Forward requests the router let through to the upstream origin
//! - Preserve method, headers, path, query, and body
//! - Map upstream failures to 502 Bad Gateway
//!
//! # Design Decisions
//! - Plain HTTP to a single origin; no retries or balancing
//! - Response bodies are streamed back, not buffered

use std::str::FromStr;

use axum::{
    body::Body,
    http::{
        uri::{Authority, PathAndQuery, Scheme},
        Request, StatusCode, Uri,
    },
    response::{IntoResponse, Response},
};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};

use crate::http::request::RequestIdExt;

/// Upstream origin plus the client used to reach it.
#[derive(Clone)]
pub struct Upstream {
    authority: Authority,
    client: Client<HttpConnector, Body>,
}

impl std::fmt::Debug for Upstream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Upstream")
            .field("authority", &self.authority)
            .finish()
    }
}

impl Upstream {
    /// Create an upstream for `address` (e.g. "127.0.0.1:3000").
    pub fn new(address: &str) -> Result<Self, axum::http::uri::InvalidUri> {
        let authority = Authority::from_str(address)?;
        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());
        Ok(Self { authority, client })
    }

    pub fn authority(&self) -> &Authority {
        &self.authority
    }

    /// Rewrite the request URI onto the upstream origin.
    fn upstream_uri(&self, uri: &Uri) -> Uri {
        let mut parts = uri.clone().into_parts();
        parts.scheme = Some(Scheme::HTTP);
        parts.authority = Some(self.authority.clone());
        if parts.path_and_query.is_none() {
            parts.path_and_query = Some(PathAndQuery::from_static("/"));
        }
        Uri::from_parts(parts).unwrap_or_else(|_| uri.clone())
    }

    /// Forward a request and stream the upstream response back.
    pub async fn forward(&self, request: Request<Body>) -> Response {
        let request_id = request.request_id().to_string();
        let (mut parts, body) = request.into_parts();
        parts.uri = self.upstream_uri(&parts.uri);

        tracing::debug!(
            request_id = %request_id,
            uri = %parts.uri,
            "Forwarding to upstream"
        );

        match self.client.request(Request::from_parts(parts, body)).await {
            Ok(response) => {
                let (parts, body) = response.into_parts();
                Response::from_parts(parts, Body::new(body))
            }
            Err(e) => {
                tracing::error!(request_id = %request_id, error = %e, "Upstream error");
                (StatusCode::BAD_GATEWAY, "Upstream request failed").into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_upstream_uri_rewrite() {
        let upstream = Upstream::new("127.0.0.1:3000").unwrap();
        let uri: Uri = "/_next/static/app.js?v=2".parse().unwrap();
        assert_eq!(
            upstream.upstream_uri(&uri).to_string(),
            "http://127.0.0.1:3000/_next/static/app.js?v=2"
        );
    }

    #[test]
    fn test_invalid_address() {
        assert!(Upstream::new("not a host").is_err());
    }
}
