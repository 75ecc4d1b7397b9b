//! In-process tests of the layered Axum router.

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use locale_redirector::http::HttpServer;

mod common;

fn app() -> axum::Router {
    HttpServer::new(common::site_config()).unwrap().into_router()
}

#[tokio::test]
async fn test_redirect_has_empty_body_and_location() {
    let response = app()
        .oneshot(Request::builder().uri("/en/old-page").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "https://www.acp.io/en/new-page"
    );
    assert!(response.headers().contains_key("x-request-id"));

    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert!(body.is_empty());
}

#[tokio::test]
async fn test_any_method_is_redirected() {
    let response = app()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/de/old-page")
                .body(Body::from("form=1"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "https://www.acp.io/de/new-page"
    );
}

#[tokio::test]
async fn test_custom_exclusions_and_health_path() {
    let mut config = common::site_config();
    config.filter.excluded_prefixes = vec!["assets".into()];
    config.filter.health_path = "/_status".into();
    let app = HttpServer::new(config).unwrap().into_router();

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/assets/logo.svg").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/_status").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Default exclusions no longer apply, and the old health path redirects
    for uri in ["/favicon.ico", "/healthz"] {
        let response = app
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY, "{uri}");
    }
}

#[tokio::test]
async fn test_canonical_host_from_config() {
    let mut config = common::site_config();
    config.site.canonical_host = "http://staging.acp.test:8443/".into();
    let app = HttpServer::new(config).unwrap().into_router();

    let response = app
        .oneshot(Request::builder().uri("/old-page").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "http://staging.acp.test:8443/new-page"
    );
}
