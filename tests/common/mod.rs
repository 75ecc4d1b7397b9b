//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use locale_redirector::config::RedirectorConfig;
use locale_redirector::http::HttpServer;
use locale_redirector::lifecycle::Shutdown;

/// Config used across tests: locales en/de and a small table.
pub fn site_config() -> RedirectorConfig {
    let mut config = RedirectorConfig::default();
    config.site.canonical_host = "https://www.acp.io".into();
    config.site.locales = vec!["en".into(), "de".into()];
    config.redirects.entries = [
        ("old-page", "new-page"),
        ("gone-page", ""),
        ("blog/2019/launch", "news/launch"),
    ]
    .into_iter()
    .collect();
    config
}

/// Start the redirector on an ephemeral port.
pub async fn start_redirector(config: RedirectorConfig) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = HttpServer::new(config).unwrap();
    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    tokio::time::sleep(Duration::from_millis(50)).await;
    (addr, shutdown)
}

/// Start a mock upstream that answers 200 with the request line it received,
/// followed by its `x-request-id` header line when one was sent.
pub async fn start_echo_upstream() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    tokio::spawn(async move {
                        let mut buf = vec![0u8; 4096];
                        let n = socket.read(&mut buf).await.unwrap_or(0);
                        let head = String::from_utf8_lossy(&buf[..n]);
                        let mut lines = head.lines();
                        let mut body = lines.next().unwrap_or_default().to_string();
                        let request_id = lines
                            .take_while(|line| !line.is_empty())
                            .filter_map(|line| line.split_once(':'))
                            .find(|(name, _)| name.trim().eq_ignore_ascii_case("x-request-id"))
                            .map(|(_, value)| value.trim().to_string());
                        if let Some(id) = request_id {
                            body.push_str("\nx-request-id: ");
                            body.push_str(&id);
                        }

                        let response_str = format!(
                            "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response_str.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

/// HTTP client that reports redirects instead of following them.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .pool_max_idle_per_host(0)
        .build()
        .unwrap()
}
