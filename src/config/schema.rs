//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the redirector.
//! All types derive Serde traits for deserialization from config files.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::routing::RedirectTable;

/// Root configuration for the redirector.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RedirectorConfig {
    /// Listener configuration.
    pub listener: ListenerConfig,

    /// Canonical host and supported locales.
    pub site: SiteConfig,

    /// Legacy path redirect table.
    pub redirects: RedirectsConfig,

    /// Paths that bypass redirect resolution.
    pub filter: FilterConfig,

    /// Where pass-through requests are forwarded.
    pub upstream: UpstreamConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Site identity used to build redirect destinations.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Absolute origin every redirect points at (e.g., "https://www.acp.io").
    pub canonical_host: String,

    /// Supported locale codes, in display order.
    pub locales: Vec<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            canonical_host: "https://www.acp.io".to_string(),
            locales: vec!["en".to_string()],
        }
    }
}

/// Redirect table sources.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RedirectsConfig {
    /// Optional flat JSON object of legacy → new paths.
    /// Relative paths resolve against the config file's directory.
    pub table_path: Option<PathBuf>,

    /// Inline entries. After loading, this holds the merged table
    /// (file entries first, inline entries override).
    ///
    /// Keys are compared against the raw request path, so non-ASCII
    /// segments must be written percent-encoded (`%C3%BCber-uns`, not
    /// `über-uns`). Targets may be written either way.
    pub entries: RedirectTable,
}

/// Exclusion filter configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Path prefixes (without leading slash) that skip redirection.
    pub excluded_prefixes: Vec<String>,

    /// Health check path; always excluded. Must be a literal route below `/`.
    pub health_path: String,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            excluded_prefixes: vec![
                "_next/static".to_string(),
                "_next/image".to_string(),
                "favicon.ico".to_string(),
                "apple-icon.png".to_string(),
            ],
            health_path: "/healthz".to_string(),
        }
    }
}

/// Upstream origin for pass-through traffic.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Upstream address (e.g., "127.0.0.1:3000"). None answers 404.
    pub address: Option<String>,
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,

    /// Grace period for in-flight requests on shutdown, in seconds.
    pub shutdown_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            request_secs: 30,
            shutdown_secs: 10,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Full,
    Compact,
    Pretty,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` overrides.
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Full,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
