//! Locale-aware legacy redirect service library.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use config::RedirectorConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use routing::{Resolver, RoutingDecision};
