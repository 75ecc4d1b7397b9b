//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML) + redirect table (JSON)
//!     → loader.rs (parse, deserialize, merge table)
//!     → validation.rs (semantic checks)
//!     → RedirectorConfig (validated, immutable)
//!     → compiled into routing::Router, shared via Arc
//! ```
//!
//! # Design Decisions
//! - Config is loaded once; the locale set and redirect table never change
//!   for the lifetime of the process
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::FilterConfig;
pub use schema::ListenerConfig;
pub use schema::LogFormat;
pub use schema::ObservabilityConfig;
pub use schema::RedirectorConfig;
pub use schema::RedirectsConfig;
pub use schema::SiteConfig;
pub use schema::TimeoutConfig;
pub use schema::UpstreamConfig;
pub use validation::{validate_config, ValidationError};
