//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request path
//!     → router.rs (exclusion filter)
//!     → matcher.rs (static asset prefixes, health path)
//!     → resolver.rs (locale detection + table lookup)
//!     → Return: RedirectTo(location, 301) or PassThrough
//!
//! Router Compilation (at startup):
//!     RedirectorConfig
//!     → LocaleSet + RedirectTable
//!     → Compile matchers
//!     → Freeze as immutable Router
//! ```
//!
//! # Design Decisions
//! - Routing state compiled at startup, immutable at runtime
//! - No regex in hot path (prefix and exact matching only)
//! - Deterministic: same path always yields the same decision

pub mod locale;
pub mod matcher;
pub mod resolver;
pub mod router;
pub mod table;

pub use locale::LocaleSet;
pub use resolver::{RedirectReason, Resolver, RoutingDecision};
pub use router::Router;
pub use table::{Lookup, RedirectTable};
