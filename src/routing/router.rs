//! Per-request routing decision.
//!
//! # Responsibilities
//! - Apply the exclusion filter before resolution
//! - Delegate everything else to the [`Resolver`]
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - Excluded paths are the only source of pass-through

use crate::config::RedirectorConfig;
use crate::routing::locale::LocaleSet;
use crate::routing::matcher::{AnyMatcher, ExactPathMatcher, Matcher, PathPrefixMatcher};
use crate::routing::resolver::{Resolver, RoutingDecision};

/// Filter + resolver, compiled once from configuration.
#[derive(Debug)]
pub struct Router {
    excluded: AnyMatcher,
    resolver: Resolver,
}

impl Router {
    pub fn new(excluded: AnyMatcher, resolver: Resolver) -> Self {
        Self { excluded, resolver }
    }

    /// Compile the router from validated configuration.
    pub fn from_config(config: &RedirectorConfig) -> Self {
        let mut excluded = AnyMatcher::default();
        for prefix in &config.filter.excluded_prefixes {
            excluded.push(Box::new(PathPrefixMatcher::new(prefix.clone())));
        }
        excluded.push(Box::new(ExactPathMatcher::new(config.filter.health_path.clone())));

        let resolver = Resolver::new(
            config.site.canonical_host.clone(),
            LocaleSet::new(config.site.locales.iter().cloned()),
            config.redirects.entries.clone(),
        );

        tracing::debug!(
            locales = resolver.locales().len(),
            redirects = resolver.table().len(),
            excluded_prefixes = config.filter.excluded_prefixes.len(),
            "Router compiled"
        );

        Self::new(excluded, resolver)
    }

    /// Decide what to do with a request for `path`.
    pub fn route(&self, path: &str) -> RoutingDecision {
        if self.excluded.matches(path) {
            return RoutingDecision::PassThrough;
        }
        self.resolver.resolve(path)
    }

    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }
}
