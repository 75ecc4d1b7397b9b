//! Locale-aware redirect resolution.
//!
//! # Responsibilities
//! - Detect an optional locale prefix on the request path
//! - Look up the remaining path in the redirect table
//! - Build the absolute destination under the canonical host
//!
//! # Design Decisions
//! - Total over all inputs: unknown paths redirect to the site root
//! - Every resolution is a permanent (301) redirect
//! - Locale prefix is preserved only when a table target exists
//! - Inputs are injected at construction and never mutated

use axum::http::StatusCode;
use url::Url;

use crate::routing::locale::LocaleSet;
use crate::routing::table::{Lookup, RedirectTable};

/// Why a redirect was issued. Used for logging and metrics labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectReason {
    /// Locale-prefixed path with a table target; prefix kept.
    LocaleTarget,
    /// Unprefixed path with a table target.
    Target,
    /// Root, bare locale, root sentinel, or unknown path.
    Root,
}

impl RedirectReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            RedirectReason::LocaleTarget => "locale_target",
            RedirectReason::Target => "target",
            RedirectReason::Root => "root",
        }
    }
}

/// Per-request routing outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoutingDecision {
    /// Issue a redirect to an absolute URL.
    RedirectTo {
        location: String,
        status: StatusCode,
        reason: RedirectReason,
    },
    /// Let the request continue to normal handling.
    PassThrough,
}

impl RoutingDecision {
    /// Destination URL, if this is a redirect.
    pub fn location(&self) -> Option<&str> {
        match self {
            RoutingDecision::RedirectTo { location, .. } => Some(location),
            RoutingDecision::PassThrough => None,
        }
    }

    /// Metrics/log label for this decision.
    pub fn outcome(&self) -> &'static str {
        match self {
            RoutingDecision::RedirectTo { reason, .. } => reason.as_str(),
            RoutingDecision::PassThrough => "pass_through",
        }
    }
}

/// The table key a request path is looked up under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKey<'a> {
    /// Root or bare locale; always the site root.
    Root,
    /// No locale prefix: the whole normalized path, as received.
    Unprefixed(&'a str),
    /// Locale prefix with one trailing slash dropped from the rest.
    Localized { locale: &'a str, key: &'a str },
}

/// Split a request path into its locale prefix and table key.
pub fn path_key<'a>(path: &'a str, locales: &LocaleSet) -> PathKey<'a> {
    let normalized = path.strip_prefix('/').unwrap_or(path);
    if normalized.is_empty() {
        return PathKey::Root;
    }

    let (first, rest) = normalized.split_once('/').unwrap_or((normalized, ""));
    if !locales.contains(first) {
        return PathKey::Unprefixed(normalized);
    }

    let rest = rest.strip_suffix('/').unwrap_or(rest);
    if rest.is_empty() {
        return PathKey::Root;
    }
    PathKey::Localized { locale: first, key: rest }
}

/// Maps request paths onto permanent redirects.
#[derive(Debug, Clone)]
pub struct Resolver {
    canonical_host: String,
    locales: LocaleSet,
    table: RedirectTable,
}

impl Resolver {
    /// Create a resolver. A trailing slash on `canonical_host` is dropped.
    pub fn new(canonical_host: impl Into<String>, locales: LocaleSet, table: RedirectTable) -> Self {
        let mut canonical_host = canonical_host.into();
        if canonical_host.ends_with('/') {
            canonical_host.pop();
        }
        Self {
            canonical_host,
            locales,
            table,
        }
    }

    /// Decide where `path` should be redirected.
    ///
    /// Never returns [`RoutingDecision::PassThrough`].
    pub fn resolve(&self, path: &str) -> RoutingDecision {
        match path_key(path, &self.locales) {
            PathKey::Root => self.root(),
            PathKey::Unprefixed(key) => match self.table.lookup(key) {
                Lookup::Target(target) => self.redirect(
                    self.absolute(&format!("{}/{}", self.canonical_host, target)),
                    RedirectReason::Target,
                ),
                Lookup::Root | Lookup::Missing => self.root(),
            },
            PathKey::Localized { locale, key } => match self.table.lookup(key) {
                Lookup::Target(target) => self.redirect(
                    self.absolute(&format!("{}/{}/{}", self.canonical_host, locale, target)),
                    RedirectReason::LocaleTarget,
                ),
                Lookup::Root | Lookup::Missing => self.root(),
            },
        }
    }

    /// Absolute URL of the site root.
    pub fn site_root(&self) -> String {
        format!("{}/", self.canonical_host)
    }

    pub fn canonical_host(&self) -> &str {
        &self.canonical_host
    }

    pub fn locales(&self) -> &LocaleSet {
        &self.locales
    }

    pub fn table(&self) -> &RedirectTable {
        &self.table
    }

    /// Parse a destination the way a browser would, percent-encoding
    /// anything a `Location` header cannot carry raw.
    fn absolute(&self, destination: &str) -> String {
        match Url::parse(destination) {
            Ok(url) => url.into(),
            Err(_) => self.site_root(),
        }
    }

    fn root(&self) -> RoutingDecision {
        self.redirect(self.site_root(), RedirectReason::Root)
    }

    fn redirect(&self, location: String, reason: RedirectReason) -> RoutingDecision {
        RoutingDecision::RedirectTo {
            location,
            status: StatusCode::MOVED_PERMANENTLY,
            reason,
        }
    }
}
