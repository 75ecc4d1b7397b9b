//! Request filter matching.
//!
//! # Responsibilities
//! - Decide which paths bypass redirect resolution
//! - Match path prefixes relative to the site root
//! - Combine conditions with OR semantics
//!
//! # Design Decisions
//! - Prefixes are written without a leading slash (`_next/static`)
//! - Path matching is case-sensitive
//! - No regex to guarantee O(n) matching

/// Trait for matching request paths against conditions.
pub trait Matcher: Send + Sync + std::fmt::Debug {
    /// Returns true if the path matches this condition.
    fn matches(&self, path: &str) -> bool;
}

/// Matches a path prefix after one leading slash is removed.
#[derive(Debug, Clone)]
pub struct PathPrefixMatcher {
    prefix: String,
}

impl PathPrefixMatcher {
    /// Create a new path prefix matcher. A leading slash on `prefix` is ignored.
    pub fn new(prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        let prefix = match prefix.strip_prefix('/') {
            Some(stripped) => stripped.to_string(),
            None => prefix,
        };
        Self { prefix }
    }
}

impl Matcher for PathPrefixMatcher {
    fn matches(&self, path: &str) -> bool {
        let path = path.strip_prefix('/').unwrap_or(path);
        path.starts_with(&self.prefix)
    }
}

/// Matches one exact path, ignoring a single leading slash on both sides.
#[derive(Debug, Clone)]
pub struct ExactPathMatcher {
    path: String,
}

impl ExactPathMatcher {
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        let path = path.strip_prefix('/').map(str::to_string).unwrap_or(path);
        Self { path }
    }
}

impl Matcher for ExactPathMatcher {
    fn matches(&self, path: &str) -> bool {
        path.strip_prefix('/').unwrap_or(path) == self.path
    }
}

/// Combines multiple matchers with OR semantics.
#[derive(Debug, Default)]
pub struct AnyMatcher {
    matchers: Vec<Box<dyn Matcher>>,
}

impl AnyMatcher {
    pub fn new(matchers: Vec<Box<dyn Matcher>>) -> Self {
        Self { matchers }
    }

    pub fn push(&mut self, matcher: Box<dyn Matcher>) {
        self.matchers.push(matcher);
    }
}

impl Matcher for AnyMatcher {
    fn matches(&self, path: &str) -> bool {
        self.matchers.iter().any(|m| m.matches(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_prefix_matcher() {
        let matcher = PathPrefixMatcher::new("_next/static");

        assert!(matcher.matches("/_next/static/chunks/app.js"));
        assert!(matcher.matches("_next/static"));
        assert!(!matcher.matches("/en/_next/static"));
        assert!(!matcher.matches("/_next/data"));
    }

    #[test]
    fn test_prefix_leading_slash_ignored() {
        let matcher = PathPrefixMatcher::new("/favicon.ico");
        assert!(matcher.matches("/favicon.ico"));
    }

    #[test]
    fn test_exact_path_matcher() {
        let matcher = ExactPathMatcher::new("/healthz");
        assert!(matcher.matches("/healthz"));
        assert!(!matcher.matches("/healthz/extra"));
        assert!(!matcher.matches("/health"));
    }

    #[test]
    fn test_any_matcher() {
        let matcher = AnyMatcher::new(vec![
            Box::new(PathPrefixMatcher::new("_next/image")),
            Box::new(PathPrefixMatcher::new("apple-icon.png")),
        ]);

        assert!(matcher.matches("/_next/image?url=x"));
        assert!(matcher.matches("/apple-icon.png"));
        assert!(!matcher.matches("/en/about"));
        assert!(!AnyMatcher::default().matches("/anything"));
    }
}
