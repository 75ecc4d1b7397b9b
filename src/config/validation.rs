//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check locale codes and the canonical host
//! - Check redirect table shape and reject redirect chains, including
//!   chains reached through a locale prefix
//! - Validate addresses and value ranges
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: &RedirectorConfig → Result<(), Vec<ValidationError>>
//! - Runs after the redirect table file is merged in

use std::collections::HashSet;
use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::RedirectorConfig;
use crate::routing::resolver::{path_key, PathKey};
use crate::routing::{LocaleSet, RedirectTable};

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("site.locales must not be empty")]
    NoLocales,

    #[error("invalid locale code {0:?}")]
    InvalidLocale(String),

    #[error("duplicate locale code {0:?}")]
    DuplicateLocale(String),

    #[error("site.canonical_host {host:?} is not an absolute http(s) origin: {reason}")]
    InvalidCanonicalHost { host: String, reason: String },

    #[error("redirect key must not be empty")]
    EmptyRedirectKey,

    #[error("redirect key {0:?} must not start or end with '/'")]
    UnnormalizedKey(String),

    #[error("redirect key {0:?} can never match a request path; write it percent-encoded")]
    UnmatchableKey(String),

    #[error("redirect target {target:?} for key {key:?} must not start or end with '/'")]
    UnnormalizedTarget { key: String, target: String },

    #[error("redirect target {target:?} for key {key:?} is not a valid URL path")]
    InvalidTarget { key: String, target: String },

    #[error("redirect chain: {key:?} → {target:?}, which is itself redirected")]
    RedirectChain { key: String, target: String },

    #[error("invalid {field} address {value:?}")]
    InvalidAddress { field: &'static str, value: String },

    #[error("filter.health_path {0:?} must be a literal path below '/'")]
    InvalidHealthPath(String),

    #[error("{0} must be greater than zero")]
    Zero(&'static str),
}

/// Validate a configuration, collecting every error found.
pub fn validate_config(config: &RedirectorConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    validate_site(config, &mut errors);
    validate_redirects(config, &mut errors);

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }
    if !is_literal_route(&config.filter.health_path) {
        errors.push(ValidationError::InvalidHealthPath(config.filter.health_path.clone()));
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::Zero("timeouts.request_secs"));
    }
    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }
    if let Some(upstream) = &config.upstream.address {
        if upstream.parse::<axum::http::uri::Authority>().is_err() {
            errors.push(ValidationError::InvalidAddress {
                field: "upstream.address",
                value: upstream.clone(),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_site(config: &RedirectorConfig, errors: &mut Vec<ValidationError>) {
    let locales = &config.site.locales;
    if locales.is_empty() {
        errors.push(ValidationError::NoLocales);
    }

    let mut seen = HashSet::new();
    for code in locales {
        let well_formed = !code.is_empty()
            && code.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !well_formed {
            errors.push(ValidationError::InvalidLocale(code.clone()));
        } else if !seen.insert(code.as_str()) {
            errors.push(ValidationError::DuplicateLocale(code.clone()));
        }
    }

    let host = &config.site.canonical_host;
    let invalid = |reason: &str| ValidationError::InvalidCanonicalHost {
        host: host.clone(),
        reason: reason.to_string(),
    };
    match Url::parse(host) {
        Ok(url) => {
            if url.scheme() != "http" && url.scheme() != "https" {
                errors.push(invalid("scheme must be http or https"));
            } else if url.host_str().is_none() {
                errors.push(invalid("missing host"));
            } else if url.path() != "/" || url.query().is_some() || url.fragment().is_some() {
                errors.push(invalid("must not carry a path, query, or fragment"));
            }
        }
        Err(e) => errors.push(invalid(&e.to_string())),
    }
}

fn validate_redirects(config: &RedirectorConfig, errors: &mut Vec<ValidationError>) {
    let table = &config.redirects.entries;
    let locales = LocaleSet::new(config.site.locales.iter().map(String::as_str));

    for (key, target) in table.sorted() {
        if key.is_empty() {
            errors.push(ValidationError::EmptyRedirectKey);
            continue;
        }
        if key.starts_with('/') || key.ends_with('/') {
            errors.push(ValidationError::UnnormalizedKey(key.to_string()));
        }
        if !is_matchable_key(key) {
            errors.push(ValidationError::UnmatchableKey(key.to_string()));
        }
        if target.starts_with('/') || target.ends_with('/') {
            errors.push(ValidationError::UnnormalizedTarget {
                key: key.to_string(),
                target: target.to_string(),
            });
        }
        if target.chars().any(|c| c.is_control() || c == '\\') {
            errors.push(ValidationError::InvalidTarget {
                key: key.to_string(),
                target: target.to_string(),
            });
        }
        if !target.is_empty() && redirects_again(target, &locales, table) {
            errors.push(ValidationError::RedirectChain {
                key: key.to_string(),
                target: target.to_string(),
            });
        }
    }
}

/// Whether a request landing on `target` would be redirected onward.
///
/// A target is reached both unprefixed (`/<target>`) and under every locale
/// (`/<locale>/<target>`). The second form always looks up `target` itself;
/// the first may read a leading locale segment off the target.
fn redirects_again(target: &str, locales: &LocaleSet, table: &RedirectTable) -> bool {
    if table.contains_key(target) {
        return true;
    }
    match path_key(target, locales) {
        // A bare locale lands on `/<locale>`, which is sent to the site root.
        PathKey::Root => true,
        PathKey::Unprefixed(key) | PathKey::Localized { key, .. } => table.contains_key(key),
    }
}

/// Request paths arrive percent-encoded, so raw spaces, non-ASCII text,
/// and query or fragment delimiters never appear in them.
fn is_matchable_key(key: &str) -> bool {
    key.chars().all(|c| c.is_ascii_graphic() && c != '?' && c != '#')
}

/// The health path is mounted as a literal axum route.
fn is_literal_route(path: &str) -> bool {
    path.len() > 1
        && path.starts_with('/')
        && !path
            .chars()
            .any(|c| c.is_whitespace() || c.is_control() || matches!(c, ':' | '*' | '{' | '}' | '?' | '#'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> RedirectorConfig {
        let mut config = RedirectorConfig::default();
        config.site.locales = vec!["en".into(), "de".into()];
        config.redirects.entries = [("old-page", "new-page"), ("gone-page", "")]
            .into_iter()
            .collect();
        config
    }

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(validate_config(&RedirectorConfig::default()), Ok(()));
        assert_eq!(validate_config(&valid()), Ok(()));
    }

    #[test]
    fn test_redirect_chain_rejected() {
        let mut config = valid();
        config.redirects.entries = [("a", "b"), ("b", "c")].into_iter().collect();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::RedirectChain { key: "a".into(), target: "b".into() }]
        );
    }

    #[test]
    fn test_self_redirect_rejected() {
        let mut config = valid();
        config.redirects.entries = [("loop", "loop")].into_iter().collect();
        assert!(matches!(
            validate_config(&config).unwrap_err()[..],
            [ValidationError::RedirectChain { .. }]
        ));
    }

    #[test]
    fn test_slashes_rejected() {
        let mut config = valid();
        config.redirects.entries = [("/old", "new/"), ("", "x")].into_iter().collect();

        let errors = validate_config(&config).unwrap_err();
        assert!(errors.contains(&ValidationError::EmptyRedirectKey));
        assert!(errors.contains(&ValidationError::UnnormalizedKey("/old".into())));
        assert!(errors.contains(&ValidationError::UnnormalizedTarget {
            key: "/old".into(),
            target: "new/".into()
        }));
    }

    #[test]
    fn test_locale_prefixed_chain_rejected() {
        let mut config = valid();
        config.site.locales = vec!["en".into()];
        config.redirects.entries = [("old", "en/mid"), ("mid", "final")].into_iter().collect();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::RedirectChain { key: "old".into(), target: "en/mid".into() }]
        );

        // Other locales are not stripped off the target
        config.redirects.entries = [("old", "fr/mid"), ("mid", "final")].into_iter().collect();
        assert_eq!(validate_config(&config), Ok(()));
    }

    #[test]
    fn test_bare_locale_target_rejected() {
        let mut config = valid();
        config.redirects.entries = [("deutsch", "de")].into_iter().collect();
        assert!(matches!(
            validate_config(&config).unwrap_err()[..],
            [ValidationError::RedirectChain { .. }]
        ));
    }

    #[test]
    fn test_target_characters() {
        let mut config = valid();
        for target in ["new\npage", "new\tpage", "a\\b"] {
            config.redirects.entries = [("old", target)].into_iter().collect();
            assert!(
                matches!(validate_config(&config).unwrap_err()[..], [ValidationError::InvalidTarget { .. }]),
                "{target:?}"
            );
        }

        // Spaces and non-ASCII are percent-encoded into the Location
        config.redirects.entries = [("old", "new page"), ("alt", "über-uns")].into_iter().collect();
        assert_eq!(validate_config(&config), Ok(()));
    }

    #[test]
    fn test_unmatchable_keys_rejected() {
        let mut config = valid();
        config.redirects.entries = [("über-uns", "about"), ("old page", "new"), ("a?b", "c")]
            .into_iter()
            .collect();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::UnmatchableKey("a?b".into()),
                ValidationError::UnmatchableKey("old page".into()),
                ValidationError::UnmatchableKey("über-uns".into()),
            ]
        );

        config.redirects.entries = [("%C3%BCber-uns", "about")].into_iter().collect();
        assert_eq!(validate_config(&config), Ok(()));
    }

    #[test]
    fn test_health_path_must_be_literal() {
        let mut config = valid();
        for path in ["healthz", "/", "/:status", "/*rest", "/{id}", "/health z", "/h?x"] {
            config.filter.health_path = path.into();
            assert_eq!(
                validate_config(&config).unwrap_err(),
                vec![ValidationError::InvalidHealthPath(path.into())],
                "{path:?}"
            );
        }

        config.filter.health_path = "/_status/live".into();
        assert_eq!(validate_config(&config), Ok(()));
    }

    #[test]
    fn test_locale_errors() {
        let mut config = valid();
        config.site.locales = vec!["en".into(), "en".into(), "".into(), "de/at".into()];

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.contains(&ValidationError::DuplicateLocale("en".into())));

        config.site.locales = vec!["en".into(), "日本".into(), "pt_BR".into(), "zh-Hant".into()];
        assert_eq!(
            validate_config(&config).unwrap_err(),
            vec![ValidationError::InvalidLocale("日本".into())]
        );

        config.site.locales.clear();
        assert!(validate_config(&config).unwrap_err().contains(&ValidationError::NoLocales));
    }

    #[test]
    fn test_canonical_host_must_be_origin() {
        let mut config = valid();
        for host in ["www.acp.io", "ftp://www.acp.io", "https://www.acp.io/en", "https://www.acp.io/?q=1"] {
            config.site.canonical_host = host.into();
            let errors = validate_config(&config).unwrap_err();
            assert!(
                matches!(errors[..], [ValidationError::InvalidCanonicalHost { .. }]),
                "{host}: {errors:?}"
            );
        }

        config.site.canonical_host = "https://www.acp.io/".into();
        assert_eq!(validate_config(&config), Ok(()));
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = valid();
        config.listener.bind_address = "not-an-address".into();
        config.timeouts.request_secs = 0;
        config.observability.metrics_enabled = true;
        config.observability.metrics_address = "nope".into();
        config.upstream.address = Some("bad address".into());
        config.filter.health_path = "healthz".into();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 5);
    }
}
