//! Supported locale codes.

/// Ordered set of locale codes a path may be prefixed with.
///
/// Order follows configuration so listings stay stable; membership is an
/// exact, case-sensitive comparison.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocaleSet {
    codes: Vec<String>,
}

impl LocaleSet {
    /// Build a locale set from configured codes.
    pub fn new<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            codes: codes.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns true if `segment` is a configured locale code.
    pub fn contains(&self, segment: &str) -> bool {
        self.codes.iter().any(|code| code == segment)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.codes.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}
