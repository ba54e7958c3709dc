//! Category path type

use crate::CategoryError;
use std::fmt;

/// A slash-delimited directory category, e.g. `/en/Business/Accounting`
///
/// Always holds a locale segment followed by at least one category
/// segment. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CategoryPath(String);

impl CategoryPath {
    /// Builds the starting path of a crawl from an operator-supplied name
    ///
    /// The name is prefixed with the locale segment: `Business` with locale
    /// `en` becomes `/en/Business`.
    pub fn from_root(locale: &str, name: &str) -> Result<Self, CategoryError> {
        let name = name.trim().trim_matches('/');
        if name.is_empty() {
            return Err(CategoryError::Empty);
        }
        if name.contains('/') {
            tracing::warn!(
                "Root category '{}' spans several segments; only subcategories under '/{}/{}' \
                 whose top-level segment equals the full name will be followed",
                name,
                locale,
                name
            );
        }
        Self::parse(&format!("/{}/{}", locale, name))
    }

    /// Wraps a discovered category href
    ///
    /// # Errors
    ///
    /// Returns `CategoryError::TooShort` when the path has no category
    /// segment after the locale.
    pub fn parse(raw: &str) -> Result<Self, CategoryError> {
        match raw.split('/').nth(2) {
            Some(segment) if !segment.is_empty() => Ok(Self(raw.to_string())),
            _ => Err(CategoryError::TooShort(raw.to_string())),
        }
    }

    /// Returns the path as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CategoryPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CategoryPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
