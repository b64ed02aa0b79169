//! Article titles and link sets

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::BTreeSet;

/// Unordered collection of unique article titles reachable from one article.
///
/// Kept ordered so that candidate lists and reports are deterministic.
pub type LinkSet = BTreeSet<ArticleTitle>;

/// Normalized identifier of an encyclopedia article.
///
/// Whitespace is canonically stored as underscores. Titles are
/// case-sensitive, so `Dog` and `dog` are different articles.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArticleTitle(String);

impl ArticleTitle {
    /// Create a title, trimming surrounding whitespace and replacing spaces with underscores
    pub fn new(raw: impl AsRef<str>) -> Self {
        Self(normalize(raw.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Title with underscores rendered back as spaces, as the remote API expects
    pub fn display_name(&self) -> String {
        self.0.replace('_', " ")
    }

    /// Case-insensitive comparison, used for end-of-game detection
    pub fn eq_ignore_case(&self, other: &ArticleTitle) -> bool {
        self.0.to_lowercase() == other.0.to_lowercase()
    }

    /// True when the title carries a namespace separator (`Help:`, `Category:` ...)
    pub fn is_namespaced(&self) -> bool {
        self.0.contains(':')
    }
}

fn normalize(raw: &str) -> String {
    raw.trim().replace(' ', "_")
}

impl std::fmt::Display for ArticleTitle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for ArticleTitle {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ArticleTitle {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ArticleTitle {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ArticleTitle {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spaces_become_underscores() {
        let title = ArticleTitle::new("  Albert Einstein ");
        assert_eq!(title.as_str(), "Albert_Einstein");
        assert_eq!(title.display_name(), "Albert Einstein");
    }

    #[test]
    fn test_titles_are_case_sensitive() {
        let a = ArticleTitle::new("Dog");
        let b = ArticleTitle::new("dog");
        assert_ne!(a, b);
        assert!(a.eq_ignore_case(&b));
    }

    #[test]
    fn test_link_set_lookup_by_str() {
        let links: LinkSet = ["Cat", "Mammal"].into_iter().map(ArticleTitle::from).collect();
        assert!(links.contains("Cat"));
        assert!(!links.contains("Shoe"));
    }

    #[test]
    fn test_namespace_detection() {
        assert!(ArticleTitle::new("Help:Contents").is_namespaced());
        assert!(!ArticleTitle::new("Paris").is_namespaced());
    }
}
