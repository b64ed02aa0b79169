//! Link graph trait definition

use crate::error::Result;
use crate::title::{ArticleTitle, LinkSet};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Outcome of a disambiguation check
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Disambiguation {
    /// Whether the article is a disambiguation index page
    pub is_disambiguation: bool,

    /// First candidate article the index page points to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<ArticleTitle>,
}

impl Disambiguation {
    /// A regular content article
    pub fn article() -> Self {
        Self::default()
    }

    /// A disambiguation page, optionally pointing at its first candidate
    pub fn index(target: Option<ArticleTitle>) -> Self {
        Self {
            is_disambiguation: true,
            target,
        }
    }

    /// Title the lookup should be redirected to, if any
    pub fn redirect(&self) -> Option<&ArticleTitle> {
        if self.is_disambiguation {
            self.target.as_ref()
        } else {
            None
        }
    }
}

/// Complete outgoing link set of one article
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutgoingLinks {
    /// Article whose links were listed (after disambiguation redirection)
    pub title: ArticleTitle,

    /// Original title when a disambiguation page redirected the lookup
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirected_from: Option<ArticleTitle>,

    /// Every main-namespace link of the article
    pub links: LinkSet,
}

impl OutgoingLinks {
    pub fn new(title: ArticleTitle, links: LinkSet) -> Self {
        Self {
            title,
            redirected_from: None,
            links,
        }
    }

    pub fn redirected_from(mut self, original: ArticleTitle) -> Self {
        self.redirected_from = Some(original);
        self
    }

    pub fn contains(&self, title: &ArticleTitle) -> bool {
        self.links.contains(title)
    }
}

/// Result of an outgoing-links lookup.
///
/// An article that exists with zero links is `Found` with an empty set,
/// which is distinct from an article the remote source does not know.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkLookup {
    /// The remote source reports no such article
    Missing,
    Found(OutgoingLinks),
}

impl LinkLookup {
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    pub fn links(&self) -> Option<&LinkSet> {
        match self {
            Self::Missing => None,
            Self::Found(outgoing) => Some(&outgoing.links),
        }
    }
}

/// Read access to the encyclopedia's internal link graph
#[async_trait]
pub trait LinkGraph: Send + Sync {
    /// Check whether an article is a disambiguation page and where it points
    async fn resolve(&self, title: &ArticleTitle) -> Result<Disambiguation>;

    /// All main-namespace links of an article, after disambiguation redirection
    async fn outgoing_links(&self, title: &ArticleTitle) -> Result<LinkLookup>;

    /// Links rendered visibly in the article body, minus `excluded`.
    ///
    /// `None` when the article has no page.
    async fn visible_links(
        &self,
        title: &ArticleTitle,
        excluded: &LinkSet,
    ) -> Result<Option<LinkSet>>;
}
