//! Claimed traversals through the link graph

use crate::title::{ArticleTitle, LinkSet};
use serde::{Deserialize, Serialize};

/// Separator used when a path is rendered for reports
pub const STEP_SEPARATOR: &str = " ->\n";

/// Ordered sequence of article titles claimed to form a traversal
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GamePath(Vec<ArticleTitle>);

impl GamePath {
    pub fn new() -> Self {
        Self::default()
    }

    /// Path containing only the start article
    pub fn starting_at(start: ArticleTitle) -> Self {
        Self(vec![start])
    }

    pub fn push(&mut self, title: ArticleTitle) {
        self.0.push(title);
    }

    pub fn start(&self) -> Option<&ArticleTitle> {
        self.0.first()
    }

    pub fn last(&self) -> Option<&ArticleTitle> {
        self.0.last()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn steps(&self) -> &[ArticleTitle] {
        &self.0
    }

    /// Consecutive `(prev, next)` pairs
    pub fn hops(&self) -> impl Iterator<Item = (&ArticleTitle, &ArticleTitle)> {
        self.0.windows(2).map(|pair| (&pair[0], &pair[1]))
    }

    /// Whether the path ever visits `end` (exact title match)
    pub fn reaches(&self, end: &ArticleTitle) -> bool {
        self.0.contains(end)
    }

    /// Titles already visited, used to filter candidate links
    pub fn visited(&self) -> LinkSet {
        self.0.iter().cloned().collect()
    }

    pub fn join(&self, separator: &str) -> String {
        self.0
            .iter()
            .map(ArticleTitle::as_str)
            .collect::<Vec<_>>()
            .join(separator)
    }
}

impl From<Vec<ArticleTitle>> for GamePath {
    fn from(steps: Vec<ArticleTitle>) -> Self {
        Self(steps)
    }
}

impl FromIterator<ArticleTitle> for GamePath {
    fn from_iter<I: IntoIterator<Item = ArticleTitle>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl std::ops::Deref for GamePath {
    type Target = [ArticleTitle];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
