//! In-memory link graph for tests and offline fixtures

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;
use wikinav_core::{
    ArticleTitle, Disambiguation, Error, LinkGraph, LinkLookup, LinkSet, OutgoingLinks, Result,
};

/// Fixture description of one article
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArticleFixture {
    /// Complete link set
    #[serde(default)]
    pub links: Vec<String>,

    /// Links rendered in the body; defaults to `links`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible: Option<Vec<String>>,

    /// Marks the article as a disambiguation page pointing here
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disambiguates_to: Option<String>,
}

#[derive(Debug, Clone)]
struct Article {
    links: LinkSet,
    visible: Option<LinkSet>,
    disambiguates_to: Option<ArticleTitle>,
}

/// In-memory link graph
///
/// Articles not added are reported as missing.
pub struct MemoryLinkGraph {
    articles: RwLock<HashMap<ArticleTitle, Article>>,
}

impl MemoryLinkGraph {
    pub fn new() -> Self {
        Self {
            articles: RwLock::new(HashMap::new()),
        }
    }

    /// Load a JSON object mapping titles to [`ArticleFixture`]s
    pub fn from_json(json: &str) -> Result<Self> {
        let fixtures: HashMap<String, ArticleFixture> = serde_json::from_str(json)?;
        let graph = Self::new();
        for (title, fixture) in fixtures {
            graph.insert(ArticleTitle::new(title), fixture)?;
        }
        Ok(graph)
    }

    pub fn insert(&self, title: ArticleTitle, fixture: ArticleFixture) -> Result<()> {
        let article = Article {
            links: to_set(&fixture.links),
            visible: fixture.visible.as_deref().map(to_set),
            disambiguates_to: fixture.disambiguates_to.map(ArticleTitle::new),
        };
        let mut articles = self
            .articles
            .write()
            .map_err(|e| Error::Internal(format!("Lock error: {}", e)))?;
        articles.insert(title, article);
        Ok(())
    }

    /// Add an article with its complete link set
    pub fn add_article(&self, title: &str, links: &[&str]) -> Result<()> {
        self.insert(
            ArticleTitle::new(title),
            ArticleFixture {
                links: links.iter().map(|l| l.to_string()).collect(),
                ..Default::default()
            },
        )
    }

    /// Add a disambiguation page whose first candidate is `target`
    pub fn add_disambiguation(&self, title: &str, target: &str) -> Result<()> {
        self.insert(
            ArticleTitle::new(title),
            ArticleFixture {
                disambiguates_to: Some(target.to_string()),
                ..Default::default()
            },
        )
    }

    /// Restrict the rendered links of an existing article
    pub fn set_visible(&self, title: &str, visible: &[&str]) -> Result<()> {
        let mut articles = self
            .articles
            .write()
            .map_err(|e| Error::Internal(format!("Lock error: {}", e)))?;
        let article = articles
            .get_mut(title)
            .ok_or_else(|| Error::ArticleNotFound(title.to_string()))?;
        article.visible = Some(visible.iter().map(|v| ArticleTitle::new(*v)).collect());
        Ok(())
    }

    fn article(&self, title: &ArticleTitle) -> Result<Option<Article>> {
        let articles = self
            .articles
            .read()
            .map_err(|e| Error::Internal(format!("Lock error: {}", e)))?;
        Ok(articles.get(title).cloned())
    }
}

impl Default for MemoryLinkGraph {
    fn default() -> Self {
        Self::new()
    }
}

fn to_set(titles: &[String]) -> LinkSet {
    titles.iter().map(ArticleTitle::new).collect()
}

#[async_trait]
impl LinkGraph for MemoryLinkGraph {
    async fn resolve(&self, title: &ArticleTitle) -> Result<Disambiguation> {
        Ok(match self.article(title)? {
            Some(Article {
                disambiguates_to: Some(target),
                ..
            }) => Disambiguation::index(Some(target)),
            _ => Disambiguation::article(),
        })
    }

    async fn outgoing_links(&self, title: &ArticleTitle) -> Result<LinkLookup> {
        let redirect = self.resolve(title).await?.redirect().cloned();
        let queried = redirect.clone().unwrap_or_else(|| title.clone());

        let Some(article) = self.article(&queried)? else {
            return Ok(LinkLookup::Missing);
        };

        let mut outgoing = OutgoingLinks::new(queried, article.links);
        if redirect.is_some() {
            outgoing = outgoing.redirected_from(title.clone());
        }
        Ok(LinkLookup::Found(outgoing))
    }

    async fn visible_links(
        &self,
        title: &ArticleTitle,
        excluded: &LinkSet,
    ) -> Result<Option<LinkSet>> {
        let Some(article) = self.article(title)? else {
            return Ok(None);
        };
        let mut links = article.visible.unwrap_or(article.links);
        links.retain(|t| !excluded.contains(t));
        Ok(Some(links))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wikinav_core::{PathValidator, ValidationReport};

    fn animals() -> MemoryLinkGraph {
        let graph = MemoryLinkGraph::new();
        graph.add_article("Dog", &["Cat", "Mammal"]).unwrap();
        graph.add_article("Cat", &["Animal", "Feline"]).unwrap();
        graph.add_article("Orphan_Stub", &[]).unwrap();
        graph.add_disambiguation("Kitty", "Cat").unwrap();
        graph
    }

    fn titles(steps: &[&str]) -> Vec<ArticleTitle> {
        steps.iter().map(|s| ArticleTitle::new(*s)).collect()
    }

    async fn validate(graph: &MemoryLinkGraph, steps: &[&str]) -> ValidationReport {
        PathValidator::new(graph).validate(&titles(steps)).await
    }

    #[tokio::test]
    async fn test_empty_but_present_differs_from_missing() {
        let graph = animals();
        let stub = graph.outgoing_links(&ArticleTitle::new("Orphan_Stub")).await.unwrap();
        assert_eq!(stub.links().map(LinkSet::len), Some(0));

        let missing = graph.outgoing_links(&ArticleTitle::new("Nowhere")).await.unwrap();
        assert!(missing.is_missing());
    }

    #[tokio::test]
    async fn test_disambiguation_redirects_lookup() {
        let graph = animals();
        let kitty = ArticleTitle::new("Kitty");

        let resolved = graph.resolve(&kitty).await.unwrap();
        assert_eq!(resolved, Disambiguation::index(Some(ArticleTitle::new("Cat"))));

        match graph.outgoing_links(&kitty).await.unwrap() {
            LinkLookup::Found(outgoing) => {
                assert_eq!(outgoing.title.as_str(), "Cat");
                assert_eq!(outgoing.redirected_from, Some(kitty));
                assert!(outgoing.links.contains("Feline"));
            }
            LinkLookup::Missing => panic!("expected redirected links"),
        }
    }

    #[tokio::test]
    async fn test_resolving_regular_article_is_idempotent() {
        let graph = animals();
        let dog = ArticleTitle::new("Dog");
        let first = graph.resolve(&dog).await.unwrap();
        let second = graph.resolve(&dog).await.unwrap();
        assert_eq!(first, Disambiguation::article());
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_visible_links_respect_exclusions() {
        let graph = animals();
        graph.set_visible("Dog", &["Cat", "Mammal", "Wolf"]).unwrap();

        let excluded: LinkSet = titles(&["Dog", "Cat"]).into_iter().collect();
        let links = graph
            .visible_links(&ArticleTitle::new("Dog"), &excluded)
            .await
            .unwrap()
            .unwrap();
        let names: Vec<&str> = links.iter().map(ArticleTitle::as_str).collect();
        assert_eq!(names, vec!["Mammal", "Wolf"]);

        let missing = graph
            .visible_links(&ArticleTitle::new("Ghost"), &excluded)
            .await
            .unwrap();
        assert_eq!(missing, None);
    }

    #[tokio::test]
    async fn test_end_to_end_scenarios() {
        let graph = animals();

        let report = validate(&graph, &["Dog", "Cat", "Animal"]).await;
        assert!(report.is_clean());

        let report = validate(&graph, &["Dog", "Shoe"]).await;
        assert_eq!(report.labels(), vec!["NO LINK: Dog -> Shoe"]);

        let report = validate(&graph, &["Orphan_Stub", "X"]).await;
        assert_eq!(report.labels(), vec!["NO PAGE: Orphan_Stub"]);
    }

    #[tokio::test]
    async fn test_fixture_json() {
        let graph = MemoryLinkGraph::from_json(
            r#"{
                "Dog": {"links": ["Cat", "Mammal"], "visible": ["Cat"]},
                "Puppy (disambiguation)": {"disambiguates_to": "Dog"}
            }"#,
        )
        .unwrap();

        let visible = graph
            .visible_links(&ArticleTitle::new("Dog"), &LinkSet::new())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(visible.len(), 1);

        let lookup = graph
            .outgoing_links(&ArticleTitle::new("Puppy_(disambiguation)"))
            .await
            .unwrap();
        assert_eq!(lookup.links().map(LinkSet::len), Some(2));
    }
}
