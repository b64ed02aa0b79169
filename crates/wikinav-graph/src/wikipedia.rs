//! Live MediaWiki link graph backend

use async_trait::async_trait;
use wikinav_core::{
    ArticleTitle, Disambiguation, LinkGraph, LinkLookup, LinkSet, OutgoingLinks, Result,
};

use crate::api::{
    is_disambiguation, parse_categories, parse_link_page, parse_rendered_text, LinkPage,
    ParseResponse, QueryResponse, ARTICLE_NAMESPACE,
};
use crate::client::WikiClient;
use crate::disambiguation::first_article_link;
use crate::error::GraphResult;
use crate::visible::extract_visible_links;

/// Link graph backed by a live MediaWiki site.
///
/// Every call goes to the network; nothing is cached between lookups.
pub struct WikipediaGraph {
    client: WikiClient,
}

impl WikipediaGraph {
    pub fn new(client: WikiClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &WikiClient {
        &self.client
    }

    async fn check_disambiguation(&self, title: &ArticleTitle) -> GraphResult<Disambiguation> {
        let name = title.display_name();
        let response: QueryResponse = self
            .client
            .api(&[
                ("action", "query"),
                ("prop", "categories"),
                ("titles", name.as_str()),
                ("cllimit", "max"),
                ("clshow", "!hidden"),
            ])
            .await?;

        let is_index = match parse_categories(response)? {
            Some(categories) => is_disambiguation(&categories),
            None => false,
        };
        if !is_index {
            return Ok(Disambiguation::article());
        }

        let response: ParseResponse = self
            .client
            .api(&[("action", "parse"), ("page", name.as_str()), ("prop", "text")])
            .await?;
        let body = parse_rendered_text(response)?;
        let target = first_article_link(&body.text)?;

        match &target {
            Some(target) => tracing::debug!("{} is a disambiguation page, following {}", title, target),
            None => tracing::warn!("{} is a disambiguation page without article links", title),
        }
        Ok(Disambiguation::index(target))
    }

    /// Drain every page of the article's main-namespace links
    async fn list_links(&self, title: &ArticleTitle) -> GraphResult<Option<LinkSet>> {
        let name = title.display_name();
        let mut links = LinkSet::new();
        let mut continuation: Option<String> = None;
        let mut pages = 0usize;

        loop {
            let mut params = vec![
                ("action", "query"),
                ("prop", "links"),
                ("titles", name.as_str()),
                ("plnamespace", ARTICLE_NAMESPACE),
                ("pllimit", "max"),
            ];
            if let Some(token) = continuation.as_deref() {
                params.push(("plcontinue", token));
            }

            let response: QueryResponse = self.client.api(&params).await?;
            pages += 1;

            match parse_link_page(response)? {
                LinkPage::Missing => {
                    tracing::debug!("{} does not exist", title);
                    return Ok(None);
                }
                LinkPage::Links { links: batch, next } => {
                    tracing::trace!("{}: page {} with {} links", title, pages, batch.len());
                    links.extend(batch);
                    match next {
                        Some(token) => continuation = Some(token),
                        None => break,
                    }
                }
            }
        }

        tracing::debug!("{} has {} links ({} pages)", title, links.len(), pages);
        Ok(Some(links))
    }
}

#[async_trait]
impl LinkGraph for WikipediaGraph {
    async fn resolve(&self, title: &ArticleTitle) -> Result<Disambiguation> {
        Ok(self.check_disambiguation(title).await?)
    }

    async fn outgoing_links(&self, title: &ArticleTitle) -> Result<LinkLookup> {
        let disambiguation = self.check_disambiguation(title).await?;
        let queried = disambiguation
            .redirect()
            .cloned()
            .unwrap_or_else(|| title.clone());

        let Some(links) = self.list_links(&queried).await? else {
            return Ok(LinkLookup::Missing);
        };

        let mut outgoing = OutgoingLinks::new(queried.clone(), links);
        if queried != *title {
            outgoing = outgoing.redirected_from(title.clone());
        }
        Ok(LinkLookup::Found(outgoing))
    }

    async fn visible_links(
        &self,
        title: &ArticleTitle,
        excluded: &LinkSet,
    ) -> Result<Option<LinkSet>> {
        let Some(html) = self.client.page_html(title.as_str()).await? else {
            tracing::debug!("{} has no rendered page", title);
            return Ok(None);
        };
        let links = extract_visible_links(&html, excluded)?;
        tracing::debug!("{} shows {} candidate links", title, links.len());
        Ok(Some(links))
    }
}
