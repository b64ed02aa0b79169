//! Visible-link extraction from rendered article pages

use percent_encoding::percent_decode_str;
use scraper::Html;
use wikinav_core::{ArticleTitle, LinkSet};

use crate::error::{GraphError, GraphResult};
use crate::html::{is_suppressed, selector, ARTICLE_PATH_PREFIX};

/// Class MediaWiki puts on links to pages that do not exist yet
const RED_LINK_CLASS: &str = "new";

/// Article titles linked from the visible main content of a rendered page.
///
/// Comments never match an element selector, so they drop out on their own.
/// Titles in `excluded` are removed from the result.
pub fn extract_visible_links(html: &str, excluded: &LinkSet) -> GraphResult<LinkSet> {
    let document = Html::parse_document(html);
    let content = selector("div#bodyContent")?;
    let anchors = selector("a[href]")?;

    let body = document
        .select(&content)
        .next()
        .ok_or_else(|| GraphError::Html("page has no #bodyContent container".to_string()))?;

    let mut links = LinkSet::new();
    for anchor in body.select(&anchors) {
        let element = anchor.value();
        let Some(href) = element.attr("href") else {
            continue;
        };
        if !href.starts_with(ARTICLE_PATH_PREFIX) || href.contains(':') {
            continue;
        }
        if element.classes().any(|c| c == RED_LINK_CLASS) || is_suppressed(anchor) {
            continue;
        }
        if let Some(title) = title_from_href(href) {
            links.insert(title);
        }
    }

    links.retain(|title| !excluded.contains(title));
    Ok(links)
}

/// Decode `/wiki/Caf%C3%A9#History` into `Café`
pub fn title_from_href(href: &str) -> Option<ArticleTitle> {
    let raw = href.strip_prefix(ARTICLE_PATH_PREFIX)?;
    let raw = raw.split('#').next().unwrap_or_default();
    let decoded = percent_decode_str(raw).decode_utf8_lossy();
    let title = ArticleTitle::new(decoded.as_ref());
    (!title.is_empty()).then_some(title)
}
