//! Disambiguation page resolution

use scraper::Html;
use wikinav_core::ArticleTitle;

use crate::error::GraphResult;
use crate::html::{is_article_href, is_suppressed, selector};

/// First article link of a disambiguation page body, in document order.
///
/// Only anchors inside the parser output container are considered; help
/// pages, namespaced targets, hidden elements and navigation boxes are
/// skipped. The anchor's `title` attribute names the target.
pub fn first_article_link(html: &str) -> GraphResult<Option<ArticleTitle>> {
    let document = Html::parse_fragment(html);
    let content = selector("div.mw-parser-output")?;
    let anchors = selector("a[href]")?;

    let Some(body) = document.select(&content).next() else {
        return Ok(None);
    };

    let first = body
        .select(&anchors)
        .filter(|a| !is_suppressed(*a))
        .filter(|a| a.value().attr("href").is_some_and(is_article_href))
        .find_map(|a| {
            a.value()
                .attr("title")
                .filter(|t| !t.trim().is_empty())
                .map(ArticleTitle::new)
        });

    Ok(first)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MERCURY: &str = r#"<div class="mw-parser-output">
        <div style="display:none"><a href="/wiki/Hidden_target" title="Hidden target">x</a></div>
        <p><b>Mercury</b> commonly refers to:</p>
        <a href="/wiki/Help:Disambiguation" title="Help:Disambiguation">help</a>
        <a href="/wiki/Category:Planets" title="Category:Planets">planets</a>
        <ul>
          <li><a href="/wiki/Mercury_(planet)" title="Mercury (planet)">Mercury (planet)</a></li>
          <li><a href="/wiki/Mercury_(element)" title="Mercury (element)">Mercury (element)</a></li>
        </ul>
    </div>"#;

    #[test]
    fn test_first_link_skips_help_namespace_and_hidden() {
        let target = first_article_link(MERCURY).unwrap();
        assert_eq!(target, Some(ArticleTitle::new("Mercury_(planet)")));
    }

    #[test]
    fn test_anchor_without_title_is_skipped() {
        let html = r#"<div class="mw-parser-output">
            <a href="/wiki/Untitled">no title</a>
            <a href="/wiki/Venus" title="Venus">Venus</a></div>"#;
        assert_eq!(first_article_link(html).unwrap(), Some(ArticleTitle::new("Venus")));
    }

    #[test]
    fn test_no_qualifying_link() {
        let html = r#"<div class="mw-parser-output"><a href="https://example.org">out</a></div>"#;
        assert_eq!(first_article_link(html).unwrap(), None);
        assert_eq!(first_article_link("<p>no container</p>").unwrap(), None);
    }
}
