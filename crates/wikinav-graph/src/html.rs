//! Shared helpers for scraping rendered article markup

use scraper::{ElementRef, Selector};

use crate::error::{GraphError, GraphResult};

/// Path prefix of internal article links
pub const ARTICLE_PATH_PREFIX: &str = "/wiki/";

const HELP_PATH_PREFIX: &str = "/wiki/Help:";

const NAVBOX_CLASS: &str = "navbox";

pub fn selector(css: &str) -> GraphResult<Selector> {
    Selector::parse(css).map_err(|e| GraphError::Html(format!("invalid selector {}: {}", css, e)))
}

/// True when the element or any ancestor is hidden or part of a navigation box
pub fn is_suppressed(element: ElementRef<'_>) -> bool {
    std::iter::once(element)
        .chain(element.ancestors().filter_map(ElementRef::wrap))
        .any(|el| is_hidden(el) || el.value().classes().any(|c| c == NAVBOX_CLASS))
}

fn is_hidden(element: ElementRef<'_>) -> bool {
    let value = element.value();
    if value.attr("hidden").is_some() {
        return true;
    }
    match value.attr("style") {
        Some(style) => {
            let style: String = style
                .chars()
                .filter(|c| !c.is_whitespace())
                .collect::<String>()
                .to_lowercase();
            style.contains("display:none") || style.contains("visibility:hidden")
        }
        None => false,
    }
}

/// Internal article href: `/wiki/` prefix, not a help page, no namespace separator
pub fn is_article_href(href: &str) -> bool {
    href.starts_with(ARTICLE_PATH_PREFIX) && !href.starts_with(HELP_PATH_PREFIX) && !href.contains(':')
}
