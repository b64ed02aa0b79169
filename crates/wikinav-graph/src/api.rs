//! MediaWiki API response shapes (`formatversion=2`)

use serde::Deserialize;
use wikinav_core::ArticleTitle;

use crate::error::{GraphError, GraphResult};

/// Category marking disambiguation index pages
pub const DISAMBIGUATION_CATEGORY: &str = "Category:Disambiguation pages";

/// Main (article) namespace
pub const ARTICLE_NAMESPACE: &str = "0";

#[derive(Debug, Deserialize)]
pub struct ApiError {
    pub code: String,
    #[serde(default)]
    pub info: String,
}

impl From<ApiError> for GraphError {
    fn from(err: ApiError) -> Self {
        GraphError::Api {
            code: err.code,
            info: err.info,
        }
    }
}

/// `action=query` response
#[derive(Debug, Deserialize)]
pub struct QueryResponse {
    #[serde(default)]
    pub query: Option<QueryBody>,
    #[serde(default, rename = "continue")]
    pub continuation: Option<Continuation>,
    #[serde(default)]
    pub error: Option<ApiError>,
}

#[derive(Debug, Default, Deserialize)]
pub struct QueryBody {
    #[serde(default)]
    pub pages: Vec<Page>,
}

#[derive(Debug, Deserialize)]
pub struct Page {
    pub title: String,
    #[serde(default)]
    pub missing: bool,
    #[serde(default)]
    pub invalid: bool,
    #[serde(default)]
    pub categories: Vec<TitleRef>,
    #[serde(default)]
    pub links: Vec<TitleRef>,
}

impl Page {
    pub fn exists(&self) -> bool {
        !self.missing && !self.invalid
    }
}

#[derive(Debug, Deserialize)]
pub struct TitleRef {
    pub title: String,
}

#[derive(Debug, Deserialize)]
pub struct Continuation {
    #[serde(default)]
    pub plcontinue: Option<String>,
}

/// `action=parse` response
#[derive(Debug, Deserialize)]
pub struct ParseResponse {
    #[serde(default)]
    pub parse: Option<ParseBody>,
    #[serde(default)]
    pub error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
pub struct ParseBody {
    pub title: String,
    pub text: String,
}

impl QueryResponse {
    fn into_page(self) -> GraphResult<Option<Page>> {
        if let Some(err) = self.error {
            return Err(err.into());
        }
        Ok(self.query.unwrap_or_default().pages.into_iter().next())
    }
}

/// Category lookup: `None` when the page does not exist
pub fn parse_categories(response: QueryResponse) -> GraphResult<Option<Vec<String>>> {
    let page = match response.into_page()? {
        Some(page) if page.exists() => page,
        _ => return Ok(None),
    };
    Ok(Some(page.categories.into_iter().map(|c| c.title).collect()))
}

pub fn is_disambiguation(categories: &[String]) -> bool {
    categories.iter().any(|c| c == DISAMBIGUATION_CATEGORY)
}

/// One page of a paginated link listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkPage {
    Missing,
    Links {
        links: Vec<ArticleTitle>,
        next: Option<String>,
    },
}

pub fn parse_link_page(response: QueryResponse) -> GraphResult<LinkPage> {
    let next = response
        .continuation
        .as_ref()
        .and_then(|c| c.plcontinue.clone());
    let page = match response.into_page()? {
        Some(page) if page.exists() => page,
        _ => return Ok(LinkPage::Missing),
    };
    let links = page
        .links
        .into_iter()
        .map(|link| ArticleTitle::new(link.title))
        .collect();
    Ok(LinkPage::Links { links, next })
}

pub fn parse_rendered_text(response: ParseResponse) -> GraphResult<ParseBody> {
    if let Some(err) = response.error {
        return Err(err.into());
    }
    response
        .parse
        .ok_or_else(|| GraphError::UnexpectedResponse("parse response without body".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(json: &str) -> QueryResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_categories_of_disambiguation_page() {
        let response = query(
            r#"{"batchcomplete": true, "query": {"pages": [{"pageid": 1, "ns": 0, "title": "Mercury",
                "categories": [{"ns": 14, "title": "Category:Disambiguation pages"},
                               {"ns": 14, "title": "Category:Place name disambiguation pages"}]}]}}"#,
        );
        let categories = parse_categories(response).unwrap().unwrap();
        assert!(is_disambiguation(&categories));
    }

    #[test]
    fn test_article_without_categories() {
        let response = query(r#"{"query": {"pages": [{"pageid": 2, "ns": 0, "title": "Dog"}]}}"#);
        let categories = parse_categories(response).unwrap().unwrap();
        assert!(categories.is_empty());
        assert!(!is_disambiguation(&categories));
    }

    #[test]
    fn test_missing_page_categories() {
        let response = query(
            r#"{"query": {"pages": [{"ns": 0, "title": "Hallucinated page", "missing": true}]}}"#,
        );
        assert_eq!(parse_categories(response).unwrap(), None);
    }

    #[test]
    fn test_link_page_with_continuation() {
        let response = query(
            r#"{"continue": {"plcontinue": "736|0|Cat", "continue": "||"},
                "query": {"pages": [{"pageid": 3, "ns": 0, "title": "Dog",
                    "links": [{"ns": 0, "title": "Alpha dog"}, {"ns": 0, "title": "Bark"}]}]}}"#,
        );
        match parse_link_page(response).unwrap() {
            LinkPage::Links { links, next } => {
                assert_eq!(links, vec![ArticleTitle::new("Alpha_dog"), ArticleTitle::new("Bark")]);
                assert_eq!(next.as_deref(), Some("736|0|Cat"));
            }
            LinkPage::Missing => panic!("expected links"),
        }
    }

    #[test]
    fn test_last_link_page_without_links() {
        let response = query(r#"{"query": {"pages": [{"pageid": 4, "ns": 0, "title": "Stub"}]}}"#);
        assert_eq!(
            parse_link_page(response).unwrap(),
            LinkPage::Links {
                links: vec![],
                next: None
            }
        );
    }

    #[test]
    fn test_missing_and_invalid_pages() {
        let missing = query(r#"{"query": {"pages": [{"ns": 0, "title": "Nope", "missing": true}]}}"#);
        assert_eq!(parse_link_page(missing).unwrap(), LinkPage::Missing);

        let invalid = query(
            r#"{"query": {"pages": [{"title": "<bad>", "invalidreason": "bad", "invalid": true}]}}"#,
        );
        assert_eq!(parse_link_page(invalid).unwrap(), LinkPage::Missing);
    }

    #[test]
    fn test_api_error_is_surfaced() {
        let response = query(r#"{"error": {"code": "maxlag", "info": "Waiting for replicas"}}"#);
        let err = parse_link_page(response).unwrap_err();
        assert!(matches!(err, GraphError::Api { .. }));
        assert!(err.is_transient());
    }

    #[test]
    fn test_parse_body() {
        let response: ParseResponse = serde_json::from_str(
            r#"{"parse": {"title": "Mercury", "pageid": 5, "text": "<div class=\"mw-parser-output\"></div>"}}"#,
        )
        .unwrap();
        let body = parse_rendered_text(response).unwrap();
        assert_eq!(body.title, "Mercury");
        assert!(body.text.contains("mw-parser-output"));
    }
}
