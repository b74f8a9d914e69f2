mod request;

pub use request::HttpFetcher;

use crate::error::{Result, ScrapeError};
use async_trait::async_trait;
use html_escape::decode_html_entities;
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Retrieves the raw HTML of a page.
///
/// Implementations return the body rather than a parsed document because a
/// parsed `Html` cannot be held across an await point; callers parse with
/// [`Page::parse`] once the body is in hand.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// A fetched page, queryable by tag, class and attribute.
pub struct Page {
    url: String,
    document: Html,
}

impl Page {
    pub fn parse(url: &str, html: &str) -> Self {
        Self {
            url: url.to_string(),
            document: Html::parse_document(html),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// All `tag` elements carrying every class in the space separated
    /// `classes` list, in document order.
    pub fn select(&self, tag: &str, classes: &str) -> Result<Vec<ElementRef<'_>>> {
        let selector = class_selector(tag, classes)?;
        Ok(self.document.select(&selector).collect())
    }

    /// Value of the first element in the document carrying `attr`.
    /// `None` when no element has it.
    pub fn find_attr(&self, attr: &str) -> Result<Option<String>> {
        let selector = Selector::parse(&format!("[{attr}]"))
            .map_err(|e| ScrapeError::Invalid(format!("attribute selector '{attr}': {e}")))?;
        Ok(self
            .document
            .select(&selector)
            .next()
            .and_then(|el| el.value().attr(attr))
            .map(|value| value.to_string()))
    }

    /// Resolve an href found on this page to an absolute URL.
    pub fn resolve(&self, href: &str) -> Option<String> {
        let href = href.trim();
        if href.is_empty() {
            return None;
        }
        match Url::parse(&self.url) {
            Ok(base) => base.join(href).ok().map(|u| u.to_string()),
            Err(_) => Url::parse(href).ok().map(|u| u.to_string()),
        }
    }
}

/// Text content of an element: each text node trimmed, empty ones dropped,
/// the rest joined by single spaces. Hyperlinked words inside an ingredient
/// line come back as separate text nodes, so this also rejoins them.
pub fn element_text(element: &ElementRef<'_>) -> String {
    let joined = element
        .text()
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    decode_html_entities(&joined).into_owned()
}

fn class_selector(tag: &str, classes: &str) -> Result<Selector> {
    let mut selector = tag.to_string();
    for class in classes.split_whitespace() {
        selector.push('.');
        selector.push_str(class);
    }
    Selector::parse(&selector)
        .map_err(|e| ScrapeError::Invalid(format!("selector '{selector}': {e}")))
}
