mod link_store;

pub use link_store::LinkStore;

use crate::config::{CategoryNamePolicy, ClassSelector, ScrapeConfig, SelectorsConfig};
use crate::error::{Result, ScrapeError};
use crate::fetchers::{element_text, Page, PageFetcher};
use log::{debug, info, warn};
use std::collections::HashSet;
use std::sync::Arc;

/// What a fetched page turned out to be.
#[derive(Debug, PartialEq)]
enum PageKind {
    /// Sub-category (display name, absolute URL) pairs
    Category(Vec<(String, String)>),
    /// Recipe URLs
    Leaf(Vec<String>),
}

/// A page waiting to be visited.
struct Frame {
    url: String,
    /// Display name of the category link that led here (none for the root)
    name: Option<String>,
    /// Category names from the root down to, not including, this page
    path: Vec<String>,
}

/// Walks the category tree depth-first and collects recipe links into a
/// [`LinkStore`].
///
/// Sub-categories are visited in page order, exactly as a recursive descent
/// would visit them, but from an explicit stack so a deep tree cannot
/// exhaust the call stack.
pub struct CategoryCrawler {
    fetcher: Arc<dyn PageFetcher>,
    carousel_link: ClassSelector,
    carousel_name: ClassSelector,
    recipe_card: ClassSelector,
    gallery_marker: String,
    policy: CategoryNamePolicy,
}

impl CategoryCrawler {
    pub fn new(fetcher: Arc<dyn PageFetcher>) -> Self {
        let selectors = SelectorsConfig::default();
        Self {
            fetcher,
            carousel_link: selectors.carousel_link,
            carousel_name: selectors.carousel_name,
            recipe_card: selectors.recipe_card,
            gallery_marker: "/gallery/".to_string(),
            policy: CategoryNamePolicy::default(),
        }
    }

    pub fn from_config(fetcher: Arc<dyn PageFetcher>, config: &ScrapeConfig) -> Self {
        Self::new(fetcher)
            .with_selectors(&config.selectors)
            .with_gallery_marker(&config.gallery_marker)
            .with_policy(config.category_names)
    }

    pub fn with_selectors(mut self, selectors: &SelectorsConfig) -> Self {
        self.carousel_link = selectors.carousel_link.clone();
        self.carousel_name = selectors.carousel_name.clone();
        self.recipe_card = selectors.recipe_card.clone();
        self
    }

    pub fn with_gallery_marker(mut self, marker: &str) -> Self {
        self.gallery_marker = marker.to_string();
        self
    }

    pub fn with_policy(mut self, policy: CategoryNamePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Crawl from `start_url` until `target` links are known (or the tree is
    /// exhausted when `target` is `None`).
    ///
    /// Links already in `store` count toward the target and are never
    /// fetched again; each new link is pushed to the returned list and then
    /// appended to `store` before the next one is looked at. A page that
    /// cannot be fetched or read only costs its own subtree. Failing to write
    /// the store ends the crawl with an error.
    pub async fn crawl(
        &self,
        start_url: &str,
        target: Option<usize>,
        store: &mut LinkStore,
    ) -> Result<Vec<String>> {
        info!(
            "Starting crawl of {} ({} links already known, target {:?})",
            start_url,
            store.len(),
            target
        );

        let mut links: Vec<String> = store.links().to_vec();
        let mut visited_names: HashSet<String> = HashSet::new();
        let mut fetched: HashSet<String> = HashSet::new();
        let mut stack = vec![Frame {
            url: start_url.to_string(),
            name: None,
            path: Vec::new(),
        }];

        while let Some(frame) = stack.pop() {
            if target.is_some_and(|q| links.len() >= q) {
                debug!("Reached target of {:?} links", target);
                break;
            }

            if let Some(name) = &frame.name {
                let seen = match self.policy {
                    CategoryNamePolicy::PerRun => !visited_names.insert(name.clone()),
                    CategoryNamePolicy::PerBranch => frame.path.contains(name),
                };
                if seen {
                    debug!("Skipping already visited category '{}'", name);
                    continue;
                }
            }

            if frame.url.contains(&self.gallery_marker) {
                debug!("Skipping gallery {}", frame.url);
                continue;
            }
            if store.contains(&frame.url) || !fetched.insert(frame.url.clone()) {
                continue;
            }

            let body = match self.fetcher.fetch(&frame.url).await {
                Ok(body) => body,
                Err(e) => {
                    warn!("Abandoning {}: {}", frame.url, e);
                    continue;
                }
            };

            match self.classify(&frame.url, &body) {
                Ok(PageKind::Category(children)) => {
                    debug!("{} has {} sub-categories", frame.url, children.len());
                    let mut path = frame.path;
                    path.extend(frame.name);
                    // Reversed so the first sub-category is popped first
                    for (name, url) in children.into_iter().rev() {
                        stack.push(Frame {
                            url,
                            name: Some(name),
                            path: path.clone(),
                        });
                    }
                }
                Ok(PageKind::Leaf(recipes)) => {
                    let before = links.len();
                    for url in recipes {
                        if store.contains(&url) {
                            continue;
                        }
                        links.push(url.clone());
                        store.append(&url)?;
                    }
                    debug!(
                        "{} yielded {} new recipe links",
                        frame.url,
                        links.len() - before
                    );
                }
                Err(e) => warn!("Abandoning {}: {}", frame.url, e),
            }
        }

        if let Some(q) = target {
            links.truncate(q);
        }
        info!("Crawl finished with {} recipe links", links.len());
        Ok(links)
    }

    fn classify(&self, url: &str, body: &str) -> Result<PageKind> {
        let page = Page::parse(url, body);

        let carousel = page.select(&self.carousel_link.tag, &self.carousel_link.class)?;
        if !carousel.is_empty() {
            let names = page.select(&self.carousel_name.tag, &self.carousel_name.class)?;
            if names.len() != carousel.len() {
                return Err(ScrapeError::Malformed {
                    url: url.to_string(),
                    reason: format!(
                        "{} category links but {} category names",
                        carousel.len(),
                        names.len()
                    ),
                });
            }

            let children = names
                .iter()
                .zip(carousel.iter())
                .filter_map(|(name, link)| {
                    let child = link.value().attr("href").and_then(|h| page.resolve(h));
                    if child.is_none() {
                        warn!("Category link without href on {}", url);
                    }
                    child.map(|child| (element_text(name), child))
                })
                .collect();
            return Ok(PageKind::Category(children));
        }

        let recipes = page
            .select(&self.recipe_card.tag, &self.recipe_card.class)?
            .iter()
            .filter_map(|card| card.value().attr("href").and_then(|h| page.resolve(h)))
            .collect();
        Ok(PageKind::Leaf(recipes))
    }
}
