use crate::config::ScrapeConfig;
use crate::crawler::{CategoryCrawler, LinkStore};
use crate::error::Result;
use crate::extractors::RecipeExtractor;
use crate::fetchers::PageFetcher;
use crate::model::Dataset;
use crate::text::Tagger;
use futures::stream::{self, StreamExt};
use log::{info, warn};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Crawls for recipe links, extracts every recipe concurrently and keeps
/// the complete ones.
pub struct DatasetBuilder {
    crawler: CategoryCrawler,
    extractor: RecipeExtractor,
    workers: usize,
    error_log: Option<PathBuf>,
}

impl DatasetBuilder {
    pub fn new(fetcher: Arc<dyn PageFetcher>, tagger: Arc<dyn Tagger>) -> Self {
        Self {
            crawler: CategoryCrawler::new(fetcher.clone()),
            extractor: RecipeExtractor::new(fetcher, tagger),
            workers: 10,
            error_log: None,
        }
    }

    pub fn from_config(
        fetcher: Arc<dyn PageFetcher>,
        tagger: Arc<dyn Tagger>,
        config: &ScrapeConfig,
    ) -> Self {
        let builder = Self {
            crawler: CategoryCrawler::from_config(fetcher.clone(), config),
            extractor: RecipeExtractor::from_config(fetcher, tagger, config),
            workers: 10,
            error_log: None,
        }
        .with_workers(config.workers);

        match &config.error_log {
            Some(path) => builder.with_error_log(path),
            None => builder,
        }
    }

    /// Number of recipe pages fetched at once
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    /// Write the link index of every failed recipe to `path`
    pub fn with_error_log(mut self, path: impl AsRef<Path>) -> Self {
        self.error_log = Some(path.as_ref().to_path_buf());
        self
    }

    /// Crawl from `start_url` into `store`, then extract every link.
    pub async fn build(
        &self,
        start_url: &str,
        target: Option<usize>,
        store: &mut LinkStore,
    ) -> Result<Dataset> {
        let links = self.crawler.crawl(start_url, target, store).await?;
        self.build_from_links(&links, 0).await
    }

    /// Extract every link in `links`. `first_index` is the position of
    /// `links[0]` in the link file, so failed indices point at file lines.
    ///
    /// Rows come back in link order. A recipe that cannot be fetched or is
    /// missing any field is left out and its index recorded in
    /// [`Dataset::failed`].
    pub async fn build_from_links(&self, links: &[String], first_index: usize) -> Result<Dataset> {
        info!("Pulling {} recipes with {} workers", links.len(), self.workers);

        let extractor = &self.extractor;
        let mut results: Vec<_> = stream::iter(links.iter().enumerate())
            .map(|(i, url)| async move { (first_index + i, extractor.extract(url).await) })
            .buffer_unordered(self.workers)
            .collect()
            .await;
        results.sort_by_key(|(i, _)| *i);

        let mut dataset = Dataset::default();
        for (index, result) in results {
            match result {
                Ok(record) => match record.into_row() {
                    Some(row) => dataset.rows.push(row),
                    None => dataset.failed.push(index),
                },
                Err(e) => {
                    warn!("Recipe {} failed: {}", index, e);
                    dataset.failed.push(index);
                }
            }
        }

        info!(
            "Kept {} recipes, {} failed",
            dataset.rows.len(),
            dataset.failed.len()
        );

        if let Some(path) = &self.error_log {
            write_error_log(path, &dataset.failed)?;
        }
        Ok(dataset)
    }
}

fn write_error_log(path: &Path, failed: &[usize]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let body: String = failed.iter().map(|i| format!("{}\n", i)).collect();
    fs::write(path, body)?;
    info!("Wrote {} failed indices to {}", failed.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScrapeError;
    use crate::text::LexiconTagger;
    use async_trait::async_trait;
    use std::collections::HashMap;

    struct MapFetcher(HashMap<String, String>);

    #[async_trait]
    impl PageFetcher for MapFetcher {
        async fn fetch(&self, url: &str) -> Result<String> {
            self.0
                .get(url)
                .cloned()
                .ok_or_else(|| ScrapeError::NotFound(url.to_string()))
        }
    }

    fn recipe(title: &str, rating: &str, ingredient: &str) -> String {
        format!(
            r#"<h1 class="headline heading-content">{title}</h1>
               <div data-ratings-average="{rating}"></div>
               <span class="ingredients-item-name">{ingredient}</span>
               <span class="nutrient-name">Protein:</span><span class="nutrient-value">4g</span>"#
        )
    }

    fn builder(pages: &[(&str, String)]) -> DatasetBuilder {
        let map = pages
            .iter()
            .map(|(url, body)| (url.to_string(), body.clone()))
            .collect();
        DatasetBuilder::new(Arc::new(MapFetcher(map)), Arc::new(LexiconTagger::new()))
            .with_workers(2)
    }

    fn links(urls: &[&str]) -> Vec<String> {
        urls.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_rows_keep_link_order() {
        let builder = builder(&[
            ("https://s.test/r/1", recipe("One", "4.1", "1 cup milk")),
            ("https://s.test/r/2", recipe("Two", "3.5", "2 eggs")),
            ("https://s.test/r/3", recipe("Three", "5", "salt")),
        ]);

        let dataset = builder
            .build_from_links(
                &links(&["https://s.test/r/1", "https://s.test/r/2", "https://s.test/r/3"]),
                0,
            )
            .await
            .unwrap();

        let titles: Vec<&str> = dataset.rows.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["One", "Two", "Three"]);
        assert!(dataset.failed.is_empty());
    }

    #[tokio::test]
    async fn test_failures_recorded_with_offset() {
        let dir = tempfile::tempdir().unwrap();
        let log_path = dir.path().join("errors.txt");
        let builder = builder(&[
            ("https://s.test/r/1", recipe("One", "4.1", "1 cup milk")),
            ("https://s.test/r/2", recipe("Two", "", "2 eggs")),
        ])
        .with_error_log(&log_path);

        let dataset = builder
            .build_from_links(
                &links(&["https://s.test/r/1", "https://s.test/r/2", "https://s.test/r/gone"]),
                10,
            )
            .await
            .unwrap();

        assert_eq!(dataset.rows.len(), 1);
        assert_eq!(dataset.failed, vec![11, 12]);
        assert_eq!(fs::read_to_string(&log_path).unwrap(), "11\n12\n");
    }
}
