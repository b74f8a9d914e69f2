pub mod config;
pub mod crawler;
pub mod error;
pub mod export;
pub mod extractors;
pub mod fetchers;
pub mod model;
pub mod pipelines;
pub mod text;

pub use config::{CategoryNamePolicy, ScrapeConfig};
pub use crawler::{CategoryCrawler, LinkStore};
pub use error::{Result, ScrapeError};
pub use export::{encode, DatasetSink, EncodedTable};
pub use extractors::RecipeExtractor;
pub use fetchers::{HttpFetcher, PageFetcher};
pub use model::{Dataset, DatasetRow, RecipeRecord};
pub use pipelines::DatasetBuilder;
pub use text::{IngredientReducer, LexiconTagger, Tagger};

use log::info;
use std::sync::Arc;

/// Crawl the configured category tree and persist new links to the link
/// file. Returns the known links, at most `target_quantity` of them.
pub async fn scrape_links(config: &ScrapeConfig) -> Result<Vec<String>> {
    let fetcher: Arc<dyn PageFetcher> = Arc::new(HttpFetcher::from_config(config)?);
    let mut store = LinkStore::open(&config.links_file)?;

    let links = CategoryCrawler::from_config(fetcher, config)
        .crawl(&config.start_url, config.target_quantity, &mut store)
        .await?;

    info!("{} links in {}", store.len(), config.links_file);
    Ok(links)
}

/// Crawl, extract every recipe and write the dataset to the configured
/// output.
pub async fn build_dataset(config: &ScrapeConfig) -> Result<Dataset> {
    let mut store = LinkStore::open(&config.links_file)?;
    let dataset = dataset_builder(config)?
        .build(&config.start_url, config.target_quantity, &mut store)
        .await?;

    export::sink_for(&config.output).write(&dataset)?;
    Ok(dataset)
}

/// Build the dataset from lines `[start, stop)` of the existing link file,
/// without crawling.
pub async fn build_window(
    config: &ScrapeConfig,
    start: usize,
    stop: Option<usize>,
) -> Result<Dataset> {
    if stop.is_some_and(|stop| stop < start) {
        return Err(ScrapeError::Invalid(format!(
            "window stop {:?} is before start {}",
            stop, start
        )));
    }

    let links = LinkStore::load_range(&config.links_file, start, stop)?;
    let dataset = dataset_builder(config)?
        .build_from_links(&links, start)
        .await?;

    export::sink_for(&config.output).write(&dataset)?;
    Ok(dataset)
}

fn dataset_builder(config: &ScrapeConfig) -> Result<DatasetBuilder> {
    let fetcher: Arc<dyn PageFetcher> = Arc::new(HttpFetcher::from_config(config)?);
    let tagger: Arc<dyn Tagger> = Arc::new(LexiconTagger::new());
    Ok(DatasetBuilder::from_config(fetcher, tagger, config))
}
