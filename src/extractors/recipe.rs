use crate::config::{ClassSelector, ScrapeConfig, SelectorsConfig};
use crate::error::Result;
use crate::extractors::nutrition::standardize;
use crate::fetchers::{element_text, Page, PageFetcher};
use crate::model::RecipeRecord;
use crate::text::{normalize_glyphs, IngredientReducer, Tagger};
use log::{debug, warn};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

/// Reads title, rating, ingredients and nutrition from a recipe page.
pub struct RecipeExtractor {
    fetcher: Arc<dyn PageFetcher>,
    reducer: IngredientReducer,
    selectors: SelectorsConfig,
}

impl RecipeExtractor {
    pub fn new(fetcher: Arc<dyn PageFetcher>, tagger: Arc<dyn Tagger>) -> Self {
        Self {
            fetcher,
            reducer: IngredientReducer::new(tagger),
            selectors: SelectorsConfig::default(),
        }
    }

    pub fn from_config(
        fetcher: Arc<dyn PageFetcher>,
        tagger: Arc<dyn Tagger>,
        config: &ScrapeConfig,
    ) -> Self {
        Self::new(fetcher, tagger).with_selectors(&config.selectors)
    }

    pub fn with_selectors(mut self, selectors: &SelectorsConfig) -> Self {
        self.selectors = selectors.clone();
        self
    }

    /// Fetch and read one recipe. Only a failed fetch is an error; missing
    /// fields are reported as `None` on the record.
    pub async fn extract(&self, url: &str) -> Result<RecipeRecord> {
        let body = self.fetcher.fetch(url).await?;
        Ok(self.parse(url, &body))
    }

    pub fn parse(&self, url: &str, html: &str) -> RecipeRecord {
        debug!("Extracting recipe from {}", url);
        let page = Page::parse(url, html);

        let record = RecipeRecord {
            url: url.to_string(),
            name: self.name(&page),
            rating: self.rating(&page),
            ingredients: self.ingredients(&page),
            nutrition: self.nutrition(&page),
        };

        if !record.is_complete() {
            warn!("{} is missing {:?}", url, record.missing_fields());
        }
        record
    }

    fn name(&self, page: &Page) -> Option<String> {
        let name = texts(page, &self.selectors.title)?.into_iter().next()?;
        (!name.is_empty()).then_some(name)
    }

    fn rating(&self, page: &Page) -> Option<f32> {
        let raw = match page.find_attr(&self.selectors.rating_attr) {
            Ok(raw) => raw?,
            Err(e) => {
                warn!("{}: {}", page.url(), e);
                return None;
            }
        };
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        match raw.parse::<f32>() {
            Ok(rating) if (0.0..=5.0).contains(&rating) => Some(rating),
            _ => {
                debug!("Unusable rating '{}' on {}", raw, page.url());
                None
            }
        }
    }

    fn ingredients(&self, page: &Page) -> Option<BTreeSet<String>> {
        let lines = texts(page, &self.selectors.ingredient)?;
        if lines.is_empty() {
            return None;
        }

        let mut ingredients = BTreeSet::new();
        for line in lines {
            match self.reducer.reduce(&normalize_glyphs(&line)) {
                Ok(ingredient) => {
                    ingredients.insert(ingredient);
                }
                Err(e) => {
                    warn!("{}: {}", page.url(), e);
                    return None;
                }
            }
        }
        Some(ingredients)
    }

    fn nutrition(&self, page: &Page) -> Option<BTreeMap<String, String>> {
        let mut names = texts(page, &self.selectors.nutrient_name)?;
        let mut values = texts(page, &self.selectors.nutrient_value)?;
        if names.is_empty() {
            return None;
        }

        standardize(&mut names, &mut values);
        Some(names.into_iter().zip(values).collect())
    }
}

/// Text of every element matching `selector`; `None` if the selector itself
/// is unusable.
fn texts(page: &Page, selector: &ClassSelector) -> Option<Vec<String>> {
    match page.select(&selector.tag, &selector.class) {
        Ok(elements) => Some(elements.iter().map(element_text).collect()),
        Err(e) => {
            warn!("{}: {}", page.url(), e);
            None
        }
    }
}
