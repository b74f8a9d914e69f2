use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Main scraper configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ScrapeConfig {
    /// Root of the category tree
    #[serde(default = "default_start_url")]
    pub start_url: String,
    /// Append-only file of discovered recipe links
    #[serde(default = "default_links_file")]
    pub links_file: String,
    /// Stop crawling once this many links are known (unbounded when absent)
    #[serde(default)]
    pub target_quantity: Option<usize>,
    /// Concurrent recipe page fetches
    #[serde(default = "default_workers")]
    pub workers: usize,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// Attempts per request for retryable failures
    #[serde(default = "default_retry_attempts")]
    pub retry_attempts: u32,
    /// Base delay between retries in milliseconds (grows linearly)
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Which category names gate re-descent
    #[serde(default)]
    pub category_names: CategoryNamePolicy,
    /// Substring marking gallery URLs, which are never fetched
    #[serde(default = "default_gallery_marker")]
    pub gallery_marker: String,
    #[serde(default)]
    pub selectors: SelectorsConfig,
    #[serde(default)]
    pub output: OutputConfig,
    /// When set, the link index of each failed recipe is written here
    #[serde(default)]
    pub error_log: Option<String>,
}

/// How visited category display names are scoped during one crawl.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum CategoryNamePolicy {
    /// One set for the whole run: a name seen anywhere is never descended
    /// into again, even under a different parent.
    #[default]
    PerRun,
    /// A name is only skipped when it already appears on the path from the
    /// root to the current page.
    PerBranch,
}

/// Tag and class names used to read aggregator pages. Classes are space
/// separated and must all be present on the element.
#[derive(Debug, Deserialize, Clone)]
pub struct SelectorsConfig {
    #[serde(default = "default_carousel_link")]
    pub carousel_link: ClassSelector,
    #[serde(default = "default_carousel_name")]
    pub carousel_name: ClassSelector,
    #[serde(default = "default_recipe_card")]
    pub recipe_card: ClassSelector,
    #[serde(default = "default_title")]
    pub title: ClassSelector,
    #[serde(default = "default_rating_attr")]
    pub rating_attr: String,
    #[serde(default = "default_ingredient")]
    pub ingredient: ClassSelector,
    #[serde(default = "default_nutrient_name")]
    pub nutrient_name: ClassSelector,
    #[serde(default = "default_nutrient_value")]
    pub nutrient_value: ClassSelector,
}

impl Default for SelectorsConfig {
    fn default() -> Self {
        Self {
            carousel_link: default_carousel_link(),
            carousel_name: default_carousel_name(),
            recipe_card: default_recipe_card(),
            title: default_title(),
            rating_attr: default_rating_attr(),
            ingredient: default_ingredient(),
            nutrient_name: default_nutrient_name(),
            nutrient_value: default_nutrient_value(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ClassSelector {
    pub tag: String,
    pub class: String,
}

impl ClassSelector {
    pub fn new(tag: &str, class: &str) -> Self {
        Self {
            tag: tag.to_string(),
            class: class.to_string(),
        }
    }
}

/// Where and how the finished dataset is written
#[derive(Debug, Deserialize, Clone)]
pub struct OutputConfig {
    #[serde(default = "default_output_path")]
    pub path: String,
    #[serde(default)]
    pub format: OutputFormat,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_output_path(),
            format: OutputFormat::default(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// One-hot encoded table
    #[default]
    Csv,
    /// Un-encoded rows
    Json,
}

// Default value functions
fn default_start_url() -> String {
    "https://www.allrecipes.com/recipes/".to_string()
}

fn default_links_file() -> String {
    "links.txt".to_string()
}

fn default_workers() -> usize {
    10
}

fn default_timeout() -> u64 {
    30
}

fn default_retry_attempts() -> u32 {
    3
}

fn default_retry_delay_ms() -> u64 {
    500
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (compatible; FoodscrapeBot/0.1)".to_string()
}

fn default_gallery_marker() -> String {
    "/gallery/".to_string()
}

fn default_carousel_link() -> ClassSelector {
    ClassSelector::new("a", "carouselNav__link recipeCarousel__link")
}

fn default_carousel_name() -> ClassSelector {
    ClassSelector::new("div", "carouselNav__linkText")
}

fn default_recipe_card() -> ClassSelector {
    ClassSelector::new("a", "card__titleLink manual-link-behavior")
}

fn default_title() -> ClassSelector {
    ClassSelector::new("h1", "headline heading-content")
}

fn default_rating_attr() -> String {
    "data-ratings-average".to_string()
}

fn default_ingredient() -> ClassSelector {
    ClassSelector::new("span", "ingredients-item-name")
}

fn default_nutrient_name() -> ClassSelector {
    ClassSelector::new("span", "nutrient-name")
}

fn default_nutrient_value() -> ClassSelector {
    ClassSelector::new("span", "nutrient-value")
}

fn default_output_path() -> String {
    "recipes.csv".to_string()
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            start_url: default_start_url(),
            links_file: default_links_file(),
            target_quantity: None,
            workers: default_workers(),
            timeout: default_timeout(),
            retry_attempts: default_retry_attempts(),
            retry_delay_ms: default_retry_delay_ms(),
            user_agent: default_user_agent(),
            category_names: CategoryNamePolicy::default(),
            gallery_marker: default_gallery_marker(),
            selectors: SelectorsConfig::default(),
            output: OutputConfig::default(),
            error_log: None,
        }
    }
}

impl ScrapeConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with FOODSCRAPE__ prefix
    /// 2. foodscrape.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: FOODSCRAPE__SELECTORS__TITLE__CLASS
    pub fn load() -> Result<Self, ConfigError> {
        load_config("foodscrape")
    }
}

/// Load configuration from `<name>.toml` (optional) and `FOODSCRAPE__*`
/// environment variables.
pub fn load_config(name: &str) -> Result<ScrapeConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name(name).required(false))
        // Use double underscore for nested: FOODSCRAPE__OUTPUT__PATH
        .add_source(
            Environment::with_prefix("FOODSCRAPE")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}
