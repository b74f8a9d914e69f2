use thiserror::Error;

/// Errors that can occur while crawling, extracting or exporting recipes
#[derive(Error, Debug)]
pub enum ScrapeError {
    /// Transport-level failure talking to the aggregator
    #[error("Failed to fetch URL: {0}")]
    Network(#[from] reqwest::Error),

    /// The request did not complete within the configured timeout
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// The page does not exist (404 / 410)
    #[error("Page not found: {0}")]
    NotFound(String),

    /// Any other non-success HTTP status
    #[error("Unexpected status {status} for {url}")]
    Status { url: String, status: u16 },

    /// The page was fetched but did not have the expected structure
    #[error("Malformed page {url}: {reason}")]
    Malformed { url: String, reason: String },

    /// An ingredient line could not be reduced to a base ingredient
    #[error("Could not reduce ingredient: {0}")]
    Ingredient(String),

    /// Link store or export file error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Serialization error while exporting
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid argument (URL, quantity, ...)
    #[error("Invalid argument: {0}")]
    Invalid(String),
}

impl ScrapeError {
    /// Whether retrying the same request may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            ScrapeError::Network(_) | ScrapeError::Timeout(_) => true,
            ScrapeError::Status { status, .. } => *status >= 500 || *status == 429,
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, ScrapeError>;
