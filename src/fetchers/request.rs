use crate::config::ScrapeConfig;
use crate::error::{Result, ScrapeError};
use crate::fetchers::PageFetcher;
use async_trait::async_trait;
use log::{debug, warn};
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tokio::time::sleep;

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (compatible; FoodscrapeBot/0.1)";

/// Fetches pages over HTTP with a single shared connection pool.
///
/// Retryable failures (transport errors, timeouts, 5xx, 429) are retried with
/// a linearly growing delay; permanent failures return immediately.
pub struct HttpFetcher {
    client: Client,
    retry_attempts: u32,
    retry_delay_ms: u64,
}

impl HttpFetcher {
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        Self::with_user_agent(timeout, DEFAULT_USER_AGENT)
    }

    pub fn with_user_agent(timeout: Option<Duration>, user_agent: &str) -> Result<Self> {
        let timeout = timeout.unwrap_or(Duration::from_secs(30));
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            retry_attempts: 1,
            retry_delay_ms: 0,
        })
    }

    pub fn from_config(config: &ScrapeConfig) -> Result<Self> {
        Ok(Self::with_user_agent(
            Some(Duration::from_secs(config.timeout)),
            &config.user_agent,
        )?
        .with_retry(config.retry_attempts, config.retry_delay_ms))
    }

    pub fn with_retry(mut self, attempts: u32, delay_ms: u64) -> Self {
        self.retry_attempts = attempts.max(1);
        self.retry_delay_ms = delay_ms;
        self
    }

    async fn fetch_once(&self, url: &str) -> Result<String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| classify(e, url))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND || status == StatusCode::GONE {
            return Err(ScrapeError::NotFound(url.to_string()));
        }
        if !status.is_success() {
            return Err(ScrapeError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|e| classify(e, url))
    }
}

fn classify(error: reqwest::Error, url: &str) -> ScrapeError {
    if error.is_timeout() {
        ScrapeError::Timeout(url.to_string())
    } else {
        ScrapeError::Network(error)
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        let mut attempt = 1;
        loop {
            debug!(
                "Fetching {} (attempt {}/{})",
                url, attempt, self.retry_attempts
            );
            match self.fetch_once(url).await {
                Ok(body) => return Ok(body),
                Err(e) if e.is_retryable() && attempt < self.retry_attempts => {
                    warn!(
                        "Fetch of {} failed (attempt {}/{}): {}",
                        url, attempt, self.retry_attempts, e
                    );
                    let delay = Duration::from_millis(self.retry_delay_ms * attempt as u64);
                    sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fetch_returns_body() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/recipes/")
            .with_status(200)
            .with_header("content-type", "text/html")
            .with_body("<html><body>hello</body></html>")
            .create_async()
            .await;

        let fetcher = HttpFetcher::new(None).unwrap();
        let body = fetcher
            .fetch(&format!("{}/recipes/", server.url()))
            .await
            .unwrap();
        assert!(body.contains("hello"));
    }

    #[tokio::test]
    async fn test_not_found_is_permanent() {
        let mut server = mockito::Server::new_async().await;
        let m = server
            .mock("GET", "/missing")
            .with_status(404)
            .expect(1)
            .create_async()
            .await;

        let fetcher = HttpFetcher::new(None).unwrap().with_retry(3, 0);
        let err = fetcher
            .fetch(&format!("{}/missing", server.url()))
            .await
            .unwrap_err();
        assert!(matches!(err, ScrapeError::NotFound(_)));
        m.assert_async().await;
    }

    #[tokio::test]
    async fn test_server_error_is_retried() {
        let mut server = mockito::Server::new_async().await;
        let m = server
            .mock("GET", "/flaky")
            .with_status(503)
            .expect(3)
            .create_async()
            .await;

        let fetcher = HttpFetcher::new(None).unwrap().with_retry(3, 0);
        let err = fetcher
            .fetch(&format!("{}/flaky", server.url()))
            .await
            .unwrap_err();
        assert!(matches!(err, ScrapeError::Status { status: 503, .. }));
        m.assert_async().await;
    }
}
