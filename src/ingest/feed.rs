// src/ingest/feed.rs
//! Feed access: the trait the pipeline consumes and its HTTP implementation.

use async_trait::async_trait;
use reqwest::header::{self, HeaderMap, HeaderValue};

use crate::error::ScrapeError;
use crate::ingest::config::ScraperConfig;

/// Browser-mimicking defaults the upstream expects; it answers XHR-looking
/// requests and little else.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
                          AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";
const ACCEPT: &str = "application/json, text/javascript, */*; q=0.01";
const ACCEPT_LANGUAGE: &str = "en-US,en;q=0.5";

/// Something that can hand the pipeline one raw response body per cycle.
#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Fetch the raw body. A non-2xx status is a [`ScrapeError::Status`],
    /// not a body.
    async fn fetch_raw(&self) -> Result<String, ScrapeError>;
    fn name(&self) -> &'static str;
}

/// Build the shared HTTP client: static headers, request timeout, rustls.
pub fn build_client(cfg: &ScraperConfig) -> Result<reqwest::Client, ScrapeError> {
    let mut headers = HeaderMap::new();
    headers.insert(header::USER_AGENT, HeaderValue::from_static(USER_AGENT));
    headers.insert(header::ACCEPT, HeaderValue::from_static(ACCEPT));
    headers.insert(
        header::ACCEPT_LANGUAGE,
        HeaderValue::from_static(ACCEPT_LANGUAGE),
    );
    headers.insert(header::CONNECTION, HeaderValue::from_static("keep-alive"));
    headers.insert(
        header::HeaderName::from_static("x-requested-with"),
        HeaderValue::from_static("XMLHttpRequest"),
    );
    if let Ok(referer) = HeaderValue::from_str(&cfg.referer) {
        headers.insert(header::REFERER, referer);
    }

    let client = reqwest::Client::builder()
        .default_headers(headers)
        .timeout(std::time::Duration::from_secs(cfg.request_timeout_secs))
        .build()?;
    Ok(client)
}

/// GETs a fixed URL with the shared client. One instance per endpoint.
pub struct HttpFeed {
    client: reqwest::Client,
    url: String,
    name: &'static str,
}

impl HttpFeed {
    pub fn new(client: reqwest::Client, url: String, name: &'static str) -> Self {
        Self { client, url, name }
    }
}

#[async_trait]
impl FeedSource for HttpFeed {
    async fn fetch_raw(&self) -> Result<String, ScrapeError> {
        let resp = self.client.get(&self.url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(ScrapeError::Status {
                status: status.as_u16(),
            });
        }
        Ok(resp.text().await?)
    }

    fn name(&self) -> &'static str {
        self.name
    }
}
