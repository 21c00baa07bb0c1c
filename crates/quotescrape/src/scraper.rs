use crate::parser::{ParseError, Selectors, parse_page};
use crate::types::{Page, Quote};

use reqwest::{Client, StatusCode};
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum ScraperError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("Parse error on {url}: {source}")]
    ParseError { url: String, source: ParseError },
    #[error("Page not found: {0}")]
    NotFound(String),
}

/// Where listing pages come from.
#[allow(async_fn_in_trait)]
pub trait PageSource {
    async fn fetch(&self, url: &str) -> Result<String, ScraperError>;
}

#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
}

impl HttpSource {
    pub fn new() -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(format!(
                "{}/{}",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION")
            ))
            .build()?;

        Ok(Self { client })
    }
}

impl PageSource for HttpSource {
    async fn fetch(&self, url: &str) -> Result<String, ScraperError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .inspect_err(|e| log::error!("HTTP error: {e:?}"))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(ScraperError::NotFound(url.into()));
        }

        Ok(response
            .error_for_status()?
            .text()
            .await
            .inspect_err(|e| log::error!("Decode error: {e:?}"))?)
    }
}

#[derive(Debug, Clone)]
pub struct WebScraper<S = HttpSource> {
    source: S,
    base_url: String,
    selectors: Selectors,
    max_pages: Option<u32>,
}

impl WebScraper<HttpSource> {
    pub fn new() -> Result<Self, ScraperError> {
        Ok(Self::with_source(HttpSource::new()?))
    }
}

impl<S: PageSource> WebScraper<S> {
    pub fn with_source(source: S) -> Self {
        Self {
            source,
            base_url: crate::BASE_URL.to_string(),
            selectors: Selectors::default(),
            max_pages: None,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_selectors(mut self, selectors: Selectors) -> Self {
        self.selectors = selectors;
        self
    }

    /// Caps the crawl at `max_pages` pages. Without a cap, or with a cap of 0,
    /// the crawl follows next-page links for as long as the source serves them.
    pub fn with_max_pages(mut self, max_pages: Option<u32>) -> Self {
        self.max_pages = max_pages.filter(|&max| max > 0);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn page_url(&self, page: u32) -> String {
        format!("{}/page/{}/", self.base_url.trim_end_matches('/'), page)
    }

    pub async fn fetch_page(&self, page: u32) -> Result<Page, ScraperError> {
        let url = self.page_url(page);
        log::info!("Fetching quotes page {}...", page);
        let html = self.source.fetch(&url).await?;
        let parsed = parse_page(&html, &self.selectors)
            .map_err(|source| ScraperError::ParseError { url, source })?;
        log::debug!(
            "Page {}: {} quote(s), next page: {}",
            page,
            parsed.quotes.len(),
            parsed.has_next
        );
        Ok(parsed)
    }

    /// Walks pages 1, 2, 3, ... until a page has no next-page control, and
    /// returns every quote in the order it was encountered.
    pub async fn fetch_all_quotes(&self) -> Result<Vec<Quote>, ScraperError> {
        let mut quotes = Vec::new();
        let mut page = 1;

        loop {
            let Page {
                quotes: found,
                has_next,
            } = self.fetch_page(page).await?;
            quotes.extend(found);

            if !has_next {
                break;
            }

            if self.max_pages.is_some_and(|max| page >= max) {
                log::warn!(
                    "Stopping after {} page(s); the source still advertises more",
                    page
                );
                break;
            }

            page += 1;
        }

        log::info!("Fetched {} quote(s) from {} page(s)", quotes.len(), page);
        Ok(quotes)
    }
}
