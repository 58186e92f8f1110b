//! HTTP page fetching.
//!
//! Builds the paginated URL for a listing page, sends it with the configured
//! [`HeaderProfile`] and parses the body into an HTML tree.
//!
//! # URL Pattern
//!
//! Page `n` of `https://host/product-reviews/B000000000` is requested as
//! `https://host/product-reviews/B000000000?pageNumber=n`. Other query
//! parameters on the base URL are preserved.
//!
//! Only a `200 OK` counts as a page. Every other status, and every transport
//! failure, comes back as a [`FetchError`].

use crate::config::HeaderProfile;
use crate::scrapers::PageSource;
use reqwest::header::HeaderMap;
use reqwest::{Client, StatusCode};
use scraper::Html;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, instrument};
use url::Url;

/// Query parameter carrying the 1-based page number.
pub const PAGE_PARAM: &str = "pageNumber";

/// Why a listing page could not be retrieved.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("page {page} returned status {status}")]
    Status { page: u32, status: StatusCode },
    #[error("request for page {page} failed: {source}")]
    Transport {
        page: u32,
        #[source]
        source: reqwest::Error,
    },
}

impl FetchError {
    pub fn page(&self) -> u32 {
        match self {
            FetchError::Status { page, .. } | FetchError::Transport { page, .. } => *page,
        }
    }
}

/// Build the request URL for `page`, replacing any page number already
/// present on `base`. Other query segments are kept byte for byte.
pub fn page_url(base: &Url, page: u32) -> Url {
    let page_param = format!("{PAGE_PARAM}={page}");
    let mut segments: Vec<&str> = base
        .query()
        .unwrap_or_default()
        .split('&')
        .filter(|seg| !seg.is_empty() && seg.split('=').next() != Some(PAGE_PARAM))
        .collect();
    segments.push(&page_param);

    let mut url = base.clone();
    url.set_query(Some(&segments.join("&")));
    url
}

/// Fetches listing pages of one product over HTTP.
#[derive(Debug, Clone)]
pub struct HttpPageSource {
    client: Client,
    base_url: Url,
    headers: HeaderMap,
}

impl HttpPageSource {
    /// Create a page source for `base_url`.
    ///
    /// `timeout` bounds each request; `None` leaves the client default in place.
    pub fn new(
        base_url: Url,
        profile: &HeaderProfile,
        timeout: Option<Duration>,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let headers = profile.to_header_map()?;
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            base_url,
            headers,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}

impl PageSource for HttpPageSource {
    #[instrument(level = "info", skip(self), fields(base_url = %self.base_url))]
    async fn fetch_page(&self, page: u32) -> Result<Html, FetchError> {
        let url = page_url(&self.base_url, page);
        debug!(%url, "Requesting listing page");

        let response = self
            .client
            .get(url)
            .headers(self.headers.clone())
            .send()
            .await
            .map_err(|source| FetchError::Transport { page, source })?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(FetchError::Status { page, status });
        }

        let body = response
            .text()
            .await
            .map_err(|source| FetchError::Transport { page, source })?;
        info!(page, bytes = body.len(), "Fetched listing page");

        Ok(Html::parse_document(&body))
    }
}
