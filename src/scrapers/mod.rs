//! Review listing scraping.
//!
//! Scraping is split into three stages that run strictly in sequence:
//!
//! 1. **Fetching** ([`fetcher`]): Request one listing page and parse it
//! 2. **Extraction** ([`reviews`]): Turn a parsed page into [`ReviewRecord`]s
//! 3. **Pagination** ([`pagination`]): Walk pages `1..=max_pages` until the
//!    listing runs out, pooling every extracted review
//!
//! # Page Sources
//!
//! The pagination driver never talks to the network directly. It asks a
//! [`PageSource`] for each page, which lets it run against in-memory
//! documents as easily as against [`fetcher::HttpPageSource`].
//!
//! [`ReviewRecord`]: crate::models::ReviewRecord

pub mod fetcher;
pub mod pagination;
pub mod reviews;

use fetcher::FetchError;
use scraper::Html;

/// Anything that can hand out numbered listing pages.
pub trait PageSource {
    /// Retrieve and parse page `page` (1-based).
    ///
    /// An error means the page is unavailable; callers treat it as the end of
    /// the listing rather than as a fatal condition.
    async fn fetch_page(&self, page: u32) -> Result<Html, FetchError>;
}
