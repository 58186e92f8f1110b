//! Pagination driver.
//!
//! Walks listing pages `1..=max_pages` one at a time, extracting reviews from
//! each page and pooling them in fetch order. The first page that cannot be
//! fetched ends the crawl; whatever was pooled before it is kept.
//!
//! # Pacing
//!
//! The driver sleeps for a fixed delay between consecutive pages, after a
//! successful page and only when another page follows. There is no retry and
//! no backoff: a failed page is read as "the listing has no more pages".
//!
//! # States
//!
//! ```text
//! Running { next_page } --fetch ok, next_page < max--> Running { next_page + 1 }
//! Running { next_page } --fetch ok, next_page = max--> Stopped(PageLimit)
//! Running { next_page } --fetch failed-------------> Stopped(FetchFailed)
//! ```

use crate::models::ReviewRecord;
use crate::scrapers::PageSource;
use crate::scrapers::reviews::extract_reviews;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, instrument, warn};

/// Default number of listing pages attempted per run.
pub const DEFAULT_MAX_PAGES: u32 = 10;
/// Default pause between consecutive page requests.
pub const DEFAULT_PAGE_DELAY: Duration = Duration::from_secs(2);

/// Limits for one crawl.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrawlOptions {
    /// Highest page number requested.
    pub max_pages: u32,
    /// Pause after each successful page when another page follows.
    pub page_delay: Duration,
}

impl Default for CrawlOptions {
    fn default() -> Self {
        Self {
            max_pages: DEFAULT_MAX_PAGES,
            page_delay: DEFAULT_PAGE_DELAY,
        }
    }
}

/// Why a crawl ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Every page up to `max_pages` was fetched.
    PageLimit,
    /// Page `page` could not be fetched; later pages were not attempted.
    FetchFailed { page: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CrawlState {
    Running { next_page: u32 },
    Stopped(StopReason),
}

/// Everything a crawl produced.
#[derive(Debug)]
pub struct CrawlReport {
    /// All reviews, in page order then document order.
    pub reviews: Vec<ReviewRecord>,
    /// Number of pages fetched successfully.
    pub pages_fetched: u32,
    pub stop_reason: StopReason,
}

impl CrawlReport {
    pub fn stopped_early(&self) -> bool {
        matches!(self.stop_reason, StopReason::FetchFailed { .. })
    }
}

/// Crawl the listing behind `source` and pool every review found.
///
/// Pages are requested sequentially; a `max_pages` of zero requests nothing.
#[instrument(level = "info", skip_all, fields(max_pages = options.max_pages))]
pub async fn crawl<S: PageSource>(source: &S, options: &CrawlOptions) -> CrawlReport {
    let mut reviews = Vec::new();
    let mut pages_fetched = 0;

    let mut state = if options.max_pages == 0 {
        CrawlState::Stopped(StopReason::PageLimit)
    } else {
        CrawlState::Running { next_page: 1 }
    };

    let stop_reason = loop {
        let page = match state {
            CrawlState::Running { next_page } => next_page,
            CrawlState::Stopped(reason) => break reason,
        };

        state = match source.fetch_page(page).await {
            Ok(document) => {
                let found = extract_reviews(&document);
                info!(page, count = found.len(), "Collected reviews from page");
                reviews.extend(found);
                pages_fetched += 1;

                if page >= options.max_pages {
                    CrawlState::Stopped(StopReason::PageLimit)
                } else {
                    if !options.page_delay.is_zero() {
                        sleep(options.page_delay).await;
                    }
                    CrawlState::Running { next_page: page + 1 }
                }
            }
            Err(e) => {
                warn!(page, error = %e, "Failed to retrieve page; ending pagination");
                CrawlState::Stopped(StopReason::FetchFailed { page: e.page() })
            }
        };
    };

    info!(
        pages_fetched,
        total = reviews.len(),
        ?stop_reason,
        "Pagination finished"
    );

    CrawlReport {
        reviews,
        pages_fetched,
        stop_reason,
    }
}
