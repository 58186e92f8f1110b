//! Command-line interface definitions for revtrack_scrape.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! Every option except the listing URL can also be set through an environment
//! variable.

use crate::sampling::DEFAULT_SAMPLE_CAP;
use crate::scrapers::pagination::{CrawlOptions, DEFAULT_MAX_PAGES, DEFAULT_PAGE_DELAY};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Collect reviews from a paginated product-review listing and print a random
/// sample of them as JSON.
///
/// # Examples
///
/// ```sh
/// # Default run: up to 10 pages, at most 50 reviews
/// revtrack_scrape https://www.amazon.com/product-reviews/B0EXAMPLE1
///
/// # Reproducible sample written to a file
/// revtrack_scrape https://www.amazon.com/product-reviews/B0EXAMPLE1 --seed 7 -o reviews.json
///
/// # Custom headers
/// revtrack_scrape https://www.amazon.com/product-reviews/B0EXAMPLE1 --headers headers.yaml
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Base URL of the review listing; `pageNumber` is appended per page
    pub url: Url,

    /// Maximum number of listing pages to request
    #[arg(long, env = "REVTRACK_MAX_PAGES", default_value_t = DEFAULT_MAX_PAGES,
          value_parser = clap::value_parser!(u32).range(1..))]
    pub max_pages: u32,

    /// Maximum number of reviews in the output
    #[arg(long, env = "REVTRACK_SAMPLE_CAP", default_value_t = DEFAULT_SAMPLE_CAP)]
    pub sample_cap: usize,

    /// Pause between page requests, in milliseconds
    #[arg(long, env = "REVTRACK_DELAY_MS", default_value_t = DEFAULT_PAGE_DELAY.as_millis() as u64)]
    pub delay_ms: u64,

    /// Seed for the review sample (random when omitted)
    #[arg(long, env = "REVTRACK_SEED")]
    pub seed: Option<u64>,

    /// YAML file overriding request headers
    #[arg(long, env = "REVTRACK_HEADERS")]
    pub headers: Option<PathBuf>,

    /// Per-request timeout in seconds
    #[arg(long, env = "REVTRACK_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,

    /// Write the JSON to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl Cli {
    pub fn crawl_options(&self) -> CrawlOptions {
        CrawlOptions {
            max_pages: self.max_pages,
            page_delay: Duration::from_millis(self.delay_ms),
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}
