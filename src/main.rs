//! # revtrack_scrape
//!
//! Collects customer reviews from a paginated product-review listing and
//! prints a bounded random sample of them as JSON.
//!
//! ## Usage
//!
//! ```sh
//! revtrack_scrape https://www.amazon.com/product-reviews/B0EXAMPLE1 > reviews.json
//! ```
//!
//! ## Architecture
//!
//! The tool is a linear pipeline:
//! 1. **Fetching**: Request listing pages `1..=max_pages` one after another
//! 2. **Extraction**: Read rating and body text from every review on a page
//! 3. **Sampling**: Keep at most `sample_cap` reviews, chosen at random
//! 4. **Output**: Print the sample as a pretty-printed JSON array
//!
//! Logs are written to stderr so stdout carries nothing but the JSON.

use clap::Parser;
use clap::error::ErrorKind;
use rand::Rng;
use std::error::Error;
use std::io;
use std::process::ExitCode;
use tracing::{debug, error, info, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod config;
mod models;
mod outputs;
mod sampling;
mod scrapers;
mod utils;

use cli::Cli;
use config::HeaderProfile;
use outputs::json;
use scrapers::fetcher::HttpPageSource;
use scrapers::pagination::crawl;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    // Parse CLI; any usage problem exits with status 1.
    let args = match Cli::try_parse() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            // A failed write to stderr leaves the exit code as the only report.
            e.print().ok();
            return ExitCode::FAILURE;
        }
    };
    debug!(?args, "Parsed CLI arguments");

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Run failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Cli) -> Result<(), Box<dyn Error>> {
    let start_time = std::time::Instant::now();
    info!(url = %args.url, "revtrack_scrape starting up");

    // ---- Header profile ----
    let profile = match &args.headers {
        Some(path) => HeaderProfile::load(path).await?,
        None => HeaderProfile::default(),
    };

    // ---- Crawl ----
    let source = HttpPageSource::new(args.url.clone(), &profile, args.timeout())?;
    let report = crawl(&source, &args.crawl_options()).await;
    if report.stopped_early() {
        warn!(
            base_url = %source.base_url(),
            pages_fetched = report.pages_fetched,
            "Listing ended before the page limit; emitting partial results"
        );
    }

    // ---- Sample ----
    let seed = args.seed.unwrap_or_else(|| rand::rng().random());
    info!(seed, pool = report.reviews.len(), cap = args.sample_cap, "Sampling reviews");
    let mut rng = sampling::seeded_rng(seed);
    let selected = sampling::sample(report.reviews, args.sample_cap, &mut rng);

    // ---- Output ----
    match &args.output {
        Some(path) => json::write_reviews_file(&selected, path).await?,
        None => json::write_reviews(&selected, io::stdout().lock())?,
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        reviews = selected.len(),
        pages = report.pages_fetched,
        "Execution complete"
    );
    Ok(())
}
