//! Review extraction from a parsed listing page.
//!
//! Each review on a listing page lives in a container tagged with
//! `data-hook="review"`. Inside it, the rating and body are tagged with
//! `data-hook="review-star-rating"` and `data-hook="review-body"`.
//!
//! Extraction never fails. A container missing either element still yields a
//! record, with the missing field set to [`Field::Missing`]; a page with no
//! containers yields an empty list.

use crate::models::{Field, ReviewRecord};
use crate::utils::truncate_for_log;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, instrument};

static REVIEW_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"div[data-hook="review"]"#).unwrap());
static STARS_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"[data-hook="review-star-rating"]"#).unwrap());
static BODY_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"[data-hook="review-body"]"#).unwrap());

/// Rating text is cut at this delimiter ("4.0 out of 5 stars" -> "4.0").
const RATING_DELIMITER: &str = " out";

/// Extract every review on the page, in document order.
#[instrument(level = "debug", skip_all)]
pub fn extract_reviews(document: &Html) -> Vec<ReviewRecord> {
    let reviews: Vec<ReviewRecord> = document
        .select(&REVIEW_SELECTOR)
        .map(extract_review)
        .collect();

    let incomplete = reviews
        .iter()
        .filter(|r| r.stars.is_missing() || r.description.is_missing())
        .count();
    debug!(count = reviews.len(), incomplete, "Extracted reviews from page");
    reviews
}

fn extract_review(container: ElementRef<'_>) -> ReviewRecord {
    let stars = first_text(container, &STARS_SELECTOR).map(|raw| normalize_rating(&raw));
    let description = first_text(container, &BODY_SELECTOR).map(|raw| raw.trim().to_string());

    let record = ReviewRecord::new(Field::from(stars), Field::from(description));
    debug!(
        stars = %record.stars,
        description = %truncate_for_log(record.description.as_str(), 80),
        "Parsed review"
    );
    record
}

/// Concatenated text of the first descendant matching `selector`.
fn first_text(container: ElementRef<'_>, selector: &Selector) -> Option<String> {
    container
        .select(selector)
        .next()
        .map(|el| el.text().collect::<String>())
}

/// Keep only the numeric part of a rating label.
///
/// Text before the first `" out"` is kept; text without the delimiter is only
/// trimmed.
pub fn normalize_rating(raw: &str) -> String {
    let trimmed = raw.trim();
    let head = match trimmed.find(RATING_DELIMITER) {
        Some(idx) => &trimmed[..idx],
        None => trimmed,
    };
    head.trim().to_string()
}
