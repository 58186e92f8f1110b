//! JSON output of sampled reviews.
//!
//! Reviews are written as a pretty-printed array (two-space indentation):
//!
//! ```text
//! [
//!   {
//!     "Stars": "5.0",
//!     "Description": "Exactly what I needed."
//!   }
//! ]
//! ```
//!
//! The array goes to stdout unless an output file is given. Logging never
//! shares stdout with this array.

use crate::models::ReviewRecord;
use crate::utils::ensure_parent_dir;
use std::error::Error;
use std::io::Write;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

/// Render reviews as a pretty-printed JSON array.
pub fn render_reviews(reviews: &[ReviewRecord]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(reviews)
}

/// Write the rendered array plus a trailing newline to `out`.
pub fn write_reviews<W: Write>(reviews: &[ReviewRecord], mut out: W) -> Result<(), Box<dyn Error>> {
    let json = render_reviews(reviews)?;
    writeln!(out, "{json}")?;
    out.flush()?;
    Ok(())
}

/// Write the rendered array to `path`, creating parent directories.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn write_reviews_file(reviews: &[ReviewRecord], path: &Path) -> Result<(), Box<dyn Error>> {
    let json = render_reviews(reviews)?;
    ensure_parent_dir(path).await?;
    fs::write(path, format!("{json}\n")).await?;
    info!(count = reviews.len(), "Wrote reviews JSON");
    Ok(())
}
