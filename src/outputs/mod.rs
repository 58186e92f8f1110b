//! Output generation.
//!
//! # Submodules
//!
//! - [`json`]: Writes the sampled reviews as a JSON array to stdout or a file

pub mod json;
