//! Request header profile.
//!
//! Review listings are served to browsers; a bare HTTP client is often
//! answered with a captcha page instead. Every page request therefore carries
//! the same browser-like header set, held in an immutable [`HeaderProfile`].
//!
//! The built-in profile emulates desktop Chrome on Windows. Any subset of it
//! can be overridden from a YAML file:
//!
//! ```yaml
//! user_agent: "Mozilla/5.0 (X11; Linux x86_64) ..."
//! accept_language: "de-DE,de;q=0.9"
//! ```

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, InvalidHeaderValue};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, instrument};

/// Errors raised while loading or applying a header profile.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read header profile {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid header profile: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("header `{name}` has a value that cannot be sent over HTTP")]
    InvalidHeader {
        name: &'static str,
        #[source]
        source: InvalidHeaderValue,
    },
}

/// Outbound headers attached to every page request.
///
/// Each field maps to exactly one request header and has no other effect.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HeaderProfile {
    /// Sent as the `authority` header.
    pub authority: String,
    pub accept: String,
    pub accept_language: String,
    /// Client-hint brand list (`sec-ch-ua`).
    pub sec_ch_ua: String,
    pub user_agent: String,
}

impl Default for HeaderProfile {
    fn default() -> Self {
        Self {
            authority: "www.amazon.com".to_string(),
            accept: "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/apng,*/*;q=0.8,application/signed-exchange;v=b3;q=0.9".to_string(),
            accept_language: "en-US,en;q=0.9,bn;q=0.8".to_string(),
            sec_ch_ua: r#"" Not A;Brand";v="99", "Chromium";v="102", "Google Chrome";v="102""#.to_string(),
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/102.0.0.0 Safari/537.36".to_string(),
        }
    }
}

impl HeaderProfile {
    /// Load a profile from a YAML file. Keys absent from the file keep their
    /// built-in values.
    #[instrument(level = "info", skip_all, fields(path = %path.display()))]
    pub async fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;
        let profile = Self::from_yaml_str(&raw)?;
        debug!(?profile, "Loaded header profile");
        Ok(profile)
    }

    pub fn from_yaml_str(raw: &str) -> Result<Self, ConfigError> {
        // An empty document deserializes as unit, not as an empty mapping.
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(raw)?)
    }

    /// Build the header map sent with each request.
    pub fn to_header_map(&self) -> Result<HeaderMap, ConfigError> {
        let pairs: [(&'static str, &str); 5] = [
            ("authority", self.authority.as_str()),
            ("accept", self.accept.as_str()),
            ("accept-language", self.accept_language.as_str()),
            ("sec-ch-ua", self.sec_ch_ua.as_str()),
            ("user-agent", self.user_agent.as_str()),
        ];

        let mut headers = HeaderMap::with_capacity(pairs.len());
        for (name, value) in pairs {
            let value = HeaderValue::from_str(value)
                .map_err(|source| ConfigError::InvalidHeader { name, source })?;
            headers.insert(HeaderName::from_static(name), value);
        }
        Ok(headers)
    }
}
