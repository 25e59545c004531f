//! Page retrieval from URLs, files, and stdin.
//!
//! One request per page and no retries: a failed fetch is returned to the
//! caller as an error.

use std::fs;
use std::path::PathBuf;
#[cfg(feature = "fetch")]
use std::time::Duration;

#[cfg(feature = "fetch")]
use reqwest::Client;
#[cfg(feature = "fetch")]
use url::Url;

use crate::{BlogshiftError, Result};

/// HTTP client configuration for fetching pages.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Request timeout in seconds.
    pub timeout: u64,
    /// Custom User-Agent string.
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self { timeout: 30, user_agent: concat!("blogshift/", env!("CARGO_PKG_VERSION")).to_string() }
    }
}

/// Fetches a page over HTTP and returns the body as text.
///
/// Redirects are followed; the configured timeout covers the whole request.
#[cfg(feature = "fetch")]
pub async fn fetch_url(url: &str, config: &FetchConfig) -> Result<String> {
    let parsed_url = Url::parse(url).map_err(|e| BlogshiftError::InvalidUrl(e.to_string()))?;

    if !matches!(parsed_url.scheme(), "http" | "https") {
        return Err(BlogshiftError::InvalidUrl(format!(
            "unsupported scheme '{}' (expected http or https)",
            parsed_url.scheme()
        )));
    }

    let client = Client::builder()
        .timeout(Duration::from_secs(config.timeout))
        .build()
        .map_err(BlogshiftError::HttpError)?;

    tracing::debug!(url = %parsed_url, "fetching page");

    let response = client
        .get(parsed_url)
        .header("User-Agent", &config.user_agent)
        .header("Accept", "text/html,application/xhtml+xml;q=0.9,*/*;q=0.8")
        .send()
        .await
        .and_then(reqwest::Response::error_for_status)
        .map_err(|e| {
            if e.is_timeout() { BlogshiftError::Timeout { timeout: config.timeout } } else { BlogshiftError::HttpError(e) }
        })?;

    let content = response.text().await?;

    Ok(content)
}

/// Reads a saved page from a local file.
pub fn fetch_file(path: &str) -> Result<String> {
    let path_buf = PathBuf::from(path);

    if !path_buf.exists() {
        Err(BlogshiftError::FileNotFound(path_buf))
    } else {
        fs::read_to_string(&path_buf).map_err(BlogshiftError::from)
    }
}

/// Reads a page from standard input until EOF.
pub fn fetch_stdin() -> Result<String> {
    use std::io::{self, Read};

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer).map_err(BlogshiftError::from)?;

    Ok(buffer)
}
