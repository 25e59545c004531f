//! Error types for blogshift operations.
//!
//! This module defines the main error type [`BlogshiftError`] which represents
//! every failure an import can surface: fetching, parsing, profile loading and
//! rendering. Missing optional page elements are never errors; the pipeline
//! simply skips them.
//!
//! # Example
//!
//! ```rust
//! use blogshift_core::{BlogshiftError, Result};
//!
//! fn require_body(html: &str) -> Result<&str> {
//!     if html.is_empty() {
//!         return Err(BlogshiftError::MissingMainContent(".blogPostMain".to_string()));
//!     }
//!     Ok(html)
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for import operations.
///
/// # Example
///
/// ```rust
/// use blogshift_core::{BlogshiftError, Importer};
///
/// let importer = Importer::new();
/// match importer.process("https://example.com/en/blog/post", "<html></html>") {
///     Ok(resource) => println!("Imported {}", resource.name),
///     Err(BlogshiftError::MissingMainContent(selector)) => {
///         println!("No content region matched {}", selector);
///     }
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
#[derive(Error, Debug)]
pub enum BlogshiftError {
    /// HTTP request errors from reqwest.
    ///
    /// This variant wraps network errors, DNS failures, connection issues,
    /// and other HTTP-related problems.
    #[cfg(feature = "fetch")]
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Request timeout.
    #[error("Request timed out after {timeout} seconds")]
    Timeout { timeout: u64 },

    /// Invalid URL provided.
    ///
    /// Returned when the page URL cannot be parsed; names and destination
    /// paths are derived from it, so an import cannot proceed without one.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// HTML parsing or rewriting errors.
    #[error("Failed to parse HTML: {0}")]
    HtmlParseError(String),

    /// A selector from a site profile could not be parsed.
    #[error("Invalid selector: {0}")]
    InvalidSelector(String),

    /// The profile's main content selector matched nothing.
    ///
    /// Every block builder is scoped to the main content region, so the
    /// import is aborted rather than producing an empty resource.
    #[error("No main content region matched selector {0}")]
    MissingMainContent(String),

    /// File not found.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// File write errors.
    ///
    /// Wraps standard I/O errors for file operations.
    #[error("Failed to write to file: {0}")]
    WriteError(#[from] std::io::Error),

    /// General configuration errors (unknown profile names and the like).
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Site profile syntax errors.
    #[error("Site profile error: {0}")]
    SiteConfigError(String),

    /// Markdown rendering errors.
    #[error("Failed to render Markdown: {0}")]
    MarkdownError(String),

    /// JSON output errors.
    #[error("Failed to serialize output: {0}")]
    SerializeError(#[from] serde_json::Error),
}

/// Result type alias for BlogshiftError.
///
/// This is a convenience alias for `std::result::Result<T, BlogshiftError>`.
pub type Result<T> = std::result::Result<T, BlogshiftError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BlogshiftError::InvalidUrl("not a url".to_string());
        assert!(err.to_string().contains("Invalid URL"));
    }

    #[test]
    fn test_missing_main_content_names_selector() {
        let err = BlogshiftError::MissingMainContent(".blogPostMain".to_string());
        assert!(err.to_string().contains(".blogPostMain"));
    }

    #[test]
    fn test_timeout_error() {
        let err = BlogshiftError::Timeout { timeout: 30 };
        assert!(err.to_string().contains("30"));
    }
}
