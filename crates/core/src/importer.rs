//! Page import API.
//!
//! [`Importer`] runs the whole pipeline for one page: prune, rewrite the
//! main content region into blocks, collect metadata and derive where the
//! result belongs.
//!
//! # Example
//!
//! ```rust
//! use blogshift_core::Importer;
//!
//! let html = r#"<html><head><title>Hello</title></head>
//!     <body><div class="blogPostMain"><p>Body</p></div></body></html>"#;
//!
//! let resource = Importer::new().process("https://example.com/en/blog/2023/hello/", html).unwrap();
//! assert_eq!(resource.name, "hello");
//! assert_eq!(resource.path, "blog/2023");
//! ```

use url::Url;

#[cfg(feature = "fetch")]
use crate::fetch::{FetchConfig, fetch_url};
use crate::formatters::MarkdownConfig;
use crate::parse::Document;
use crate::postprocess::PostProcessConfig;
use crate::resource::OutputResource;
use crate::siteconfig::{SiteProfile, builtin_profile};
use crate::transform::{Context, run_pipeline};
use crate::{BlogshiftError, Result};

const DEFAULT_PROFILE: &str = "blog";

/// Configuration for an [`Importer`].
///
/// # Example
///
/// ```rust
/// use blogshift_core::{ImporterConfig, builtin_profile};
///
/// let config = ImporterConfig::builder()
///     .profile(builtin_profile("blog-v2").unwrap())
///     .include_frontmatter(true)
///     .build();
/// assert!(config.profile.toc.is_some());
/// ```
#[derive(Debug, Clone)]
pub struct ImporterConfig {
    /// Selectors and switches for the site being imported (default: bundled `blog`).
    pub profile: SiteProfile,

    /// Markdown rendering options.
    pub markdown: MarkdownConfig,
}

impl Default for ImporterConfig {
    fn default() -> Self {
        Self { profile: builtin_profile(DEFAULT_PROFILE).unwrap_or_default(), markdown: MarkdownConfig::default() }
    }
}

impl ImporterConfig {
    pub fn builder() -> ImporterConfigBuilder {
        ImporterConfigBuilder::new()
    }
}

/// Builder for ImporterConfig.
pub struct ImporterConfigBuilder {
    config: ImporterConfig,
}

impl ImporterConfigBuilder {
    /// Creates a new builder with default values.
    pub fn new() -> Self {
        Self { config: ImporterConfig::default() }
    }

    /// Sets the site profile.
    pub fn profile(mut self, profile: SiteProfile) -> Self {
        self.config.profile = profile;
        self
    }

    /// Prepend TOML frontmatter to Markdown output.
    pub fn include_frontmatter(mut self, value: bool) -> Self {
        self.config.markdown.include_frontmatter = value;
        self
    }

    /// Drop images from Markdown output.
    pub fn strip_images(mut self, value: bool) -> Self {
        self.config.markdown.strip_images = value;
        self
    }

    pub fn build(self) -> ImporterConfig {
        self.config
    }
}

impl Default for ImporterConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Imports pages with one site profile.
pub struct Importer {
    config: ImporterConfig,
}

impl Importer {
    /// Creates an importer using the bundled `blog` profile.
    pub fn new() -> Self {
        Self::with_config(ImporterConfig::default())
    }

    pub fn with_config(config: ImporterConfig) -> Self {
        Self { config }
    }

    /// Creates an importer for `profile` with default rendering options.
    pub fn with_profile(profile: SiteProfile) -> Self {
        Self::with_config(ImporterConfig { profile, ..ImporterConfig::default() })
    }

    pub fn config(&self) -> &ImporterConfig {
        &self.config
    }

    /// Imports one page.
    ///
    /// `html` is the raw response body for `url`; it is both the markup that
    /// gets rewritten and the source structured data is read from.
    ///
    /// # Errors
    ///
    /// Returns [`BlogshiftError::InvalidUrl`] if `url` cannot be parsed,
    /// [`BlogshiftError::MissingMainContent`] if the profile's main selector
    /// matches nothing after pruning, and
    /// [`BlogshiftError::InvalidSelector`] for a malformed profile selector.
    pub fn process(&self, url: &str, html: &str) -> Result<OutputResource> {
        let parsed_url = Url::parse(url).map_err(|e| BlogshiftError::InvalidUrl(e.to_string()))?;
        let profile = &self.config.profile;

        let document = Document::parse_pruned(html, &profile.prune)?;
        let main_selector = profile.main_selector();
        let main = document
            .select_first(main_selector)?
            .ok_or_else(|| BlogshiftError::MissingMainContent(main_selector.to_string()))?;

        let mut context = Context::new(&document, main, profile, html);
        run_pipeline(&mut context)?;

        let resource = OutputResource {
            name: derive_name(&parsed_url),
            path: derive_path(&parsed_url, profile),
            content: context.main.html().to_string(),
            metadata: context.metadata,
            source_url: url.to_string(),
            postprocess: PostProcessConfig::from_profile(profile),
        };

        tracing::debug!(name = %resource.name, path = %resource.path, fields = resource.metadata.len(), "imported page");
        Ok(resource)
    }

    /// Fetches a page and imports it.
    #[cfg(feature = "fetch")]
    pub async fn fetch_and_process(&self, url: &str, fetch_config: &FetchConfig) -> Result<OutputResource> {
        let html = fetch_url(url, fetch_config).await?;
        self.process(url, &html)
    }
}

impl Default for Importer {
    fn default() -> Self {
        Self::new()
    }
}

/// Last path segment of `url`, minus one non-alphanumeric character at each end.
///
/// One trailing `/` is ignored. A URL without a path segment is named `index`.
pub fn derive_name(url: &Url) -> String {
    let path = url.path();
    let path = path.strip_suffix('/').unwrap_or(path);
    let segment = path.rsplit('/').next().unwrap_or_default();

    let name = strip_one_non_alphanumeric(segment);
    if name.is_empty() { "index".to_string() } else { name.to_string() }
}

fn strip_one_non_alphanumeric(segment: &str) -> &str {
    let mut name = segment;
    if let Some(first) = name.chars().next()
        && !first.is_alphanumeric()
    {
        name = &name[first.len_utf8()..];
    }
    if let Some(last) = name.chars().next_back()
        && !last.is_alphanumeric()
    {
        name = &name[..name.len() - last.len_utf8()];
    }
    name
}

/// Destination directory for `url`.
///
/// The path is split on `/` (the leading empty entry counts), the last
/// segment dropped, the first `path_skip` entries skipped, and what remains
/// appended to `path_prefix`: `/en/blog/2023/post` becomes `blog/2023`.
pub fn derive_path(url: &Url, profile: &SiteProfile) -> String {
    let path = url.path();
    let path = path.strip_suffix('/').unwrap_or(path);

    let mut entries: Vec<&str> = path.split('/').collect();
    entries.pop();

    entries
        .into_iter()
        .skip(profile.path_skip())
        .fold(profile.path_prefix().to_string(), |mut destination, entry| {
            destination.push('/');
            destination.push_str(entry);
            destination
        })
}
