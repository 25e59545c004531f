//! The output of one import.
//!
//! An [`OutputResource`] holds the rewritten main content region, its
//! metadata and where the downstream pipeline should store it.

use std::path::PathBuf;

use serde::Serialize;

use crate::Result;
use crate::formatters::json::{JsonConfig, convert_to_json};
use crate::formatters::markdown::{MarkdownConfig, convert_to_markdown};
use crate::metadata::Metadata;
use crate::postprocess::PostProcessConfig;

/// Output format options for a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Markdown, post-processed.
    Markdown,
    /// The block-document HTML itself.
    Html,
    /// The whole resource as JSON.
    Json,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Markdown => "md",
            OutputFormat::Html => "html",
            OutputFormat::Json => "json",
        }
    }
}

/// One imported page.
#[derive(Debug, Clone, Serialize)]
pub struct OutputResource {
    /// File name derived from the last URL path segment.
    pub name: String,

    /// Destination directory, relative to the output root.
    pub path: String,

    /// Serialized main content region after every rewrite.
    pub content: String,

    /// Page metadata, in rendering order.
    pub metadata: Metadata,

    /// URL the page was imported from.
    pub source_url: String,

    /// Markdown cleanup configured by the site profile.
    #[serde(skip)]
    pub postprocess: PostProcessConfig,
}

impl OutputResource {
    /// Converts content to the specified format.
    pub fn to_format(&self, format: OutputFormat, config: &MarkdownConfig) -> Result<String> {
        match format {
            OutputFormat::Markdown => self.to_markdown(config),
            OutputFormat::Html => Ok(self.content.clone()),
            OutputFormat::Json => self.to_json(true),
        }
    }

    /// Renders content as Markdown.
    ///
    /// The profile's post-processing settings replace whatever `config` carries.
    pub fn to_markdown(&self, config: &MarkdownConfig) -> Result<String> {
        let config = MarkdownConfig { postprocess: self.postprocess.clone(), ..config.clone() };
        convert_to_markdown(&self.content, &self.metadata, &config)
    }

    /// Serializes `{name, path, content, metadata, source_url}`.
    pub fn to_json(&self, pretty: bool) -> Result<String> {
        convert_to_json(self, &JsonConfig { pretty })
    }

    /// `<path>/<name>.<extension>`, relative to an output directory.
    pub fn destination(&self, extension: &str) -> PathBuf {
        PathBuf::from(self.path.trim_start_matches('/')).join(format!("{}.{}", self.name, extension))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{MetadataField, MetadataValue};
    use std::path::Path;

    fn resource() -> OutputResource {
        let mut metadata = Metadata::new();
        metadata.insert(MetadataField::Title, MetadataValue::Text("Shipping faster".to_string()));

        OutputResource {
            name: "shipping-faster".to_string(),
            path: "blog/2023".to_string(),
            content: "<main><h2>Why</h2><p>Because\u{a0}\u{1}speed.</p></main>".to_string(),
            metadata,
            source_url: "https://example.com/en/blog/2023/shipping-faster".to_string(),
            postprocess: PostProcessConfig { strip_control_chars: true },
        }
    }

    #[test]
    fn test_destination() {
        let resource = resource();
        assert_eq!(resource.destination("md"), Path::new("blog/2023/shipping-faster.md"));

        let rootless = OutputResource { path: "/2023".to_string(), ..resource };
        assert_eq!(rootless.destination("html"), Path::new("2023/shipping-faster.html"));
    }

    #[test]
    fn test_to_markdown_uses_profile_postprocessing() {
        let markdown = resource().to_markdown(&MarkdownConfig::default()).unwrap();

        assert!(markdown.contains("## Why"));
        assert!(!markdown.contains('\u{a0}'));
        assert!(!markdown.contains('\u{1}'));
    }

    #[test]
    fn test_to_json_fields() {
        let json = resource().to_json(false).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["name"], "shipping-faster");
        assert_eq!(value["path"], "blog/2023");
        assert_eq!(value["metadata"]["Title"], "Shipping faster");
        assert_eq!(value["source_url"], "https://example.com/en/blog/2023/shipping-faster");
        assert!(value.get("postprocess").is_none());
    }

    #[test]
    fn test_html_format_is_content() {
        let resource = resource();
        let html = resource.to_format(OutputFormat::Html, &MarkdownConfig::default()).unwrap();
        assert_eq!(html, resource.content);
    }
}
