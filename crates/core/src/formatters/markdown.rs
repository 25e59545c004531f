use crate::metadata::Metadata;
use crate::postprocess::{PostProcessConfig, post_process_md};
use crate::{BlogshiftError, Result};

/// Configuration for Markdown conversion
#[derive(Debug, Clone, Default)]
pub struct MarkdownConfig {
    /// Include TOML frontmatter with the text metadata fields
    pub include_frontmatter: bool,
    /// Strip images from output
    pub strip_images: bool,
    /// Cleanup applied to the rendered Markdown
    pub postprocess: PostProcessConfig,
}

/// Convert block-document HTML to Markdown, then run the post-processing hook
pub fn convert_to_markdown(html: &str, metadata: &Metadata, config: &MarkdownConfig) -> Result<String> {
    let mut output = String::new();

    if config.include_frontmatter {
        output.push_str(&generate_frontmatter(metadata));
        output.push('\n');
    }

    let processed_html = if config.strip_images { strip_images(html)? } else { html.to_string() };

    output.push_str(&html_to_markdown(&processed_html)?);

    Ok(post_process_md(&output, &config.postprocess))
}

/// Generate TOML frontmatter from metadata
///
/// Keys are the field labels in snake case; values are the raw strings.
fn generate_frontmatter(metadata: &Metadata) -> String {
    let mut frontmatter = String::from("+++");

    for (field, value) in metadata.iter() {
        let key = field.label().to_lowercase().replace(' ', "_");
        frontmatter.push_str(&format!("\n{} = {}", key, toml_escape_string(value.as_str())));
    }

    frontmatter.push_str("\n+++\n");
    frontmatter
}

/// Escape a string for TOML format
fn toml_escape_string(s: &str) -> String {
    format!(
        "\"{}\"",
        s.replace('\\', "\\\\").replace('\"', "\\\"").replace('\n', "\\n")
    )
}

/// Convert HTML to Markdown using htmd crate
#[cfg(feature = "markdown")]
fn html_to_markdown(html: &str) -> Result<String> {
    htmd::convert(html).map_err(|e| BlogshiftError::MarkdownError(e.to_string()))
}

/// Fallback HTML to text conversion when markdown feature is disabled
#[cfg(not(feature = "markdown"))]
fn html_to_markdown(html: &str) -> Result<String> {
    let doc = scraper::Html::parse_document(html);
    Ok(doc.root_element().text().collect::<String>())
}

/// Strip all img tags from HTML
fn strip_images(html: &str) -> Result<String> {
    let mut output = Vec::new();
    let mut rewriter = lol_html::HtmlRewriter::new(
        lol_html::Settings {
            element_content_handlers: vec![lol_html::element!("img", |el| {
                el.remove();
                Ok(())
            })],
            ..Default::default()
        },
        |c: &[u8]| output.extend_from_slice(c),
    );

    rewriter
        .write(html.as_bytes())
        .map_err(|e| BlogshiftError::HtmlParseError(e.to_string()))?;
    rewriter.end().map_err(|e| BlogshiftError::HtmlParseError(e.to_string()))?;

    String::from_utf8(output).map_err(|e| BlogshiftError::HtmlParseError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{MetadataField, MetadataValue};

    #[test]
    fn test_html_to_markdown_basic() {
        let html = r#"<h1>Title</h1><p>This is a paragraph.</p>"#;
        let markdown = convert_to_markdown(html, &Metadata::new(), &MarkdownConfig::default()).unwrap();

        assert!(markdown.contains("# Title"));
        assert!(markdown.contains("This is a paragraph."));
    }

    #[test]
    fn test_html_to_markdown_with_links() {
        let html = r#"<p>Check out <a href="https://example.com">this link</a>.</p>"#;
        let markdown = convert_to_markdown(html, &Metadata::new(), &MarkdownConfig::default()).unwrap();

        assert!(markdown.contains("[this link](https://example.com)"));
    }

    #[test]
    fn test_strip_images() {
        let html = r#"<p>Text before <img src="photo.jpg"> text after.</p>"#;
        let config = MarkdownConfig { strip_images: true, ..Default::default() };

        let markdown = convert_to_markdown(html, &Metadata::new(), &config).unwrap();
        assert!(!markdown.contains("photo.jpg"));
        assert!(markdown.contains("text after."));
    }

    #[test]
    fn test_block_table_renders() {
        let html = r#"<table><tr><th colspan="2">Metadata</th></tr><tr><td>Title</td><td>Post</td></tr></table>"#;
        let markdown = convert_to_markdown(html, &Metadata::new(), &MarkdownConfig::default()).unwrap();

        assert!(markdown.contains("Metadata"));
        assert!(markdown.contains("Post"));
    }

    #[test]
    fn test_frontmatter_generation() {
        let mut metadata = Metadata::new();
        metadata.insert(MetadataField::Title, MetadataValue::Text("Say \"hi\"".to_string()));
        metadata.insert(MetadataField::PublicationDate, MetadataValue::Text("2023-05-04".to_string()));

        let frontmatter = generate_frontmatter(&metadata);
        assert!(frontmatter.starts_with("+++\ntitle = \"Say \\\"hi\\\"\""));
        assert!(frontmatter.contains("publication_date = \"2023-05-04\""));
        assert!(frontmatter.ends_with("+++\n"));
    }

    #[test]
    fn test_post_processing_applied() {
        let html = "<p>Hello\u{a0}world</p>";
        let markdown = convert_to_markdown(html, &Metadata::new(), &MarkdownConfig::default()).unwrap();

        assert!(!markdown.contains('\u{a0}'));
        assert!(markdown.contains("Hello"));
    }
}
