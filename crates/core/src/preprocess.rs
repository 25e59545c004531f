//! Boilerplate pruning.
//!
//! Pruning runs as a streaming rewrite over the page markup before the
//! working tree is built, so no later step ever sees navigation, footers,
//! scripts or overlays.

use lol_html::{HtmlRewriter, Selector, Settings, element};

use crate::{BlogshiftError, Result};

/// Parses every selector up front so a bad profile fails before any rewrite.
fn validate_selectors(selectors: &[String]) -> Result<()> {
    for selector in selectors {
        selector
            .parse::<Selector>()
            .map_err(|e| BlogshiftError::InvalidSelector(format!("{}: {}", selector, e)))?;
    }
    Ok(())
}

/// Remove every element matched by one of `selectors`, subtree included.
///
/// Selectors that match nothing leave the markup untouched. An empty
/// selector list returns the input as-is without running the rewriter.
pub fn prune_html(html: &str, selectors: &[String]) -> Result<String> {
    if selectors.is_empty() {
        return Ok(html.to_string());
    }

    validate_selectors(selectors)?;

    let mut output = Vec::with_capacity(html.len());
    let mut rewriter = HtmlRewriter::new(
        Settings {
            element_content_handlers: selectors
                .iter()
                .map(|selector| {
                    element!(selector.as_str(), |el| {
                        el.remove();
                        Ok(())
                    })
                })
                .collect(),
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
