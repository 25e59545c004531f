//! HTML parsing and DOM manipulation.
//!
//! This module provides the [`Document`] type, the mutable page tree every
//! pipeline step works on. Queries go through CSS selectors that are
//! validated before use, so a malformed selector in a site profile surfaces
//! as [`BlogshiftError::InvalidSelector`] instead of a panic.
//!
//! # Example
//!
//! ```rust
//! use blogshift_core::parse::Document;
//!
//! let html = r#"
//!     <html>
//!         <head><title>Title</title></head>
//!         <body><p class="content">Paragraph</p></body>
//!     </html>
//! "#;
//!
//! let doc = Document::parse(html);
//! assert_eq!(doc.title(), Some("Title".to_string()));
//! assert_eq!(doc.select("p.content").unwrap().length(), 1);
//! ```

use dom_query::{Matcher, NodeRef, Selection};

use crate::preprocess::prune_html;
use crate::{BlogshiftError, Result};

/// Compile a selector, mapping parse failures to [`BlogshiftError::InvalidSelector`].
pub fn matcher(selector: &str) -> Result<Matcher> {
    Matcher::new(selector).map_err(|_| BlogshiftError::InvalidSelector(selector.to_string()))
}

/// Select descendants of `scope` matching `selector`.
pub fn select_within<'a>(scope: &Selection<'a>, selector: &str) -> Result<Selection<'a>> {
    let matcher = matcher(selector)?;
    Ok(scope.select_matcher(&matcher))
}

/// First descendant of `node` matching `selector`, if any.
pub fn first_within<'a>(node: &NodeRef<'a>, selector: &str) -> Result<Option<NodeRef<'a>>> {
    let found = select_within(&Selection::from(node.clone()), selector)?;
    Ok(found.nodes().first().cloned())
}

/// Replace all children of `node` with a single text node.
pub fn replace_children_with_text(document: &dom_query::Document, node: &NodeRef<'_>, text: &str) {
    for child in node.children() {
        child.remove_from_parent();
    }
    let text_node = document.tree.new_text(text);
    node.append_child(&text_node);
}

/// Create a detached `<img src>` owned by `document`'s tree.
///
/// Elements from `Tree::new_element` carry no namespace and serialize as
/// `<img></img>`, so the image is parsed from a fragment instead.
pub fn new_image<'a>(document: &'a dom_query::Document, src: &str) -> NodeRef<'a> {
    let scratch = document.tree.new_element("div");
    scratch.set_html("<img>");
    let img = scratch.first_element_child().unwrap_or_else(|| document.tree.new_element("img"));
    img.set_attr("src", src);
    img
}

/// A parsed, mutable HTML page.
///
/// Owned by exactly one import; every pipeline step borrows it in turn.
pub struct Document {
    html: dom_query::Document,
}

impl Document {
    /// Parses HTML from a string without pruning.
    pub fn parse(html: &str) -> Self {
        Self { html: dom_query::Document::from(html) }
    }

    /// Prunes boilerplate with `selectors`, then parses what is left.
    ///
    /// # Errors
    ///
    /// Returns [`BlogshiftError::InvalidSelector`] if a prune selector is invalid.
    pub fn parse_pruned(html: &str, selectors: &[String]) -> Result<Self> {
        let pruned = prune_html(html, selectors)?;
        Ok(Self::parse(&pruned))
    }

    /// Gets the underlying `dom_query` document.
    pub fn inner(&self) -> &dom_query::Document {
        &self.html
    }

    /// Selects elements using a CSS selector.
    ///
    /// # Errors
    ///
    /// Returns [`BlogshiftError::InvalidSelector`] if the selector is invalid.
    ///
    /// # Example
    ///
    /// ```rust
    /// use blogshift_core::parse::Document;
    ///
    /// let doc = Document::parse(r#"<p class="content">First</p><p class="content">Second</p>"#);
    /// assert_eq!(doc.select("p.content").unwrap().length(), 2);
    /// ```
    pub fn select(&self, selector: &str) -> Result<Selection<'_>> {
        let matcher = matcher(selector)?;
        Ok(self.html.select_matcher(&matcher))
    }

    /// First element matching `selector`, if any.
    pub fn select_first(&self, selector: &str) -> Result<Option<NodeRef<'_>>> {
        Ok(self.select(selector)?.nodes().first().cloned())
    }

    /// Creates a detached element owned by this document's tree.
    pub fn new_element(&self, name: &str) -> NodeRef<'_> {
        self.html.tree.new_element(name)
    }

    /// Gets the text of the page's `<title>` if present.
    ///
    /// Only the head's title counts; inline SVG icons carry their own.
    pub fn title(&self) -> Option<String> {
        let title = self.html.select("head > title");
        title.nodes().first().map(|title| title.text().to_string())
    }

    /// Get meta tag content by `name` or `property` attribute.
    pub fn meta_content(&self, attr: &str) -> Option<String> {
        for key in ["name", "property"] {
            let selector = format!("meta[{}=\"{}\"]", key, attr);
            if let Ok(elements) = self.select(&selector)
                && let Some(content) = elements.attr("content")
            {
                return Some(content.to_string());
            }
        }

        None
    }
}
