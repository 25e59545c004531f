use dom_query::{NodeRef, Selection};

use crate::Result;
use crate::parse::{Document, replace_children_with_text, select_within};

const HEADINGS: &str = "h1, h2, h3, h4, h5, h6";

/// Flattens every heading inside `main` to its plain text.
///
/// Links, emphasis and spans inside headings are dropped; only the text
/// survives.
pub fn normalize_headings<'a>(document: &'a Document, main: &NodeRef<'a>) -> Result<()> {
    let headings = select_within(&Selection::from(main.clone()), HEADINGS)?;

    for heading in headings.nodes() {
        let text = heading.text();
        replace_children_with_text(document.inner(), heading, &text);
    }

    Ok(())
}
