//! CSS background images to real `<img>` elements.

use std::sync::LazyLock;

use dom_query::NodeRef;
use regex::Regex;

use crate::parse::new_image;

static BACKGROUND_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)background(?:-image)?\s*:[^;]*?url\(\s*['"]?([^'")]+?)['"]?\s*\)"#).unwrap()
});

/// Extract the URL of an inline `background-image` (or `background`
/// shorthand) declaration, with any quotes stripped.
pub fn background_image_url(style: &str) -> Option<String> {
    BACKGROUND_URL
        .captures(style)
        .and_then(|captures| captures.get(1))
        .map(|url| url.as_str().trim().to_string())
        .filter(|url| !url.is_empty())
}

/// Swap `element` for an `<img>` pointing at its inline background image.
///
/// Returns the new image, already in `element`'s former position. When the
/// element has no background image it is returned untouched.
pub fn resolve_background_image<'a>(document: &'a dom_query::Document, element: NodeRef<'a>) -> NodeRef<'a> {
    let Some(url) = element.attr("style").as_deref().and_then(background_image_url) else {
        return element;
    };

    let img = new_image(document, &url);
    element.replace_with(&img);
    img
}
