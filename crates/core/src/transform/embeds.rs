use dom_query::{NodeRef, Selection};

use crate::Result;
use crate::block::{Cell, create_table};
use crate::parse::{Document, select_within};

pub const EMBED_BLOCK: &str = "Embed";

/// Absolute URL for an iframe `src`, upgrading protocol-relative URLs to https.
pub fn embed_url(src: &str) -> Option<String> {
    let src = src.trim();
    if src.is_empty() {
        return None;
    }

    if src.starts_with("//") { Some(format!("https:{}", src)) } else { Some(src.to_string()) }
}

/// Replace every iframe in `main` that has a usable `src` with an `Embed` block.
///
/// Returns how many iframes were replaced.
pub fn build_embeds<'a>(document: &'a Document, main: &NodeRef<'a>) -> Result<usize> {
    let iframes = select_within(&Selection::from(main.clone()), "iframe")?;
    let mut replaced = 0;

    for iframe in iframes.nodes() {
        let Some(url) = iframe.attr("src").as_deref().and_then(embed_url) else {
            continue;
        };

        let link = document.new_element("a");
        link.set_attr("href", &url);
        link.append_child(&document.inner().tree.new_text(url.as_str()));

        let table = create_table(document.inner(), vec![vec![Cell::from(EMBED_BLOCK)], vec![Cell::Node(link)]]);
        iframe.replace_with(&table);
        replaced += 1;
    }

    Ok(replaced)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embed_url() {
        assert_eq!(embed_url("//example.com/v").as_deref(), Some("https://example.com/v"));
        assert_eq!(
            embed_url("https://www.youtube.com/embed/abc").as_deref(),
            Some("https://www.youtube.com/embed/abc")
        );
        assert_eq!(embed_url("   "), None);
    }

    #[test]
    fn test_protocol_relative_iframe_becomes_embed_block() {
        let doc = Document::parse(r#"<html><body><main><p>Watch:</p><iframe src="//example.com/v"></iframe></main></body></html>"#);
        let main = doc.select_first("main").unwrap().unwrap();

        assert_eq!(build_embeds(&doc, &main).unwrap(), 1);

        assert!(!doc.select("iframe").unwrap().exists());
        let table = doc.select("main > table").unwrap();
        assert_eq!(table.select("th").text().to_string(), "Embed");
        assert_eq!(table.select("tr").length(), 2);
        let link = table.select("td > a");
        assert_eq!(link.attr("href").as_deref(), Some("https://example.com/v"));
        assert_eq!(link.text().to_string(), "https://example.com/v");
    }

    #[test]
    fn test_iframe_without_src_untouched() {
        let doc = Document::parse(r#"<html><body><main><iframe title="empty"></iframe><iframe src=""></iframe></main></body></html>"#);
        let main = doc.select_first("main").unwrap().unwrap();

        assert_eq!(build_embeds(&doc, &main).unwrap(), 0);
        assert_eq!(doc.select("iframe").unwrap().length(), 2);
        assert!(!doc.select("table").unwrap().exists());
    }
}
