use dom_query::{NodeRef, Selection};

use crate::Result;
use crate::block::{Cell, create_table};
use crate::parse::{Document, replace_children_with_text, select_within};

pub const RELATED_POSTS_BLOCK: &str = "Related Posts";

/// Collect related-post links into a `Related Posts` block at the end of `main`.
///
/// Each link's text is replaced by its `href`. The block is appended even
/// when nothing matches, leaving just the header row.
pub fn build_related_posts<'a>(document: &'a Document, main: &NodeRef<'a>, selector: &str) -> Result<NodeRef<'a>> {
    let links = select_within(&Selection::from(main.clone()), selector)?;

    let mut rows = vec![vec![Cell::from(RELATED_POSTS_BLOCK)]];
    for link in links.nodes() {
        let href = link.attr("href").map(|href| href.to_string()).unwrap_or_default();
        replace_children_with_text(document.inner(), link, &href);
        rows.push(vec![Cell::Node(link.clone())]);
    }

    let table = create_table(document.inner(), rows);
    main.append_child(&table);

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_links_become_rows_with_href_text() {
        let doc = Document::parse(
            r#"<html><body><main>
                <p>Body</p>
                <ul class="related">
                    <li><a class="link" href="https://example.com/blog/one">First <span>post</span></a></li>
                    <li><a class="link" href="https://example.com/blog/two">Second post</a></li>
                </ul>
            </main></body></html>"#,
        );
        let main = doc.select_first("main").unwrap().unwrap();

        let table = build_related_posts(&doc, &main, ".related a.link").unwrap();
        let table = Selection::from(table);

        assert_eq!(table.select("th").text().to_string(), "Related Posts");
        let links = table.select("td > a");
        assert_eq!(links.length(), 2);
        assert_eq!(links.nodes()[0].text().to_string(), "https://example.com/blog/one");
        assert_eq!(links.nodes()[1].text().to_string(), "https://example.com/blog/two");

        assert_eq!(doc.select("main > table:last-child").unwrap().length(), 1);
    }

    #[test]
    fn test_no_matches_still_appends_header_block() {
        let doc = Document::parse("<html><body><main><p>Body</p></main></body></html>");
        let main = doc.select_first("main").unwrap().unwrap();

        build_related_posts(&doc, &main, ".related a").unwrap();

        let tables = doc.select("main > table").unwrap();
        assert_eq!(tables.length(), 1);
        assert_eq!(tables.select("tr").length(), 1);
    }
}
