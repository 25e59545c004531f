use dom_query::{NodeRef, Selection};

use crate::Result;
use crate::block::{Cell, create_table};
use crate::parse::{Document, select_within};

pub const TOC_BLOCK: &str = "TOC";

/// Replace the first table-of-contents element in `main` with a bare `TOC` block.
///
/// Only the first match is replaced; any later ones are left alone.
pub fn build_toc<'a>(document: &'a Document, main: &NodeRef<'a>, selector: &str) -> Result<bool> {
    let found = select_within(&Selection::from(main.clone()), selector)?;
    let Some(toc) = found.nodes().first() else {
        return Ok(false);
    };

    let table = create_table(document.inner(), vec![vec![Cell::from(TOC_BLOCK)]]);
    toc.replace_with(&table);
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_toc_replaced() {
        let doc = Document::parse(
            r##"<html><body><main>
                <nav class="toc"><a href="#a">A</a></nav>
                <p>Body</p>
                <nav class="toc"><a href="#b">B</a></nav>
            </main></body></html>"##,
        );
        let main = doc.select_first("main").unwrap().unwrap();

        assert!(build_toc(&doc, &main, ".toc").unwrap());

        let table = doc.select("main > table").unwrap();
        assert_eq!(table.select("tr").length(), 1);
        assert_eq!(table.select("th").text().to_string(), "TOC");
        assert_eq!(doc.select(".toc").unwrap().length(), 1);
        assert_eq!(doc.select(".toc a").unwrap().attr("href").as_deref(), Some("#b"));
    }

    #[test]
    fn test_missing_toc() {
        let doc = Document::parse("<html><body><main><p>Body</p></main></body></html>");
        let main = doc.select_first("main").unwrap().unwrap();

        assert!(!build_toc(&doc, &main, ".toc").unwrap());
        assert!(!doc.select("table").unwrap().exists());
    }
}
