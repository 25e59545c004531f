//! Block tables.
//!
//! A block is the unit the publishing pipeline understands: a `<table>`
//! whose first row names the block and whose remaining rows carry its
//! content.

use dom_query::NodeRef;

/// The content of one block cell.
#[derive(Debug, Clone)]
pub enum Cell<'a> {
    /// Raw markup, inserted without escaping.
    Html(String),
    /// Plain text, inserted as a text node.
    Text(String),
    /// A single element, moved into the cell.
    Node(NodeRef<'a>),
    /// Several elements, moved into the cell in order.
    Nodes(Vec<NodeRef<'a>>),
}

impl From<&str> for Cell<'_> {
    fn from(value: &str) -> Self {
        Cell::Html(value.to_string())
    }
}

impl From<String> for Cell<'_> {
    fn from(value: String) -> Self {
        Cell::Html(value)
    }
}

impl<'a> From<NodeRef<'a>> for Cell<'a> {
    fn from(value: NodeRef<'a>) -> Self {
        Cell::Node(value)
    }
}

impl<'a> From<Vec<NodeRef<'a>>> for Cell<'a> {
    fn from(value: Vec<NodeRef<'a>>) -> Self {
        Cell::Nodes(value)
    }
}

/// Build a block table from `rows`.
///
/// Row 0 becomes `<th>` cells, every other row `<td>` cells. A lone header
/// cell spans the widest row. The returned table is detached; callers insert
/// or substitute it themselves.
pub fn create_table<'a>(document: &'a dom_query::Document, rows: Vec<Vec<Cell<'a>>>) -> NodeRef<'a> {
    let table = document.tree.new_element("table");
    let width = rows.iter().map(Vec::len).max().unwrap_or(0);

    for (index, row) in rows.into_iter().enumerate() {
        let tr = document.tree.new_element("tr");
        let spans_table = index == 0 && row.len() == 1 && width > 1;

        for cell in row {
            let cell_node = document.tree.new_element(if index == 0 { "th" } else { "td" });
            if spans_table {
                cell_node.set_attr("colspan", &width.to_string());
            }

            match cell {
                Cell::Html(markup) => cell_node.set_html(markup),
                Cell::Text(text) => cell_node.append_child(&document.tree.new_text(text)),
                Cell::Node(node) => cell_node.append_child(&node),
                Cell::Nodes(nodes) => {
                    for node in nodes {
                        cell_node.append_child(&node);
                    }
                }
            }

            tr.append_child(&cell_node);
        }

        table.append_child(&tr);
    }

    table
}

/// Escape text for use inside markup, attribute values included.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
