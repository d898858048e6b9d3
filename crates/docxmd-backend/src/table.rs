//! Table classification and rendering
//!
//! A table is *complicated* when some cell carries both `rowspan` and
//! `colspan`. Such tables are kept as HTML (cell attributes reduced to the
//! two span attributes) because pipe tables have no syntax for merged cells.
//! Every other table goes through [`render_html_to_markdown`].

use crate::html::{attr, descendant_elements, serialize_filtered, tag_name, HtmlTree};
use crate::markdown_helper::render_html_to_markdown;
use scraper::ElementRef;

/// Attributes kept on cells of a complicated table
const SPAN_ATTRIBUTES: &[&str] = &["rowspan", "colspan"];

/// How a table is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableComplexity {
    /// Rendered as a Markdown pipe table
    Simple,
    /// Embedded as an HTML block
    Complicated,
}

impl std::fmt::Display for TableComplexity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Simple => write!(f, "simple"),
            Self::Complicated => write!(f, "complicated"),
        }
    }
}

#[inline]
fn is_cell(element: &ElementRef<'_>) -> bool {
    matches!(tag_name(element), "td" | "th")
}

/// True when `cell` has both a `rowspan` and a `colspan` attribute.
///
/// A cell with only one of the two does not count.
#[must_use]
pub fn cell_spans_both_axes(cell: &ElementRef<'_>) -> bool {
    attr(cell, "rowspan").is_some() && attr(cell, "colspan").is_some()
}

/// Classify `table` by scanning the cells of every row.
///
/// Stops at the first cell spanning both axes. A table without rows is simple.
#[must_use]
pub fn classify_table(table: ElementRef<'_>) -> TableComplexity {
    let complicated = descendant_elements(table)
        .filter(|element| tag_name(element) == "tr")
        .any(|row| {
            descendant_elements(row)
                .filter(is_cell)
                .any(|cell| cell_spans_both_axes(&cell))
        });

    if complicated {
        TableComplexity::Complicated
    } else {
        TableComplexity::Simple
    }
}

/// Render a table whose HTML is `table_html`.
///
/// The HTML is parsed on its own, so the classification only looks at this
/// table and whatever is nested in it.
#[must_use = "returns the rendered table fragment"]
pub fn render_table(table_html: &str) -> String {
    let tree = HtmlTree::parse(table_html);
    let Some(table) = tree.find_first("table") else {
        return render_html_to_markdown(table_html);
    };

    let complexity = classify_table(table);
    log::debug!("Rendering {complexity} table");
    match complexity {
        TableComplexity::Simple => render_simple_table(table_html),
        TableComplexity::Complicated => render_complicated_table(table),
    }
}

/// Pipe-table rendering through the generic converter
#[must_use = "returns the rendered table fragment"]
pub fn render_simple_table(table_html: &str) -> String {
    render_html_to_markdown(table_html)
}

/// HTML rendering with every cell attribute other than `rowspan`/`colspan` removed.
///
/// Attributes on non-cell elements (`table`, `tr`, ...) are left alone. The
/// parsed tree is not modified; the reduced HTML is written out directly.
#[must_use = "returns the rendered table fragment"]
pub fn render_complicated_table(table: ElementRef<'_>) -> String {
    serialize_filtered(table, |tag, name| {
        !matches!(tag, "td" | "th") || SPAN_ATTRIBUTES.contains(&name)
    })
}
