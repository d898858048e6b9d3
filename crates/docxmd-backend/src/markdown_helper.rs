//! Generic HTML to Markdown rendering
//!
//! [`render_html_to_markdown`] runs the whole `html2md` conversion over a
//! piece of HTML. Simple tables go through it, so their pipe-table layout is
//! whatever `html2md` produces for a standalone document. It keeps no state
//! between calls.

/// Render an HTML document or fragment as Markdown.
///
/// Leading and trailing blank lines are removed so the result can be joined
/// with other fragments directly.
#[must_use = "returns the markdown rendering of the HTML"]
pub fn render_html_to_markdown(html: &str) -> String {
    html2md::parse_html(html).trim().to_string()
}
