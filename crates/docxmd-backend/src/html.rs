//! HTML tree accessor
//!
//! Thin layer over [`scraper`] used by the walker and the table renderers:
//!
//! - parse exported HTML into a tree rooted at `<body>`
//! - depth-first pre-order enumeration of body descendants
//! - tag name and attribute lookup
//! - re-serialization of any subtree, optionally dropping attributes
//!
//! The tree is never mutated. Code that needs a subtree with fewer attributes
//! (complicated tables) asks the serializer to omit them, producing new HTML
//! text while the parsed document stays as it was.

use scraper::{ElementRef, Html, Node};

/// Elements that never have a closing tag
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

/// Elements whose text content is emitted verbatim
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

/// Parsed HTML document
pub struct HtmlTree {
    document: Html,
}

impl std::fmt::Debug for HtmlTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HtmlTree")
            .field("has_body", &self.body().is_some())
            .finish()
    }
}

impl HtmlTree {
    /// Parse `html` as a full document.
    ///
    /// Fragments are accepted too; the HTML5 tree builder places them inside
    /// a synthesized `<body>`.
    #[must_use = "parsing produces a tree that should be walked"]
    pub fn parse(html: &str) -> Self {
        Self {
            document: Html::parse_document(html),
        }
    }

    /// The `<body>` element, if the document has one
    #[must_use]
    pub fn body(&self) -> Option<ElementRef<'_>> {
        self.document
            .root_element()
            .children()
            .filter_map(ElementRef::wrap)
            .find(|element| tag_name(element) == "body")
    }

    /// All elements below `<body>` in depth-first pre-order.
    ///
    /// Yields nothing when there is no body.
    pub fn descendants(&self) -> impl Iterator<Item = ElementRef<'_>> {
        self.body().into_iter().flat_map(|body| descendant_elements(body))
    }

    /// First element named `name` below `<body>`
    #[must_use]
    pub fn find_first(&self, name: &str) -> Option<ElementRef<'_>> {
        self.descendants().find(|element| tag_name(element) == name)
    }
}

/// Elements below `element` (excluding itself) in depth-first pre-order
pub fn descendant_elements<'a>(element: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    element.descendants().skip(1).filter_map(ElementRef::wrap)
}

/// Lowercase tag name
#[inline]
#[must_use]
pub fn tag_name<'a>(element: &ElementRef<'a>) -> &'a str {
    element.value().name()
}

/// Attribute value lookup
#[inline]
#[must_use]
pub fn attr<'a>(element: &ElementRef<'a>, name: &str) -> Option<&'a str> {
    element.value().attr(name)
}

/// Concatenated text of `element` and all its descendants, trimmed
#[must_use]
pub fn trimmed_text(element: &ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Serialize `element` and its subtree back to HTML
#[must_use]
pub fn serialize(element: ElementRef<'_>) -> String {
    serialize_filtered(element, |_, _| true)
}

/// Serialize `element`, keeping only the attributes for which `keep(tag, attribute)` is true.
///
/// Attributes are written in name order so the output does not depend on how
/// the parser stored them.
#[must_use]
pub fn serialize_filtered<F>(element: ElementRef<'_>, keep: F) -> String
where
    F: Fn(&str, &str) -> bool,
{
    let mut out = String::new();
    write_element(element, &keep, &mut out);
    out
}

fn write_element<F>(element: ElementRef<'_>, keep: &F, out: &mut String)
where
    F: Fn(&str, &str) -> bool,
{
    let name = tag_name(&element);

    let mut attributes: Vec<(&str, &str)> = element
        .value()
        .attrs()
        .filter(|&(attr_name, _)| keep(name, attr_name))
        .collect();
    attributes.sort_unstable_by(|a, b| a.0.cmp(b.0));

    out.push('<');
    out.push_str(name);
    for (attr_name, value) in attributes {
        out.push(' ');
        out.push_str(attr_name);
        out.push_str("=\"");
        push_escaped(value, true, out);
        out.push('"');
    }
    out.push('>');

    if VOID_ELEMENTS.contains(&name) {
        return;
    }

    let raw_text = RAW_TEXT_ELEMENTS.contains(&name);
    for child in element.children() {
        match child.value() {
            Node::Text(text) => {
                if raw_text {
                    out.push_str(text);
                } else {
                    push_escaped(text, false, out);
                }
            }
            Node::Element(_) => {
                if let Some(child_element) = ElementRef::wrap(child) {
                    write_element(child_element, keep, out);
                }
            }
            _ => {}
        }
    }

    out.push_str("</");
    out.push_str(name);
    out.push('>');
}

fn push_escaped(text: &str, in_attribute: bool, out: &mut String) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            '"' if in_attribute => out.push_str("&quot;"),
            '<' if !in_attribute => out.push_str("&lt;"),
            '>' if !in_attribute => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
}
