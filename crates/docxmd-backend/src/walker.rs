//! Document walker
//!
//! Visits every element under `<body>` in document order and turns the ones
//! it recognizes into Markdown fragments. Descendants of a dispatched element
//! are visited too, so a `span` inside a table cell yields a fragment of its
//! own after the table's fragment.

use crate::html::{attr, serialize, tag_name, trimmed_text, HtmlTree};
use crate::image::{
    inline_image, is_resource_reference, reference_extension, LINKED_IMAGE_EXTENSIONS,
};
use crate::table::render_table;
use crate::traits::ConverterOptions;
use docxmd_core::Result;
use scraper::ElementRef;

/// Separator placed between fragments
pub const FRAGMENT_SEPARATOR: &str = "\n\n";

/// What the walker does with an element, decided from its tag name
#[derive(Debug, Clone, Copy)]
pub enum NodeKind<'a> {
    /// `span`: emits its trimmed text
    TextRun(ElementRef<'a>),
    /// `table`: emits the rendered table
    Table(ElementRef<'a>),
    /// `img`: emits an inlined image when `src` points into a resource folder
    Image(ElementRef<'a>),
    /// `a`: emits an inlined image when `href` is an image in a resource folder
    Hyperlink(ElementRef<'a>),
    /// Anything else
    Other(ElementRef<'a>),
}

impl<'a> NodeKind<'a> {
    /// Classify an element by tag name
    #[must_use]
    pub fn of(element: ElementRef<'a>) -> Self {
        match tag_name(&element) {
            "span" => Self::TextRun(element),
            "table" => Self::Table(element),
            "img" => Self::Image(element),
            "a" => Self::Hyperlink(element),
            _ => Self::Other(element),
        }
    }

    /// Produce this node's fragment, if it has one.
    ///
    /// # Errors
    /// Propagates [`docxmd_core::DocxMdError::ResourceNotFound`] from image inlining.
    pub fn fragment(self, options: &ConverterOptions) -> Result<Option<String>> {
        match self {
            Self::TextRun(span) => Ok(Some(trimmed_text(&span))),
            Self::Table(table) => Ok(Some(render_table(&serialize(table)))),
            Self::Image(img) => match attr(&img, "src") {
                Some(src) if is_resource_reference(src) => {
                    let extension = reference_extension(src);
                    inline_image(src, extension.as_deref(), options.resource_root()).map(Some)
                }
                src => {
                    log::debug!("Skipping image outside resource folder: {src:?}");
                    Ok(None)
                }
            },
            Self::Hyperlink(link) => match attr(&link, "href") {
                Some(href) if is_resource_reference(href) => {
                    let extension = reference_extension(href);
                    match extension.as_deref() {
                        Some(ext) if LINKED_IMAGE_EXTENSIONS.contains(&ext) => {
                            inline_image(href, Some(ext), options.resource_root()).map(Some)
                        }
                        _ => {
                            log::debug!("Skipping resource link with extension {extension:?}: {href}");
                            Ok(None)
                        }
                    }
                }
                _ => Ok(None),
            },
            Self::Other(_) => Ok(None),
        }
    }
}

/// Collect the fragments of `tree` in document order.
///
/// A document without `<body>` has no fragments.
///
/// # Errors
/// Fails on the first image that cannot be read; no partial result is kept.
pub fn collect_fragments(tree: &HtmlTree, options: &ConverterOptions) -> Result<Vec<String>> {
    let mut fragments = Vec::new();
    for element in tree.descendants() {
        if let Some(fragment) = NodeKind::of(element).fragment(options)? {
            fragments.push(fragment);
        }
    }
    Ok(fragments)
}

/// Convert exported HTML into the Markdown body.
///
/// # Errors
/// Returns [`docxmd_core::DocxMdError::ResourceNotFound`] if an inlined
/// image cannot be read.
pub fn html_to_markdown(html: &str, options: &ConverterOptions) -> Result<String> {
    let tree = HtmlTree::parse(html);
    let fragments = collect_fragments(&tree, options)?;
    log::debug!("Collected {} fragments", fragments.len());
    Ok(fragments.join(FRAGMENT_SEPARATOR))
}
