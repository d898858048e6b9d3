//! DOCX to Markdown conversion for `docxmd`
//!
//! The DOCX document is first exported to HTML (see [`HtmlExporter`]); this
//! crate then reduces that HTML to Markdown.
//!
//! # Pipeline
//!
//! ```text
//! bytes ──decode──▶ text ──HtmlExporter──▶ HTML ──walker──▶ fragments ──join──▶ Markdown
//!                                                  │
//!                               ┌──────────────────┼──────────────────┐
//!                               ▼                  ▼                  ▼
//!                            span text      table renderer      image inliner
//!                                          (pipe table or HTML)  (base64 data URI)
//! ```
//!
//! # Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`html`] | Parsed HTML tree, traversal and serialization |
//! | [`walker`] | Dispatches elements to handlers and joins fragments |
//! | [`table`] | Simple/complicated table classification and rendering |
//! | [`image`] | Inlines images from the `.fld/` resource folder |
//! | [`markdown_helper`] | Generic HTML to Markdown rendering used for simple tables |
//! | [`encoding`] | Charset decoding of the input stream |
//! | [`docx`] | [`DocxConverter`], the public entry point |
//! | [`plugin`] | Registration into a [`docxmd_core::ConverterRegistry`] |
//!
//! # Example
//!
//! ```rust,no_run
//! use docxmd_backend::{ConverterOptions, DocxConverter};
//! use std::path::Path;
//!
//! let converter = DocxConverter::with_options(
//!     ConverterOptions::default().with_default_charset("windows-1252"),
//! );
//! let result = converter.convert_file(Path::new("report.htm"))?;
//! println!("{}", result.markdown);
//! # Ok::<(), docxmd_core::DocxMdError>(())
//! ```

pub mod docx;
pub mod encoding;
pub mod html;
pub mod image;
pub mod markdown_helper;
pub mod plugin;
pub mod table;
pub mod traits;
pub mod walker;

pub use docx::DocxConverter;
pub use markdown_helper::render_html_to_markdown;
pub use plugin::{register_converters, PLUGIN_INTERFACE_VERSION};
pub use table::{classify_table, render_table, TableComplexity};
pub use traits::{ConverterOptions, HtmlExporter, PassthroughExporter};
pub use walker::html_to_markdown;
