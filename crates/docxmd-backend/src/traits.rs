//! Core trait definitions and options for the DOCX converter

use crate::encoding::DEFAULT_CHARSET;
use docxmd_core::{DocxMdError, Result};
use std::path::{Path, PathBuf};

/// Options for a conversion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConverterOptions {
    /// Charset used when the stream does not declare one.
    ///
    /// Fixed here instead of inherited from the process locale so that the
    /// same input decodes the same way everywhere.
    pub default_charset: String,

    /// Directory that relative image paths are resolved against.
    ///
    /// When `None`, paths found in `src`/`href` are opened as given, i.e.
    /// relative to the working directory.
    pub resource_root: Option<PathBuf>,
}

impl ConverterOptions {
    /// Set the fallback charset
    #[inline]
    #[must_use = "returns options with the default charset configured"]
    pub fn with_default_charset(mut self, charset: impl Into<String>) -> Self {
        self.default_charset = charset.into();
        self
    }

    /// Set the directory relative image paths are resolved against
    #[inline]
    #[must_use = "returns options with the resource root configured"]
    pub fn with_resource_root(mut self, root: Option<PathBuf>) -> Self {
        self.resource_root = root;
        self
    }

    /// Resource root as a borrowed path
    #[inline]
    #[must_use]
    pub fn resource_root(&self) -> Option<&Path> {
        self.resource_root.as_deref()
    }
}

impl Default for ConverterOptions {
    #[inline]
    fn default() -> Self {
        Self {
            default_charset: DEFAULT_CHARSET.to_string(),
            resource_root: None,
        }
    }
}

/// The DOCX to HTML export step.
///
/// Receives the decoded stream text and returns HTML whose embedded images
/// live under a `<name>.fld/` resource folder.
pub trait HtmlExporter: Send + Sync {
    /// Export the decoded document to HTML
    ///
    /// # Errors
    /// Returns [`DocxMdError::ConversionError`] if the input is not something
    /// the exporter understands.
    fn export_html(&self, source: &str) -> Result<String>;
}

impl<F> HtmlExporter for F
where
    F: Fn(&str) -> Result<String> + Send + Sync,
{
    fn export_html(&self, source: &str) -> Result<String> {
        self(source)
    }
}

/// Zip local file header signature that starts every OOXML package
const ZIP_SIGNATURE: &str = "PK\u{3}\u{4}";

/// Exporter for streams that already contain the exported HTML.
///
/// This is the shape produced by "save as web page" style exports, where
/// the HTML sits next to a `<name>.fld/` folder holding the extracted media.
/// Raw OOXML packages are rejected; parsing them is left to a dedicated
/// exporter plugged in through [`HtmlExporter`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PassthroughExporter;

impl HtmlExporter for PassthroughExporter {
    fn export_html(&self, source: &str) -> Result<String> {
        if source.starts_with(ZIP_SIGNATURE) {
            return Err(DocxMdError::ConversionError(
                "input is a raw OOXML package; an exporter that reads DOCX archives is required"
                    .to_string(),
            ));
        }
        if !source.contains('<') {
            return Err(DocxMdError::ConversionError(
                "input contains no HTML markup".to_string(),
            ));
        }
        Ok(source.to_string())
    }
}
