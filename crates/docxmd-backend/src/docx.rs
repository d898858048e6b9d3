//! DOCX converter
//!
//! Entry point of the pipeline: decode the byte stream, hand the text to the
//! configured [`HtmlExporter`], and walk the exported HTML into Markdown.

use crate::encoding::decode_stream;
use crate::traits::{ConverterOptions, HtmlExporter, PassthroughExporter};
use crate::walker::html_to_markdown;
use docxmd_core::{ConversionResult, DocumentConverter, Result, StreamInfo};
use std::io::Read;
use std::path::Path;

/// MIME type prefixes routed to this converter
pub const ACCEPTED_MIME_TYPE_PREFIXES: &[&str] =
    &["application/vnd.openxmlformats-officedocument.wordprocessingml.document"];

/// File extensions routed to this converter, including the leading dot
pub const ACCEPTED_FILE_EXTENSIONS: &[&str] = &[".docx"];

/// Converts DOCX documents to Markdown
pub struct DocxConverter {
    exporter: Box<dyn HtmlExporter>,
    options: ConverterOptions,
}

impl std::fmt::Debug for DocxConverter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocxConverter")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl Default for DocxConverter {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl DocxConverter {
    /// Create a converter with default options and the passthrough exporter
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(ConverterOptions::default())
    }

    /// Create a converter with custom options
    #[inline]
    #[must_use]
    pub fn with_options(options: ConverterOptions) -> Self {
        Self {
            exporter: Box::new(PassthroughExporter),
            options,
        }
    }

    /// Replace the DOCX to HTML export step
    #[must_use = "returns the converter with the exporter replaced"]
    pub fn with_exporter(mut self, exporter: impl HtmlExporter + 'static) -> Self {
        self.exporter = Box::new(exporter);
        self
    }

    /// Options this converter was built with
    #[inline]
    #[must_use]
    pub const fn options(&self) -> &ConverterOptions {
        &self.options
    }

    /// Convert a file on disk.
    ///
    /// Stream info is derived from the path. When no resource root is
    /// configured, relative image paths resolve against the file's directory.
    ///
    /// # Errors
    /// Returns [`docxmd_core::DocxMdError::IoError`] if the file cannot be opened, plus any
    /// error [`DocumentConverter::convert`] can return.
    pub fn convert_file(&self, path: &Path) -> Result<ConversionResult> {
        let mut file = std::fs::File::open(path)?;
        let info = StreamInfo::from_path(path);

        if self.options.resource_root.is_some() {
            return self.convert(&mut file, &info);
        }

        let parent = path
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .map(Path::to_path_buf);
        let options = self.options.clone().with_resource_root(parent);
        self.convert_with(&mut file, &info, &options)
    }

    fn convert_with(
        &self,
        reader: &mut dyn Read,
        info: &StreamInfo,
        options: &ConverterOptions,
    ) -> Result<ConversionResult> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;

        let charset = info.charset.as_deref().unwrap_or(&options.default_charset);
        log::debug!("Decoding {} bytes as {charset}", bytes.len());
        let text = decode_stream(&bytes, charset)?;

        let html = self.exporter.export_html(&text)?;
        let markdown = html_to_markdown(&html, options)?;
        Ok(ConversionResult::new(markdown))
    }
}

impl DocumentConverter for DocxConverter {
    fn name(&self) -> &'static str {
        "docx"
    }

    fn accepts(&self, info: &StreamInfo) -> bool {
        let extension = info.extension.as_deref().unwrap_or_default().to_lowercase();
        if ACCEPTED_FILE_EXTENSIONS.contains(&extension.as_str()) {
            return true;
        }

        let mimetype = info.mimetype.as_deref().unwrap_or_default().to_lowercase();
        ACCEPTED_MIME_TYPE_PREFIXES
            .iter()
            .any(|prefix| mimetype.starts_with(prefix))
    }

    fn convert(&self, reader: &mut dyn Read, info: &StreamInfo) -> Result<ConversionResult> {
        self.convert_with(reader, info, &self.options)
    }
}

/// Convert `bytes` with a default [`DocxConverter`].
///
/// # Errors
/// See [`DocumentConverter::convert`].
pub fn convert_bytes(bytes: &[u8], info: &StreamInfo) -> Result<ConversionResult> {
    let mut reader = bytes;
    DocxConverter::new().convert(&mut reader, info)
}

#[cfg(test)]
mod tests {
    use super::*;
    use docxmd_core::DocxMdError;

    #[test]
    fn test_accepts_extension_case_insensitive() {
        let converter = DocxConverter::new();
        assert!(converter.accepts(&StreamInfo::new().with_extension(".DOCX")));
        assert!(converter.accepts(&StreamInfo::new().with_extension(".docx")));
    }

    #[test]
    fn test_accepts_mime_prefix() {
        let info = StreamInfo::new().with_mimetype(
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document; foo=bar",
        );
        assert!(DocxConverter::new().accepts(&info));
    }

    #[test]
    fn test_rejects_other_formats() {
        let info = StreamInfo::new()
            .with_extension(".doc")
            .with_mimetype("text/plain");
        assert!(!DocxConverter::new().accepts(&info));
        assert!(!DocxConverter::new().accepts(&StreamInfo::new()));
    }

    #[test]
    fn test_convert_title_is_absent() {
        let result = convert_bytes(b"<span>Hi</span>", &StreamInfo::new()).unwrap();
        assert_eq!(result.title, None);
        assert_eq!(result.markdown, "Hi");
    }

    #[test]
    fn test_declared_charset_wins_over_default() {
        let converter = DocxConverter::with_options(
            ConverterOptions::default().with_default_charset("utf-8"),
        );
        let mut bytes: &[u8] = b"<span>caf\xe9</span>";
        let info = StreamInfo::new().with_charset("windows-1252");
        let result = converter.convert(&mut bytes, &info).unwrap();
        assert_eq!(result.markdown, "café");
    }

    #[test]
    fn test_default_charset_used_when_undeclared() {
        let converter = DocxConverter::with_options(
            ConverterOptions::default().with_default_charset("windows-1252"),
        );
        let mut bytes: &[u8] = b"<span>caf\xe9</span>";
        let result = converter.convert(&mut bytes, &StreamInfo::new()).unwrap();
        assert_eq!(result.markdown, "café");
    }

    #[test]
    fn test_undecodable_bytes_are_decode_error() {
        let result = convert_bytes(b"<span>caf\xe9</span>", &StreamInfo::new());
        assert!(matches!(result, Err(DocxMdError::DecodeError(_))));
    }

    #[test]
    fn test_exporter_rejection_is_conversion_error() {
        let result = convert_bytes(b"plain words", &StreamInfo::new());
        assert!(matches!(result, Err(DocxMdError::ConversionError(_))));
    }

    #[test]
    fn test_custom_exporter() {
        let converter = DocxConverter::new()
            .with_exporter(|text: &str| -> Result<String> { Ok(format!("<span>{text}</span>")) });
        let mut bytes: &[u8] = b"from exporter";
        let result = converter.convert(&mut bytes, &StreamInfo::new()).unwrap();
        assert_eq!(result.markdown, "from exporter");
    }
}
