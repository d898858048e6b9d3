//! Stream metadata and conversion results exchanged with the host.

use serde::{Deserialize, Serialize};

/// Metadata describing an input byte stream.
///
/// Every field is optional; the host fills in whatever it knows. Converters
/// use it to decide whether they accept a stream and how to decode it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamInfo {
    /// Declared MIME type, possibly with parameters (`type/subtype; a=b`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mimetype: Option<String>,

    /// Declared file extension including the leading dot (`.docx`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<String>,

    /// Declared character set label (`utf-8`, `windows-1252`, ...)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub charset: Option<String>,
}

impl StreamInfo {
    /// Create empty stream metadata
    #[inline]
    #[must_use = "creates stream metadata that should be passed to a converter"]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the declared MIME type
    #[inline]
    #[must_use = "returns stream metadata with the MIME type set"]
    pub fn with_mimetype(mut self, mimetype: impl Into<String>) -> Self {
        self.mimetype = Some(mimetype.into());
        self
    }

    /// Set the declared file extension
    #[inline]
    #[must_use = "returns stream metadata with the extension set"]
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = Some(extension.into());
        self
    }

    /// Set the declared character set
    #[inline]
    #[must_use = "returns stream metadata with the charset set"]
    pub fn with_charset(mut self, charset: impl Into<String>) -> Self {
        self.charset = Some(charset.into());
        self
    }

    /// Build metadata from a file path, taking the extension from its last component.
    ///
    /// `report.DOCX` yields an extension of `.DOCX`; case is preserved and
    /// left for converters to normalize.
    #[must_use = "creates stream metadata that should be passed to a converter"]
    pub fn from_path(path: &std::path::Path) -> Self {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| format!(".{ext}"));
        Self {
            extension,
            ..Self::default()
        }
    }
}

/// Output of a single conversion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConversionResult {
    /// Document title, when the converter can determine one
    pub title: Option<String>,

    /// Markdown body
    pub markdown: String,
}

impl ConversionResult {
    /// Create a result without a title
    #[inline]
    #[must_use = "creates a conversion result that should be returned to the caller"]
    pub fn new(markdown: impl Into<String>) -> Self {
        Self {
            title: None,
            markdown: markdown.into(),
        }
    }

    /// Pretty-printed JSON form of the result
    ///
    /// # Errors
    /// Returns [`crate::DocxMdError::JsonError`] if serialization fails.
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
