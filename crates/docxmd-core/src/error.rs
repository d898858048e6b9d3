//! Error types for document conversion operations.
//!
//! Every failure in the pipeline is terminal for the conversion call that raised
//! it: nothing is retried and no partial Markdown is returned. A missing `<body>`
//! in the intermediate HTML is not an error at all; the walker simply produces
//! an empty document.

use std::path::PathBuf;
use thiserror::Error;

/// Error types that can occur during document conversion.
///
/// # Examples
///
/// ```rust,ignore
/// // Note: DocxConverter is in docxmd-backend crate
/// use docxmd_backend::DocxConverter;
/// use docxmd_core::{DocxMdError, StreamInfo};
///
/// let converter = DocxConverter::default();
/// let info = StreamInfo::new().with_extension(".docx");
///
/// match converter.convert(&mut std::io::stdin(), &info) {
///     Ok(result) => println!("{}", result.markdown),
///     Err(DocxMdError::DecodeError(msg)) => eprintln!("Bad charset: {msg}"),
///     Err(DocxMdError::ResourceNotFound { path, .. }) => {
///         eprintln!("Missing image: {}", path.display());
///     }
///     Err(e) => eprintln!("Other error: {e}"),
/// }
/// ```
#[derive(Error, Debug)]
pub enum DocxMdError {
    /// The input bytes could not be decoded with the resolved character set.
    ///
    /// Raised both for unknown charset labels and for byte sequences that are
    /// malformed under the chosen encoding.
    #[error("Decode error: {0}")]
    DecodeError(String),

    /// The DOCX to HTML export step rejected the input.
    #[error("Conversion error: {0}")]
    ConversionError(String),

    /// An image referenced from the resource folder could not be read.
    #[error("Resource not found: {}: {source}", path.display())]
    ResourceNotFound {
        /// Path that was resolved from the `src`/`href` attribute.
        path: PathBuf,
        /// Underlying filesystem error.
        #[source]
        source: std::io::Error,
    },

    /// No registered converter accepts the stream, or the format is unsupported.
    #[error("Format detection error: {0}")]
    FormatError(String),

    /// Reading the input stream failed.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization of a conversion result failed.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Failure reported by an external collaborator (e.g. an HTML exporter).
    #[error("Parser error: {0}")]
    ParserError(#[from] anyhow::Error),
}

impl DocxMdError {
    /// Build a [`DocxMdError::ResourceNotFound`] for `path`.
    #[inline]
    #[must_use = "returns the error value to be propagated"]
    pub fn resource_not_found(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ResourceNotFound {
            path: path.into(),
            source,
        }
    }
}

/// Type alias for [`Result<T, DocxMdError>`].
pub type Result<T> = std::result::Result<T, DocxMdError>;
