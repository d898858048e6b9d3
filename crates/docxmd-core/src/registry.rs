//! Converter capability and the host-side registry that routes streams to converters.

use crate::{ConversionResult, DocxMdError, Result, StreamInfo};
use log::debug;
use std::io::Read;

/// A converter that turns a byte stream into Markdown.
///
/// Implementations must be stateless between calls: each `convert` owns
/// whatever intermediate data it builds and drops it before returning.
pub trait DocumentConverter: Send + Sync {
    /// Short human-readable name, used in log output
    fn name(&self) -> &'static str;

    /// Decide from stream metadata alone whether this converter handles the stream
    fn accepts(&self, info: &StreamInfo) -> bool;

    /// Convert the stream to Markdown
    ///
    /// # Errors
    /// Returns an error if the stream cannot be read, decoded or converted.
    fn convert(&self, reader: &mut dyn Read, info: &StreamInfo) -> Result<ConversionResult>;
}

/// Ordered collection of converters.
///
/// Streams are routed to the first registered converter whose
/// [`DocumentConverter::accepts`] returns true.
#[derive(Default)]
pub struct ConverterRegistry {
    converters: Vec<Box<dyn DocumentConverter>>,
}

impl std::fmt::Debug for ConverterRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConverterRegistry")
            .field(
                "converters",
                &self.converters.iter().map(|c| c.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl ConverterRegistry {
    /// Create an empty registry
    #[inline]
    #[must_use = "creates a registry that converters should be registered into"]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a converter; later registrations are consulted after earlier ones
    pub fn register_converter(&mut self, converter: Box<dyn DocumentConverter>) {
        debug!("Registering converter: {}", converter.name());
        self.converters.push(converter);
    }

    /// Number of registered converters
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.converters.len()
    }

    /// True when no converter has been registered
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.converters.is_empty()
    }

    /// Find the first converter accepting `info`
    #[must_use]
    pub fn find(&self, info: &StreamInfo) -> Option<&dyn DocumentConverter> {
        self.converters
            .iter()
            .find(|converter| converter.accepts(info))
            .map(|converter| &**converter)
    }

    /// Route the stream to the first accepting converter and run it
    ///
    /// # Errors
    /// Returns [`DocxMdError::FormatError`] when no converter accepts the
    /// stream, otherwise whatever the selected converter returns.
    pub fn convert(&self, reader: &mut dyn Read, info: &StreamInfo) -> Result<ConversionResult> {
        let converter = self.find(info).ok_or_else(|| {
            DocxMdError::FormatError(format!(
                "No converter accepts stream (extension: {}, mimetype: {})",
                info.extension.as_deref().unwrap_or("<none>"),
                info.mimetype.as_deref().unwrap_or("<none>"),
            ))
        })?;
        debug!("Routing stream to converter: {}", converter.name());
        converter.convert(reader, info)
    }
}
