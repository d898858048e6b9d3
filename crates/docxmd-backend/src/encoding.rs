//! Character set decoding of input streams.
//!
//! Labels are resolved with the WHATWG label table from `encoding_rs`, so
//! `utf8`, `UTF-8`, `latin1` and `cp1252` all work. Decoding is strict: a
//! byte sequence that is malformed for the resolved encoding is an error
//! rather than being replaced with U+FFFD.

use docxmd_core::{DocxMdError, Result};
use encoding_rs::Encoding;

/// Charset used when neither the stream nor the options name one
pub const DEFAULT_CHARSET: &str = "utf-8";

/// Resolve a charset label to an encoding.
///
/// # Errors
/// Returns [`DocxMdError::DecodeError`] for labels `encoding_rs` does not know.
pub fn resolve_encoding(label: &str) -> Result<&'static Encoding> {
    Encoding::for_label(label.trim().as_bytes())
        .ok_or_else(|| DocxMdError::DecodeError(format!("unknown charset label: {label}")))
}

/// Decode `bytes` using the charset named by `label`.
///
/// A byte order mark matching the resolved encoding is skipped.
///
/// # Errors
/// Returns [`DocxMdError::DecodeError`] if the label is unknown or the bytes
/// are not valid in the resolved encoding.
pub fn decode_stream(bytes: &[u8], label: &str) -> Result<String> {
    let encoding = resolve_encoding(label)?;

    let body = match Encoding::for_bom(bytes) {
        Some((bom_encoding, bom_len)) if bom_encoding == encoding => &bytes[bom_len..],
        _ => bytes,
    };

    encoding
        .decode_without_bom_handling_and_without_replacement(body)
        .map(std::borrow::Cow::into_owned)
        .ok_or_else(|| {
            DocxMdError::DecodeError(format!(
                "input is not valid {} ({} bytes)",
                encoding.name(),
                bytes.len()
            ))
        })
}
