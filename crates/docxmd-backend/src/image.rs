//! Image inliner
//!
//! Reads an image from the export's resource folder and emits it as a
//! Markdown image whose source is a base64 `data:` URI. Every call performs
//! one filesystem read; nothing is cached, so an image referenced twice is
//! read twice.

use base64::Engine;
use docxmd_core::{DocxMdError, Result};
use std::path::{Path, PathBuf};

/// Path segment export tools use for the folder holding extracted media
pub const RESOURCE_FOLDER_MARKER: &str = ".fld/";

/// Extensions a hyperlink target must have to be inlined as an image
pub const LINKED_IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif"];

/// True if `reference` points into an export resource folder
#[inline]
#[must_use]
pub fn is_resource_reference(reference: &str) -> bool {
    reference.contains(RESOURCE_FOLDER_MARKER)
}

/// Subtype used when neither the name nor the content identifies the image
const FALLBACK_IMAGE_EXTENSION: &str = "png";

/// Lowercased extension of the last path segment of `reference`.
///
/// `None` when that segment has no `.` or ends with one; dots in folder
/// names such as `doc.fld/` never count.
#[must_use]
pub fn reference_extension(reference: &str) -> Option<String> {
    let file_name = reference.rsplit(['/', '\\']).next().unwrap_or(reference);
    match file_name.rsplit_once('.') {
        Some((_, extension)) if !extension.is_empty() => Some(extension.to_lowercase()),
        _ => None,
    }
}

/// Image subtype recognized from the leading bytes of `data`
#[must_use]
pub fn sniff_image_extension(data: &[u8]) -> Option<&'static str> {
    match data {
        [0x89, b'P', b'N', b'G', ..] => Some("png"),
        [0xFF, 0xD8, 0xFF, ..] => Some("jpeg"),
        [b'G', b'I', b'F', b'8', ..] => Some("gif"),
        [b'B', b'M', ..] => Some("bmp"),
        [b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'E', b'B', b'P', ..] => Some("webp"),
        _ => None,
    }
}

/// Map an image reference to the file it should be read from.
///
/// A `file://` prefix is removed. Relative paths are joined onto
/// `resource_root` when one is given.
#[must_use]
pub fn resolve_resource_path(reference: &str, resource_root: Option<&Path>) -> PathBuf {
    let path = Path::new(reference.strip_prefix("file://").unwrap_or(reference));
    match resource_root {
        Some(root) if path.is_relative() => root.join(path),
        _ => path.to_path_buf(),
    }
}

/// Markdown image with the bytes embedded as a data URI
#[must_use]
pub fn image_markdown(data: &[u8], extension: &str) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(data);
    format!("![Image](data:image/{extension};base64,{encoded})")
}

/// Read the image behind `reference` and return its inlined Markdown.
///
/// Without an `extension` the subtype is taken from the file content,
/// falling back to `png`.
///
/// # Errors
/// Returns [`DocxMdError::ResourceNotFound`] if the file cannot be read.
pub fn inline_image(
    reference: &str,
    extension: Option<&str>,
    resource_root: Option<&Path>,
) -> Result<String> {
    let path = resolve_resource_path(reference, resource_root);
    let data = std::fs::read(&path).map_err(|e| DocxMdError::resource_not_found(&path, e))?;
    let extension = extension
        .or_else(|| sniff_image_extension(&data))
        .unwrap_or(FALLBACK_IMAGE_EXTENSION);
    log::debug!("Inlined image {} as {extension} ({} bytes)", path.display(), data.len());
    Ok(image_markdown(&data, extension))
}
