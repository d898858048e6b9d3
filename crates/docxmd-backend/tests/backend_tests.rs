//! End-to-end tests for the DOCX converter
//!
//! Exported documents are written to a temp dir next to their `.fld/`
//! resource folder, the way "save as web page" exports lay them out.

use base64::Engine;
use docxmd_backend::{
    register_converters, render_table, ConverterOptions, DocxConverter, PLUGIN_INTERFACE_VERSION,
};
use docxmd_core::{ConverterRegistry, DocumentConverter, DocxMdError, StreamInfo};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// A 1x1 transparent PNG
const PIXEL_PNG: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
    0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F,
    0x15, 0xC4, 0x89, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9C, 0x63, 0x00,
    0x01, 0x00, 0x00, 0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00, 0x00, 0x00, 0x00, 0x49,
    0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
];

fn docx_info() -> StreamInfo {
    StreamInfo::new().with_extension(".docx")
}

fn convert_html(html: &str, options: ConverterOptions) -> docxmd_core::Result<String> {
    let mut reader = html.as_bytes();
    DocxConverter::with_options(options)
        .convert(&mut reader, &docx_info())
        .map(|result| result.markdown)
}

/// Write `<folder>/<file>` under `dir`
fn write_resource(dir: &Path, folder: &str, file: &str, data: &[u8]) {
    let folder = dir.join(folder);
    fs::create_dir_all(&folder).unwrap();
    fs::write(folder.join(file), data).unwrap();
}

fn expected_image(data: &[u8], extension: &str) -> String {
    format!(
        "![Image](data:image/{extension};base64,{})",
        base64::engine::general_purpose::STANDARD.encode(data)
    )
}

#[test]
fn test_text_table_text_scenario() {
    let table = "<table><tr><th>Item</th><th>Qty</th></tr><tr><td>Pen</td><td>2</td></tr></table>";
    let html = format!("<html><body><span>Hello</span>{table}<span>World</span></body></html>");

    let markdown = convert_html(&html, ConverterOptions::default()).unwrap();
    // Cell text has no spans, so the table contributes one fragment only
    let expected_table = render_table(table);
    assert_eq!(markdown, format!("Hello\n\n{expected_table}\n\nWorld"));
    let header = expected_table.lines().next().unwrap_or_default();
    assert!(header.starts_with('|'), "{expected_table}");
    assert!(header.contains("Item") && header.contains("Qty"), "{expected_table}");
}

#[test]
fn test_text_only_document_is_trimmed_spans() {
    let html = "<body><p><span>  First run </span></p><div><p><span>\nSecond</span></p></div></body>";
    let markdown = convert_html(html, ConverterOptions::default()).unwrap();
    assert_eq!(markdown, "First run\n\nSecond");
}

#[test]
fn test_inline_png_from_resource_folder() {
    let dir = TempDir::new().unwrap();
    write_resource(dir.path(), "report.fld", "image001.png", PIXEL_PNG);

    let options = ConverterOptions::default().with_resource_root(Some(dir.path().to_path_buf()));
    let markdown = convert_html(r#"<body><img src="report.fld/image001.png"></body>"#, options).unwrap();

    assert_eq!(markdown, expected_image(PIXEL_PNG, "png"));
}

#[test]
fn test_hyperlink_to_uppercase_png_is_inlined() {
    let dir = TempDir::new().unwrap();
    write_resource(dir.path(), "media.fld", "pic.PNG", PIXEL_PNG);

    let options = ConverterOptions::default().with_resource_root(Some(dir.path().to_path_buf()));
    let markdown =
        convert_html(r#"<body><a href="media.fld/pic.PNG">link</a></body>"#, options).unwrap();

    assert_eq!(markdown, expected_image(PIXEL_PNG, "png"));
    assert!(!markdown.contains("link"));
}

#[test]
fn test_same_image_twice_is_inlined_twice() {
    let dir = TempDir::new().unwrap();
    write_resource(dir.path(), "doc.fld", "a.gif", b"GIF89a");

    let options = ConverterOptions::default().with_resource_root(Some(dir.path().to_path_buf()));
    let html = r#"<body><img src="doc.fld/a.gif"><span>between</span><img src="doc.fld/a.gif"></body>"#;
    let markdown = convert_html(html, options).unwrap();

    let image = expected_image(b"GIF89a", "gif");
    assert_eq!(markdown, format!("{image}\n\nbetween\n\n{image}"));
}

#[test]
fn test_missing_image_fails_whole_conversion() {
    let dir = TempDir::new().unwrap();
    let options = ConverterOptions::default().with_resource_root(Some(dir.path().to_path_buf()));
    let html = r#"<body><span>kept?</span><img src="gone.fld/image001.png"></body>"#;

    match convert_html(html, options) {
        Err(DocxMdError::ResourceNotFound { path, .. }) => {
            assert_eq!(path, dir.path().join("gone.fld/image001.png"));
        }
        other => panic!("Expected ResourceNotFound, got {other:?}"),
    }
}

#[test]
fn test_complicated_table_is_embedded_html() {
    let html = r#"<body><table border="1"><tr>
        <td rowspan="2" colspan="2" style="width:50pt" class="xl65">merged</td>
        <td lang="en" width="40">c</td></tr>
        <tr><td colspan="1" valign="top">d</td></tr></table></body>"#;
    let markdown = convert_html(html, ConverterOptions::default()).unwrap();

    assert!(markdown.starts_with(r#"<table border="1">"#), "{markdown}");
    assert!(markdown.contains(r#"<td colspan="2" rowspan="2">merged</td>"#), "{markdown}");
    assert!(markdown.contains("<td>c</td>"), "{markdown}");
    assert!(markdown.contains(r#"<td colspan="1">d</td>"#), "{markdown}");
    for attribute in ["style=", "class=", "lang=", "width=", "valign="] {
        assert!(!markdown.contains(attribute), "{attribute} left in {markdown}");
    }
}

#[test]
fn test_rowspan_only_table_is_pipe_table() {
    let html = r#"<body><table><tr><td rowspan="2">a</td><td>b</td></tr><tr><td>c</td></tr></table></body>"#;
    let markdown = convert_html(html, ConverterOptions::default()).unwrap();
    assert!(markdown.starts_with('|') && markdown.contains('a'), "{markdown}");
    assert!(!markdown.contains("<table"));
}

#[test]
fn test_convert_file_resolves_images_next_to_input() {
    let dir = TempDir::new().unwrap();
    write_resource(dir.path(), "report.fld", "image001.png", PIXEL_PNG);
    let input = dir.path().join("report.docx");
    fs::write(&input, r#"<html><body><span>Figure</span><img src="report.fld/image001.png"></body></html>"#)
        .unwrap();

    let result = DocxConverter::new().convert_file(&input).unwrap();
    assert_eq!(result.title, None);
    assert_eq!(
        result.markdown,
        format!("Figure\n\n{}", expected_image(PIXEL_PNG, "png"))
    );
}

#[test]
fn test_convert_file_missing_input_is_io_error() {
    let dir = TempDir::new().unwrap();
    let result = DocxConverter::new().convert_file(&dir.path().join("absent.docx"));
    assert!(matches!(result, Err(DocxMdError::IoError(_))));
}

#[test]
fn test_accepts_routing_cases() {
    let converter = DocxConverter::new();
    assert!(converter.accepts(&StreamInfo::new().with_extension(".DOCX")));
    assert!(converter.accepts(&StreamInfo::new().with_mimetype(
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document; foo=bar"
    )));
    assert!(!converter.accepts(
        &StreamInfo::new()
            .with_extension(".doc")
            .with_mimetype("text/plain")
    ));
}

#[test]
fn test_registry_routes_to_docx_converter() {
    assert_eq!(PLUGIN_INTERFACE_VERSION, 1);

    let mut registry = ConverterRegistry::new();
    register_converters(&mut registry);

    let mut reader: &[u8] = b"<body><span>via registry</span></body>";
    let result = registry.convert(&mut reader, &docx_info()).unwrap();
    assert_eq!(result.markdown, "via registry");

    let mut reader: &[u8] = b"<body><span>x</span></body>";
    let unrouted = registry.convert(&mut reader, &StreamInfo::new().with_extension(".pdf"));
    assert!(matches!(unrouted, Err(DocxMdError::FormatError(_))));
}

#[test]
fn test_utf16_stream_with_declared_charset() {
    let html = "<body><span>naïve</span></body>";
    let bytes: Vec<u8> = html.encode_utf16().flat_map(u16::to_le_bytes).collect();
    let info = docx_info().with_charset("utf-16le");

    let mut reader = bytes.as_slice();
    let result = DocxConverter::new().convert(&mut reader, &info).unwrap();
    assert_eq!(result.markdown, "naïve");
}
