//! Builders for synthetic HBK fixtures.

use bsl_context::hbk::testkit::ContainerImage;
use std::io::{Cursor, Write};
use std::path::Path;
use zip::write::FileOptions;
use zip::ZipWriter;

/// A TOC entry for the bracket-text builder
pub struct TocEntry {
    pub id: i64,
    pub children: Vec<i64>,
    pub name_ru: &'static str,
    pub name_en: &'static str,
    pub path: &'static str,
}

impl TocEntry {
    pub fn new(
        id: i64,
        children: &[i64],
        name_ru: &'static str,
        name_en: &'static str,
        path: &'static str,
    ) -> Self {
        Self {
            id,
            children: children.to_vec(),
            name_ru,
            name_en,
            path,
        }
    }
}

/// Render entries into legacy bracket text (language codes `1`/`2`).
pub fn legacy_toc(entries: &[TocEntry]) -> String {
    render_toc(entries, |e| {
        format!(r#"{{1 "{}"}} {{2 "{}"}}"#, e.name_ru, e.name_en)
    })
}

/// Render entries into modern bracket text (quoted `"ru"`/`"en"`).
pub fn modern_toc(entries: &[TocEntry]) -> String {
    render_toc(entries, |e| {
        format!(r#"{{"ru" "{}"}} {{"en" "{}"}}"#, e.name_ru, e.name_en)
    })
}

fn render_toc(entries: &[TocEntry], languages: impl Fn(&TocEntry) -> String) -> String {
    let mut out = format!("{{{}", entries.len());
    for entry in entries {
        let children = entry
            .children
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        let children_field = if children.is_empty() {
            "0".to_string()
        } else {
            format!("{} {}", entry.children.len(), children)
        };
        out.push_str(&format!(
            r#" {{{} 0 {} {{0 0 {{0 0 {}}} "{}"}}}}"#,
            entry.id,
            children_field,
            languages(entry),
            entry.path,
        ));
    }
    out.push('}');
    out
}

/// Zip a set of named entries.
pub fn zip_bytes(entries: &[(&str, Vec<u8>)]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, data) in entries {
        writer.start_file(*name, FileOptions::default()).unwrap();
        writer.write_all(data).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

/// UTF-16LE bytes with a BOM, as 1C page files are stored.
pub fn utf16le_page(html: &str) -> Vec<u8> {
    let mut bytes = vec![0xFF, 0xFE];
    bytes.extend(html.encode_utf16().flat_map(u16::to_le_bytes));
    bytes
}

/// Assemble a container file from TOC text and page entries.
pub fn write_hbk(path: &Path, toc_text: &str, pages: &[(&str, Vec<u8>)]) {
    let pack = zip_bytes(&[("toc", toc_text.as_bytes().to_vec())]);
    let storage = zip_bytes(pages);
    let image = ContainerImage::new()
        .page_size(512)
        .file("PackBlock", pack)
        .file("FileStorage", storage)
        .build();
    std::fs::write(path, image).unwrap();
}
