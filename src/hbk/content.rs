//! PackBlock / FileStorage extraction and page access.
//!
//! The two container regions are ZIP streams: PackBlock holds the
//! bracket-format table of contents as its single entry, FileStorage
//! holds the HTML pages keyed by path.

use crate::core::error::{ContextError, Result};
use crate::hbk::container::read_container;
use crate::hbk::toc::Toc;
use std::collections::HashMap;
use std::io::{Cursor, Read};
use std::path::Path;
use zip::ZipArchive;

/// Decompressed HBK content: the TOC tree plus the page files.
#[derive(Debug)]
pub struct HbkArchive {
    toc: Toc,
    pages: HashMap<String, Vec<u8>>,
    lower_names: HashMap<String, String>,
}

impl HbkArchive {
    /// Read and decompress an HBK container file.
    pub fn open(path: &Path) -> Result<HbkArchive> {
        tracing::info!("Reading HBK container: {}", path.display());
        let files = read_container(path)?;

        let pack_block = files.get("PackBlock").ok_or_else(|| {
            ContextError::CorruptContainer("PackBlock region missing".to_string())
        })?;
        let toc_bytes = inflate_pack_block(pack_block)?;
        let toc = Toc::parse(&toc_bytes)?;

        let file_storage = files.get("FileStorage").ok_or_else(|| {
            ContextError::CorruptContainer("FileStorage region missing".to_string())
        })?;
        let pages = read_file_storage(file_storage)?;

        let lower_names = pages
            .keys()
            .map(|name| (name.to_lowercase(), name.clone()))
            .collect();

        tracing::info!("HBK archive: {} pages", pages.len());
        Ok(HbkArchive {
            toc,
            pages,
            lower_names,
        })
    }

    pub fn toc(&self) -> &Toc {
        &self.toc
    }

    /// Read an HTML page by its TOC path.
    ///
    /// TOC entries carry a leading `/` that archive entries do not;
    /// lookup falls back to a case-insensitive probe. A missing or
    /// undecodable page is a per-page warning, not a failure.
    pub fn read_page(&self, path: &str) -> Option<String> {
        if path.is_empty() {
            return None;
        }

        let normalized = path.replace('\\', "/");
        let normalized = normalized.trim_start_matches('/');

        let bytes = self.pages.get(normalized).or_else(|| {
            self.lower_names
                .get(&normalized.to_lowercase())
                .and_then(|name| self.pages.get(name))
        });

        match bytes {
            Some(bytes) => Some(decode_page(bytes)),
            None => {
                tracing::warn!("Page '{}' not found in FileStorage, skipping", path);
                None
            }
        }
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

/// Decompress the PackBlock ZIP and return its single TOC entry.
fn inflate_pack_block(data: &[u8]) -> Result<Vec<u8>> {
    let mut archive = ZipArchive::new(Cursor::new(data)).map_err(|e| {
        ContextError::CorruptContainer(format!("PackBlock is not a valid archive: {e}"))
    })?;

    if archive.len() == 0 {
        return Err(ContextError::CorruptContainer(
            "PackBlock archive is empty".to_string(),
        ));
    }

    let mut entry = archive.by_index(0).map_err(|e| {
        ContextError::CorruptContainer(format!("PackBlock entry unreadable: {e}"))
    })?;
    let mut bytes = Vec::new();
    entry.read_to_end(&mut bytes)?;
    Ok(bytes)
}

/// Extract every FileStorage entry into memory, keyed by entry path.
fn read_file_storage(data: &[u8]) -> Result<HashMap<String, Vec<u8>>> {
    let mut archive = ZipArchive::new(Cursor::new(data)).map_err(|e| {
        ContextError::CorruptContainer(format!("FileStorage is not a valid archive: {e}"))
    })?;

    let mut pages = HashMap::with_capacity(archive.len());
    for i in 0..archive.len() {
        let mut entry = archive.by_index(i).map_err(|e| {
            ContextError::CorruptContainer(format!("FileStorage entry unreadable: {e}"))
        })?;
        if entry.is_dir() {
            continue;
        }
        let name = entry.name().to_string();
        let mut bytes = Vec::with_capacity(entry.size() as usize);
        entry.read_to_end(&mut bytes)?;
        pages.insert(name, bytes);
    }

    Ok(pages)
}

/// Decode page bytes: BOM-sniffed, UTF-16LE by shape, UTF-8 otherwise.
fn decode_page(bytes: &[u8]) -> String {
    if let Some((encoding, bom_len)) = encoding_rs::Encoding::for_bom(bytes) {
        let (decoded, _) = encoding.decode_without_bom_handling(&bytes[bom_len..]);
        return decoded.into_owned();
    }

    // 1C page HTML is UTF-16LE; ASCII markup makes every odd byte zero.
    if bytes.len() >= 2 && bytes[1] == 0 {
        let (decoded, _, _) = encoding_rs::UTF_16LE.decode(bytes);
        return decoded.into_owned();
    }

    String::from_utf8_lossy(bytes).into_owned()
}
