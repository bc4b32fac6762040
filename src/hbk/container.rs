//! Binary container walk for 1C HBK files.
//!
//! An HBK file is a proprietary container: a 16-byte header, then
//! blocks whose sizes are 8-digit ASCII-hex fields. A file-info table
//! lists the inner files as 12-byte entries (header address, body
//! address, 0x7FFFFFFF sentinel); names are UTF-16LE; bodies follow
//! page chains terminated by the same sentinel.

use crate::core::error::{ContextError, Result};
use std::collections::HashMap;
use std::path::Path;

/// End-of-chain / entry sentinel
const END_MARKER: u32 = 0x7FFF_FFFF;

/// Fixed container header: four little-endian i32 values
const HEADER_LEN: usize = 16;

/// Read an HBK container and return its inner files by name.
pub fn read_container(path: &Path) -> Result<HashMap<String, Vec<u8>>> {
    let data = std::fs::read(path)?;
    read_container_bytes(&data)
}

/// Parse an in-memory HBK container image.
pub fn read_container_bytes(data: &[u8]) -> Result<HashMap<String, Vec<u8>>> {
    let entries = parse_file_info(data)?;

    let mut result = HashMap::with_capacity(entries.len());
    for (name, body_addr) in entries {
        let body = read_file_body(data, body_addr)?;
        result.insert(name, body);
    }

    tracing::debug!("HBK container: {} inner files", result.len());
    Ok(result)
}

/// Parse the file-info table from the container root block.
fn parse_file_info(data: &[u8]) -> Result<Vec<(String, usize)>> {
    if data.len() < HEADER_LEN + 2 + 9 + 9 + 11 {
        return Err(ContextError::CorruptContainer(
            "truncated container header".to_string(),
        ));
    }

    // The root block opens with CRLF followed by ASCII-hex size fields;
    // anything else is not an HBK container.
    if &data[HEADER_LEN..HEADER_LEN + 2] != b"\r\n" || !is_ascii_hex(&data[HEADER_LEN + 2..HEADER_LEN + 10]) {
        return Err(ContextError::UnsupportedFormat(
            "file does not open with an HBK root block".to_string(),
        ));
    }

    let mut pos = HEADER_LEN + 2;
    let payload_size = read_hex_field(data, &mut pos)?;
    let _block_size = read_hex_field(data, &mut pos)?;
    pos += 11;

    let table = slice(data, pos, payload_size)?;
    let entry_count = table.len() / 12;

    let mut entries = Vec::new();
    for i in 0..entry_count {
        let offset = i * 12;
        let header_addr = read_i32_le(table, offset)?;
        let body_addr = read_i32_le(table, offset + 4)?;
        let reserved = read_i32_le(table, offset + 8)?;
        if reserved != END_MARKER {
            continue;
        }

        let name = read_filename(data, header_addr as usize)?;
        entries.push((name, body_addr as usize));
    }

    Ok(entries)
}

/// Extract an inner file name from its header block.
fn read_filename(data: &[u8], header_addr: usize) -> Result<String> {
    let mut pos = header_addr + 2;
    let payload_size = read_hex_field(data, &mut pos)?;
    pos += 40;

    if payload_size <= 24 {
        return Ok(String::new());
    }
    let name_size = payload_size - 24;
    let name_bytes = slice(data, pos, name_size)?;

    let (decoded, _, _) = encoding_rs::UTF_16LE.decode(name_bytes);
    Ok(decoded.trim_end_matches('\0').to_string())
}

/// Extract a file body, following the page chain.
fn read_file_body(data: &[u8], body_addr: usize) -> Result<Vec<u8>> {
    let (data_size, page_size, next_page, data_start) = parse_block_header(data, body_addr)?;

    if next_page == END_MARKER {
        return Ok(slice(data, data_start, data_size)?.to_vec());
    }

    let mut result = Vec::with_capacity(data_size);
    let mut remaining = data_size;
    let mut current_start = data_start;
    let mut current_page_size = page_size;
    let mut current_next = next_page;

    while remaining > 0 {
        let chunk_size = current_page_size.min(remaining);
        result.extend_from_slice(slice(data, current_start, chunk_size)?);
        remaining -= chunk_size;

        if remaining == 0 || current_next == END_MARKER {
            break;
        }

        let (_, page_size, next_page, data_start) =
            parse_block_header(data, current_next as usize)?;
        current_page_size = page_size;
        current_next = next_page;
        current_start = data_start;
    }

    Ok(result)
}

/// Parse a block header: (data_size, page_size, next_page, data_start).
fn parse_block_header(data: &[u8], addr: usize) -> Result<(usize, usize, u32, usize)> {
    let mut pos = addr + 2; // skip CRLF
    let data_size = read_hex_field(data, &mut pos)?;
    let page_size = read_hex_field(data, &mut pos)?;
    let next_start = pos;
    let next_page = read_hex_field(data, &mut pos)? as u32;
    // field (8) + space (1) + CRLF (2)
    let data_start = next_start + 11;
    Ok((data_size, page_size, next_page, data_start))
}

/// Read an 8-digit ASCII-hex field plus its separator byte.
fn read_hex_field(data: &[u8], pos: &mut usize) -> Result<usize> {
    let bytes = slice(data, *pos, 8)?;
    let text = std::str::from_utf8(bytes).map_err(|_| {
        ContextError::CorruptContainer(format!("non-ASCII size field at offset {}", pos))
    })?;
    let value = usize::from_str_radix(text, 16).map_err(|_| {
        ContextError::CorruptContainer(format!("bad hex size field '{}' at offset {}", text, pos))
    })?;
    *pos += 9;
    Ok(value)
}

fn read_i32_le(data: &[u8], offset: usize) -> Result<u32> {
    let bytes = slice(data, offset, 4)?;
    Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}

fn slice(data: &[u8], start: usize, len: usize) -> Result<&[u8]> {
    data.get(start..start + len).ok_or_else(|| {
        ContextError::CorruptContainer(format!(
            "range {}..{} outside container of {} bytes",
            start,
            start + len,
            data.len()
        ))
    })
}

fn is_ascii_hex(bytes: &[u8]) -> bool {
    bytes.iter().all(|b| b.is_ascii_hexdigit())
}
