//! Test-support builder producing HBK container images.
//!
//! Lays out a container exactly as [`crate::hbk::container`] reads it:
//! 16-byte header, a root block holding the file-info table, then a
//! name block and a body page chain per inner file. Used by the unit
//! tests here and by the integration suite to synthesize fixture
//! containers.

const END_MARKER: u32 = 0x7FFF_FFFF;

/// Block header: CRLF, three 8-digit hex fields with separators, CRLF.
const BLOCK_HEADER_LEN: usize = 31;

#[derive(Default)]
pub struct ContainerImage {
    files: Vec<(String, Vec<u8>)>,
    page_size: Option<usize>,
}

impl ContainerImage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an inner file.
    pub fn file(mut self, name: &str, body: Vec<u8>) -> Self {
        self.files.push((name.to_string(), body));
        self
    }

    /// Force bodies longer than `size` onto a multi-page chain.
    pub fn page_size(mut self, size: usize) -> Self {
        self.page_size = Some(size);
        self
    }

    pub fn build(self) -> Vec<u8> {
        let table_len = self.files.len() * 12;

        // First pass: compute addresses.
        let mut cursor = 16 + BLOCK_HEADER_LEN + table_len;
        let mut entries = Vec::new();
        let mut layouts = Vec::new();

        for (name, body) in &self.files {
            let name_utf16 = encode_utf16le(name);
            let name_addr = cursor;
            cursor += 2 + 9 + 40 + name_utf16.len();

            let body_addr = cursor;
            let chunks = self.split_chunks(body);
            let mut chunk_addrs = Vec::new();
            for chunk in &chunks {
                chunk_addrs.push(cursor);
                cursor += BLOCK_HEADER_LEN + chunk.len();
            }

            entries.push((name_addr as u32, body_addr as u32));
            layouts.push((name_utf16, body.len(), chunks, chunk_addrs));
        }

        // Second pass: emit bytes.
        let mut out = Vec::with_capacity(cursor);
        out.extend_from_slice(&END_MARKER.to_le_bytes());
        out.extend_from_slice(&512u32.to_le_bytes());
        out.extend_from_slice(&2u32.to_le_bytes());
        out.extend_from_slice(&0u32.to_le_bytes());

        push_block_header(&mut out, table_len, table_len, END_MARKER);
        for (name_addr, body_addr) in &entries {
            out.extend_from_slice(&name_addr.to_le_bytes());
            out.extend_from_slice(&body_addr.to_le_bytes());
            out.extend_from_slice(&END_MARKER.to_le_bytes());
        }

        for (name_utf16, body_len, chunks, chunk_addrs) in &layouts {
            // Name block: CRLF, payload-size field, 40 fixed bytes, UTF-16LE name.
            out.extend_from_slice(b"\r\n");
            push_hex_field(&mut out, name_utf16.len() + 24);
            out.extend_from_slice(&[0u8; 40]);
            out.extend_from_slice(name_utf16);

            // Body page chain.
            for (i, chunk) in chunks.iter().enumerate() {
                let next = chunk_addrs
                    .get(i + 1)
                    .map(|a| *a as u32)
                    .unwrap_or(END_MARKER);
                let data_size = if i == 0 {
                    *body_len
                } else {
                    chunks[i..].iter().map(Vec::len).sum()
                };
                push_block_header(&mut out, data_size, chunk.len(), next);
                out.extend_from_slice(chunk);
            }
        }

        out
    }

    fn split_chunks(&self, body: &[u8]) -> Vec<Vec<u8>> {
        match self.page_size {
            Some(size) if size > 0 && body.len() > size => {
                body.chunks(size).map(<[u8]>::to_vec).collect()
            }
            _ => vec![body.to_vec()],
        }
    }
}

fn push_block_header(out: &mut Vec<u8>, data_size: usize, page_size: usize, next: u32) {
    out.extend_from_slice(b"\r\n");
    push_hex_field(out, data_size);
    push_hex_field(out, page_size);
    out.extend_from_slice(format!("{next:08x}").as_bytes());
    out.extend_from_slice(b" \r\n");
}

fn push_hex_field(out: &mut Vec<u8>, value: usize) {
    out.extend_from_slice(format!("{value:08x} ").as_bytes());
}

fn encode_utf16le(s: &str) -> Vec<u8> {
    s.encode_utf16().flat_map(u16::to_le_bytes).collect()
}
