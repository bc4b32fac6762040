//! Recursive-descent parser for the TOC bracket stream.
//!
//! A chunk is `{id parentId childCount childId.. {properties}}`; the
//! properties group carries name containers with per-language entries
//! and the quoted page path. The positional schema is fixed per
//! dialect: legacy containers code languages as bare `1`/`2`, modern
//! ones as quoted `"ru"`/`"en"` with `"#"` marking section headers.

use crate::core::error::{ContextError, Result};
use crate::hbk::toc::tokenizer::{tokenize, Token};

/// Bracket nesting bound; real TOCs stay in single digits.
const MAX_DEPTH: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TocDialect {
    Legacy,
    Modern,
}

#[derive(Debug, Clone, Default)]
pub struct NamePair {
    pub ru: String,
    pub en: String,
}

/// Raw TOC chunk before tree assembly
#[derive(Debug, Clone, Default)]
pub struct TocChunk {
    pub id: i64,
    pub parent_id: i64,
    pub child_ids: Vec<i64>,
    pub names: Vec<NamePair>,
    pub html_path: String,
    pub is_section: bool,
}

/// Parse the PackBlock bytes into flat chunks plus the detected dialect.
pub fn parse_content(data: &[u8]) -> Result<(TocDialect, Vec<TocChunk>)> {
    let content = String::from_utf8_lossy(data);
    let tokens = tokenize(&content)?;
    let dialect = detect_dialect(&tokens);

    let mut cursor = Cursor::new(tokens);
    let chunks = parse_table_of_content(&mut cursor)?;
    Ok((dialect, chunks))
}

/// Modern TOCs quote their language codes; legacy ones use bare digits.
fn detect_dialect(tokens: &[Token]) -> TocDialect {
    let quoted_codes = tokens
        .iter()
        .any(|t| matches!(t, Token::Str(s) if s == "ru" || s == "en" || s == "#"));
    if quoted_codes {
        TocDialect::Modern
    } else {
        TocDialect::Legacy
    }
}

fn parse_table_of_content(cursor: &mut Cursor) -> Result<Vec<TocChunk>> {
    if !cursor.has_next() {
        return Ok(Vec::new());
    }

    cursor.expect_open()?;

    let count = match cursor.next()? {
        Token::Scalar(s) => s.parse::<usize>().unwrap_or(0),
        _ => 0,
    };

    let mut chunks = Vec::with_capacity(count);
    for _ in 0..count {
        chunks.push(parse_chunk(cursor)?);
    }

    if matches!(cursor.peek(), Some(Token::Close)) {
        cursor.next()?;
    }

    Ok(chunks)
}

/// `{id parentId childCount childId1..N {properties}}`
fn parse_chunk(cursor: &mut Cursor) -> Result<TocChunk> {
    cursor.expect_open()?;

    let mut chunk = TocChunk {
        id: cursor.next_int()?,
        parent_id: cursor.next_int()?,
        ..Default::default()
    };

    let child_count = cursor.next_int()?;
    for _ in 0..child_count {
        chunk.child_ids.push(cursor.next_int()?);
    }

    parse_chunk_properties(cursor, &mut chunk)?;

    cursor.expect_close()?;
    Ok(chunk)
}

fn parse_chunk_properties(cursor: &mut Cursor, chunk: &mut TocChunk) -> Result<()> {
    if !matches!(cursor.peek(), Some(Token::Open)) {
        return Ok(());
    }
    cursor.expect_open()?;

    // Two leading numbers
    for _ in 0..2 {
        if matches!(cursor.peek(), Some(Token::Scalar(_))) {
            cursor.next()?;
        }
    }

    parse_name_containers(cursor, chunk)?;

    // Page path, when present
    match cursor.peek() {
        Some(Token::Str(path)) => {
            chunk.html_path = path.clone();
            cursor.next()?;
        }
        Some(Token::Scalar(path)) => {
            chunk.html_path = path.clone();
            cursor.next()?;
        }
        _ => {}
    }

    // Skip whatever trailing fields the dialect added
    let mut depth = 1usize;
    while cursor.has_next() && depth > 0 {
        match cursor.next()? {
            Token::Open => depth += 1,
            Token::Close => depth -= 1,
            _ => {}
        }
    }

    Ok(())
}

fn parse_name_containers(cursor: &mut Cursor, chunk: &mut TocChunk) -> Result<()> {
    while matches!(cursor.peek(), Some(Token::Open)) {
        cursor.expect_open()?;

        let mut name = NamePair::default();

        for _ in 0..2 {
            if matches!(cursor.peek(), Some(Token::Scalar(_))) {
                cursor.next()?;
            }
        }

        while matches!(cursor.peek(), Some(Token::Open)) {
            cursor.expect_open()?;
            let code = cursor.next()?;
            let value = match cursor.next()? {
                Token::Str(s) | Token::Scalar(s) => s,
                _ => String::new(),
            };

            match code {
                Token::Scalar(c) if c == "1" => name.ru = value,
                Token::Scalar(c) if c == "2" => name.en = value,
                Token::Str(c) if c == "ru" => name.ru = value,
                Token::Str(c) if c == "en" => name.en = value,
                Token::Str(c) if c == "#" => {
                    chunk.is_section = true;
                    if name.ru.is_empty() {
                        name.ru = value;
                    }
                }
                _ => {}
            }

            cursor.expect_close()?;
        }

        chunk.names.push(name);
        cursor.expect_close()?;
    }

    Ok(())
}

struct Cursor {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

impl Cursor {
    fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            pos: 0,
            depth: 0,
        }
    }

    fn has_next(&self) -> bool {
        self.pos < self.tokens.len()
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Result<Token> {
        let token = self
            .tokens
            .get(self.pos)
            .cloned()
            .ok_or_else(|| ContextError::MalformedToc("unexpected end of TOC".to_string()))?;
        self.pos += 1;

        match token {
            Token::Open => {
                self.depth += 1;
                if self.depth > MAX_DEPTH {
                    return Err(ContextError::MalformedToc(format!(
                        "bracket depth exceeds {MAX_DEPTH}"
                    )));
                }
            }
            Token::Close => {
                self.depth = self.depth.checked_sub(1).ok_or_else(|| {
                    ContextError::MalformedToc("unbalanced closing bracket".to_string())
                })?;
            }
            _ => {}
        }

        Ok(token)
    }

    fn expect_open(&mut self) -> Result<()> {
        match self.next()? {
            Token::Open => Ok(()),
            other => Err(ContextError::MalformedToc(format!(
                "expected '{{', got {other:?} at token {}",
                self.pos - 1
            ))),
        }
    }

    fn expect_close(&mut self) -> Result<()> {
        match self.next()? {
            Token::Close => Ok(()),
            other => Err(ContextError::MalformedToc(format!(
                "expected '}}', got {other:?} at token {}",
                self.pos - 1
            ))),
        }
    }

    fn next_int(&mut self) -> Result<i64> {
        match self.next()? {
            Token::Scalar(s) => s.parse::<i64>().map_err(|_| {
                ContextError::MalformedToc(format!("expected a number, got '{s}'"))
            }),
            other => Err(ContextError::MalformedToc(format!(
                "expected a number, got {other:?}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEGACY_TOC: &str = concat!(
        r#"{2 "#,
        r#"{1 0 1 2 {0 0 {0 0 {1 "Массив"} {2 "Array"}} "/objects/array.html"}} "#,
        r#"{2 1 0 {0 0 {0 0 {1 "Добавить"} {2 "Add"}} "/objects/array/methods/add.html"}}"#,
        r#"}"#
    );

    const MODERN_TOC: &str = r##"{2 {1 0 0 {0 0 {0 0 {"ru" "Массив"} {"en" "Array"}} "/objects/array.html"}} {2 0 0 {0 0 {0 0 {"#" "Прикладные объекты"}} ""}}}"##;

    #[test]
    fn test_legacy_chunks() {
        let (dialect, chunks) = parse_content(LEGACY_TOC.as_bytes()).unwrap();
        assert_eq!(dialect, TocDialect::Legacy);
        assert_eq!(chunks.len(), 2);

        assert_eq!(chunks[0].id, 1);
        assert_eq!(chunks[0].child_ids, vec![2]);
        assert_eq!(chunks[0].names[0].ru, "Массив");
        assert_eq!(chunks[0].names[0].en, "Array");
        assert_eq!(chunks[0].html_path, "/objects/array.html");

        assert_eq!(chunks[1].id, 2);
        assert_eq!(chunks[1].names[0].ru, "Добавить");
    }

    #[test]
    fn test_modern_dialect_detected() {
        let (dialect, chunks) = parse_content(MODERN_TOC.as_bytes()).unwrap();
        assert_eq!(dialect, TocDialect::Modern);
        assert_eq!(chunks[0].names[0].ru, "Массив");
        assert_eq!(chunks[0].names[0].en, "Array");
    }

    #[test]
    fn test_modern_section_header() {
        let (_, chunks) = parse_content(MODERN_TOC.as_bytes()).unwrap();
        assert!(chunks[1].is_section);
        assert_eq!(chunks[1].names[0].ru, "Прикладные объекты");
        assert!(chunks[1].html_path.is_empty());
    }

    #[test]
    fn test_empty_input() {
        let (_, chunks) = parse_content(b"").unwrap();
        assert!(chunks.is_empty());
    }

    #[test]
    fn test_chunk_without_properties() {
        let (_, chunks) = parse_content(b"{1 {7 0 0}}").unwrap();
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].id, 7);
        assert!(chunks[0].html_path.is_empty());
    }

    #[test]
    fn test_unbalanced_brackets() {
        let err = parse_content(b"{1 {1 0 0").unwrap_err();
        assert!(matches!(err, ContextError::MalformedToc(_)));
    }

    #[test]
    fn test_depth_bound() {
        let mut deep = String::from(r#"{1 {1 0 0 {0 0 "p.html" "#);
        deep.push_str(&"{".repeat(40));
        let err = parse_content(deep.as_bytes()).unwrap_err();
        match err {
            ContextError::MalformedToc(msg) => assert!(msg.contains("depth")),
            other => panic!("expected MalformedToc, got {other:?}"),
        }
    }
}
