//! Tokenizer for the 1C bracket format carried in the PackBlock.
//!
//! Tokens: `{` and `}` delimiters, quoted strings, and bare scalars
//! (numbers, identifiers). Commas and whitespace outside strings are
//! insignificant. A quote inside a string is escaped with a backslash
//! or by doubling it.

use crate::core::error::{ContextError, Result};

const BOM: char = '\u{feff}';

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Open,
    Close,
    Str(String),
    Scalar(String),
}

pub fn tokenize(content: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = content.chars().peekable();
    let mut current = String::new();

    let flush = |current: &mut String, tokens: &mut Vec<Token>| {
        let scalar = current.trim();
        if !scalar.is_empty() {
            tokens.push(Token::Scalar(scalar.to_string()));
        }
        current.clear();
    };

    while let Some(ch) = chars.next() {
        match ch {
            BOM => {}
            '"' => {
                flush(&mut current, &mut tokens);
                tokens.push(Token::Str(read_string(&mut chars)?));
            }
            '{' => {
                flush(&mut current, &mut tokens);
                tokens.push(Token::Open);
            }
            '}' => {
                flush(&mut current, &mut tokens);
                tokens.push(Token::Close);
            }
            ',' => flush(&mut current, &mut tokens),
            c if c.is_whitespace() => flush(&mut current, &mut tokens),
            c => current.push(c),
        }
    }

    flush(&mut current, &mut tokens);
    Ok(tokens)
}

fn read_string(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> Result<String> {
    let mut value = String::new();

    while let Some(ch) = chars.next() {
        match ch {
            '\\' if chars.peek() == Some(&'"') => {
                chars.next();
                value.push('"');
            }
            '"' => {
                // Doubled quote is an escaped quote, not a close
                if chars.peek() == Some(&'"') {
                    chars.next();
                    value.push('"');
                } else {
                    return Ok(value);
                }
            }
            c => value.push(c),
        }
    }

    Err(ContextError::MalformedToc(
        "unterminated string literal".to_string(),
    ))
}
