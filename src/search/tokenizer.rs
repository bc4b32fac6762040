//! Identifier tokenizer for search queries and definition names.
//!
//! Splits identifier-shaped strings (Russian or English letters, digits)
//! into lower-case word tokens. Latin CamelCase boundaries split; a
//! continuous Cyrillic run stays one token even across case changes,
//! since 1C names like `ТаблицаЗначений` are looked up whole.

/// Split a string into ordered lower-case word tokens.
///
/// Rules, in order: split on any non-alphanumeric character, then split
/// at Latin case boundaries: a lower-to-upper transition, and one
/// character before the lowercase that ends an uppercase run
/// (`HTTPServer` -> `HTTP`, `Server`).
pub fn tokenize(input: &str) -> Vec<String> {
    let mut tokens = Vec::new();

    for word in input.split(|c: char| !c.is_alphanumeric()) {
        if word.is_empty() {
            continue;
        }
        split_camel_case(word, &mut tokens);
    }

    tokens
}

fn split_camel_case(word: &str, out: &mut Vec<String>) {
    let chars: Vec<char> = word.chars().collect();
    let mut start = 0;

    for i in 1..chars.len() {
        let prev = chars[i - 1];
        let cur = chars[i];

        let lower_to_upper =
            (prev.is_ascii_lowercase() || prev.is_ascii_digit()) && cur.is_ascii_uppercase();
        let upper_run_end = prev.is_ascii_uppercase()
            && cur.is_ascii_uppercase()
            && chars.get(i + 1).is_some_and(|c| c.is_ascii_lowercase());

        if lower_to_upper || upper_run_end {
            push_token(&chars[start..i], out);
            start = i;
        }
    }

    push_token(&chars[start..], out);
}

fn push_token(chars: &[char], out: &mut Vec<String>) {
    if chars.is_empty() {
        return;
    }
    out.push(chars.iter().flat_map(|c| c.to_lowercase()).collect());
}
