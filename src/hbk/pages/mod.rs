//! Page parsers: one per documentation page variant, plus the shared
//! extraction helpers they are built from.

pub mod blocks;
pub mod ctor;
pub mod enums;
pub mod method;
pub mod object;
pub mod property;

use crate::core::types::ParameterDefinition;
use blocks::{BlockKind, ParsedPage};
use once_cell::sync::Lazy;
use regex::Regex;

static BILINGUAL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(.+?)\s*\((.+?)\)\s*$").unwrap());

static TYPE_PREFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:Тип|Type)\s*:\s*([^.;\n]+)").unwrap());

static ANGLE_PARAM_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^<(.+?)>\s*[-–—]?\s*(.*)$").unwrap());

static SIMPLE_PARAM_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\w+)\s*[-–—]\s*(.*)$").unwrap());

static DEFAULT_VALUE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:Значение по умолчанию|Default value)\s*:\s*([^.;\n]+)").unwrap()
});

/// Split `"Имя (Name)"` / `"Имя / Name"` into the language pair.
pub(crate) fn split_bilingual_name(text: &str) -> (String, String) {
    let text = text.trim();
    if let Some((ru, en)) = text.split_once(" / ") {
        return (ru.trim().to_string(), en.trim().to_string());
    }
    if let Some(caps) = BILINGUAL_RE.captures(text) {
        return (caps[1].trim().to_string(), caps[2].trim().to_string());
    }
    (text.to_string(), String::new())
}

/// Entity names from the Name block, falling back to the page title.
pub(crate) fn page_names(page: &ParsedPage) -> (String, String) {
    let name_content = page.block_content(BlockKind::Name);
    if !name_content.is_empty() {
        // The name line is the first line of the block
        let first_line = name_content.lines().next().unwrap_or("");
        return split_bilingual_name(first_line);
    }
    if !page.title.is_empty() {
        return split_bilingual_name(&page.title);
    }
    (String::new(), String::new())
}

/// Pull the type name out of a `Тип: Строка.` / `Type: String.` line.
pub(crate) fn extract_type_name(text: &str) -> Option<String> {
    TYPE_PREFIX_RE
        .captures(text)
        .map(|caps| caps[1].trim().to_string())
        .filter(|s| !s.is_empty())
}

fn is_optional_marker(text: &str) -> bool {
    let lower = text.to_lowercase();
    lower.contains("необязательн") || lower == "optional"
}

fn is_parameter_header(first_col: &str) -> bool {
    matches!(first_col, "Имя" | "Name" | "Параметр" | "Parameter")
}

/// Parse a Parameters block into parameter definitions.
///
/// Two shapes appear in the corpus: flattened table rows
/// `имя | тип | описание | признак | умолчание`, and the legacy
/// line format `<Имя> - описание` with continuation lines carrying
/// `Тип:` and default-value markers.
pub(crate) fn parse_parameters(text: &str) -> Vec<ParameterDefinition> {
    let mut params: Vec<ParameterDefinition> = Vec::new();
    let mut current: Option<ParameterDefinition> = None;

    let flush = |current: &mut Option<ParameterDefinition>, params: &mut Vec<ParameterDefinition>| {
        if let Some(mut param) = current.take() {
            param.description = param.description.trim().to_string();
            params.push(param);
        }
    };

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if line.contains(" | ") {
            let cols: Vec<&str> = line.split(" | ").map(str::trim).collect();
            if is_parameter_header(cols[0]) {
                continue;
            }
            flush(&mut current, &mut params);
            params.push(ParameterDefinition {
                name: cols[0].to_string(),
                type_name: cols.get(1).unwrap_or(&"").to_string(),
                description: cols.get(2).unwrap_or(&"").to_string(),
                optional: cols.get(3).is_some_and(|c| is_optional_marker(c)),
                default_value: cols
                    .get(4)
                    .map(|c| c.to_string())
                    .filter(|c| !c.is_empty()),
            });
            continue;
        }

        if let Some(caps) = ANGLE_PARAM_RE.captures(line) {
            flush(&mut current, &mut params);
            current = Some(ParameterDefinition {
                name: caps[1].trim().to_string(),
                description: caps[2].trim().to_string(),
                ..Default::default()
            });
            continue;
        }

        match current.as_mut() {
            None => {
                if let Some(caps) = SIMPLE_PARAM_RE.captures(line) {
                    current = Some(ParameterDefinition {
                        name: caps[1].trim().to_string(),
                        description: caps[2].trim().to_string(),
                        ..Default::default()
                    });
                }
            }
            Some(param) => {
                if let Some(type_name) = extract_type_name(line) {
                    param.type_name = type_name;
                } else if let Some(caps) = DEFAULT_VALUE_RE.captures(line) {
                    param.default_value = Some(caps[1].trim().to_string());
                } else if is_optional_marker(line) {
                    param.optional = true;
                } else {
                    if !param.description.is_empty() {
                        param.description.push('\n');
                    }
                    param.description.push_str(line);
                }
            }
        }
    }

    flush(&mut current, &mut params);
    params
}
