//! Parser for method documentation pages.

use crate::core::types::{DefinitionHeader, MethodDefinition, Signature};
use crate::hbk::pages::blocks::{parse_html_page, BlockKind};
use crate::hbk::pages::{extract_type_name, page_names, parse_parameters};

/// Parse a method page into a definition with its signatures.
///
/// Each `Синтаксис` / `Вариант синтаксиса: X` block starts a call
/// variant; the following `Параметры` block fills its parameter list.
/// A page with no signature blocks still yields one empty signature.
pub fn parse_method(html: &str) -> MethodDefinition {
    let page = parse_html_page(html);
    let (name_ru, name_en) = page_names(&page);

    let mut signatures: Vec<Signature> = Vec::new();

    for block in &page.blocks {
        match block.kind {
            BlockKind::Syntax => {
                signatures.push(Signature {
                    name: variant_name(&block.title).unwrap_or_else(|| name_ru.clone()),
                    description: block.content.clone(),
                    parameters: Vec::new(),
                });
            }
            BlockKind::Parameters => {
                let parameters = parse_parameters(&block.content);
                match signatures.last_mut() {
                    Some(signature) if signature.parameters.is_empty() => {
                        signature.parameters = parameters;
                    }
                    _ => signatures.push(Signature {
                        name: name_ru.clone(),
                        description: String::new(),
                        parameters,
                    }),
                }
            }
            _ => {}
        }
    }

    if signatures.is_empty() {
        signatures.push(Signature {
            name: name_ru.clone(),
            description: String::new(),
            parameters: Vec::new(),
        });
    }

    let return_type = extract_return_type(page.block_content(BlockKind::ReturnValue));

    MethodDefinition {
        header: DefinitionHeader {
            name_ru,
            name_en,
            description: page.block_content(BlockKind::Description).to_string(),
            owner_type_name: None,
        },
        signatures,
        return_type,
    }
}

/// `"Вариант синтаксиса: По индексу"` -> `По индексу`
fn variant_name(title: &str) -> Option<String> {
    let title = title.trim();
    if !title.starts_with("Вариант синтаксиса") && !title.starts_with("Syntax variant")
    {
        return None;
    }
    title
        .split_once(':')
        .map(|(_, name)| name.trim().to_string())
        .filter(|name| !name.is_empty())
}

fn extract_return_type(content: &str) -> Option<String> {
    if content.is_empty() {
        return None;
    }
    extract_type_name(content).or_else(|| Some(content.lines().next()?.trim().to_string()))
}
