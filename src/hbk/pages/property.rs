//! Parser for property documentation pages.

use crate::core::types::{DefinitionHeader, PropertyDefinition};
use crate::hbk::pages::blocks::{parse_html_page, BlockKind};
use crate::hbk::pages::{extract_type_name, page_names};

pub fn parse_property(html: &str) -> PropertyDefinition {
    let page = parse_html_page(html);
    let (name_ru, name_en) = page_names(&page);

    let value_content = page.block_content(BlockKind::Value);
    let type_name = extract_type_name(value_content)
        .unwrap_or_else(|| value_content.lines().next().unwrap_or("").trim().to_string());

    let availability = page.block_content(BlockKind::Availability).to_lowercase();
    let readonly = availability.contains("только чтение") || availability.contains("read only");

    PropertyDefinition {
        header: DefinitionHeader {
            name_ru,
            name_en,
            description: page.block_content(BlockKind::Description).to_string(),
            owner_type_name: None,
        },
        type_name,
        readonly,
    }
}
