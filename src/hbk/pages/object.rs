//! Parser for type/object documentation pages.
//!
//! A type page yields the definition shell; members live on their own
//! pages and are attached by the visitor.

use crate::catalog::TypeRecord;
use crate::core::types::DefinitionHeader;
use crate::hbk::pages::blocks::{parse_html_page, BlockKind};
use crate::hbk::pages::page_names;

pub fn parse_object(html: &str) -> TypeRecord {
    let page = parse_html_page(html);
    let (name_ru, name_en) = page_names(&page);

    let collection_element_type = collection_element(page.block_content(BlockKind::CollectionElements));

    TypeRecord {
        header: DefinitionHeader {
            name_ru,
            name_en,
            description: page.block_content(BlockKind::Description).to_string(),
            owner_type_name: None,
        },
        collection_element_type,
        ..Default::default()
    }
}

fn collection_element(content: &str) -> Option<String> {
    let first_line = content.lines().next()?.trim();
    if first_line.is_empty() {
        return None;
    }
    Some(first_line.trim_end_matches('.').to_string())
}
