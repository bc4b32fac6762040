//! Parsers for enumeration pages.
//!
//! An enumeration is normalized at ingest to a platform type whose
//! values are read-only properties on it.

use crate::catalog::TypeRecord;
use crate::core::types::{DefinitionHeader, PropertyDefinition};
use crate::hbk::pages::blocks::{parse_html_page, BlockKind};
use crate::hbk::pages::page_names;

pub fn parse_enum(html: &str) -> TypeRecord {
    let page = parse_html_page(html);
    let (name_ru, name_en) = page_names(&page);

    TypeRecord {
        header: DefinitionHeader {
            name_ru,
            name_en,
            description: page.block_content(BlockKind::Description).to_string(),
            owner_type_name: None,
        },
        ..Default::default()
    }
}

/// An enum value page becomes a read-only property typed as its enum.
pub fn parse_enum_value(html: &str, enum_name: &str) -> PropertyDefinition {
    let page = parse_html_page(html);
    let (name_ru, name_en) = page_names(&page);

    PropertyDefinition {
        header: DefinitionHeader {
            name_ru,
            name_en,
            description: page.block_content(BlockKind::Description).to_string(),
            owner_type_name: None,
        },
        type_name: enum_name.to_string(),
        readonly: true,
    }
}
