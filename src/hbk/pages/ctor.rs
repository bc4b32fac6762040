//! Parser for constructor documentation pages.

use crate::core::types::ConstructorSignature;
use crate::hbk::pages::blocks::{parse_html_page, BlockKind};
use crate::hbk::pages::{page_names, parse_parameters};

pub fn parse_constructor(html: &str) -> ConstructorSignature {
    let page = parse_html_page(html);
    let (name_ru, _) = page_names(&page);

    ConstructorSignature {
        name: name_ru,
        description: page.block_content(BlockKind::Syntax).to_string(),
        parameters: parse_parameters(page.block_content(BlockKind::Parameters)),
    }
}
