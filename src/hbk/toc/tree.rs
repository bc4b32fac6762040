//! Table-of-contents tree assembled from flat chunks.

use crate::core::error::Result;
use crate::hbk::toc::parser::{parse_content, TocChunk, TocDialect};
use std::collections::HashMap;

/// One node of the TOC tree
#[derive(Debug, Clone)]
pub struct TocPage {
    pub id: i64,
    pub name_ru: String,
    pub name_en: String,
    pub path: String,
    pub is_section: bool,
    pub children: Vec<usize>,
    pub parent: Option<usize>,
}

/// Page tree with arena storage and an id lookup
#[derive(Debug)]
pub struct Toc {
    pages: Vec<TocPage>,
    root: usize,
    dialect: TocDialect,
}

impl Toc {
    /// Parse TOC bytes and build the page tree.
    pub fn parse(data: &[u8]) -> Result<Toc> {
        let (dialect, chunks) = parse_content(data)?;
        Ok(Self::build_tree(dialect, chunks))
    }

    pub fn root(&self) -> &TocPage {
        &self.pages[self.root]
    }

    pub fn page(&self, index: usize) -> &TocPage {
        &self.pages[index]
    }

    pub fn children_of<'a>(&'a self, page: &'a TocPage) -> impl Iterator<Item = &'a TocPage> {
        page.children.iter().map(move |&i| &self.pages[i])
    }

    pub fn all_pages(&self) -> impl Iterator<Item = &TocPage> {
        self.pages.iter()
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn dialect(&self) -> TocDialect {
        self.dialect
    }

    fn build_tree(dialect: TocDialect, chunks: Vec<TocChunk>) -> Toc {
        let mut pages: Vec<TocPage> = Vec::with_capacity(chunks.len());
        let mut index_by_id: HashMap<i64, usize> = HashMap::new();

        for chunk in &chunks {
            let (name_ru, name_en) = chunk
                .names
                .first()
                .map(|n| (n.ru.clone(), n.en.clone()))
                .unwrap_or_default();

            index_by_id.insert(chunk.id, pages.len());
            pages.push(TocPage {
                id: chunk.id,
                name_ru,
                name_en,
                path: chunk.html_path.clone(),
                is_section: chunk.is_section,
                children: Vec::new(),
                parent: None,
            });
        }

        for chunk in &chunks {
            let parent_index = index_by_id[&chunk.id];
            for child_id in &chunk.child_ids {
                if let Some(&child_index) = index_by_id.get(child_id) {
                    pages[child_index].parent = Some(parent_index);
                    pages[parent_index].children.push(child_index);
                }
            }
        }

        let roots: Vec<usize> = pages
            .iter()
            .enumerate()
            .filter(|(_, p)| p.parent.is_none())
            .map(|(i, _)| i)
            .collect();

        // Legacy TOCs have one root; modern ones have several, gathered
        // under a synthetic node.
        let root = if roots.len() == 1 {
            roots[0]
        } else {
            let root_index = pages.len();
            for &r in &roots {
                pages[r].parent = Some(root_index);
            }
            pages.push(TocPage {
                id: -1,
                name_ru: "root".to_string(),
                name_en: "root".to_string(),
                path: String::new(),
                is_section: false,
                children: roots,
                parent: None,
            });
            root_index
        };

        tracing::debug!("TOC tree built: {} pages", pages.len());
        Toc {
            pages,
            root,
            dialect,
        }
    }
}
