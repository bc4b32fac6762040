//! TOC traversal: classify pages, dispatch parsers, assemble the catalog.

use crate::catalog::{Catalog, CatalogBuilder, TypeRecord};
use crate::core::error::Result;
use crate::core::types::{ConstructorSignature, MethodDefinition, PropertyDefinition};
use crate::hbk::content::HbkArchive;
use crate::hbk::pages::{ctor, enums, method, object, property};
use crate::hbk::toc::TocPage;
use std::path::Path;

const GLOBAL_CONTEXT_MARKER: &str = "Global context";
const ENUM_CATALOG_TITLES: [&str; 2] = [
    "Системные наборы значений",
    "Системные перечисления",
];
const PROPERTIES_PATH_MARKER: &str = "/properties/";
const METHODS_PATH_MARKER: &str = "/methods/";
const CONSTRUCTORS_PATH_MARKER: &str = "/ctors/";

/// Modern TOCs nest catalogs under section headers
const MAX_SECTION_DEPTH: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PageKind {
    GlobalContext,
    EnumCatalog,
    TypeCatalog,
    Properties,
    Methods,
    Constructors,
    Section,
    Unknown,
}

/// Ingest an HBK container into a catalog.
pub fn load_catalog(hbk_path: &Path) -> Result<Catalog> {
    let archive = HbkArchive::open(hbk_path)?;
    let mut builder = CatalogBuilder::new();
    PagesVisitor { archive: &archive }.collect(&mut builder);
    Ok(builder.build())
}

/// Traverses the page tree and feeds parsed entities to the builder.
struct PagesVisitor<'a> {
    archive: &'a HbkArchive,
}

impl PagesVisitor<'_> {
    fn collect(&self, builder: &mut CatalogBuilder) {
        self.collect_global_context(builder);
        self.collect_catalogs(self.archive.toc().root(), 0, builder);
    }

    fn collect_global_context(&self, builder: &mut CatalogBuilder) {
        let global_page = match self.find_global_context_page() {
            Some(page) => page,
            None => {
                tracing::warn!("Global context page not found");
                return;
            }
        };

        let mut methods = 0usize;
        let mut properties = 0usize;
        for child in self.archive.toc().children_of(global_page) {
            match self.classify_member_page(child) {
                PageKind::Methods => {
                    for method in self.visit_methods_page(child) {
                        builder.add_global_method(method);
                        methods += 1;
                    }
                }
                PageKind::Properties => {
                    for property in self.visit_properties_page(child) {
                        builder.add_global_property(property);
                        properties += 1;
                    }
                }
                _ => {}
            }
        }
        tracing::info!(
            "Collected {} global methods, {} global properties",
            methods,
            properties
        );
    }

    fn collect_catalogs(&self, page: &TocPage, depth: usize, builder: &mut CatalogBuilder) {
        if depth > MAX_SECTION_DEPTH {
            return;
        }

        for child in self.archive.toc().children_of(page) {
            match self.classify_root_page(child) {
                PageKind::TypeCatalog => self.visit_type_catalog(child, builder),
                PageKind::EnumCatalog => self.visit_enum_catalog(child, builder),
                PageKind::Section => self.collect_catalogs(child, depth + 1, builder),
                _ => {}
            }
        }
    }

    fn find_global_context_page(&self) -> Option<&TocPage> {
        self.archive.toc().all_pages().find(|page| {
            page.path.contains(GLOBAL_CONTEXT_MARKER)
                || page.name_en.contains("Global context")
                || page.name_ru.contains("Глобальный контекст")
        })
    }

    fn classify_root_page(&self, page: &TocPage) -> PageKind {
        if page.path.contains(GLOBAL_CONTEXT_MARKER) {
            return PageKind::GlobalContext;
        }
        if ENUM_CATALOG_TITLES.contains(&page.name_ru.as_str()) {
            return PageKind::EnumCatalog;
        }
        if page.is_section {
            return PageKind::Section;
        }
        PageKind::TypeCatalog
    }

    fn classify_member_page(&self, page: &TocPage) -> PageKind {
        let path = page.path.to_lowercase();
        let name = page.name_ru.to_lowercase();

        if path.contains(PROPERTIES_PATH_MARKER) || name.contains("свойства") {
            return PageKind::Properties;
        }
        if path.contains(METHODS_PATH_MARKER) || name.contains("методы") {
            return PageKind::Methods;
        }
        if path.contains(CONSTRUCTORS_PATH_MARKER) || name.contains("конструкторы") {
            return PageKind::Constructors;
        }
        PageKind::Unknown
    }

    fn visit_type_catalog(&self, page: &TocPage, builder: &mut CatalogBuilder) {
        for type_page in self.archive.toc().children_of(page) {
            let html = match self.archive.read_page(&type_page.path) {
                Some(html) => html,
                None => continue,
            };

            let mut record = object::parse_object(&html);
            fill_names(
                &mut record.header.name_ru,
                &mut record.header.name_en,
                type_page,
            );

            for child in self.archive.toc().children_of(type_page) {
                match self.classify_member_page(child) {
                    PageKind::Methods => record.methods.extend(self.visit_methods_page(child)),
                    PageKind::Properties => {
                        record.properties.extend(self.visit_properties_page(child))
                    }
                    PageKind::Constructors => {
                        record
                            .constructors
                            .extend(self.visit_constructors_page(child))
                    }
                    _ => {}
                }
            }

            builder.add_type(record);
        }
    }

    fn visit_enum_catalog(&self, page: &TocPage, builder: &mut CatalogBuilder) {
        for enum_page in self.archive.toc().children_of(page) {
            let html = match self.archive.read_page(&enum_page.path) {
                Some(html) => html,
                None => continue,
            };

            let mut record: TypeRecord = enums::parse_enum(&html);
            fill_names(
                &mut record.header.name_ru,
                &mut record.header.name_en,
                enum_page,
            );

            for value_page in self.archive.toc().children_of(enum_page) {
                if let Some(value_html) = self.archive.read_page(&value_page.path) {
                    let mut value =
                        enums::parse_enum_value(&value_html, &record.header.name_ru);
                    fill_names(
                        &mut value.header.name_ru,
                        &mut value.header.name_en,
                        value_page,
                    );
                    record.properties.push(value);
                }
            }

            builder.add_type(record);
        }
    }

    fn visit_methods_page(&self, page: &TocPage) -> Vec<MethodDefinition> {
        let mut methods = Vec::new();
        for child in self.archive.toc().children_of(page) {
            if let Some(html) = self.archive.read_page(&child.path) {
                let mut method = method::parse_method(&html);
                fill_names(
                    &mut method.header.name_ru,
                    &mut method.header.name_en,
                    child,
                );
                methods.push(method);
            }
        }
        methods
    }

    fn visit_properties_page(&self, page: &TocPage) -> Vec<PropertyDefinition> {
        let mut properties = Vec::new();
        for child in self.archive.toc().children_of(page) {
            if let Some(html) = self.archive.read_page(&child.path) {
                let mut property = property::parse_property(&html);
                fill_names(
                    &mut property.header.name_ru,
                    &mut property.header.name_en,
                    child,
                );
                properties.push(property);
            }
        }
        properties
    }

    fn visit_constructors_page(&self, page: &TocPage) -> Vec<ConstructorSignature> {
        let mut constructors = Vec::new();
        for child in self.archive.toc().children_of(page) {
            if let Some(html) = self.archive.read_page(&child.path) {
                let mut constructor = ctor::parse_constructor(&html);
                if constructor.name.is_empty() {
                    constructor.name = child.name_ru.clone();
                }
                constructors.push(constructor);
            }
        }
        constructors
    }
}

/// A page missing a name falls back to its TOC entry.
fn fill_names(name_ru: &mut String, name_en: &mut String, page: &TocPage) {
    if name_ru.is_empty() && !page.name_ru.is_empty() {
        *name_ru = page.name_ru.clone();
    }
    if name_en.is_empty() && !page.name_en.is_empty() {
        *name_en = page.name_en.clone();
    }
}
