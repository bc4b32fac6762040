//! Full ingestion from synthetic HBK containers, both dialects.

mod common;

use bsl_context::catalog::{Catalog, ContextSource, ContextStore};
use bsl_context::core::config::Config;
use bsl_context::core::error::ContextError;
use bsl_context::core::services::Services;
use bsl_context::core::types::ApiType;
use bsl_context::hbk;
use common::helpers::{legacy_toc, modern_toc, utf16le_page, write_hbk, TocEntry};
use std::path::Path;
use std::sync::Arc;

fn toc_entries() -> Vec<TocEntry> {
    vec![
        TocEntry::new(1, &[2, 7, 14], "Справка", "Help", ""),
        // Global context
        TocEntry::new(2, &[3, 5], "Глобальный контекст", "Global context", "/Global context/index.html"),
        TocEntry::new(3, &[4], "Методы", "Methods", ""),
        TocEntry::new(4, &[], "", "", "/Global context/methods/message.html"),
        TocEntry::new(5, &[6], "Свойства", "Properties", ""),
        TocEntry::new(6, &[], "", "", "/Global context/properties/currentdate.html"),
        // Application types
        TocEntry::new(7, &[8, 13], "Прикладные объекты", "Applied objects", ""),
        TocEntry::new(8, &[9, 11], "", "", "/objects/array.html"),
        TocEntry::new(9, &[10], "Методы", "Methods", ""),
        TocEntry::new(10, &[], "", "", "/objects/array/methods/add.html"),
        TocEntry::new(11, &[12], "Конструкторы", "Constructors", ""),
        TocEntry::new(12, &[], "", "", "/objects/array/ctors/default.html"),
        TocEntry::new(13, &[], "", "", "/objects/valuetable.html"),
        // System enums
        TocEntry::new(14, &[15], "Системные перечисления", "System enums", ""),
        TocEntry::new(15, &[16], "", "", "/enums/comparison.html"),
        TocEntry::new(16, &[], "", "", "/enums/comparison/equal.html"),
    ]
}

fn legacy_pages() -> Vec<(&'static str, Vec<u8>)> {
    vec![
        (
            "Global context/methods/message.html",
            utf16le_page(
                r#"<html><head><title>Сообщить</title></head><body>
<h1>Имя</h1><p>Сообщить (Message)</p>
<h1>Синтаксис</h1><pre>Сообщить(&lt;ТекстСообщения&gt;)</pre>
<h1>Параметры</h1><p>&lt;ТекстСообщения&gt; - Текст выводимого сообщения.</p>
<h1>Описание</h1><p>Выводит сообщение пользователю.</p>
</body></html>"#,
            ),
        ),
        (
            "Global context/properties/currentdate.html",
            utf16le_page(
                r#"<html><body>
<h1>Имя</h1><p>ТекущаяДата (CurrentDate)</p>
<h1>Значение</h1><p>Тип: Дата.</p>
<h1>Доступность</h1><p>Только чтение.</p>
</body></html>"#,
            ),
        ),
        (
            "objects/array.html",
            utf16le_page(
                r#"<html><body>
<h1>Имя</h1><p>Массив (Array)</p>
<h1>Описание</h1><p>Упорядоченная коллекция значений.</p>
</body></html>"#,
            ),
        ),
        (
            "objects/array/methods/add.html",
            utf16le_page(
                r#"<html><body>
<h1>Имя</h1><p>Добавить (Add)</p>
<h1>Синтаксис</h1><pre>Добавить(&lt;Значение&gt;)</pre>
<h1>Параметры</h1><p>&lt;Значение&gt; - Добавляемое значение.</p>
</body></html>"#,
            ),
        ),
        (
            "objects/array/ctors/default.html",
            utf16le_page(
                r#"<html><body>
<h1>Имя</h1><p>По количеству элементов</p>
<h1>Синтаксис</h1><pre>Новый Массив(&lt;КоличествоЭлементов&gt;)</pre>
<h1>Параметры</h1><p>&lt;КоличествоЭлементов&gt; - Начальное число элементов.</p>
</body></html>"#,
            ),
        ),
        (
            "objects/valuetable.html",
            utf16le_page(
                r#"<html><body>
<h1>Имя</h1><p>ТаблицаЗначений (ValueTable)</p>
<h1>Описание</h1><p>Таблица значений.</p>
</body></html>"#,
            ),
        ),
        (
            "enums/comparison.html",
            utf16le_page(
                r#"<html><body>
<h1>Имя</h1><p>ВидСравнения (ComparisonType)</p>
<h1>Описание</h1><p>Виды сравнения.</p>
</body></html>"#,
            ),
        ),
        (
            "enums/comparison/equal.html",
            utf16le_page(
                r#"<html><body>
<h1>Имя</h1><p>Равно (Equal)</p>
<h1>Описание</h1><p>Сравнение на равенство.</p>
</body></html>"#,
            ),
        ),
    ]
}

fn modern_pages() -> Vec<(&'static str, Vec<u8>)> {
    vec![
        (
            "Global context/methods/message.html",
            utf16le_page(
                r#"<html><body>
<p class="V8SH_pagetitle">Сообщить (Message)</p>
<p class="V8SH_heading">Синтаксис:</p>
<p>Сообщить(&lt;ТекстСообщения&gt;)</p>
<p class="V8SH_chapter">Описание:</p>
<p>Выводит сообщение пользователю.</p>
</body></html>"#,
            ),
        ),
        (
            "Global context/properties/currentdate.html",
            utf16le_page(
                r#"<html><body>
<p class="V8SH_pagetitle">ТекущаяДата (CurrentDate)</p>
<p class="V8SH_heading">Значение:</p>
<p>Тип: Дата.</p>
<p class="V8SH_heading">Использование:</p>
<p>Только чтение.</p>
</body></html>"#,
            ),
        ),
        (
            "objects/array.html",
            utf16le_page(
                r#"<html><body>
<p class="V8SH_pagetitle">Массив (Array)</p>
<p class="V8SH_chapter">Описание:</p>
<p>Упорядоченная коллекция значений.</p>
</body></html>"#,
            ),
        ),
        (
            "objects/array/methods/add.html",
            utf16le_page(
                r#"<html><body>
<p class="V8SH_pagetitle">Добавить (Add)</p>
<p class="V8SH_heading">Синтаксис:</p>
<p>Добавить(&lt;Значение&gt;)</p>
<p class="V8SH_heading">Параметры:</p>
<table><tr><td>Значение</td><td>Произвольный</td><td>Добавляемое значение</td><td>Необязательный</td></tr></table>
</body></html>"#,
            ),
        ),
        (
            "objects/array/ctors/default.html",
            utf16le_page(
                r#"<html><body>
<p class="V8SH_pagetitle">По количеству элементов</p>
<p class="V8SH_heading">Синтаксис:</p>
<p>Новый Массив(&lt;КоличествоЭлементов&gt;)</p>
</body></html>"#,
            ),
        ),
        (
            "objects/valuetable.html",
            utf16le_page(
                r#"<html><body>
<p class="V8SH_pagetitle">ТаблицаЗначений (ValueTable)</p>
<p class="V8SH_chapter">Описание:</p>
<p>Таблица значений.</p>
</body></html>"#,
            ),
        ),
        (
            "enums/comparison.html",
            utf16le_page(
                r#"<html><body>
<p class="V8SH_pagetitle">ВидСравнения (ComparisonType)</p>
<p class="V8SH_chapter">Описание:</p>
<p>Виды сравнения.</p>
</body></html>"#,
            ),
        ),
        (
            "enums/comparison/equal.html",
            utf16le_page(
                r#"<html><body>
<p class="V8SH_pagetitle">Равно (Equal)</p>
<p class="V8SH_chapter">Описание:</p>
<p>Сравнение на равенство.</p>
</body></html>"#,
            ),
        ),
    ]
}

fn load_legacy(dir: &Path) -> Catalog {
    let path = dir.join("legacy.hbk");
    write_hbk(&path, &legacy_toc(&toc_entries()), &legacy_pages());
    hbk::load_catalog(&path).unwrap()
}

fn load_modern(dir: &Path) -> Catalog {
    let path = dir.join("modern.hbk");
    write_hbk(&path, &modern_toc(&toc_entries()), &modern_pages());
    hbk::load_catalog(&path).unwrap()
}

#[test]
fn legacy_container_yields_full_catalog() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = load_legacy(dir.path());

    let array = catalog.find_type("массив").unwrap();
    assert_eq!(array.header.name_en, "Array");
    assert_eq!(array.methods.len(), 1);
    assert_eq!(array.methods[0].header.name_ru, "Добавить");
    assert_eq!(
        array.methods[0].header.owner_type_name.as_deref(),
        Some("Массив")
    );
    assert_eq!(array.constructors.len(), 1);
    assert_eq!(array.constructors[0].parameters.len(), 1);

    // Globals
    let hits = catalog.by_key("сообщить");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].kind(), ApiType::Method);

    let date = catalog.by_key("currentdate");
    assert_eq!(date.len(), 1);
}

#[test]
fn legacy_enum_values_become_readonly_properties() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = load_legacy(dir.path());

    let comparison = catalog.find_type("видсравнения").unwrap();
    assert_eq!(comparison.header.name_en, "ComparisonType");
    assert_eq!(comparison.properties.len(), 1);

    let value = &comparison.properties[0];
    assert_eq!(value.header.name_ru, "Равно");
    assert_eq!(value.type_name, "ВидСравнения");
    assert!(value.readonly);
}

#[test]
fn modern_container_yields_full_catalog() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = load_modern(dir.path());

    let array = catalog.find_type("array").unwrap();
    assert_eq!(array.header.name_ru, "Массив");
    assert_eq!(array.methods.len(), 1);
    // Modern parameter table carries the optional marker
    let params = &array.methods[0].signatures[0].parameters;
    assert_eq!(params.len(), 1);
    assert!(params[0].optional);
    assert_eq!(params[0].type_name, "Произвольный");
}

#[test]
fn dialects_agree_on_shared_entities() {
    let dir = tempfile::tempdir().unwrap();
    let legacy = load_legacy(dir.path());
    let modern = load_modern(dir.path());

    for catalog in [&legacy, &modern] {
        let hits = catalog.by_key("массив");
        assert!(hits.iter().any(|d| d.kind() == ApiType::Type));
        let type_def = catalog.find_type("массив").unwrap();
        assert_eq!(type_def.header.name_en, "Array");

        let readonly_date = catalog.by_key("текущаядата");
        assert_eq!(readonly_date.len(), 1);
    }
}

#[test]
fn search_over_ingested_container() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("legacy.hbk");
    write_hbk(&path, &legacy_toc(&toc_entries()), &legacy_pages());

    let store = Arc::new(ContextStore::new(ContextSource::Hbk { hbk_path: path }));
    let services = Services::with_store(Config::default(), store);

    let results = services
        .search
        .search("ТаблицаЗначений", None, None)
        .unwrap();
    assert_eq!(results[0].name_en(), "ValueTable");

    let member = services.search.get_member("Массив", "Добавить").unwrap();
    assert_eq!(member.name_en(), "Add");

    let ctors = services.search.get_constructors("Массив").unwrap();
    assert_eq!(ctors.len(), 1);
}

#[test]
fn missing_page_skips_only_that_entity() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("partial.hbk");

    // Drop the array method page; the type itself must survive
    let pages: Vec<(&str, Vec<u8>)> = legacy_pages()
        .into_iter()
        .filter(|(name, _)| *name != "objects/array/methods/add.html")
        .collect();
    write_hbk(&path, &legacy_toc(&toc_entries()), &pages);

    let catalog = hbk::load_catalog(&path).unwrap();
    let array = catalog.find_type("массив").unwrap();
    assert!(array.methods.is_empty());
    assert_eq!(array.constructors.len(), 1);
}

#[test]
fn corrupt_container_aborts_every_query() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.hbk");
    std::fs::write(&path, vec![0u8; 64]).unwrap();

    let store = Arc::new(ContextStore::new(ContextSource::Hbk { hbk_path: path }));
    let services = Services::with_store(Config::default(), store);

    for _ in 0..2 {
        let err = services.search.search("Массив", None, None).unwrap_err();
        assert!(matches!(err, ContextError::IngestionAborted(_)));
    }
}
