//! Shared catalog fixtures.

use bsl_context::catalog::{Catalog, CatalogBuilder, ContextStore, TypeRecord};
use bsl_context::core::config::Config;
use bsl_context::core::services::Services;
use bsl_context::core::types::{
    DefinitionHeader, MethodDefinition, ParameterDefinition, PropertyDefinition, Signature,
};
use std::sync::Arc;

fn method(name_ru: &str, name_en: &str, description: &str) -> MethodDefinition {
    MethodDefinition {
        header: DefinitionHeader {
            name_ru: name_ru.to_string(),
            name_en: name_en.to_string(),
            description: description.to_string(),
            owner_type_name: None,
        },
        signatures: vec![Signature {
            name: name_ru.to_string(),
            description: String::new(),
            parameters: vec![],
        }],
        return_type: None,
    }
}

fn property(name_ru: &str, name_en: &str, type_name: &str) -> PropertyDefinition {
    PropertyDefinition {
        header: DefinitionHeader {
            name_ru: name_ru.to_string(),
            name_en: name_en.to_string(),
            description: String::new(),
            owner_type_name: None,
        },
        type_name: type_name.to_string(),
        readonly: false,
    }
}

/// The sample catalog the search suites run against.
pub fn sample_catalog() -> Catalog {
    let mut builder = CatalogBuilder::new();

    builder.add_type(TypeRecord {
        header: DefinitionHeader::bilingual("ТаблицаЗначений", "ValueTable"),
        methods: vec![
            method("Добавить", "Add", "Добавить строку"),
            method("Удалить", "Delete", "Удалить строку"),
            method("Найти", "Find", "Найти значение"),
        ],
        properties: vec![
            property("Количество", "Count", "Число"),
            property("Колонки", "Columns", "КоллекцияКолонок"),
        ],
        constructors: vec![Signature {
            name: "ТаблицаЗначений".to_string(),
            description: "Создает пустую таблицу".to_string(),
            parameters: vec![],
        }],
        collection_element_type: Some("СтрокаТаблицыЗначений".to_string()),
    });

    builder.add_type(TypeRecord {
        header: DefinitionHeader::bilingual("СправочникОбъект", "CatalogObject"),
        methods: vec![method("Записать", "Write", "Записать объект")],
        properties: vec![property("Ссылка", "Ref", "СправочникСсылка")],
        ..Default::default()
    });

    builder.add_type(TypeRecord {
        header: DefinitionHeader::bilingual("Массив", "Array"),
        methods: vec![
            method("Добавить", "Add", "Добавить элемент"),
            method("Количество", "Count", "Получить количество"),
        ],
        constructors: vec![Signature {
            name: "Массив".to_string(),
            description: "Новый Массив(<КоличествоЭлементов>)".to_string(),
            parameters: vec![ParameterDefinition {
                name: "КоличествоЭлементов".to_string(),
                type_name: "Число".to_string(),
                description: "Начальное число элементов".to_string(),
                optional: true,
                default_value: None,
            }],
        }],
        ..Default::default()
    });

    builder.add_global_method(method(
        "НайтиПоСсылке",
        "FindByRef",
        "Поиск элемента по ссылке",
    ));
    builder.add_global_method(method("НайтиПоКоду", "FindByCode", "Поиск по коду"));
    builder.add_global_method(method(
        "НайтиПоНаименованию",
        "FindByDescription",
        "Поиск по наименованию",
    ));
    builder.add_global_method(method("Сообщить", "Message", "Вывод сообщения"));

    builder.add_global_property(property("ТекущаяДата", "CurrentDate", "Дата"));

    builder.build()
}

/// Services over the sample catalog.
pub fn sample_services() -> Services {
    let store = Arc::new(ContextStore::preloaded(sample_catalog()));
    Services::with_store(Config::default(), store)
}
