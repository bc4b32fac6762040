//! Domain entities for the 1C platform API catalog.
//!
//! Everything here is immutable once built: the catalog wraps each
//! definition in an `Arc` and hands out shared handles. A member
//! definition appears once in memory; the owning type and the global
//! catalog hold the same allocation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Kind tag carried by every cataloged API element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiType {
    Method,
    Property,
    Type,
    Constructor,
}

impl ApiType {
    /// Parse a user-supplied kind string (Russian or English)
    pub fn from_string(s: &str) -> Option<ApiType> {
        match s.trim().to_lowercase().as_str() {
            "method" | "метод" | "функция" => Some(ApiType::Method),
            "property" | "свойство" => Some(ApiType::Property),
            "type" | "тип" | "object" | "объект" => Some(ApiType::Type),
            "constructor" | "конструктор" => Some(ApiType::Constructor),
            _ => None,
        }
    }

    /// Russian display name, as shown in 1C documentation
    pub fn display_name(&self) -> &'static str {
        match self {
            ApiType::Method => "Метод",
            ApiType::Property => "Свойство",
            ApiType::Type => "Тип",
            ApiType::Constructor => "Конструктор",
        }
    }
}

impl fmt::Display for ApiType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ApiType::Method => "method",
            ApiType::Property => "property",
            ApiType::Type => "type",
            ApiType::Constructor => "constructor",
        };
        f.write_str(s)
    }
}

/// Shared header fields of every definition
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DefinitionHeader {
    pub name_ru: String,
    pub name_en: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_type_name: Option<String>,
}

impl DefinitionHeader {
    /// Build a header, mirroring a missing language name from the other.
    pub fn bilingual(name_ru: impl Into<String>, name_en: impl Into<String>) -> Self {
        let mut header = DefinitionHeader {
            name_ru: name_ru.into(),
            name_en: name_en.into(),
            ..Default::default()
        };
        header.mirror_names();
        header
    }

    /// Populate an empty language name from the other one.
    pub fn mirror_names(&mut self) {
        if self.name_ru.trim().is_empty() {
            self.name_ru = self.name_en.clone();
        }
        if self.name_en.trim().is_empty() {
            self.name_en = self.name_ru.clone();
        }
    }

    /// Canonical lookup key: the case-folded Russian name
    pub fn key(&self) -> String {
        self.name_ru.to_lowercase()
    }

    /// True when the case-folded `needle` equals either language name
    pub fn matches_name(&self, folded: &str) -> bool {
        self.name_ru.to_lowercase() == folded || self.name_en.to_lowercase() == folded
    }

    /// True when either case-folded language name starts with `prefix`
    pub fn name_starts_with(&self, folded_prefix: &str) -> bool {
        self.name_ru.to_lowercase().starts_with(folded_prefix)
            || self.name_en.to_lowercase().starts_with(folded_prefix)
    }
}

/// One documented parameter of a signature
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParameterDefinition {
    pub name: String,
    pub type_name: String,
    pub description: String,
    pub optional: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
}

/// One call variant of a method
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Signature {
    pub name: String,
    pub description: String,
    pub parameters: Vec<ParameterDefinition>,
}

/// Same shape as [`Signature`]; semantically constructs the owning type.
pub type ConstructorSignature = Signature;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MethodDefinition {
    #[serde(flatten)]
    pub header: DefinitionHeader,
    pub signatures: Vec<Signature>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PropertyDefinition {
    #[serde(flatten)]
    pub header: DefinitionHeader,
    pub type_name: String,
    pub readonly: bool,
}

/// Top-level TYPE entity aggregating its members
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PlatformTypeDefinition {
    #[serde(flatten)]
    pub header: DefinitionHeader,
    pub methods: Vec<Arc<MethodDefinition>>,
    pub properties: Vec<Arc<PropertyDefinition>>,
    pub constructors: Vec<ConstructorSignature>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection_element_type: Option<String>,
}

/// Shared handle to any cataloged definition
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Definition {
    Method(Arc<MethodDefinition>),
    Property(Arc<PropertyDefinition>),
    Type(Arc<PlatformTypeDefinition>),
}

impl Definition {
    pub fn kind(&self) -> ApiType {
        match self {
            Definition::Method(_) => ApiType::Method,
            Definition::Property(_) => ApiType::Property,
            Definition::Type(_) => ApiType::Type,
        }
    }

    pub fn header(&self) -> &DefinitionHeader {
        match self {
            Definition::Method(m) => &m.header,
            Definition::Property(p) => &p.header,
            Definition::Type(t) => &t.header,
        }
    }

    pub fn name_ru(&self) -> &str {
        &self.header().name_ru
    }

    pub fn name_en(&self) -> &str {
        &self.header().name_en
    }

    /// Composite identity used for result deduplication
    pub fn dedup_key(&self) -> (ApiType, String, Option<String>) {
        let header = self.header();
        (
            self.kind(),
            header.name_ru.to_lowercase(),
            header.owner_type_name.clone(),
        )
    }
}

/// `search` tool response record
#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub count: usize,
    pub results: Vec<Definition>,
}

/// `get_members` tool response record
#[derive(Debug, Clone, Serialize)]
pub struct MembersResponse {
    pub type_name: String,
    pub count: usize,
    pub members: Vec<Definition>,
}

/// `get_constructors` tool response record
#[derive(Debug, Clone, Serialize)]
pub struct ConstructorsResponse {
    pub type_name: String,
    pub count: usize,
    pub constructors: Vec<ConstructorSignature>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_type_from_string() {
        assert_eq!(ApiType::from_string("method"), Some(ApiType::Method));
        assert_eq!(ApiType::from_string("Метод"), Some(ApiType::Method));
        assert_eq!(ApiType::from_string("СВОЙСТВО"), Some(ApiType::Property));
        assert_eq!(ApiType::from_string("object"), Some(ApiType::Type));
        assert_eq!(
            ApiType::from_string("конструктор"),
            Some(ApiType::Constructor)
        );
        assert_eq!(ApiType::from_string("unknown"), None);
    }

    #[test]
    fn test_header_mirrors_missing_names() {
        let header = DefinitionHeader::bilingual("ТаблицаЗначений", "");
        assert_eq!(header.name_ru, "ТаблицаЗначений");
        assert_eq!(header.name_en, "ТаблицаЗначений");

        let header = DefinitionHeader::bilingual("", "ValueTable");
        assert_eq!(header.name_ru, "ValueTable");
        assert_eq!(header.name_en, "ValueTable");
    }

    #[test]
    fn test_header_matches_either_language() {
        let header = DefinitionHeader::bilingual("ТаблицаЗначений", "ValueTable");
        assert!(header.matches_name("таблицазначений"));
        assert!(header.matches_name("valuetable"));
        assert!(!header.matches_name("массив"));
    }

    #[test]
    fn test_definition_kind_and_dedup_key() {
        let method = Arc::new(MethodDefinition {
            header: DefinitionHeader {
                name_ru: "Добавить".to_string(),
                name_en: "Add".to_string(),
                description: String::new(),
                owner_type_name: Some("ТаблицаЗначений".to_string()),
            },
            signatures: vec![],
            return_type: None,
        });
        let def = Definition::Method(method);
        assert_eq!(def.kind(), ApiType::Method);
        let (kind, name, owner) = def.dedup_key();
        assert_eq!(kind, ApiType::Method);
        assert_eq!(name, "добавить");
        assert_eq!(owner.as_deref(), Some("ТаблицаЗначений"));
    }

    #[test]
    fn test_definition_serializes_with_kind_tag() {
        let prop = Arc::new(PropertyDefinition {
            header: DefinitionHeader::bilingual("Количество", "Count"),
            type_name: "Число".to_string(),
            readonly: true,
        });
        let json = serde_json::to_value(Definition::Property(prop)).unwrap();
        assert_eq!(json["kind"], "property");
        assert_eq!(json["name_ru"], "Количество");
        assert_eq!(json["name_en"], "Count");
        assert_eq!(json["readonly"], true);
    }
}
