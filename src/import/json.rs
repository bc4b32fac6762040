//! Alternative ingestion path from pre-exported JSON files.
//!
//! Reads a directory holding `types.json`, `methods.json`,
//! `properties.json`, `constructors.json` (each an array of records
//! mirroring the domain entities), or a combined `context.json`.
//! Exporters disagree on field spelling, so records accept the common
//! aliases.

use crate::catalog::{Catalog, CatalogBuilder, TypeRecord};
use crate::core::error::Result;
use crate::core::types::{
    ConstructorSignature, DefinitionHeader, MethodDefinition, ParameterDefinition,
    PropertyDefinition, Signature,
};
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;

/// Load a catalog from a JSON export directory.
pub fn load_catalog(dir: &Path) -> Result<Catalog> {
    tracing::info!("Loading platform context from JSON: {}", dir.display());

    let mut builder = CatalogBuilder::new();
    let mut loaded_any = false;

    let types_file = dir.join("types.json");
    if types_file.exists() {
        let records: Vec<TypeJson> = read_records(&types_file, "types")?;
        tracing::info!("Loaded {} types from JSON", records.len());
        for record in records {
            builder.add_type(record.into_record());
        }
        loaded_any = true;
    }

    let methods_file = dir.join("methods.json");
    if methods_file.exists() {
        let records: Vec<MethodJson> = read_records(&methods_file, "methods")?;
        tracing::info!("Loaded {} methods from JSON", records.len());
        for record in records {
            add_method(&mut builder, record);
        }
        loaded_any = true;
    }

    let properties_file = dir.join("properties.json");
    if properties_file.exists() {
        let records: Vec<PropertyJson> = read_records(&properties_file, "properties")?;
        tracing::info!("Loaded {} properties from JSON", records.len());
        for record in records {
            add_property(&mut builder, record);
        }
        loaded_any = true;
    }

    let constructors_file = dir.join("constructors.json");
    if constructors_file.exists() {
        let records: Vec<ConstructorJson> = read_records(&constructors_file, "constructors")?;
        tracing::info!("Loaded {} constructors from JSON", records.len());
        for record in records {
            builder.add_constructor(record.owner.clone(), record.into_signature());
        }
        loaded_any = true;
    }

    // Single combined file, used when the split files are absent
    let combined_file = dir.join("context.json");
    if !loaded_any && combined_file.exists() {
        let combined: CombinedJson =
            serde_json::from_str(&std::fs::read_to_string(&combined_file)?)?;
        tracing::info!(
            "Loaded combined JSON: {} types, {} methods, {} properties",
            combined.types.len(),
            combined.methods.len(),
            combined.properties.len()
        );
        for record in combined.types {
            builder.add_type(record.into_record());
        }
        for record in combined.methods {
            add_method(&mut builder, record);
        }
        for record in combined.properties {
            add_property(&mut builder, record);
        }
        loaded_any = true;
    }

    if !loaded_any {
        tracing::warn!("No JSON context files found in {}", dir.display());
    }

    Ok(builder.build())
}

fn add_method(builder: &mut CatalogBuilder, record: MethodJson) {
    match record.owner_type_name.clone().filter(|o| !o.is_empty()) {
        Some(owner) => builder.add_member_method(owner, record.into_definition()),
        None => builder.add_global_method(record.into_definition()),
    }
}

fn add_property(builder: &mut CatalogBuilder, record: PropertyJson) {
    match record.owner_type_name.clone().filter(|o| !o.is_empty()) {
        Some(owner) => builder.add_member_property(owner, record.into_definition()),
        None => builder.add_global_property(record.into_definition()),
    }
}

/// A record file is either a bare array or `{"<key>": [...]}`.
fn read_records<T: serde::de::DeserializeOwned>(path: &Path, key: &str) -> Result<Vec<T>> {
    let contents = std::fs::read_to_string(path)?;
    let value: Value = serde_json::from_str(&contents)?;

    let array = match value {
        Value::Array(_) => value,
        Value::Object(mut map) => map.remove(key).unwrap_or(Value::Array(Vec::new())),
        _ => Value::Array(Vec::new()),
    };

    Ok(serde_json::from_value(array)?)
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct MethodJson {
    #[serde(alias = "name")]
    name_ru: String,
    #[serde(alias = "nameEn")]
    name_en: String,
    description: String,
    #[serde(alias = "returnType")]
    return_type: Option<String>,
    signatures: Vec<SignatureJson>,
    #[serde(alias = "owner", alias = "ownerTypeName")]
    owner_type_name: Option<String>,
}

impl MethodJson {
    fn into_definition(self) -> MethodDefinition {
        MethodDefinition {
            header: DefinitionHeader {
                name_ru: self.name_ru,
                name_en: self.name_en,
                description: self.description,
                owner_type_name: None,
            },
            signatures: self
                .signatures
                .into_iter()
                .map(SignatureJson::into_signature)
                .collect(),
            return_type: self.return_type.filter(|t| !t.is_empty()),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PropertyJson {
    #[serde(alias = "name")]
    name_ru: String,
    #[serde(alias = "nameEn")]
    name_en: String,
    description: String,
    #[serde(alias = "type", alias = "property_type")]
    type_name: String,
    #[serde(alias = "readOnly", alias = "is_read_only")]
    readonly: bool,
    #[serde(alias = "owner", alias = "ownerTypeName")]
    owner_type_name: Option<String>,
}

impl PropertyJson {
    fn into_definition(self) -> PropertyDefinition {
        PropertyDefinition {
            header: DefinitionHeader {
                name_ru: self.name_ru,
                name_en: self.name_en,
                description: self.description,
                owner_type_name: None,
            },
            type_name: self.type_name,
            readonly: self.readonly,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct TypeJson {
    #[serde(alias = "name")]
    name_ru: String,
    #[serde(alias = "nameEn")]
    name_en: String,
    description: String,
    methods: Vec<MethodJson>,
    properties: Vec<PropertyJson>,
    constructors: Vec<SignatureJson>,
    #[serde(alias = "collectionElementType")]
    collection_element_type: Option<String>,
}

impl TypeJson {
    fn into_record(self) -> TypeRecord {
        TypeRecord {
            header: DefinitionHeader {
                name_ru: self.name_ru,
                name_en: self.name_en,
                description: self.description,
                owner_type_name: None,
            },
            methods: self
                .methods
                .into_iter()
                .map(MethodJson::into_definition)
                .collect(),
            properties: self
                .properties
                .into_iter()
                .map(PropertyJson::into_definition)
                .collect(),
            constructors: self
                .constructors
                .into_iter()
                .map(SignatureJson::into_signature)
                .collect(),
            collection_element_type: self.collection_element_type.filter(|t| !t.is_empty()),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SignatureJson {
    name: String,
    description: String,
    parameters: Vec<ParameterJson>,
}

impl SignatureJson {
    fn into_signature(self) -> Signature {
        Signature {
            name: self.name,
            description: self.description,
            parameters: self
                .parameters
                .into_iter()
                .map(ParameterJson::into_definition)
                .collect(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ParameterJson {
    name: String,
    #[serde(alias = "type")]
    type_name: String,
    description: String,
    optional: bool,
    #[serde(alias = "defaultValue")]
    default_value: Option<String>,
}

impl ParameterJson {
    fn into_definition(self) -> ParameterDefinition {
        ParameterDefinition {
            name: self.name,
            type_name: self.type_name,
            description: self.description,
            optional: self.optional,
            default_value: self.default_value,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConstructorJson {
    #[serde(alias = "owner_type_name", alias = "type_name", alias = "type")]
    owner: String,
    name: String,
    description: String,
    parameters: Vec<ParameterJson>,
}

impl ConstructorJson {
    fn into_signature(self) -> ConstructorSignature {
        ConstructorSignature {
            name: self.name,
            description: self.description,
            parameters: self
                .parameters
                .into_iter()
                .map(ParameterJson::into_definition)
                .collect(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CombinedJson {
    types: Vec<TypeJson>,
    methods: Vec<MethodJson>,
    properties: Vec<PropertyJson>,
}
