//! In-memory catalog of platform API definitions.
//!
//! Built once by [`CatalogBuilder`] in two passes: materialize every
//! entity, then resolve `owner_type_name` back-references so members
//! hang off their owning type. Read-only afterwards.

use crate::core::types::{
    ConstructorSignature, Definition, DefinitionHeader, MethodDefinition, PlatformTypeDefinition,
    PropertyDefinition,
};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Immutable definition store keyed by case-folded name
#[derive(Debug, Default)]
pub struct Catalog {
    types: Vec<Arc<PlatformTypeDefinition>>,
    methods: Vec<Arc<MethodDefinition>>,
    properties: Vec<Arc<PropertyDefinition>>,
    types_by_key: HashMap<String, Arc<PlatformTypeDefinition>>,
    by_key: HashMap<String, Vec<Definition>>,
}

impl Catalog {
    /// Case-folded exact lookup across all kinds
    pub fn by_key(&self, key: &str) -> &[Definition] {
        self.by_key
            .get(&key.to_lowercase())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Resolve a type by either of its language names
    pub fn find_type(&self, name: &str) -> Option<Arc<PlatformTypeDefinition>> {
        self.types_by_key.get(&name.to_lowercase()).cloned()
    }

    /// Ordered methods + properties of a type
    pub fn members_of(&self, type_name: &str) -> Option<Vec<Definition>> {
        let type_def = self.find_type(type_name)?;
        let mut members: Vec<Definition> = Vec::new();
        members.extend(type_def.methods.iter().cloned().map(Definition::Method));
        members.extend(
            type_def
                .properties
                .iter()
                .cloned()
                .map(Definition::Property),
        );
        Some(members)
    }

    /// Constructor signatures of a type, in source-page order
    pub fn constructors_of(&self, type_name: &str) -> Option<Vec<ConstructorSignature>> {
        self.find_type(type_name).map(|t| t.constructors.clone())
    }

    /// Every definition: types first, then methods, then properties.
    /// Members appear here as well as on their owning type.
    pub fn all_definitions(&self) -> impl Iterator<Item = Definition> + '_ {
        self.types
            .iter()
            .cloned()
            .map(Definition::Type)
            .chain(self.methods.iter().cloned().map(Definition::Method))
            .chain(self.properties.iter().cloned().map(Definition::Property))
    }

    pub fn types(&self) -> &[Arc<PlatformTypeDefinition>] {
        &self.types
    }

    pub fn methods(&self) -> &[Arc<MethodDefinition>] {
        &self.methods
    }

    pub fn properties(&self) -> &[Arc<PropertyDefinition>] {
        &self.properties
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty() && self.methods.is_empty() && self.properties.is_empty()
    }

    fn index_definition(&mut self, def: Definition) {
        let ru = def.name_ru().to_lowercase();
        let en = def.name_en().to_lowercase();
        self.by_key.entry(ru.clone()).or_default().push(def.clone());
        if en != ru {
            self.by_key.entry(en).or_default().push(def);
        }
    }
}

/// Accumulates raw definitions from either ingestion path
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    types: Vec<TypeRecord>,
    global_methods: Vec<MethodDefinition>,
    global_properties: Vec<PropertyDefinition>,
    pending_methods: Vec<(String, MethodDefinition)>,
    pending_properties: Vec<(String, PropertyDefinition)>,
    pending_constructors: Vec<(String, ConstructorSignature)>,
}

/// A type plus its members, as delivered by an ingestion path
#[derive(Debug, Default)]
pub struct TypeRecord {
    pub header: DefinitionHeader,
    pub methods: Vec<MethodDefinition>,
    pub properties: Vec<PropertyDefinition>,
    pub constructors: Vec<ConstructorSignature>,
    pub collection_element_type: Option<String>,
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_type(&mut self, record: TypeRecord) {
        self.types.push(record);
    }

    pub fn add_global_method(&mut self, method: MethodDefinition) {
        self.global_methods.push(method);
    }

    pub fn add_global_property(&mut self, property: PropertyDefinition) {
        self.global_properties.push(property);
    }

    /// A method that names its owner; attached during `build`
    pub fn add_member_method(&mut self, owner: impl Into<String>, method: MethodDefinition) {
        self.pending_methods.push((owner.into(), method));
    }

    /// A property that names its owner; attached during `build`
    pub fn add_member_property(&mut self, owner: impl Into<String>, property: PropertyDefinition) {
        self.pending_properties.push((owner.into(), property));
    }

    /// A constructor that names its owner; attached during `build`
    pub fn add_constructor(&mut self, owner: impl Into<String>, ctor: ConstructorSignature) {
        self.pending_constructors.push((owner.into(), ctor));
    }

    pub fn build(mut self) -> Catalog {
        self.attach_pending();

        let mut catalog = Catalog::default();

        for mut record in std::mem::take(&mut self.types) {
            record.header.mirror_names();
            if record.header.name_ru.trim().is_empty() {
                tracing::warn!("Dropping type definition without a name");
                continue;
            }

            let type_name = record.header.name_ru.clone();
            let methods = freeze_members(record.methods, &type_name, "method");
            let properties = freeze_members(record.properties, &type_name, "property");

            let type_def = Arc::new(PlatformTypeDefinition {
                header: record.header,
                methods: methods.clone(),
                properties: properties.clone(),
                constructors: record.constructors,
                collection_element_type: record.collection_element_type,
            });

            catalog.methods.extend(methods);
            catalog.properties.extend(properties);

            let ru_key = type_def.header.name_ru.to_lowercase();
            let en_key = type_def.header.name_en.to_lowercase();
            catalog
                .types_by_key
                .insert(ru_key, Arc::clone(&type_def));
            catalog
                .types_by_key
                .insert(en_key, Arc::clone(&type_def));

            catalog.types.push(type_def);
        }

        for mut method in std::mem::take(&mut self.global_methods) {
            method.header.mirror_names();
            if method.header.name_ru.trim().is_empty() {
                tracing::warn!("Dropping method definition without a name");
                continue;
            }
            catalog.methods.push(Arc::new(method));
        }

        for mut property in std::mem::take(&mut self.global_properties) {
            property.header.mirror_names();
            if property.header.name_ru.trim().is_empty() {
                tracing::warn!("Dropping property definition without a name");
                continue;
            }
            catalog.properties.push(Arc::new(property));
        }

        let definitions: Vec<Definition> = catalog.all_definitions().collect();
        for def in definitions {
            catalog.index_definition(def);
        }

        tracing::info!(
            "Catalog built: {} types, {} methods, {} properties",
            catalog.types.len(),
            catalog.methods.len(),
            catalog.properties.len()
        );

        catalog
    }

    /// Second pass: route flat member records to their owning type.
    ///
    /// An unresolved owner leaves the catalog logically incomplete; the
    /// member stays globally searchable with its owner name intact.
    fn attach_pending(&mut self) {
        let mut key_to_index: HashMap<String, usize> = HashMap::new();
        for (i, record) in self.types.iter().enumerate() {
            let mut header = record.header.clone();
            header.mirror_names();
            key_to_index.insert(header.name_ru.to_lowercase(), i);
            key_to_index.insert(header.name_en.to_lowercase(), i);
        }

        for (owner, mut method) in std::mem::take(&mut self.pending_methods) {
            method.header.owner_type_name = Some(owner.clone());
            match key_to_index.get(&owner.to_lowercase()) {
                Some(&i) => self.types[i].methods.push(method),
                None => {
                    tracing::warn!("Method '{}' names unknown type '{}'", method.header.name_ru, owner);
                    self.global_methods.push(method);
                }
            }
        }

        for (owner, mut property) in std::mem::take(&mut self.pending_properties) {
            property.header.owner_type_name = Some(owner.clone());
            match key_to_index.get(&owner.to_lowercase()) {
                Some(&i) => self.types[i].properties.push(property),
                None => {
                    tracing::warn!(
                        "Property '{}' names unknown type '{}'",
                        property.header.name_ru,
                        owner
                    );
                    self.global_properties.push(property);
                }
            }
        }

        for (owner, ctor) in std::mem::take(&mut self.pending_constructors) {
            match key_to_index.get(&owner.to_lowercase()) {
                Some(&i) => self.types[i].constructors.push(ctor),
                None => tracing::warn!("Constructor '{}' names unknown type '{}'", ctor.name, owner),
            }
        }
    }
}

/// Normalize, dedup and freeze one member namespace of a type.
fn freeze_members<T: Member>(members: Vec<T>, type_name: &str, kind: &str) -> Vec<Arc<T>> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut frozen = Vec::with_capacity(members.len());

    for mut member in members {
        let header = member.header_mut();
        header.mirror_names();
        if header.name_ru.trim().is_empty() {
            tracing::warn!("Dropping unnamed {} of type '{}'", kind, type_name);
            continue;
        }
        if header.owner_type_name.is_none() {
            header.owner_type_name = Some(type_name.to_string());
        }
        if !seen.insert(header.name_ru.to_lowercase()) {
            tracing::warn!(
                "Duplicate {} '{}' on type '{}', keeping the first",
                kind,
                header.name_ru,
                type_name
            );
            continue;
        }
        frozen.push(Arc::new(member));
    }

    frozen
}

trait Member {
    fn header_mut(&mut self) -> &mut DefinitionHeader;
}

impl Member for MethodDefinition {
    fn header_mut(&mut self) -> &mut DefinitionHeader {
        &mut self.header
    }
}

impl Member for PropertyDefinition {
    fn header_mut(&mut self) -> &mut DefinitionHeader {
        &mut self.header
    }
}
