//! Validated search operations over the lazily-built snapshot.

use crate::catalog::ContextStore;
use crate::core::error::{ContextError, Result};
use crate::core::types::{ApiType, ConstructorSignature, Definition};
use crate::search::engine::SearchEngine;
use crate::search::strategies::SearchContext;
use std::sync::Arc;

pub struct SearchService {
    store: Arc<ContextStore>,
    engine: SearchEngine,
    default_limit: usize,
    max_limit: usize,
}

impl SearchService {
    pub fn new(store: Arc<ContextStore>, default_limit: usize, max_limit: usize) -> Self {
        Self {
            store,
            engine: SearchEngine::new(),
            default_limit,
            max_limit,
        }
    }

    /// Fuzzy lookup across the whole catalog.
    pub fn search(
        &self,
        query: &str,
        kind: Option<ApiType>,
        limit: Option<i64>,
    ) -> Result<Vec<Definition>> {
        let query = query.trim();
        if query.is_empty() {
            return Err(ContextError::InvalidQuery(
                "Search query cannot be empty".to_string(),
            ));
        }

        let limit = match limit {
            None => self.default_limit,
            Some(l) if l <= 0 => {
                return Err(ContextError::InvalidQuery(
                    "Limit must be positive".to_string(),
                ))
            }
            Some(l) => (l as usize).min(self.max_limit),
        };

        let snapshot = self.store.snapshot()?;
        let ctx = SearchContext {
            catalog: &snapshot.catalog,
            indexes: &snapshot.indexes,
        };
        Ok(self.engine.search(query, kind, limit, &ctx))
    }

    /// Exact lookup of a single definition by name and kind.
    pub fn info(&self, name: &str, kind: ApiType) -> Result<Definition> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ContextError::InvalidQuery(
                "Name cannot be empty".to_string(),
            ));
        }

        let snapshot = self.store.snapshot()?;
        snapshot
            .catalog
            .by_key(name)
            .iter()
            .find(|d| d.kind() == kind)
            .cloned()
            .ok_or_else(|| {
                ContextError::NotFound(format!("{} '{}' not found", kind.display_name(), name))
            })
    }

    /// A single member of a type, by exact name in either language.
    pub fn get_member(&self, type_name: &str, member_name: &str) -> Result<Definition> {
        let type_name = type_name.trim();
        let member_name = member_name.trim();
        if type_name.is_empty() {
            return Err(ContextError::InvalidQuery(
                "Type name cannot be empty".to_string(),
            ));
        }
        if member_name.is_empty() {
            return Err(ContextError::InvalidQuery(
                "Member name cannot be empty".to_string(),
            ));
        }

        let snapshot = self.store.snapshot()?;
        let members = snapshot
            .catalog
            .members_of(type_name)
            .ok_or_else(|| ContextError::NotFound(format!("Type '{type_name}' not found")))?;

        let folded = member_name.to_lowercase();
        members
            .into_iter()
            .find(|m| m.header().matches_name(&folded))
            .ok_or_else(|| {
                ContextError::NotFound(format!(
                    "Member '{member_name}' not found in type '{type_name}'"
                ))
            })
    }

    /// All methods and properties of a type.
    pub fn get_members(&self, type_name: &str) -> Result<Vec<Definition>> {
        let type_name = type_name.trim();
        if type_name.is_empty() {
            return Err(ContextError::InvalidQuery(
                "Type name cannot be empty".to_string(),
            ));
        }

        let snapshot = self.store.snapshot()?;
        snapshot
            .catalog
            .members_of(type_name)
            .ok_or_else(|| ContextError::NotFound(format!("Type '{type_name}' not found")))
    }

    /// Constructor signatures of a type, in source order.
    pub fn get_constructors(&self, type_name: &str) -> Result<Vec<ConstructorSignature>> {
        let type_name = type_name.trim();
        if type_name.is_empty() {
            return Err(ContextError::InvalidQuery(
                "Type name cannot be empty".to_string(),
            ));
        }

        let snapshot = self.store.snapshot()?;
        snapshot
            .catalog
            .constructors_of(type_name)
            .ok_or_else(|| ContextError::NotFound(format!("Type '{type_name}' not found")))
    }
}
