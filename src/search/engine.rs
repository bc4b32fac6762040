//! Strategy cascade: concatenate, filter, deduplicate, truncate.

use crate::core::types::{ApiType, Definition};
use crate::search::strategies::{default_strategies, SearchContext, SearchStrategy};
use std::collections::HashSet;

pub struct SearchEngine {
    strategies: Vec<Box<dyn SearchStrategy>>,
}

impl SearchEngine {
    pub fn new() -> Self {
        Self {
            strategies: default_strategies(),
        }
    }

    /// Run every strategy in priority order and compose the results.
    ///
    /// Strategy outputs are concatenated as-is: ordering across
    /// strategies is by priority, not by any relevance score. The
    /// first occurrence of a `(kind, name, owner)` identity wins.
    pub fn search(
        &self,
        query: &str,
        kind_filter: Option<ApiType>,
        limit: usize,
        ctx: &SearchContext<'_>,
    ) -> Vec<Definition> {
        let mut results: Vec<Definition> = Vec::new();

        for strategy in &self.strategies {
            let hits = strategy.search(query, ctx);
            if !hits.is_empty() {
                tracing::debug!(
                    strategy = strategy.name(),
                    hits = hits.len(),
                    "strategy produced results"
                );
            }
            results.extend(hits);
        }

        if let Some(kind) = kind_filter {
            results.retain(|d| d.kind() == kind);
        }

        let mut seen = HashSet::new();
        results.retain(|d| seen.insert(d.dedup_key()));

        results.truncate(limit);
        results
    }
}

impl Default for SearchEngine {
    fn default() -> Self {
        Self::new()
    }
}
