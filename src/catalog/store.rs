//! Lazy one-shot bootstrap of the catalog and its indexes.
//!
//! The snapshot is built on first use; concurrent first callers block
//! until the single builder finishes, after which reads take a shared
//! handle with no locking. A failed ingest is cached; the catalog is
//! never retried within a process.

use crate::catalog::Catalog;
use crate::core::error::{ContextError, Result};
use crate::search::indexes::SearchIndexes;
use once_cell::sync::OnceCell;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

/// Where the catalog comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContextSource {
    /// A resolved path to `shcntx_ru.hbk`
    Hbk { hbk_path: PathBuf },
    /// A directory of pre-exported JSON files
    Json { dir: PathBuf },
}

/// The immutable state every query runs against
#[derive(Debug)]
pub struct ContextSnapshot {
    pub catalog: Catalog,
    pub indexes: SearchIndexes,
}

type LoadResult = std::result::Result<Arc<ContextSnapshot>, Arc<ContextError>>;

pub struct ContextStore {
    source: Option<ContextSource>,
    cell: OnceCell<LoadResult>,
}

impl ContextStore {
    pub fn new(source: ContextSource) -> Self {
        Self {
            source: Some(source),
            cell: OnceCell::new(),
        }
    }

    /// A store published from an already-built catalog.
    pub fn preloaded(catalog: Catalog) -> Self {
        let cell = OnceCell::new();
        let indexes = SearchIndexes::build(catalog.all_definitions());
        cell.set(Ok(Arc::new(ContextSnapshot { catalog, indexes })))
            .ok();
        Self { source: None, cell }
    }

    /// The published snapshot, bootstrapping on first use.
    pub fn snapshot(&self) -> Result<Arc<ContextSnapshot>> {
        match self.cell.get_or_init(|| self.load()) {
            Ok(snapshot) => Ok(Arc::clone(snapshot)),
            Err(e) => Err(ContextError::IngestionAborted(e.to_string())),
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.cell.get(), Some(Ok(_)))
    }

    fn load(&self) -> LoadResult {
        let source = match &self.source {
            Some(source) => source,
            None => {
                return Err(Arc::new(ContextError::IngestionAborted(
                    "store has no ingestion source".to_string(),
                )))
            }
        };

        let started = Instant::now();
        let catalog = match source {
            ContextSource::Hbk { hbk_path } => crate::hbk::load_catalog(hbk_path),
            ContextSource::Json { dir } => crate::import::json::load_catalog(dir),
        };

        match catalog {
            Ok(catalog) => {
                let indexes = SearchIndexes::build(catalog.all_definitions());
                tracing::info!(
                    "Context bootstrap finished in {} ms ({} index keys)",
                    started.elapsed().as_millis(),
                    indexes.hash.len()
                );
                Ok(Arc::new(ContextSnapshot { catalog, indexes }))
            }
            Err(e) => {
                tracing::error!("Context ingestion failed: {}", e);
                Err(Arc::new(e))
            }
        }
    }
}
