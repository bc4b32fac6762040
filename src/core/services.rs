//! Unified service container.
//!
//! Wires configuration to the context store and search service; all
//! adapters share this one struct.

use crate::catalog::{ContextSource, ContextStore, VersionDiscovery};
use crate::core::config::{Config, DataSource};
use crate::core::error::{ContextError, Result};
use crate::core::version::PlatformVersion;
use crate::search::SearchService;
use std::sync::Arc;

#[derive(Clone)]
pub struct Services {
    /// Lazily-bootstrapped catalog snapshot
    pub store: Arc<ContextStore>,

    /// Validated search operations
    pub search: Arc<SearchService>,

    /// Application configuration
    pub config: Arc<Config>,
}

impl Services {
    /// Create services from configuration.
    ///
    /// For the HBK source this resolves the platform version up front,
    /// so the store holds a concrete help-file path before the first
    /// query triggers ingestion.
    pub fn new(config: Config) -> Result<Self> {
        let source = resolve_source(&config)?;
        Ok(Self::with_source(config, source))
    }

    /// Create services around an already-resolved source.
    pub fn with_source(config: Config, source: ContextSource) -> Self {
        let store = Arc::new(ContextStore::new(source));
        Self::assemble(config, store)
    }

    /// Create services over a pre-built store (tests, JSON pre-loads).
    pub fn with_store(config: Config, store: Arc<ContextStore>) -> Self {
        Self::assemble(config, store)
    }

    fn assemble(config: Config, store: Arc<ContextStore>) -> Self {
        let search = Arc::new(SearchService::new(
            Arc::clone(&store),
            config.search.default_limit,
            config.search.max_limit,
        ));

        Self {
            store,
            search,
            config: Arc::new(config),
        }
    }
}

fn resolve_source(config: &Config) -> Result<ContextSource> {
    match config.platform.data_source {
        DataSource::Json => {
            let dir = config.platform.json_path.clone().ok_or_else(|| {
                ContextError::ConfigError("JSON data source requires json_path".to_string())
            })?;
            Ok(ContextSource::Json { dir })
        }
        DataSource::Hbk => {
            let requested = match &config.platform.version {
                Some(raw) => Some(PlatformVersion::parse(raw).ok_or_else(|| {
                    ContextError::ConfigError(format!("Cannot parse platform version '{raw}'"))
                })?),
                None => None,
            };

            let resolved = VersionDiscovery::new()
                .resolve(&config.platform.path, requested)
                .ok_or_else(|| {
                    ContextError::ConfigError(format!(
                        "No platform help files found under '{}'",
                        config.platform.path.display()
                    ))
                })?;

            tracing::info!(
                "Resolved platform version {} at {}",
                resolved
                    .version
                    .map_or_else(|| "unknown".to_string(), |v| v.to_string()),
                resolved.hbk_path.display()
            );
            Ok(ContextSource::Hbk {
                hbk_path: resolved.hbk_path,
            })
        }
    }
}
