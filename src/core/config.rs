//! Configuration management for the context service.
//!
//! Configuration is loaded from a TOML file and overridden by
//! `BSL_CONTEXT_*` environment variables, with defaults for all
//! settings.

use crate::core::error::{ContextError, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Which ingestion path feeds the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    Hbk,
    Json,
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub platform: PlatformConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

/// Platform installation configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlatformConfig {
    /// Root of the 1C installation (scanned for version directories)
    #[serde(default)]
    pub path: PathBuf,

    /// Requested platform version; latest available when unset
    #[serde(default)]
    pub version: Option<String>,

    /// Ingestion path: read the HBK container or pre-exported JSON
    #[serde(default = "default_data_source")]
    pub data_source: DataSource,

    /// Directory with exported JSON files (required for `json` source)
    #[serde(default)]
    pub json_path: Option<PathBuf>,
}

/// Search configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchConfig {
    /// Number of results when the caller does not pass a limit
    #[serde(default = "default_limit")]
    pub default_limit: usize,

    /// Hard cap on results per query
    #[serde(default = "default_max_limit")]
    pub max_limit: usize,
}

fn default_data_source() -> DataSource {
    DataSource::Hbk
}

fn default_limit() -> usize {
    50
}

fn default_max_limit() -> usize {
    50
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::new(),
            version: None,
            data_source: default_data_source(),
            json_path: None,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            max_limit: default_max_limit(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| ContextError::ConfigError(format!("Failed to read config file: {e}")))?;

        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load config with priority: env vars > TOML > defaults
    ///
    /// `BSL_CONTEXT_CONFIG` names an explicit file; otherwise
    /// `./bsl-context.toml` is used when present.
    pub fn load() -> Result<Self> {
        let mut config = if let Ok(config_path) = env::var("BSL_CONTEXT_CONFIG") {
            Self::from_file(config_path)?
        } else if Path::new("bsl-context.toml").exists() {
            Self::from_file("bsl-context.toml")?
        } else {
            Self::default()
        };

        config.merge_env();
        config.validate()?;

        Ok(config)
    }

    /// Merge configuration with environment variables
    pub fn merge_env(&mut self) {
        if let Ok(path) = env::var("BSL_CONTEXT_PLATFORM_PATH") {
            self.platform.path = PathBuf::from(path);
        }
        if let Ok(version) = env::var("BSL_CONTEXT_PLATFORM_VERSION") {
            self.platform.version = Some(version);
        }
        if let Ok(source) = env::var("BSL_CONTEXT_DATA_SOURCE") {
            match source.to_lowercase().as_str() {
                "hbk" => self.platform.data_source = DataSource::Hbk,
                "json" => self.platform.data_source = DataSource::Json,
                other => tracing::warn!("Ignoring unknown data source '{}'", other),
            }
        }
        if let Ok(json_path) = env::var("BSL_CONTEXT_JSON_PATH") {
            self.platform.json_path = Some(PathBuf::from(json_path));
        }
        if let Ok(limit) = env::var("BSL_CONTEXT_DEFAULT_LIMIT") {
            if let Ok(l) = limit.parse() {
                self.search.default_limit = l;
            }
        }
        if let Ok(limit) = env::var("BSL_CONTEXT_MAX_LIMIT") {
            if let Ok(l) = limit.parse() {
                self.search.max_limit = l;
            }
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.search.default_limit == 0 {
            return Err(ContextError::ConfigError(
                "Default limit must be non-zero".to_string(),
            ));
        }

        if self.search.default_limit > self.search.max_limit {
            return Err(ContextError::ConfigError(
                "Default limit cannot exceed max limit".to_string(),
            ));
        }

        match self.platform.data_source {
            DataSource::Json => {
                if self.platform.json_path.is_none() {
                    return Err(ContextError::ConfigError(
                        "JSON data source requires json_path".to_string(),
                    ));
                }
            }
            DataSource::Hbk => {
                if self.platform.path.as_os_str().is_empty() {
                    return Err(ContextError::ConfigError(
                        "HBK data source requires platform path".to_string(),
                    ));
                }
            }
        }

        Ok(())
    }

    /// Log configuration at startup
    pub fn log_config(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Platform path: {:?}", self.platform.path);
        tracing::info!(
            "  Platform version: {}",
            self.platform.version.as_deref().unwrap_or("latest")
        );
        tracing::info!("  Data source: {:?}", self.platform.data_source);
        if let Some(json_path) = &self.platform.json_path {
            tracing::info!("  JSON path: {:?}", json_path);
        }
        tracing::info!("  Default limit: {}", self.search.default_limit);
        tracing::info!("  Max limit: {}", self.search.max_limit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.search.default_limit, 50);
        assert_eq!(config.search.max_limit, 50);
        assert_eq!(config.platform.data_source, DataSource::Hbk);
        assert!(config.platform.version.is_none());
    }

    #[test]
    fn test_validation_requires_platform_path_for_hbk() {
        let config = Config::default();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.platform.path = PathBuf::from("/opt/1cv8");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_requires_json_path_for_json() {
        let mut config = Config::default();
        config.platform.data_source = DataSource::Json;
        assert!(config.validate().is_err());

        config.platform.json_path = Some(PathBuf::from("/data/export"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_zero_limit() {
        let mut config = Config::default();
        config.platform.path = PathBuf::from("/opt/1cv8");
        config.search.default_limit = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_default_above_max() {
        let mut config = Config::default();
        config.platform.path = PathBuf::from("/opt/1cv8");
        config.search.default_limit = 100;
        config.search.max_limit = 50;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_env_var_override() {
        env::set_var("BSL_CONTEXT_DEFAULT_LIMIT", "25");
        env::set_var("BSL_CONTEXT_DATA_SOURCE", "json");

        let mut config = Config::default();
        config.merge_env();

        assert_eq!(config.search.default_limit, 25);
        assert_eq!(config.platform.data_source, DataSource::Json);

        env::remove_var("BSL_CONTEXT_DEFAULT_LIMIT");
        env::remove_var("BSL_CONTEXT_DATA_SOURCE");
    }

    #[test]
    fn test_toml_deserialization() {
        let toml = r#"
            [platform]
            path = "/opt/1cv8"
            version = "8.3.27"
            data_source = "hbk"

            [search]
            default_limit = 20
            max_limit = 40
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.platform.path, PathBuf::from("/opt/1cv8"));
        assert_eq!(config.platform.version.as_deref(), Some("8.3.27"));
        assert_eq!(config.search.default_limit, 20);
        assert_eq!(config.search.max_limit, 40);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let toml = r#"
            [platform]
            path = "/opt/1cv8"
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.search.default_limit, 50);
        assert_eq!(config.platform.data_source, DataSource::Hbk);
    }
}
