//! Catalog: definition store, lazy bootstrap, version discovery.

pub mod catalog;
pub mod discovery;
pub mod store;

pub use catalog::{Catalog, CatalogBuilder, TypeRecord};
pub use discovery::{DiscoveredVersion, VersionDiscovery, HBK_FILENAME};
pub use store::{ContextSnapshot, ContextSource, ContextStore};
