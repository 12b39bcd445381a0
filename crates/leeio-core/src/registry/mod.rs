//! Plugin-based data source registry
//!
//! The registry allows data sources to be registered dynamically at
//! runtime, avoiding hardcoded if-else chains.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use leeio_core::registry::DataSourceRegistry;
//!
//! // Create a registry
//! let registry = DataSourceRegistry::new();
//!
//! // Register data sources
//! registry.register("ip", Box::new(IpFactory));
//!
//! // Create a data source with the shared client injected
//! let source = registry.create("ip", &config, client.clone())?;
//! ```
//!
//! ## Registration
//!
//! Implementations should register themselves during initialization:
//!
//! ```rust,ignore
//! // In leeio-datasource-ip crate
//! pub fn register(registry: &DataSourceRegistry) {
//!     registry.register("ip", Box::new(IpFactory));
//! }
//! ```

use crate::config::PluginConfig;
use crate::error::{Error, Result};
use crate::traits::{DataSource, DataSourceFactory, HttpClient};
use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock};

/// Registry of data source factories, keyed by type suffix
///
/// ## Thread Safety
///
/// The registry uses interior mutability with RwLock, allowing concurrent
/// reads and exclusive writes.
#[derive(Default)]
pub struct DataSourceRegistry {
    factories: RwLock<BTreeMap<String, Box<dyn DataSourceFactory>>>,
}

impl DataSourceRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a data source factory
    ///
    /// # Parameters
    ///
    /// - `name`: Type suffix (e.g., "ip")
    /// - `factory`: Factory object for creating data source instances
    ///
    /// Registering the same name twice replaces the earlier factory.
    pub fn register(&self, name: impl Into<String>, factory: Box<dyn DataSourceFactory>) {
        let name = name.into();
        let mut factories = self.factories.write().unwrap_or_else(PoisonError::into_inner);
        if factories.insert(name.clone(), factory).is_some() {
            tracing::warn!("Data source '{}' registered twice, keeping the latest", name);
        }
    }

    /// Create a data source
    ///
    /// # Returns
    ///
    /// - `Ok(Box<dyn DataSource>)`: Created data source
    /// - `Err(Error)`: If the name is not registered or creation fails
    pub fn create(
        &self,
        name: &str,
        config: &PluginConfig,
        client: Arc<dyn HttpClient>,
    ) -> Result<Box<dyn DataSource>> {
        let factories = self.factories.read().unwrap_or_else(PoisonError::into_inner);

        let factory = factories
            .get(name)
            .ok_or_else(|| Error::unknown_data_source(name))?;

        factory.create(config, client)
    }

    /// List all registered data source names, sorted
    pub fn list(&self) -> Vec<String> {
        let factories = self.factories.read().unwrap_or_else(PoisonError::into_inner);
        factories.keys().cloned().collect()
    }

    /// Check if a data source name is registered
    pub fn has(&self, name: &str) -> bool {
        let factories = self.factories.read().unwrap_or_else(PoisonError::into_inner);
        factories.contains_key(name)
    }
}
