//! Plugin registration surface
//!
//! [`Plugin`] is what the host runtime talks to. It is configured once per
//! process: the shared HTTP client is created by the caller, every
//! registered data source is instantiated with that client injected, and
//! reads are dispatched by full type name from then on.
//!
//! ```text
//!  host runtime ──ReadRequest──▶ Plugin ──▶ DataSource::read ──▶ HttpClient
//!               ◀─ReadResponse──        ◀──                  ◀──
//! ```

use crate::config::PluginConfig;
use crate::diagnostics::Diagnostics;
use crate::error::Result;
use crate::protocol::{ReadRequest, ReadResponse};
use crate::registry::DataSourceRegistry;
use crate::schema::Schema;
use crate::traits::{DataSource, HttpClient};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Provider type name used as the prefix of every data source
pub const PROVIDER_TYPE_NAME: &str = "leeio";

/// Version reported when the binary was not stamped with one
pub const DEV_VERSION: &str = "dev";

/// Provider identity reported to the host runtime
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginMetadata {
    pub type_name: String,
    pub version: String,
}

impl Default for PluginMetadata {
    fn default() -> Self {
        Self {
            type_name: PROVIDER_TYPE_NAME.to_string(),
            version: DEV_VERSION.to_string(),
        }
    }
}

/// A configured plugin instance
///
/// ## Lifecycle
///
/// 1. Register factories on a [`DataSourceRegistry`]
/// 2. Build the shared client
/// 3. [`Plugin::configure`] instantiates every data source with that client
/// 4. [`Plugin::read`] as many times as the host asks, concurrently if it likes
pub struct Plugin {
    metadata: PluginMetadata,
    data_sources: BTreeMap<String, Box<dyn DataSource>>,
}

impl Plugin {
    /// Configure the plugin
    ///
    /// # Parameters
    ///
    /// - `metadata`: Provider type name and version
    /// - `config`: Plugin configuration (validated here)
    /// - `registry`: Registered data source factories
    /// - `client`: Shared HTTP client handle, owned by the plugin from now on
    pub fn configure(
        metadata: PluginMetadata,
        config: &PluginConfig,
        registry: &DataSourceRegistry,
        client: Arc<dyn HttpClient>,
    ) -> Result<Self> {
        config.validate()?;

        let mut data_sources = BTreeMap::new();
        for name in registry.list() {
            let source = registry.create(&name, config, Arc::clone(&client))?;
            let type_name = format!("{}_{}", metadata.type_name, source.type_suffix());
            debug!("Configured data source {}", type_name);
            data_sources.insert(type_name, source);
        }

        info!(
            "Configured provider {} ({}) with {} data source(s)",
            metadata.type_name,
            metadata.version,
            data_sources.len()
        );

        Ok(Self {
            metadata,
            data_sources,
        })
    }

    pub fn metadata(&self) -> &PluginMetadata {
        &self.metadata
    }

    /// The provider accepts no attributes
    pub fn provider_schema(&self) -> Schema {
        Schema::default()
    }

    /// Schemas of all configured data sources, keyed by full type name
    pub fn data_source_schemas(&self) -> BTreeMap<String, Schema> {
        self.data_sources
            .iter()
            .map(|(name, source)| (name.clone(), source.schema()))
            .collect()
    }

    /// Full type names of all configured data sources
    pub fn data_source_names(&self) -> Vec<String> {
        self.data_sources.keys().cloned().collect()
    }

    /// Dispatch a read to the data source named in the request
    pub async fn read(&self, request: &ReadRequest, cancel: &CancellationToken) -> ReadResponse {
        let Some(source) = self.data_sources.get(&request.type_name) else {
            let mut diags = Diagnostics::new();
            diags.add_error(
                "Unknown Data Source",
                format!(
                    "The provider {} does not support data source \"{}\".",
                    self.metadata.type_name, request.type_name
                ),
            );
            return ReadResponse::from_diagnostics(diags);
        };

        debug!("Reading data source {}", request.type_name);
        source.read(request, cancel).await
    }
}
