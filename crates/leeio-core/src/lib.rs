// # leeio-core
//
// Core library for the leeio data source plugin.
//
// ## Architecture Overview
//
// The host runtime owns configuration parsing, lifecycle and the wire
// protocol. This crate provides the pieces a plugin author plugs into it:
// - **DataSource**: Trait for read-only, computed-on-read entities
// - **HttpClient**: Trait for the shared, reusable HTTP client handle
// - **Diagnostics**: Additive error/warning accumulator returned to the host
// - **Schema**: Declaration of a data source's attributes
// - **DataSourceRegistry**: Plugin-based registry of data source factories
// - **Plugin**: Registration surface tying the registry to one shared client
//
// ## Design Principles
//
// 1. **Constructor Injection**: Data sources receive a typed client handle at
//    construction, never an untyped value cast back at read time
// 2. **Single-Shot Reads**: No persistence, caching or retries between reads
// 3. **Additive Diagnostics**: One read may report an error plus warnings
// 4. **Plugin-Based**: Data sources are registered dynamically by name

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod plugin;
pub mod protocol;
pub mod registry;
pub mod schema;
pub mod traits;

// Re-export core types for convenience
pub use config::{EndpointConfig, HttpClientConfig, PluginConfig};
pub use diagnostics::{Diagnostic, Diagnostics, Severity};
pub use error::{Error, Result};
pub use plugin::{Plugin, PluginMetadata};
pub use protocol::{ReadRequest, ReadResponse};
pub use registry::DataSourceRegistry;
pub use schema::{Attribute, AttributeType, Schema};
pub use traits::{DataSource, DataSourceFactory, ExchangeDump, FetchFailure, HttpClient};

pub use tokio_util::sync::CancellationToken;
