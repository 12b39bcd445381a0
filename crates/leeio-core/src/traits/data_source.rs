// # Data Source Trait
//
// Defines the interface for read-only, computed-on-read entities.
//
// ## Implementations
//
// - Public IP addresses: `leeio-datasource-ip` crate
//
// ## Usage
//
// ```rust,ignore
// use leeio_core::{CancellationToken, DataSource, ReadRequest};
//
// async fn run(source: &dyn DataSource) {
//     let request = ReadRequest::new("leeio_ip");
//     let response = source.read(&request, &CancellationToken::new()).await;
//     for diagnostic in response.diagnostics.iter() {
//         eprintln!("{}", diagnostic);
//     }
// }
// ```

use crate::config::PluginConfig;
use crate::protocol::{ReadRequest, ReadResponse};
use crate::schema::Schema;
use crate::traits::HttpClient;
use async_trait::async_trait;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Trait for data source implementations
///
/// A data source has no identity and keeps nothing between reads: every
/// call to [`DataSource::read`] builds its state from scratch.
///
/// # Reporting
///
/// `read` never returns `Err`. Every failure is converted into a
/// diagnostic on the response so that several problems (one error plus
/// warnings) can be reported together.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Type name suffix appended to the provider name (e.g. "ip" → "leeio_ip")
    fn type_suffix(&self) -> &'static str;

    /// Attribute declarations for this data source
    fn schema(&self) -> Schema;

    /// Perform one read
    ///
    /// `cancel` must be honoured by every outbound call the read makes.
    async fn read(&self, request: &ReadRequest, cancel: &CancellationToken) -> ReadResponse;
}

/// Helper trait for constructing data sources
///
/// The shared client is injected here, typed, at construction time.
pub trait DataSourceFactory: Send + Sync {
    /// Create a DataSource instance
    ///
    /// # Parameters
    ///
    /// - `config`: Plugin configuration
    /// - `client`: Shared HTTP client handle
    fn create(
        &self,
        config: &PluginConfig,
        client: Arc<dyn HttpClient>,
    ) -> Result<Box<dyn DataSource>, crate::Error>;
}
