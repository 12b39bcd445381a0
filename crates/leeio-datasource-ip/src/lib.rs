// # IP Data Source
//
// This crate provides the `ip` data source: the public addresses this
// process is seen from, as reported by three remote endpoints.
//
// ## Output
//
// | attribute      | source                 | absent when            |
// |----------------|------------------------|------------------------|
// | `address`      | dual-stack endpoint    | never (read fails)     |
// | `address_ipv4` | IPv4-only endpoint     | lookup fails or empty  |
// | `address_ipv6` | IPv6-only endpoint     | lookup fails or empty  |
//
// ## Policy
//
// The dual-stack lookup is fatal: if it fails the read reports one error
// and the family lookups are never attempted. The family lookups are
// best-effort: a failure is a warning and leaves the field null, since a
// v4-only or v6-only network legitimately fails one of them.
//
// No retries, no caching. Every read performs at most three GETs in order.

pub mod data_source;
pub mod fetcher;
pub mod model;

pub use data_source::IpDataSource;
pub use fetcher::{AddressFetcher, Criticality, FetchOutcome, FetchReport, Lookup};
pub use model::AddressRecord;

use leeio_core::{
    DataSource, DataSourceFactory, DataSourceRegistry, HttpClient, PluginConfig, Result,
};
use std::sync::Arc;

/// Type suffix under which the data source registers
pub const TYPE_SUFFIX: &str = "ip";

/// Factory for creating IP data sources
pub struct IpFactory;

impl DataSourceFactory for IpFactory {
    fn create(
        &self,
        config: &PluginConfig,
        client: Arc<dyn HttpClient>,
    ) -> Result<Box<dyn DataSource>> {
        config.endpoints.validate()?;
        Ok(Box::new(IpDataSource::new(client, config.endpoints.clone())))
    }
}

/// Register the IP data source with a registry
pub fn register(registry: &DataSourceRegistry) {
    registry.register(TYPE_SUFFIX, Box::new(IpFactory));
}
