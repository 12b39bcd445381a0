//! Data Source Handler
//!
//! One read walks `Idle → ConfigValidated → Fetching → Shaped → Done`:
//!
//! ```text
//! Idle ──config ok──▶ ConfigValidated ──▶ Fetching ──address ok──▶ Shaped ──▶ Done
//!   │                                        │
//!   └──config errors──▶ Done                 └──combined failed──▶ Done
//! ```
//!
//! Nothing survives a read; the handler holds only the fetcher.

use crate::fetcher::AddressFetcher;
use crate::model::{self, AddressRecord};
use leeio_core::config::EndpointConfig;
use leeio_core::{CancellationToken, DataSource, HttpClient, ReadRequest, ReadResponse, Schema};
use std::sync::Arc;
use tracing::trace;

/// The `ip` data source
pub struct IpDataSource {
    fetcher: AddressFetcher,
}

impl IpDataSource {
    /// Create the data source with the shared client injected
    pub fn new(client: Arc<dyn HttpClient>, endpoints: EndpointConfig) -> Self {
        Self {
            fetcher: AddressFetcher::new(client, endpoints),
        }
    }
}

#[async_trait::async_trait]
impl DataSource for IpDataSource {
    fn type_suffix(&self) -> &'static str {
        "ip"
    }

    fn schema(&self) -> Schema {
        model::schema()
    }

    async fn read(&self, request: &ReadRequest, cancel: &CancellationToken) -> ReadResponse {
        let mut response = ReadResponse::new();

        // Idle → ConfigValidated
        let config_diags = self.schema().validate_config(&request.config);
        if config_diags.has_error() {
            response.diagnostics.append(config_diags);
            return response;
        }
        if let Err(e) = AddressRecord::from_config(&request.config) {
            response.diagnostics.add_error(
                "Invalid Configuration",
                format!("Unable to decode data source configuration: {}", e),
            );
            return response;
        }

        // ConfigValidated → Fetching
        let outcome = self.fetcher.fetch(cancel).await;
        response.diagnostics.append(outcome.report.into_diagnostics());

        // Fetching → Done on the fatal path
        let Some(record) = outcome.record else {
            return response;
        };

        // Fetching → Shaped → Done
        response.set_state(&record);
        trace!("read a data source");

        response
    }
}
