//! Test doubles and common utilities for plugin contract tests
//!
//! These doubles record how they are used so tests can verify the
//! registration and dispatch contract without any network access.

use leeio_core::error::Result;
use leeio_core::{
    CancellationToken, DataSource, DataSourceFactory, ExchangeDump, FetchFailure, HttpClient,
    PluginConfig, ReadRequest, ReadResponse, Schema,
};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// An HttpClient that answers every URL with the URL itself and counts calls
pub struct CountingClient {
    /// Call counter for get_json_string()
    call_count: Arc<AtomicUsize>,
    /// Artificial latency per call
    delay: Duration,
}

impl CountingClient {
    pub fn new(delay: Duration) -> Self {
        Self {
            call_count: Arc::new(AtomicUsize::new(0)),
            delay,
        }
    }

    /// Get the number of times get_json_string() was called
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Create a new CountingClient that shares counters with an existing one
    pub fn sharing_counters_with(other: &Self) -> Self {
        Self {
            call_count: Arc::clone(&other.call_count),
            delay: other.delay,
        }
    }
}

#[async_trait::async_trait]
impl HttpClient for CountingClient {
    async fn get_json_string(
        &self,
        url: &str,
        cancel: &CancellationToken,
    ) -> std::result::Result<String, FetchFailure> {
        self.call_count.fetch_add(1, Ordering::SeqCst);

        tokio::select! {
            _ = cancel.cancelled() => Err(FetchFailure::new(
                leeio_core::Error::Cancelled,
                ExchangeDump::request("GET", url),
            )),
            _ = tokio::time::sleep(self.delay) => Ok(url.to_string()),
        }
    }
}

/// A data source that performs one GET per read and reports it as state
pub struct LookupSource {
    client: Arc<dyn HttpClient>,
    url: String,
}

#[async_trait::async_trait]
impl DataSource for LookupSource {
    fn type_suffix(&self) -> &'static str {
        "lookup"
    }

    fn schema(&self) -> Schema {
        Schema::new("lookup")
    }

    async fn read(&self, _request: &ReadRequest, cancel: &CancellationToken) -> ReadResponse {
        let mut response = ReadResponse::new();
        match self.client.get_json_string(&self.url, cancel).await {
            Ok(value) => response.set_state(&serde_json::json!({ "value": value })),
            Err(failure) => response
                .diagnostics
                .add_error("Client Error", failure.error.to_string()),
        }
        response
    }
}

/// Factory for LookupSource counting how many instances it built
pub struct LookupFactory {
    pub created: Arc<AtomicUsize>,
}

impl LookupFactory {
    pub fn new() -> Self {
        Self {
            created: Arc::new(AtomicUsize::new(0)),
        }
    }
}

impl DataSourceFactory for LookupFactory {
    fn create(
        &self,
        config: &PluginConfig,
        client: Arc<dyn HttpClient>,
    ) -> Result<Box<dyn DataSource>> {
        self.created.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(LookupSource {
            client,
            url: config.endpoints.address.clone(),
        }))
    }
}
