//! Test doubles and common utilities for IP data source contract tests
//!
//! `ScriptedClient` answers each URL from a script and counts calls per
//! URL, so tests can assert both the outcome of a read and which lookups
//! were (or were not) attempted.

#![allow(dead_code)]

use leeio_core::config::EndpointConfig;
use leeio_core::{CancellationToken, Error, ExchangeDump, FetchFailure, HttpClient};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub const BASE: &str = "http://lookup.test";

/// Scripted answer for one endpoint
#[derive(Debug, Clone)]
pub enum Answer {
    /// 200 with a JSON string body
    Address(&'static str),
    /// Non-success status
    Status(u16),
    /// Connection never established
    Unreachable,
}

/// An HttpClient driven by a per-URL script
pub struct ScriptedClient {
    script: HashMap<String, Answer>,
    /// Call counter per URL
    calls: Arc<Mutex<HashMap<String, usize>>>,
    /// Total call counter
    total: Arc<AtomicUsize>,
}

impl ScriptedClient {
    /// Script the three standard endpoints below [`BASE`]
    pub fn new(address: Answer, ipv4: Answer, ipv6: Answer) -> Self {
        let endpoints = endpoints();
        let script = HashMap::from([
            (endpoints.address, address),
            (endpoints.address_ipv4, ipv4),
            (endpoints.address_ipv6, ipv6),
        ]);

        Self {
            script,
            calls: Arc::new(Mutex::new(HashMap::new())),
            total: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of calls made to `url`
    pub fn calls_to(&self, url: &str) -> usize {
        self.calls.lock().unwrap().get(url).copied().unwrap_or(0)
    }

    /// Total number of calls
    pub fn total_calls(&self) -> usize {
        self.total.load(Ordering::SeqCst)
    }

    /// Create a new ScriptedClient that shares counters with an existing one
    pub fn sharing_counters_with(other: &Self) -> Self {
        Self {
            script: other.script.clone(),
            calls: Arc::clone(&other.calls),
            total: Arc::clone(&other.total),
        }
    }
}

#[async_trait::async_trait]
impl HttpClient for ScriptedClient {
    async fn get_json_string(
        &self,
        url: &str,
        cancel: &CancellationToken,
    ) -> Result<String, FetchFailure> {
        self.total.fetch_add(1, Ordering::SeqCst);
        *self.calls.lock().unwrap().entry(url.to_string()).or_insert(0) += 1;

        let mut exchange =
            ExchangeDump::request("GET", url).with_request_header("Accept", "application/json");

        if cancel.is_cancelled() {
            return Err(FetchFailure::new(Error::Cancelled, exchange));
        }

        match self.script.get(url) {
            Some(Answer::Address(address)) => Ok(address.to_string()),
            Some(Answer::Status(status)) => {
                exchange.status = Some(*status);
                exchange.response_body = Some("error".to_string());
                Err(FetchFailure::new(
                    Error::http(format!("unexpected status {}", status)),
                    exchange,
                ))
            }
            Some(Answer::Unreachable) | None => Err(FetchFailure::new(
                Error::http("Request failed: connection refused"),
                exchange,
            )),
        }
    }
}

pub fn endpoints() -> EndpointConfig {
    EndpointConfig::with_base(BASE)
}
