//! Address Fetcher
//!
//! Issues the three lookups in a fixed order (combined, IPv4, IPv6) and
//! applies a per-lookup failure policy:
//!
//! | lookup   | criticality | on failure                                 |
//! |----------|-------------|--------------------------------------------|
//! | combined | fatal       | error diagnostic, remaining lookups skipped |
//! | IPv4     | best-effort | warning diagnostic, field left null         |
//! | IPv6     | best-effort | warning diagnostic, field left null         |
//!
//! Exchange dumps of failed lookups go to the debug log only.

use crate::model::AddressRecord;
use leeio_core::config::EndpointConfig;
use leeio_core::{CancellationToken, Diagnostic, Diagnostics, Error, HttpClient};
use std::sync::Arc;
use tracing::{debug, warn};

/// How a failed lookup affects the read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Criticality {
    /// Abort the read with an error
    Fatal,
    /// Record a warning and carry on without the value
    BestEffort,
}

/// One endpoint to query and how much its answer matters
#[derive(Debug, Clone, Copy)]
pub struct Lookup<'a> {
    /// Human-readable name used in diagnostics ("IPv4 address")
    pub label: &'static str,
    pub url: &'a str,
    pub criticality: Criticality,
}

/// Diagnostics gathered during one fetch
///
/// Holds at most one fatal failure plus the ordered list of non-fatal ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchReport {
    fatal: Option<Diagnostic>,
    warnings: Vec<Diagnostic>,
}

impl FetchReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify a failed lookup according to its criticality
    pub fn record_failure(&mut self, lookup: &Lookup<'_>, error: &Error) {
        match lookup.criticality {
            Criticality::Fatal => {
                self.fatal = Some(Diagnostic::error(
                    "Client Error",
                    format!("Unable to read {}, got error: {}", lookup.label, error),
                ));
            }
            Criticality::BestEffort => {
                let detail = format!("Failed to retrieve {}, got error: {}", lookup.label, error);
                warn!("{}", detail);
                self.warnings
                    .push(Diagnostic::warning(format!("{} lookup failed", lookup.label), detail));
            }
        }
    }

    pub fn is_fatal(&self) -> bool {
        self.fatal.is_some()
    }

    pub fn fatal(&self) -> Option<&Diagnostic> {
        self.fatal.as_ref()
    }

    pub fn warnings(&self) -> &[Diagnostic] {
        &self.warnings
    }

    /// Flatten into host diagnostics, fatal error first
    pub fn into_diagnostics(self) -> Diagnostics {
        self.fatal.into_iter().chain(self.warnings).collect()
    }
}

/// Result of one fetch: the record (absent on the fatal path) and its report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutcome {
    pub record: Option<AddressRecord>,
    pub report: FetchReport,
}

/// Runs the three address lookups against one shared client
pub struct AddressFetcher {
    client: Arc<dyn HttpClient>,
    endpoints: EndpointConfig,
}

impl AddressFetcher {
    pub fn new(client: Arc<dyn HttpClient>, endpoints: EndpointConfig) -> Self {
        Self { client, endpoints }
    }

    /// Fetch all three addresses, sequentially
    pub async fn fetch(&self, cancel: &CancellationToken) -> FetchOutcome {
        let mut report = FetchReport::new();

        let combined = Lookup {
            label: "IP address",
            url: &self.endpoints.address,
            criticality: Criticality::Fatal,
        };
        let Some(address) = self.fetch_and_classify(&combined, cancel, &mut report).await else {
            return FetchOutcome {
                record: None,
                report,
            };
        };

        let ipv4 = Lookup {
            label: "IPv4 address",
            url: &self.endpoints.address_ipv4,
            criticality: Criticality::BestEffort,
        };
        let address_ipv4 = self.fetch_and_classify(&ipv4, cancel, &mut report).await;

        let ipv6 = Lookup {
            label: "IPv6 address",
            url: &self.endpoints.address_ipv6,
            criticality: Criticality::BestEffort,
        };
        let address_ipv6 = self.fetch_and_classify(&ipv6, cancel, &mut report).await;

        FetchOutcome {
            record: Some(AddressRecord {
                address: Some(address),
                address_ipv4,
                address_ipv6,
            }),
            report,
        }
    }

    /// Perform one lookup and file any failure in `report`
    ///
    /// Only a failed request counts as "no value"; whatever string the
    /// endpoint answers with is kept verbatim.
    pub async fn fetch_and_classify(
        &self,
        lookup: &Lookup<'_>,
        cancel: &CancellationToken,
        report: &mut FetchReport,
    ) -> Option<String> {
        match self.client.get_json_string(lookup.url, cancel).await {
            Ok(value) => Some(value),
            Err(failure) => {
                report.record_failure(lookup, &failure.error);
                debug!("{}", failure.exchange);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use leeio_core::{ExchangeDump, FetchFailure, Severity};
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Answers from a fixed table; URLs not in the table fail with HTTP 500
    struct TableClient {
        answers: HashMap<String, String>,
        calls: Mutex<Vec<String>>,
    }

    impl TableClient {
        fn new(answers: &[(&str, &str)]) -> Self {
            Self {
                answers: answers
                    .iter()
                    .map(|(url, value)| (url.to_string(), value.to_string()))
                    .collect(),
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait::async_trait]
    impl HttpClient for TableClient {
        async fn get_json_string(
            &self,
            url: &str,
            _cancel: &CancellationToken,
        ) -> Result<String, FetchFailure> {
            self.calls.lock().unwrap().push(url.to_string());
            self.answers.get(url).cloned().ok_or_else(|| {
                FetchFailure::new(
                    Error::http("unexpected status 500 Internal Server Error"),
                    ExchangeDump::request("GET", url),
                )
            })
        }
    }

    fn endpoints() -> EndpointConfig {
        EndpointConfig::with_base("http://lookup.test")
    }

    #[tokio::test]
    async fn test_all_lookups_succeed() {
        let client = Arc::new(TableClient::new(&[
            ("http://lookup.test/", "2001:db8::1"),
            ("http://lookup.test/ipv4", "203.0.113.9"),
            ("http://lookup.test/ipv6", "2001:db8::1"),
        ]));
        let fetcher = AddressFetcher::new(client.clone(), endpoints());

        let outcome = fetcher.fetch(&CancellationToken::new()).await;

        assert_eq!(
            outcome.record,
            Some(AddressRecord {
                address: Some("2001:db8::1".to_string()),
                address_ipv4: Some("203.0.113.9".to_string()),
                address_ipv6: Some("2001:db8::1".to_string()),
            })
        );
        assert!(outcome.report.into_diagnostics().is_empty());
        assert_eq!(
            *client.calls.lock().unwrap(),
            vec![
                "http://lookup.test/".to_string(),
                "http://lookup.test/ipv4".to_string(),
                "http://lookup.test/ipv6".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_fatal_lookup_short_circuits() {
        let client = Arc::new(TableClient::new(&[
            ("http://lookup.test/ipv4", "203.0.113.9"),
            ("http://lookup.test/ipv6", "2001:db8::1"),
        ]));
        let fetcher = AddressFetcher::new(client.clone(), endpoints());

        let outcome = fetcher.fetch(&CancellationToken::new()).await;

        assert!(outcome.record.is_none());
        assert!(outcome.report.is_fatal());
        assert!(outcome.report.warnings().is_empty());
        assert_eq!(client.calls.lock().unwrap().len(), 1);

        let fatal = outcome.report.fatal().unwrap();
        assert_eq!(fatal.severity, Severity::Error);
        assert_eq!(fatal.summary, "Client Error");
        assert!(fatal.detail.starts_with("Unable to read IP address, got error: "));
        assert!(fatal.detail.contains("500"));
    }

    #[tokio::test]
    async fn test_empty_family_answer_is_kept_verbatim() {
        let client = Arc::new(TableClient::new(&[
            ("http://lookup.test/", "1.2.3.4"),
            ("http://lookup.test/ipv4", "1.2.3.4"),
            ("http://lookup.test/ipv6", ""),
        ]));
        let fetcher = AddressFetcher::new(client, endpoints());

        let outcome = fetcher.fetch(&CancellationToken::new()).await;
        let record = outcome.record.unwrap();

        assert_eq!(record.address.as_deref(), Some("1.2.3.4"));
        assert_eq!(record.address_ipv4.as_deref(), Some("1.2.3.4"));
        assert_eq!(record.address_ipv6.as_deref(), Some(""));
        assert!(outcome.report.into_diagnostics().is_empty());
    }

    #[tokio::test]
    async fn test_empty_combined_answer_is_kept_verbatim() {
        let client = Arc::new(TableClient::new(&[
            ("http://lookup.test/", ""),
            ("http://lookup.test/ipv4", "203.0.113.9"),
        ]));
        let fetcher = AddressFetcher::new(client, endpoints());

        let outcome = fetcher.fetch(&CancellationToken::new()).await;

        assert_eq!(outcome.record.unwrap().address.as_deref(), Some(""));
        assert_eq!(outcome.report.warnings().len(), 1);
    }

    #[test]
    fn test_report_orders_fatal_first() {
        let mut report = FetchReport::new();
        let ipv4 = Lookup {
            label: "IPv4 address",
            url: "http://lookup.test/ipv4",
            criticality: Criticality::BestEffort,
        };
        let combined = Lookup {
            label: "IP address",
            url: "http://lookup.test/",
            criticality: Criticality::Fatal,
        };

        report.record_failure(&ipv4, &Error::http("timeout"));
        report.record_failure(&combined, &Error::http("refused"));

        let diags: Vec<_> = report.into_diagnostics().into_iter().collect();
        assert_eq!(diags.len(), 2);
        assert_eq!(diags[0].severity, Severity::Error);
        assert_eq!(diags[1].severity, Severity::Warning);
        assert_eq!(diags[1].summary, "IPv4 address lookup failed");
        assert_eq!(
            diags[1].detail,
            "Failed to retrieve IPv4 address, got error: HTTP error: timeout"
        );
    }
}
