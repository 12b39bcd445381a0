// # HTTP Client Adapter
//
// This crate provides the shared HTTP client handle for the leeio plugin.
//
// ## Behaviour
//
// - One GET per call, no retries
// - `Accept: application/json` on every request
// - A successful body is decoded as a JSON document whose root is a string
// - Every failure (transport, timeout, non-2xx, decode, cancellation) comes
//   back as a single `FetchFailure` carrying the captured exchange
//
// ## Connection Reuse
//
// `ReqwestClient` wraps one `reqwest::Client`, which pools connections
// internally. Build it once per plugin process and share it.

use leeio_core::config::HttpClientConfig;
use leeio_core::{Error, ExchangeDump, FetchFailure, HttpClient, Result};

use reqwest::header::{ACCEPT, HeaderMap, USER_AGENT};
use tokio_util::sync::CancellationToken;

const JSON_MEDIA_TYPE: &str = "application/json";

/// reqwest-backed implementation of [`HttpClient`]
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    /// HTTP client
    client: reqwest::Client,

    /// User-Agent sent with every request (kept for exchange dumps)
    user_agent: String,
}

impl ReqwestClient {
    /// Create a new client from configuration
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the underlying client cannot be
    /// built (e.g. no TLS backend available).
    pub fn new(config: &HttpClientConfig) -> Result<Self> {
        config.validate()?;

        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            user_agent: config.user_agent.clone(),
        })
    }

    fn build_request(&self, url: &str) -> Result<reqwest::Request> {
        self.client
            .get(url)
            .header(ACCEPT, JSON_MEDIA_TYPE)
            .header(USER_AGENT, self.user_agent.as_str())
            .build()
            .map_err(|e| Error::http(format!("Invalid request: {}", e)))
    }

    /// Send a built request, returning the outcome together with the exchange
    async fn execute(
        &self,
        request: reqwest::Request,
        mut exchange: ExchangeDump,
    ) -> (Result<String>, ExchangeDump) {
        let response = match self.client.execute(request).await {
            Ok(response) => response,
            Err(e) => {
                return (Err(Error::http(format!("Request failed: {}", e))), exchange);
            }
        };

        let status = response.status();
        exchange.status = Some(status.as_u16());
        exchange.response_version = Some(format!("{:?}", response.version()));
        exchange.response_headers = header_pairs(response.headers());

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                return (
                    Err(Error::http(format!("Failed to read response: {}", e))),
                    exchange,
                );
            }
        };
        let decoded = serde_json::from_str::<String>(&body);
        exchange.response_body = Some(body);

        if !status.is_success() {
            return (
                Err(Error::http(format!("unexpected status {}", status))),
                exchange,
            );
        }

        match decoded {
            Ok(value) => (Ok(value), exchange),
            Err(e) => (
                Err(Error::decode(format!("Failed to decode response body: {}", e))),
                exchange,
            ),
        }
    }
}

#[async_trait::async_trait]
impl HttpClient for ReqwestClient {
    async fn get_json_string(
        &self,
        url: &str,
        cancel: &CancellationToken,
    ) -> std::result::Result<String, FetchFailure> {
        let request = self
            .build_request(url)
            .map_err(|e| FetchFailure::new(e, ExchangeDump::request("GET", url)))?;
        let exchange = request_dump(&request);

        let outcome = tokio::select! {
            biased;
            _ = cancel.cancelled() => None,
            outcome = self.execute(request, exchange.clone()) => Some(outcome),
        };

        match outcome {
            Some((Ok(value), _)) => Ok(value),
            Some((Err(error), exchange)) => Err(FetchFailure::new(error, exchange)),
            None => {
                tracing::debug!("GET {} abandoned: cancelled", url);
                Err(FetchFailure::new(Error::Cancelled, exchange))
            }
        }
    }
}

/// Request half of the dump, taken from what will actually go on the wire
fn request_dump(request: &reqwest::Request) -> ExchangeDump {
    ExchangeDump {
        method: request.method().to_string(),
        url: request.url().to_string(),
        version: format!("{:?}", request.version()),
        request_headers: header_pairs(request.headers()),
        ..ExchangeDump::default()
    }
}

fn header_pairs(headers: &HeaderMap) -> Vec<(String, String)> {
    headers
        .iter()
        .map(|(name, value)| {
            (
                name.to_string(),
                value.to_str().unwrap_or("<non-utf8>").to_string(),
            )
        })
        .collect()
}
