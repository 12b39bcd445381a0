// # HTTP Client Trait
//
// Defines the interface for the shared HTTP client handle.
//
// ## Implementations
//
// - reqwest-based: `leeio-http` crate
//
// ## Usage
//
// ```rust,ignore
// use leeio_core::{CancellationToken, HttpClient};
//
// async fn lookup(client: &dyn HttpClient) -> leeio_core::Result<String> {
//     let cancel = CancellationToken::new();
//     match client.get_json_string("https://ip.lee.io", &cancel).await {
//         Ok(address) => Ok(address),
//         Err(failure) => {
//             tracing::debug!("{}", failure.exchange);
//             Err(failure.error)
//         }
//     }
// }
// ```

use async_trait::async_trait;
use std::fmt;
use tokio_util::sync::CancellationToken;

/// Default protocol version printed for a request that was never sent
pub const DEFAULT_HTTP_VERSION: &str = "HTTP/1.1";

/// Captured request/response round trip, kept for debug logging
///
/// The response half is absent when the request never got an answer
/// (connection failure, timeout, cancellation).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExchangeDump {
    pub method: String,
    pub url: String,
    pub version: String,
    pub request_headers: Vec<(String, String)>,
    pub status: Option<u16>,
    /// Protocol version the server answered with
    pub response_version: Option<String>,
    pub response_headers: Vec<(String, String)>,
    pub response_body: Option<String>,
}

impl ExchangeDump {
    /// Start a dump for an outbound request
    pub fn request(method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            url: url.into(),
            version: DEFAULT_HTTP_VERSION.to_string(),
            ..Self::default()
        }
    }

    pub fn with_request_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.request_headers.push((name.into(), value.into()));
        self
    }

    /// Whether a response (status line at least) was received
    pub fn has_response(&self) -> bool {
        self.status.is_some()
    }
}

impl fmt::Display for ExchangeDump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {} {}", self.method, self.url, self.version)?;
        for (name, value) in &self.request_headers {
            writeln!(f, "{}: {}", name, value)?;
        }

        match self.status {
            Some(status) => {
                writeln!(f)?;
                let version = self.response_version.as_deref().unwrap_or(&self.version);
                writeln!(f, "{} {}", version, status)?;
                for (name, value) in &self.response_headers {
                    writeln!(f, "{}: {}", name, value)?;
                }
                if let Some(body) = &self.response_body {
                    writeln!(f)?;
                    write!(f, "{}", body)?;
                }
                Ok(())
            }
            None => write!(f, "\n<no response>"),
        }
    }
}

/// A failed GET: the flattened error plus whatever was captured of the exchange
#[derive(Debug)]
pub struct FetchFailure {
    pub error: crate::Error,
    pub exchange: ExchangeDump,
}

impl FetchFailure {
    pub fn new(error: crate::Error, exchange: ExchangeDump) -> Self {
        Self { error, exchange }
    }
}

impl fmt::Display for FetchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.error, f)
    }
}

impl std::error::Error for FetchFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

/// Trait for the shared HTTP client handle
///
/// One instance is created when the plugin is configured and handed to
/// every data source. Implementations must be stateless after construction
/// and safe to call from overlapping reads.
///
/// # Contract
///
/// - Exactly one attempt per call; no retries
/// - Sends `Accept: application/json`
/// - Transport, timeout, non-2xx and decode failures all come back as a
///   single [`FetchFailure`]; callers do not branch on the failure kind
/// - Cancelling `cancel` abandons the in-flight request and yields
///   [`crate::Error::Cancelled`]
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// GET `url` and decode a JSON document whose root is a string
    async fn get_json_string(
        &self,
        url: &str,
        cancel: &CancellationToken,
    ) -> Result<String, FetchFailure>;
}
