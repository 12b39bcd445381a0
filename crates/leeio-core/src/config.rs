//! Configuration types for the leeio plugin
//!
//! The provider itself accepts no attributes from the end user; everything
//! here is operator-level configuration supplied when the plugin starts.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Dual-stack endpoint (answers over whichever family the client used)
pub const DEFAULT_ADDRESS_ENDPOINT: &str = "https://ip.lee.io";

/// IPv4-only endpoint
pub const DEFAULT_IPV4_ENDPOINT: &str = "https://ipv4.lee.io";

/// IPv6-only endpoint
pub const DEFAULT_IPV6_ENDPOINT: &str = "https://ipv6.lee.io";

/// Main plugin configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginConfig {
    /// Shared HTTP client settings
    #[serde(default)]
    pub http: HttpClientConfig,

    /// Remote endpoints queried by the `ip` data source
    #[serde(default)]
    pub endpoints: EndpointConfig,
}

impl PluginConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        self.http.validate()?;
        self.endpoints.validate()?;
        Ok(())
    }
}

/// HTTP client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpClientConfig {
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl HttpClientConfig {
    /// Request timeout as a [`Duration`]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate the HTTP client configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.timeout_secs == 0 {
            return Err(crate::Error::config("HTTP timeout must be > 0"));
        }
        if self.user_agent.trim().is_empty() {
            return Err(crate::Error::config("HTTP user agent cannot be empty"));
        }
        Ok(())
    }
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

/// Endpoints for the three address lookups
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointConfig {
    /// Dual-stack endpoint
    #[serde(default = "default_address_endpoint")]
    pub address: String,

    /// IPv4-only endpoint
    #[serde(default = "default_ipv4_endpoint")]
    pub address_ipv4: String,

    /// IPv6-only endpoint
    #[serde(default = "default_ipv6_endpoint")]
    pub address_ipv6: String,
}

impl EndpointConfig {
    /// Point all three lookups at one base URL (used by tests and mirrors)
    ///
    /// Paths are `/`, `/ipv4` and `/ipv6` below `base`.
    pub fn with_base(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            address: format!("{}/", base),
            address_ipv4: format!("{}/ipv4", base),
            address_ipv6: format!("{}/ipv6", base),
        }
    }

    /// Validate the endpoint configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        for (name, url) in [
            ("address", &self.address),
            ("address_ipv4", &self.address_ipv4),
            ("address_ipv6", &self.address_ipv6),
        ] {
            if url.is_empty() {
                return Err(crate::Error::config(format!(
                    "Endpoint '{}' cannot be empty",
                    name
                )));
            }
            if !url.starts_with("https://") && !url.starts_with("http://") {
                return Err(crate::Error::config(format!(
                    "Endpoint '{}' must use HTTP or HTTPS scheme. Got: {}",
                    name, url
                )));
            }
        }
        Ok(())
    }
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            address: default_address_endpoint(),
            address_ipv4: default_ipv4_endpoint(),
            address_ipv6: default_ipv6_endpoint(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("leeio-plugin/{}", env!("CARGO_PKG_VERSION"))
}

fn default_address_endpoint() -> String {
    DEFAULT_ADDRESS_ENDPOINT.to_string()
}

fn default_ipv4_endpoint() -> String {
    DEFAULT_IPV4_ENDPOINT.to_string()
}

fn default_ipv6_endpoint() -> String {
    DEFAULT_IPV6_ENDPOINT.to_string()
}
