//! Data model of the `ip` data source

use leeio_core::{Attribute, Schema};
use serde::{Deserialize, Serialize};

pub const ADDRESS: &str = "address";
pub const ADDRESS_IPV4: &str = "address_ipv4";
pub const ADDRESS_IPV6: &str = "address_ipv6";

/// Observed public addresses
///
/// `address` is always set in a successful read. The per-family fields are
/// `None` (serialized as `null`) when that family is not routable from here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AddressRecord {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub address_ipv4: Option<String>,
    #[serde(default)]
    pub address_ipv6: Option<String>,
}

impl AddressRecord {
    /// Decode the inbound configuration
    ///
    /// `null` stands for "nothing configured" and yields an empty record.
    pub fn from_config(config: &serde_json::Value) -> Result<Self, serde_json::Error> {
        if config.is_null() {
            return Ok(Self::default());
        }
        Self::deserialize(config)
    }
}

/// Schema of the `ip` data source; every attribute is computed
pub fn schema() -> Schema {
    Schema::new(
        "This data source returns the source IP address of the execution environment \
         from where Terraform is running",
    )
    .with_attribute(ADDRESS, Attribute::computed_string("IP address"))
    .with_attribute(
        ADDRESS_IPV4,
        Attribute::computed_string("IPv4 address. Null if not routable"),
    )
    .with_attribute(
        ADDRESS_IPV6,
        Attribute::computed_string("IPv6 address. Null if not routable"),
    )
}
