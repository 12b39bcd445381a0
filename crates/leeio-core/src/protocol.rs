//! Read request/response envelope exchanged with the host runtime

use crate::diagnostics::Diagnostics;
use serde::{Deserialize, Serialize};

/// A single read invocation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReadRequest {
    /// Full data source type name (e.g. "leeio_ip")
    pub type_name: String,

    /// Configuration supplied by the caller; `null` when nothing was set
    #[serde(default)]
    pub config: serde_json::Value,
}

impl ReadRequest {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            config: serde_json::Value::Null,
        }
    }

    pub fn with_config(mut self, config: serde_json::Value) -> Self {
        self.config = config;
        self
    }
}

/// Outcome of a read
///
/// `state` is only present when the read succeeded; `diagnostics` may carry
/// warnings either way.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReadResponse {
    #[serde(default)]
    pub state: Option<serde_json::Value>,

    #[serde(default)]
    pub diagnostics: Diagnostics,
}

impl ReadResponse {
    pub fn new() -> Self {
        Self::default()
    }

    /// A response carrying only diagnostics
    pub fn from_diagnostics(diagnostics: Diagnostics) -> Self {
        Self {
            state: None,
            diagnostics,
        }
    }

    /// Serialize `value` into the response state
    ///
    /// A serialization failure is reported as an error diagnostic and leaves
    /// the state unset.
    pub fn set_state<T: Serialize>(&mut self, value: &T) {
        match serde_json::to_value(value) {
            Ok(state) => self.state = Some(state),
            Err(e) => self.diagnostics.add_error(
                "State Error",
                format!("Unable to encode data source state: {}", e),
            ),
        }
    }

    pub fn is_success(&self) -> bool {
        self.state.is_some() && !self.diagnostics.has_error()
    }
}
