//! Schema declarations for providers and data sources
//!
//! A schema lists the attributes an entity exposes and whether the caller
//! may set them. Inbound configuration is checked against it before a data
//! source does any work.

use crate::diagnostics::Diagnostics;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Attribute value type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeType {
    String,
}

/// A single attribute declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    #[serde(rename = "type")]
    pub kind: AttributeType,
    pub description: String,
    /// Caller must supply a value
    #[serde(default)]
    pub required: bool,
    /// Caller may supply a value
    #[serde(default)]
    pub optional: bool,
    /// Value is produced by the plugin
    #[serde(default)]
    pub computed: bool,
}

impl Attribute {
    /// A read-only string attribute populated by the plugin
    pub fn computed_string(description: impl Into<String>) -> Self {
        Self {
            kind: AttributeType::String,
            description: description.into(),
            required: false,
            optional: false,
            computed: true,
        }
    }

    /// Whether the caller is allowed to set this attribute
    pub fn is_settable(&self) -> bool {
        self.required || self.optional
    }
}

/// Attribute set of a provider or data source
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    pub description: String,
    pub attributes: BTreeMap<String, Attribute>,
}

impl Schema {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            attributes: BTreeMap::new(),
        }
    }

    /// Add an attribute (builder style)
    pub fn with_attribute(mut self, name: impl Into<String>, attribute: Attribute) -> Self {
        self.attributes.insert(name.into(), attribute);
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.get(name)
    }

    /// Check an inbound configuration object against this schema
    ///
    /// `null` is treated as an empty object. Unknown attributes, values for
    /// computed-only attributes and missing required attributes are all
    /// reported as error diagnostics; no check short-circuits the others.
    pub fn validate_config(&self, config: &serde_json::Value) -> Diagnostics {
        let mut diags = Diagnostics::new();

        let empty = serde_json::Map::new();
        let object = match config {
            serde_json::Value::Null => &empty,
            serde_json::Value::Object(map) => map,
            other => {
                diags.add_error(
                    "Invalid Configuration",
                    format!("Expected a configuration object, got: {}", other),
                );
                return diags;
            }
        };

        for (name, value) in object {
            match self.attributes.get(name) {
                None => diags.add_error(
                    "Unsupported Attribute",
                    format!("An attribute named \"{}\" is not expected here.", name),
                ),
                Some(attribute) if !attribute.is_settable() && !value.is_null() => diags
                    .add_error(
                        "Invalid Attribute Configuration",
                        format!(
                            "Attribute \"{}\" is computed and cannot be set in configuration.",
                            name
                        ),
                    ),
                Some(attribute) if attribute.kind == AttributeType::String
                    && !(value.is_string() || value.is_null()) =>
                {
                    diags.add_error(
                        "Incorrect Attribute Value Type",
                        format!("Attribute \"{}\" must be a string.", name),
                    )
                }
                Some(_) => {}
            }
        }

        for (name, attribute) in &self.attributes {
            if attribute.required && object.get(name).is_none_or(|v| v.is_null()) {
                diags.add_error(
                    "Missing Required Attribute",
                    format!("The argument \"{}\" is required.", name),
                );
            }
        }

        diags
    }
}
