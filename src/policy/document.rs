//! Policy document parsing and loading.

use super::{normalize_policies, Action, Policy};
use crate::{Error, Result};

use serde_json::Value;
use std::path::Path;
use tracing::warn;

/// Serialization format of a document on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// JSON
    Json,
    /// YAML
    Yaml,
    /// Unknown extension: try YAML first, then JSON
    Auto,
}

impl DocumentFormat {
    /// Pick the format from a file extension.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let extension = path
            .as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("");
        match extension.to_lowercase().as_str() {
            "yaml" | "yml" => DocumentFormat::Yaml,
            "json" => DocumentFormat::Json,
            _ => DocumentFormat::Auto,
        }
    }
}

/// Parse document text into an untyped record tree.
pub fn parse_document(content: &str, format: DocumentFormat) -> Result<Value> {
    match format {
        DocumentFormat::Json => serde_json::from_str(content).map_err(Error::from),
        DocumentFormat::Yaml => serde_yaml::from_str(content).map_err(Error::from),
        DocumentFormat::Auto => serde_yaml::from_str(content)
            .map_err(Error::from)
            .or_else(|_| serde_json::from_str(content).map_err(Error::from)),
    }
}

/// Read and parse a document file.
pub fn load_document(path: impl AsRef<Path>) -> Result<Value> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)?;
    parse_document(&content, DocumentFormat::from_path(path))
}

/// A policy document: raw policy records plus an optional default action.
///
/// Records stay untyped until [`PolicyDocument::policies`] normalizes them,
/// so one bad entry never prevents the document from loading.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PolicyDocument {
    /// Raw `default_action` value, if the document declares one
    pub default_action: Option<Value>,
    /// Raw policy records
    pub policies: Vec<Value>,
}

impl PolicyDocument {
    /// Create a document from raw policy records.
    pub fn with_policies(policies: Vec<Value>) -> Self {
        Self {
            default_action: None,
            policies,
        }
    }

    /// Set the declared default action.
    pub fn with_default_action(mut self, action: Action) -> Self {
        self.default_action = Some(Value::String(action.as_str().to_string()));
        self
    }

    /// Build a document from a parsed record tree.
    ///
    /// Accepts `{ "default_action": ..., "policies": [...] }` or a bare array
    /// of policy records.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Array(policies) => Ok(Self::with_policies(policies)),
            Value::Object(mut root) => {
                let policies = match root.remove("policies") {
                    None | Some(Value::Null) => Vec::new(),
                    Some(Value::Array(policies)) => policies,
                    Some(_) => {
                        return Err(Error::parse("'policies' must be an array of records"))
                    }
                };
                let default_action = root.remove("default_action").filter(|v| !v.is_null());
                Ok(Self {
                    default_action,
                    policies,
                })
            }
            _ => Err(Error::parse(
                "policy document must be an object or an array of policies",
            )),
        }
    }

    /// Parse a policy document from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Self::from_value(parse_document(json, DocumentFormat::Json)?)
    }

    /// Parse a policy document from YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Self::from_value(parse_document(yaml, DocumentFormat::Yaml)?)
    }

    /// Load a policy document from a file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_value(load_document(path)?)
    }

    /// Normalize the raw records, dropping malformed ones.
    pub fn policies(&self) -> Vec<Policy> {
        normalize_policies(&self.policies)
    }

    /// The declared default action, or `fallback` when absent or invalid.
    pub fn default_action_or(&self, fallback: Action) -> Action {
        let Some(raw) = &self.default_action else {
            return fallback;
        };

        match raw.as_str().map(str::parse::<Action>) {
            Some(Ok(action)) => action,
            _ => {
                warn!(
                    declared = %raw,
                    fallback = %fallback,
                    "Invalid default_action in policy document"
                );
                fallback
            }
        }
    }
}
