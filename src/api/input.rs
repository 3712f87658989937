//! AI output records submitted for evaluation.

use crate::error::Rejection;
use crate::policy::normalize::{check_score, entry_label, required_text, score};
use crate::policy::{load_document, normalize_risk};
use crate::{Error, Result};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;
use tracing::{debug, warn};

/// A normalized input: one AI-generated output with its risk label and
/// model-reported confidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Input {
    /// Input identifier, echoed in the decision record
    pub id: String,
    /// Risk category, lower-cased
    pub risk: String,
    /// Model-reported confidence in [0.0, 1.0]
    pub confidence: f64,
    /// The original generated text
    #[serde(default)]
    pub ai_output: String,
}

impl Input {
    /// Create an input with an empty output text.
    ///
    /// A confidence outside [0.0, 1.0] or NaN is rejected, never clamped.
    pub fn new(
        id: impl Into<String>,
        risk: impl AsRef<str>,
        confidence: f64,
    ) -> std::result::Result<Self, Rejection> {
        Ok(Self {
            id: id.into(),
            risk: normalize_risk(risk.as_ref()),
            confidence: check_score(confidence, "confidence")?,
            ai_output: String::new(),
        })
    }

    /// Set the generated text.
    pub fn with_output(mut self, ai_output: impl Into<String>) -> Self {
        self.ai_output = ai_output.into();
        self
    }
}

/// Validate and normalize raw input records.
///
/// Malformed entries are skipped with one warning each; the rest keep their
/// order.
pub fn normalize_inputs(raw: &[Value]) -> Vec<Input> {
    let mut inputs = Vec::with_capacity(raw.len());

    for (index, entry) in raw.iter().enumerate() {
        match validate_input(entry) {
            Ok(input) => inputs.push(input),
            Err(rejection) => {
                warn!(
                    index,
                    id = entry_label(entry),
                    reason = %rejection,
                    "Skipping malformed input"
                );
            }
        }
    }

    debug!(
        accepted = inputs.len(),
        rejected = raw.len() - inputs.len(),
        "Normalized inputs"
    );
    inputs
}

/// Validate a single raw input record.
///
/// The generated text is read from `ai_output`, or from `output` when
/// `ai_output` is absent.
pub fn validate_input(entry: &Value) -> std::result::Result<Input, Rejection> {
    let record = entry.as_object().ok_or(Rejection::NotAnObject)?;

    let id = required_text(record, "id")?;
    let risk = required_text(record, "risk")?;
    let confidence = match record.get("confidence") {
        None | Some(Value::Null) => {
            return Err(Rejection::MissingField {
                field: "confidence",
            })
        }
        Some(value) => score(value, "confidence")?,
    };

    let (field, text) = match record.get("ai_output") {
        Some(value) => ("ai_output", Some(value)),
        None => ("output", record.get("output")),
    };
    let ai_output = match text {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(_) => return Err(Rejection::NotText { field }),
    };

    Ok(Input {
        id: id.to_string(),
        risk: normalize_risk(risk),
        confidence,
        ai_output,
    })
}

/// Extract the raw input records from a parsed input document.
///
/// The document must be an array at the top level.
pub fn input_records(document: Value) -> Result<Vec<Value>> {
    match document {
        Value::Array(records) => Ok(records),
        _ => Err(Error::parse("input document must be an array of records")),
    }
}

/// Load raw input records from a JSON or YAML file.
pub fn load_inputs(path: impl AsRef<Path>) -> Result<Vec<Value>> {
    input_records(load_document(path)?)
}
