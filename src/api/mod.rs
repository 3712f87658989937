//! Public API for the guardrail engine.
//!
//! This module provides the main interface for evaluating AI outputs,
//! including the `GuardrailEngine`, the input type and the decision records.

mod decision;
mod engine;
mod input;

pub use decision::{records_to_json, records_to_yaml, write_records, DecisionRecord, RuleTraceEntry};
pub use engine::{evaluate, GuardrailEngine, GuardrailEngineBuilder};
pub use input::{input_records, load_inputs, normalize_inputs, validate_input, Input};
