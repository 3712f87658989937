//! # AI Guardrail Engine
//!
//! Policy-driven guardrails for AI-generated outputs. Each output carries a
//! risk category and a model-reported confidence; the engine matches it
//! against every policy for that risk, keeps the policies whose confidence
//! floor is met, and resolves the most restrictive of their actions.
//!
//! ## Features
//!
//! - **Graceful normalization**: malformed policy or input records are
//!   skipped with a warning instead of failing the batch
//! - **Deterministic decisions**: `block > escalate > sanitize > allow`,
//!   with a configurable default when nothing applies
//! - **Full audit trace**: every matched policy is recorded with its
//!   threshold outcome, plus a human-readable reason
//!
//! ## Quick Start
//!
//! ```rust
//! use ai_guardrail_engine::{evaluate, Action};
//! use serde_json::json;
//!
//! let policies = vec![
//!     json!({"id": "MED_STRICT", "risk": "medical", "allowed_actions": ["escalate"], "min_confidence": 0.95}),
//!     json!({"id": "MED_BLOCK", "risk": "medical", "allowed_actions": ["block"]}),
//! ];
//! let inputs = vec![
//!     json!({"id": "R1", "risk": "Medical", "confidence": 0.96, "ai_output": "Take 400mg."}),
//! ];
//!
//! let records = evaluate(&policies, &inputs, Action::Block);
//! assert_eq!(records[0].decision, Action::Block);
//! assert_eq!(records[0].applied_policies, vec!["MED_STRICT", "MED_BLOCK"]);
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod api;
pub mod config;
pub mod core;
pub mod error;
pub mod policy;
pub mod telemetry;

// Re-export main types for convenience
pub use api::{
    evaluate, DecisionRecord, GuardrailEngine, GuardrailEngineBuilder, Input, RuleTraceEntry,
};
pub use config::Config;
pub use error::{Error, Rejection, Result};
pub use policy::{Action, Policy, PolicyDocument};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
