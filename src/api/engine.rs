//! Guardrail engine: the decision pipeline orchestrator.

use super::{normalize_inputs, DecisionRecord, Input};
use crate::config::{Config, OutputConfig};
use crate::core::{match_policies, Resolver};
use crate::policy::{normalize_policies, Action, Policy, PolicyDocument};
use crate::telemetry::DecisionMetrics;
use crate::Result;

use serde_json::Value;
use tracing::{debug, info, warn};

/// Evaluate raw policy and input records with the default messages.
///
/// Runs normalization, matching and resolution, and returns one decision
/// record per valid input, in input order.
pub fn evaluate(policies: &[Value], inputs: &[Value], default_action: Action) -> Vec<DecisionRecord> {
    GuardrailEngine::default().evaluate(policies, inputs, default_action)
}

/// The guardrail engine.
///
/// Holds only configuration; policies and inputs are passed to every call,
/// so one engine can evaluate any number of independent batches.
#[derive(Debug, Clone, Default)]
pub struct GuardrailEngine {
    /// Configuration
    config: Config,
    /// Decision resolver
    resolver: Resolver,
}

impl GuardrailEngine {
    /// Create a guardrail engine builder.
    pub fn builder() -> GuardrailEngineBuilder {
        GuardrailEngineBuilder::new()
    }

    /// Create a new engine with the given configuration.
    pub fn new(config: Config) -> Self {
        let resolver = Resolver::new(config.output.clone());
        Self { config, resolver }
    }

    /// The configuration in use.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The configured default action.
    pub fn default_action(&self) -> Action {
        self.config.engine.default_action
    }

    /// Normalize raw records and evaluate every valid input.
    pub fn evaluate(
        &self,
        policies: &[Value],
        inputs: &[Value],
        default_action: Action,
    ) -> Vec<DecisionRecord> {
        let policies = normalize_policies(policies);
        let inputs = normalize_inputs(inputs);
        self.evaluate_normalized(&policies, &inputs, default_action)
    }

    /// Evaluate a policy document against raw input records.
    ///
    /// The document's `default_action` wins over the configured one when it
    /// is valid.
    pub fn evaluate_document(&self, document: &PolicyDocument, inputs: &[Value]) -> Vec<DecisionRecord> {
        self.evaluate_document_with(document, inputs, None)
    }

    /// Evaluate a policy document with an optional explicit default action.
    ///
    /// An explicit default wins over the document's `default_action`; without
    /// one this behaves like [`GuardrailEngine::evaluate_document`].
    pub fn evaluate_document_with(
        &self,
        document: &PolicyDocument,
        inputs: &[Value],
        default_override: Option<Action>,
    ) -> Vec<DecisionRecord> {
        let default_action = match default_override {
            Some(action) => {
                if document.default_action.is_some() {
                    debug!(%action, "Explicit default action overrides the policy document");
                }
                action
            }
            None => document.default_action_or(self.default_action()),
        };
        self.evaluate(&document.policies, inputs, default_action)
    }

    /// Evaluate already-normalized inputs against normalized policies.
    ///
    /// Each record depends only on its own input and the policy set.
    pub fn evaluate_normalized(
        &self,
        policies: &[Policy],
        inputs: &[Input],
        default_action: Action,
    ) -> Vec<DecisionRecord> {
        if policies.is_empty() {
            warn!(%default_action, "No valid policies; every input falls back to the default action");
        }

        let mut metrics = DecisionMetrics::new();
        let mut records = Vec::with_capacity(inputs.len());

        for input in inputs {
            let trace = match_policies(input, policies);
            let record = self.resolver.resolve(input, trace, default_action);

            info!(
                input_id = %record.id,
                risk = %input.risk,
                confidence = input.confidence,
                decision = %record.decision,
                policies = ?record.applied_policies,
                "Resolved decision"
            );

            metrics.record(&record);
            records.push(record);
        }

        info!(
            total = metrics.total(),
            allow = metrics.count(Action::Allow),
            sanitize = metrics.count(Action::Sanitize),
            escalate = metrics.count(Action::Escalate),
            block = metrics.count(Action::Block),
            defaulted = metrics.defaulted(),
            "Evaluation complete"
        );
        records
    }
}

/// Builder for creating a GuardrailEngine.
#[derive(Debug, Default)]
pub struct GuardrailEngineBuilder {
    config: Option<Config>,
    default_action: Option<Action>,
    sanitize_message: Option<String>,
    escalate_message: Option<String>,
    block_message: Option<String>,
}

impl GuardrailEngineBuilder {
    /// Create a new guardrail engine builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the configuration.
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the default action.
    pub fn with_default_action(mut self, action: Action) -> Self {
        self.default_action = Some(action);
        self
    }

    /// Set the text shown for sanitized outputs.
    pub fn with_sanitize_message(mut self, message: impl Into<String>) -> Self {
        self.sanitize_message = Some(message.into());
        self
    }

    /// Set the text shown for escalated outputs.
    pub fn with_escalate_message(mut self, message: impl Into<String>) -> Self {
        self.escalate_message = Some(message.into());
        self
    }

    /// Set the text shown for blocked outputs.
    pub fn with_block_message(mut self, message: impl Into<String>) -> Self {
        self.block_message = Some(message.into());
        self
    }

    /// Build the guardrail engine.
    pub fn build(self) -> Result<GuardrailEngine> {
        let mut config = self.config.unwrap_or_default();

        // Apply builder overrides
        if let Some(action) = self.default_action {
            config.engine.default_action = action;
        }
        let OutputConfig {
            sanitize_message,
            escalate_message,
            block_message,
        } = &mut config.output;
        if let Some(message) = self.sanitize_message {
            *sanitize_message = message;
        }
        if let Some(message) = self.escalate_message {
            *escalate_message = message;
        }
        if let Some(message) = self.block_message {
            *block_message = message;
        }

        config.validate()?;
        Ok(GuardrailEngine::new(config))
    }
}
