//! Resolution of the final action across matched policies.

use crate::api::{DecisionRecord, Input, RuleTraceEntry};
use crate::config::OutputConfig;
use crate::policy::{format_actions, Action};

use std::collections::BTreeSet;

const CLAUSE_SEPARATOR: &str = " | ";

/// Resolves trace entries into a decision record.
///
/// Resolution never fails: when nothing applies, the caller's default
/// action is used.
#[derive(Debug, Clone, Default)]
pub struct Resolver {
    output: OutputConfig,
}

impl Resolver {
    /// Create a resolver with the given replacement messages.
    pub fn new(output: OutputConfig) -> Self {
        Self { output }
    }

    /// Replacement messages in use.
    pub fn output(&self) -> &OutputConfig {
        &self.output
    }

    /// Build the decision record for one input.
    pub fn resolve(
        &self,
        input: &Input,
        trace: Vec<RuleTraceEntry>,
        default_action: Action,
    ) -> DecisionRecord {
        let mut applied_policies = Vec::new();
        let mut candidates = BTreeSet::new();

        for entry in trace.iter().filter(|e| e.threshold_met) {
            applied_policies.push(entry.policy_id.clone());
            candidates.extend(entry.effective_actions.iter().copied());
        }

        let (decision, outcome) = match Action::most_restrictive(candidates.iter().copied()) {
            None if trace.is_empty() => (
                default_action,
                format!(
                    "No policies matched risk '{}'; default action '{}' applied.",
                    input.risk, default_action
                ),
            ),
            None => (
                default_action,
                format!(
                    "No policy met its confidence threshold; default action '{}' applied.",
                    default_action
                ),
            ),
            Some(action) if candidates.len() == 1 => {
                (action, format!("Single action '{}' selected.", action))
            }
            Some(action) => (
                action,
                format!(
                    "Multiple actions {}; most restrictive '{}' selected.",
                    format_actions(&candidates),
                    action
                ),
            ),
        };

        let mut clauses: Vec<String> = trace.iter().map(RuleTraceEntry::clause).collect();
        clauses.push(outcome);

        let final_output = match self.output.replacement_for(decision) {
            Some(message) => message.to_string(),
            None => input.ai_output.clone(),
        };

        DecisionRecord {
            id: input.id.clone(),
            decision,
            applied_policies,
            rule_trace: trace,
            final_output,
            reason: clauses.join(CLAUSE_SEPARATOR),
        }
    }
}

/// Resolve with the default replacement messages.
pub fn resolve(input: &Input, trace: Vec<RuleTraceEntry>, default_action: Action) -> DecisionRecord {
    Resolver::default().resolve(input, trace, default_action)
}
