//! Risk-to-policy matching with confidence thresholding.

use crate::api::{Input, RuleTraceEntry};
use crate::policy::Policy;

use tracing::debug;

/// Evaluate every policy whose risk matches the input.
///
/// Policies are visited in stored order and all matches are evaluated; there
/// is no short-circuiting. The result is empty when no policy covers the
/// input's risk.
pub fn match_policies(input: &Input, policies: &[Policy]) -> Vec<RuleTraceEntry> {
    let trace: Vec<RuleTraceEntry> = policies
        .iter()
        .filter(|policy| policy.risk == input.risk)
        .map(|policy| evaluate_policy(input, policy))
        .collect();

    debug!(
        input_id = %input.id,
        risk = %input.risk,
        matched = trace.len(),
        met = trace.iter().filter(|e| e.threshold_met).count(),
        "Matched policies"
    );
    trace
}

/// Evaluate one policy against an input's confidence.
pub fn evaluate_policy(input: &Input, policy: &Policy) -> RuleTraceEntry {
    let threshold_met = policy.threshold_met(input.confidence);

    RuleTraceEntry {
        policy_id: policy.id.clone(),
        confidence_required: policy.min_confidence,
        confidence_given: input.confidence,
        threshold_met,
        candidate_actions: policy.allowed_actions.clone(),
        effective_actions: if threshold_met {
            policy.allowed_actions.clone()
        } else {
            Vec::new()
        },
    }
}
