//! Decision records and their audit trace.

use crate::policy::{Action, DocumentFormat};
use crate::Result;

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Audit entry for one policy whose risk matched an input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleTraceEntry {
    /// ID of the matched policy
    pub policy_id: String,
    /// The policy's confidence floor
    pub confidence_required: f64,
    /// The input's confidence
    pub confidence_given: f64,
    /// Whether `confidence_given >= confidence_required`
    pub threshold_met: bool,
    /// Actions the policy allows
    pub candidate_actions: Vec<Action>,
    /// Actions that actually apply; empty when the threshold was missed
    pub effective_actions: Vec<Action>,
}

impl RuleTraceEntry {
    /// Human-readable clause describing this entry.
    pub fn clause(&self) -> String {
        let (comparison, mark) = if self.threshold_met {
            (">=", "✓")
        } else {
            ("<", "✗")
        };
        format!(
            "Policy {}: confidence {:?} {} {:?} {}, actions={}",
            self.policy_id,
            self.confidence_given,
            comparison,
            self.confidence_required,
            mark,
            crate::policy::format_actions(&self.candidate_actions),
        )
    }
}

/// The final, immutable result of evaluating one input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionRecord {
    /// Echoes the input ID
    pub id: String,
    /// The resolved action
    pub decision: Action,
    /// IDs of policies whose threshold was met, in match order
    pub applied_policies: Vec<String>,
    /// One entry per matched policy, whether or not its threshold was met
    pub rule_trace: Vec<RuleTraceEntry>,
    /// The output to show in place of the original
    pub final_output: String,
    /// Explanation of the decision
    pub reason: String,
}

impl DecisionRecord {
    /// Check whether the decision fell back to the default action.
    pub fn is_default(&self) -> bool {
        self.applied_policies.is_empty()
    }

    /// Check whether the record awaits human review.
    pub fn requires_review(&self) -> bool {
        self.decision.requires_review()
    }
}

/// Serialize decision records as pretty-printed JSON.
pub fn records_to_json(records: &[DecisionRecord]) -> Result<String> {
    serde_json::to_string_pretty(records).map_err(crate::Error::from)
}

/// Serialize decision records as YAML.
pub fn records_to_yaml(records: &[DecisionRecord]) -> Result<String> {
    serde_yaml::to_string(records).map_err(crate::Error::from)
}

/// Write decision records to a file.
///
/// YAML is used for `.yaml`/`.yml` paths and pretty JSON otherwise.
pub fn write_records(path: impl AsRef<Path>, records: &[DecisionRecord]) -> Result<()> {
    let path = path.as_ref();
    let content = match DocumentFormat::from_path(path) {
        DocumentFormat::Yaml => records_to_yaml(records)?,
        DocumentFormat::Json | DocumentFormat::Auto => {
            let mut json = records_to_json(records)?;
            json.push('\n');
            json
        }
    };
    std::fs::write(path, content)?;
    Ok(())
}
