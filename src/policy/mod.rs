//! Policy data structures and representations.
//!
//! This module defines the normalized policy type, the action set, the
//! raw-record normalizer and the policy document loader.

mod action;
mod document;
pub(crate) mod normalize;

pub use action::Action;
pub(crate) use action::format_actions;
pub use document::{load_document, parse_document, DocumentFormat, PolicyDocument};
pub use normalize::{normalize_policies, validate_policy};

use crate::error::Rejection;
use normalize::check_score;

use serde::{Deserialize, Serialize};

/// A normalized guardrail policy.
///
/// Maps a risk category and a confidence floor to the set of actions the
/// policy makes eligible.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Policy {
    /// Policy identifier (not required to be unique)
    pub id: String,
    /// Risk category, lower-cased
    pub risk: String,
    /// Eligible actions, deduplicated, in declaration order
    pub allowed_actions: Vec<Action>,
    /// Minimum confidence for the policy to apply, in [0.0, 1.0]
    #[serde(default)]
    pub min_confidence: f64,
}

impl Policy {
    /// Create a policy with no confidence floor.
    pub fn new(
        id: impl Into<String>,
        risk: impl AsRef<str>,
        allowed_actions: impl IntoIterator<Item = Action>,
    ) -> Self {
        let mut actions = Vec::new();
        for action in allowed_actions {
            if !actions.contains(&action) {
                actions.push(action);
            }
        }

        Self {
            id: id.into(),
            risk: normalize_risk(risk.as_ref()),
            allowed_actions: actions,
            min_confidence: 0.0,
        }
    }

    /// Set the minimum confidence.
    ///
    /// Values outside [0.0, 1.0] and NaN are rejected, never clamped.
    pub fn with_min_confidence(mut self, min_confidence: f64) -> Result<Self, Rejection> {
        self.min_confidence = check_score(min_confidence, "min_confidence")?;
        Ok(self)
    }

    /// Check whether this policy covers the given risk category.
    pub fn matches_risk(&self, risk: &str) -> bool {
        self.risk == normalize_risk(risk)
    }

    /// Check whether a confidence score meets this policy's floor.
    ///
    /// The comparison is inclusive.
    pub fn threshold_met(&self, confidence: f64) -> bool {
        confidence >= self.min_confidence
    }
}

/// Canonical form of a risk label.
pub(crate) fn normalize_risk(risk: &str) -> String {
    risk.trim().to_lowercase()
}
