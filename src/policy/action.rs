//! Guardrail actions and their restriction order.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// An action a policy may prescribe for an AI output.
///
/// Actions are totally ordered by restriction:
/// `block > escalate > sanitize > allow`. The order comes from [`Action::rank`]
/// and not from the declaration order of the variants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// Show the output unchanged
    Allow,
    /// Replace the output with a generic safe message
    Sanitize,
    /// Withhold the output pending human review
    Escalate,
    /// Suppress the output entirely
    #[default]
    Block,
}

impl Action {
    /// Every action, least restrictive first.
    pub const ALL: [Action; 4] = [
        Action::Allow,
        Action::Sanitize,
        Action::Escalate,
        Action::Block,
    ];

    /// Restriction rank. Higher is more restrictive.
    pub fn rank(&self) -> u8 {
        match self {
            Action::Allow => 0,
            Action::Sanitize => 1,
            Action::Escalate => 2,
            Action::Block => 3,
        }
    }

    /// Get the string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Allow => "allow",
            Action::Sanitize => "sanitize",
            Action::Escalate => "escalate",
            Action::Block => "block",
        }
    }

    /// Check if the original output may be shown.
    pub fn shows_output(&self) -> bool {
        matches!(self, Action::Allow)
    }

    /// Check if this outcome is pending human action.
    pub fn requires_review(&self) -> bool {
        matches!(self, Action::Escalate)
    }

    /// Pick the most restrictive action, or `None` for an empty iterator.
    pub fn most_restrictive<I>(actions: I) -> Option<Action>
    where
        I: IntoIterator<Item = Action>,
    {
        actions.into_iter().max()
    }
}

impl PartialOrd for Action {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Action {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Action {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "allow" => Ok(Action::Allow),
            "sanitize" => Ok(Action::Sanitize),
            "escalate" => Ok(Action::Escalate),
            "block" => Ok(Action::Block),
            _ => Err(crate::Error::parse(format!("Unknown action: {}", s))),
        }
    }
}

/// Render a list of actions as `[a, b]`.
pub(crate) fn format_actions<'a, I>(actions: I) -> String
where
    I: IntoIterator<Item = &'a Action>,
{
    let names: Vec<&str> = actions.into_iter().map(Action::as_str).collect();
    format!("[{}]", names.join(", "))
}
