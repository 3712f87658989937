//! Validation of raw policy records.

use super::{normalize_risk, Action, Policy};
use crate::error::Rejection;

use serde_json::{Map, Value};
use tracing::{debug, warn};

/// Validate and normalize raw policy records.
///
/// Malformed entries are skipped with one warning each. The surviving
/// policies keep their input order; duplicate ids are kept.
pub fn normalize_policies(raw: &[Value]) -> Vec<Policy> {
    let mut policies = Vec::with_capacity(raw.len());

    for (index, entry) in raw.iter().enumerate() {
        match validate_policy(entry) {
            Ok(policy) => policies.push(policy),
            Err(rejection) => {
                warn!(
                    index,
                    id = entry_label(entry),
                    reason = %rejection,
                    "Skipping malformed policy"
                );
            }
        }
    }

    debug!(
        accepted = policies.len(),
        rejected = raw.len() - policies.len(),
        "Normalized policies"
    );
    policies
}

/// Validate a single raw policy record.
pub fn validate_policy(entry: &Value) -> Result<Policy, Rejection> {
    let record = entry.as_object().ok_or(Rejection::NotAnObject)?;

    let id = required_text(record, "id")?;
    let risk = required_text(record, "risk")?;
    let allowed_actions = parse_actions(record.get("allowed_actions"))?;
    let min_confidence = match record.get("min_confidence") {
        None | Some(Value::Null) => 0.0,
        Some(value) => score(value, "min_confidence")?,
    };

    Ok(Policy {
        id: id.to_string(),
        risk: normalize_risk(risk),
        allowed_actions,
        min_confidence,
    })
}

fn parse_actions(value: Option<&Value>) -> Result<Vec<Action>, Rejection> {
    let items = match value {
        Some(Value::Array(items)) if !items.is_empty() => items,
        _ => return Err(Rejection::NoActions),
    };

    let mut actions = Vec::with_capacity(items.len());
    for item in items {
        let action = item
            .as_str()
            .and_then(|name| name.parse::<Action>().ok())
            .ok_or_else(|| Rejection::UnknownAction {
                value: item.to_string(),
            })?;
        if !actions.contains(&action) {
            actions.push(action);
        }
    }
    Ok(actions)
}

/// Read a required non-empty string field.
pub(crate) fn required_text<'a>(
    record: &'a Map<String, Value>,
    field: &'static str,
) -> Result<&'a str, Rejection> {
    record
        .get(field)
        .and_then(Value::as_str)
        .filter(|text| !text.trim().is_empty())
        .ok_or(Rejection::MissingField { field })
}

/// Coerce a value to a score in [0.0, 1.0].
///
/// Numbers and numeric strings are accepted; booleans are not.
pub(crate) fn score(value: &Value, field: &'static str) -> Result<f64, Rejection> {
    let parsed = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    };

    let parsed = parsed.ok_or_else(|| Rejection::NotNumeric {
        field,
        value: value.to_string(),
    })?;

    check_score(parsed, field)
}

/// Require a score to be a finite number in [0.0, 1.0].
pub(crate) fn check_score(value: f64, field: &'static str) -> Result<f64, Rejection> {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(Rejection::OutOfRange { field, value });
    }
    Ok(value)
}

/// Best-effort label for a record in log lines.
pub(crate) fn entry_label(entry: &Value) -> &str {
    entry
        .get("id")
        .and_then(Value::as_str)
        .unwrap_or("<unknown>")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_valid_policy() {
        let raw = json!({
            "id": "MED_STRICT",
            "risk": "Medical",
            "allowed_actions": ["escalate", "Block", "escalate"],
            "min_confidence": 0.95
        });

        let policy = validate_policy(&raw).unwrap();
        assert_eq!(policy.id, "MED_STRICT");
        assert_eq!(policy.risk, "medical");
        assert_eq!(policy.allowed_actions, vec![Action::Escalate, Action::Block]);
        assert_eq!(policy.min_confidence, 0.95);
    }

    #[test]
    fn test_min_confidence_defaults_to_zero() {
        let raw = json!({"id": "p", "risk": "legal", "allowed_actions": ["allow"]});
        assert_eq!(validate_policy(&raw).unwrap().min_confidence, 0.0);

        let raw = json!({"id": "p", "risk": "legal", "allowed_actions": ["allow"], "min_confidence": null});
        assert_eq!(validate_policy(&raw).unwrap().min_confidence, 0.0);
    }

    #[test]
    fn test_min_confidence_coerced_from_string() {
        let raw = json!({"id": "p", "risk": "legal", "allowed_actions": ["allow"], "min_confidence": "0.5"});
        assert_eq!(validate_policy(&raw).unwrap().min_confidence, 0.5);
    }

    #[test]
    fn test_rejections() {
        let cases = vec![
            (json!("not a policy"), Rejection::NotAnObject),
            (
                json!({"risk": "legal", "allowed_actions": ["allow"]}),
                Rejection::MissingField { field: "id" },
            ),
            (
                json!({"id": "", "risk": "legal", "allowed_actions": ["allow"]}),
                Rejection::MissingField { field: "id" },
            ),
            (
                json!({"id": "p", "risk": "  ", "allowed_actions": ["allow"]}),
                Rejection::MissingField { field: "risk" },
            ),
            (
                json!({"id": "p", "risk": "legal", "allowed_actions": []}),
                Rejection::NoActions,
            ),
            (
                json!({"id": "p", "risk": "legal", "allowed_actions": "block"}),
                Rejection::NoActions,
            ),
            (
                json!({"id": "p", "risk": "legal", "allowed_actions": ["block", "deny"]}),
                Rejection::UnknownAction {
                    value: "\"deny\"".to_string(),
                },
            ),
            (
                json!({"id": "p", "risk": "legal", "allowed_actions": ["block"], "min_confidence": true}),
                Rejection::NotNumeric {
                    field: "min_confidence",
                    value: "true".to_string(),
                },
            ),
            (
                json!({"id": "p", "risk": "legal", "allowed_actions": ["block"], "min_confidence": 1.2}),
                Rejection::OutOfRange {
                    field: "min_confidence",
                    value: 1.2,
                },
            ),
        ];

        for (raw, expected) in cases {
            assert_eq!(validate_policy(&raw).unwrap_err(), expected, "{}", raw);
        }
    }

    #[test]
    fn test_nan_string_rejected() {
        let raw = json!({"id": "p", "risk": "legal", "allowed_actions": ["block"], "min_confidence": "NaN"});
        assert!(matches!(
            validate_policy(&raw),
            Err(Rejection::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_normalize_skips_invalid_and_keeps_order() {
        let raw = vec![
            json!({"id": "B", "risk": "legal", "allowed_actions": ["block"]}),
            json!({"id": "broken", "risk": "legal"}),
            json!({"id": "A", "risk": "legal", "allowed_actions": ["allow"]}),
            json!({"id": "B", "risk": "medical", "allowed_actions": ["sanitize"]}),
        ];

        let policies = normalize_policies(&raw);
        let ids: Vec<&str> = policies.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["B", "A", "B"]);
    }
}
