//! Threshold/comparison evaluation shared by conditional imagery, gauge
//! color zones, and cable flow direction.
//!
//! Total over missing inputs: any absent operand means "condition not
//! met", never an error. Equality is exact float comparison -- rounding
//! here could mask a real alarm condition, so the comparison is kept
//! literal.

use serde::{Deserialize, Serialize};

use crate::model::alarm::AlarmSeverity;

/// Comparison operator vocabulary. Serialized as the operator symbol so
/// persisted configs read naturally (`"operator": ">="`).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
pub enum ConditionOp {
    #[serde(rename = ">")]
    #[strum(serialize = ">")]
    GreaterThan,
    #[serde(rename = ">=")]
    #[strum(serialize = ">=")]
    GreaterOrEqual,
    #[serde(rename = "<")]
    #[strum(serialize = "<")]
    LessThan,
    #[serde(rename = "<=")]
    #[strum(serialize = "<=")]
    LessOrEqual,
    #[serde(rename = "==")]
    #[strum(serialize = "==")]
    Equal,
    #[serde(rename = "!=")]
    #[strum(serialize = "!=")]
    NotEqual,
}

impl ConditionOp {
    /// Apply the operator to concrete operands.
    #[allow(clippy::float_cmp)]
    pub fn apply(self, value: f64, threshold: f64) -> bool {
        match self {
            Self::GreaterThan => value > threshold,
            Self::GreaterOrEqual => value >= threshold,
            Self::LessThan => value < threshold,
            Self::LessOrEqual => value <= threshold,
            Self::Equal => value == threshold,
            Self::NotEqual => value != threshold,
        }
    }
}

/// Evaluate a condition against a possibly-absent value, operator, and
/// threshold. Absence of any operand yields `false`.
pub fn evaluate(value: Option<f64>, op: Option<ConditionOp>, threshold: Option<f64>) -> bool {
    match (value, op, threshold) {
        (Some(value), Some(op), Some(threshold)) => op.apply(value, threshold),
        _ => false,
    }
}

/// One entry of an ordered threshold rule list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdRule {
    pub operator: ConditionOp,
    pub value: f64,
    pub severity: AlarmSeverity,
    pub message: String,
}

/// Effective state of an ordered rule list: among the rules that hold
/// for `value`, the first one at the highest severity wins.
pub fn effective_rule<'a>(value: Option<f64>, rules: &'a [ThresholdRule]) -> Option<&'a ThresholdRule> {
    let value = value?;
    let mut best: Option<&ThresholdRule> = None;
    for rule in rules.iter().filter(|r| r.operator.apply(value, r.value)) {
        // Strictly-higher severity replaces; ties keep the earlier rule.
        if best.is_none_or(|b| rule.severity > b.severity) {
            best = Some(rule);
        }
    }
    best
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn absent_operands_never_match_and_never_panic() {
        for op in ConditionOp::iter() {
            assert!(!evaluate(None, Some(op), Some(1.0)));
            assert!(!evaluate(Some(1.0), Some(op), None));
        }
        assert!(!evaluate(Some(1.0), None, Some(1.0)));
        assert!(!evaluate(None, None, None));
    }

    #[test]
    fn operators_apply_numeric_semantics() {
        assert!(evaluate(Some(2.0), Some(ConditionOp::GreaterThan), Some(1.0)));
        assert!(evaluate(Some(1.0), Some(ConditionOp::GreaterOrEqual), Some(1.0)));
        assert!(evaluate(Some(0.5), Some(ConditionOp::LessThan), Some(1.0)));
        assert!(evaluate(Some(1.0), Some(ConditionOp::LessOrEqual), Some(1.0)));
        assert!(evaluate(Some(1.0), Some(ConditionOp::Equal), Some(1.0)));
        assert!(evaluate(Some(1.1), Some(ConditionOp::NotEqual), Some(1.0)));
    }

    #[test]
    fn equality_is_exact_float_comparison() {
        // 0.1 + 0.2 != 0.3 in IEEE 754; the evaluator preserves that.
        assert!(!evaluate(Some(0.1 + 0.2), Some(ConditionOp::Equal), Some(0.3)));
        assert!(evaluate(Some(0.1 + 0.2), Some(ConditionOp::NotEqual), Some(0.3)));
    }

    #[test]
    fn operator_symbols_round_trip_through_serde() {
        for op in ConditionOp::iter() {
            let json = serde_json::to_string(&op).unwrap();
            let back: ConditionOp = serde_json::from_str(&json).unwrap();
            assert_eq!(back, op);
        }
        assert_eq!(serde_json::to_string(&ConditionOp::GreaterOrEqual).unwrap(), "\">=\"");
    }

    #[test]
    fn highest_severity_wins_then_first_in_order() {
        let rules = vec![
            ThresholdRule {
                operator: ConditionOp::GreaterThan,
                value: 10.0,
                severity: AlarmSeverity::Warning,
                message: "warm".into(),
            },
            ThresholdRule {
                operator: ConditionOp::GreaterThan,
                value: 20.0,
                severity: AlarmSeverity::Critical,
                message: "hot".into(),
            },
            ThresholdRule {
                operator: ConditionOp::GreaterThan,
                value: 30.0,
                severity: AlarmSeverity::Critical,
                message: "melting".into(),
            },
        ];
        assert_eq!(effective_rule(Some(35.0), &rules).unwrap().message, "hot");
        assert_eq!(effective_rule(Some(15.0), &rules).unwrap().message, "warm");
        assert!(effective_rule(Some(5.0), &rules).is_none());
        assert!(effective_rule(None, &rules).is_none());
    }
}
