// ── Alarm domain types ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Alarm severity, ordered by urgency.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AlarmSeverity {
    Info,
    Warning,
    Critical,
}

/// An alarm row from the external alarm store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alarm {
    pub id: String,
    pub site_id: String,
    pub device_id: Option<String>,
    pub severity: AlarmSeverity,
    pub message: String,
    pub raised_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
}

impl Alarm {
    pub fn is_active(&self) -> bool {
        self.resolved_at.is_none()
    }
}

/// Query executed by the runtime against the alarm store; the result is
/// ordered newest-first and capped at `max_items`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlarmQuery {
    pub site_id: String,
    /// Empty means all severities.
    pub severities: Vec<AlarmSeverity>,
    pub show_resolved: bool,
    pub max_items: usize,
}

impl AlarmQuery {
    /// Whether an alarm row satisfies this query's filters.
    pub fn matches(&self, alarm: &Alarm) -> bool {
        if alarm.site_id != self.site_id {
            return false;
        }
        if !self.show_resolved && !alarm.is_active() {
            return false;
        }
        self.severities.is_empty() || self.severities.contains(&alarm.severity)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn alarm(severity: AlarmSeverity, resolved: bool) -> Alarm {
        Alarm {
            id: "a1".into(),
            site_id: "s1".into(),
            device_id: None,
            severity,
            message: "overvoltage".into(),
            raised_at: Utc::now(),
            resolved_at: resolved.then(Utc::now),
        }
    }

    #[test]
    fn severity_orders_by_urgency() {
        assert!(AlarmSeverity::Critical > AlarmSeverity::Warning);
        assert!(AlarmSeverity::Warning > AlarmSeverity::Info);
    }

    #[test]
    fn query_filters_severity_and_resolution() {
        let query = AlarmQuery {
            site_id: "s1".into(),
            severities: vec![AlarmSeverity::Critical],
            show_resolved: false,
            max_items: 8,
        };
        assert!(query.matches(&alarm(AlarmSeverity::Critical, false)));
        assert!(!query.matches(&alarm(AlarmSeverity::Warning, false)));
        assert!(!query.matches(&alarm(AlarmSeverity::Critical, true)));
    }

    #[test]
    fn empty_severity_set_matches_all() {
        let query = AlarmQuery {
            site_id: "s1".into(),
            severities: Vec::new(),
            show_resolved: true,
            max_items: 8,
        };
        assert!(query.matches(&alarm(AlarmSeverity::Info, true)));
    }
}
