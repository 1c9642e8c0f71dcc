// ── value_display resolution ──

use serde::Serialize;

use crate::model::live::LiveData;
use crate::model::widget::ValueDisplayConfig;
use crate::timefmt;

/// Semantic display tone for a resolved value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Tone {
    #[default]
    Neutral,
    Ok,
    Warning,
    Critical,
}

impl Tone {
    pub fn as_hex(self) -> &'static str {
        match self {
            Self::Neutral => crate::palette::NEUTRAL,
            Self::Ok => crate::palette::OK,
            Self::Warning => crate::palette::WARNING,
            Self::Critical => crate::palette::CRITICAL,
        }
    }
}

/// Render inputs for a value display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueRender {
    pub label: String,
    /// Formatted value, or `"--"` when absent.
    pub text: String,
    pub unit: Option<String>,
    pub tone: Tone,
}

/// Resolve a value display against the current snapshot.
///
/// Tone is ordered: critical threshold first, then warning, else ok --
/// and neutral when no thresholds are configured or no data is present.
pub fn resolve_value(config: &ValueDisplayConfig, live: &LiveData) -> ValueRender {
    let value = live.value(&config.device_id, &config.register_name);
    let unit = config.unit_override.clone().or_else(|| {
        live.unit(&config.device_id, &config.register_name)
            .map(ToOwned::to_owned)
    });

    let has_thresholds =
        config.warning_threshold.is_some() || config.critical_threshold.is_some();
    let tone = match value {
        Some(v) if has_thresholds => {
            if config.critical_threshold.is_some_and(|t| v >= t) {
                Tone::Critical
            } else if config.warning_threshold.is_some_and(|t| v >= t) {
                Tone::Warning
            } else {
                Tone::Ok
            }
        }
        _ => Tone::Neutral,
    };

    ValueRender {
        label: config.label.clone(),
        text: timefmt::fixed_or_placeholder(value, config.decimals),
        unit,
        tone,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::live::Reading;
    use chrono::Utc;
    use std::collections::HashMap;

    fn live_with(device: &str, register: &str, value: Option<f64>, unit: Option<&str>) -> LiveData {
        let now = Utc::now();
        let mut live = LiveData::empty(now);
        live.registers.insert(
            device.into(),
            HashMap::from([(
                register.into(),
                Reading {
                    value,
                    unit: unit.map(Into::into),
                    timestamp: now,
                },
            )]),
        );
        live
    }

    fn config(device: &str, register: &str) -> ValueDisplayConfig {
        ValueDisplayConfig {
            device_id: device.into(),
            register_name: register.into(),
            ..ValueDisplayConfig::default()
        }
    }

    #[test]
    fn formats_value_with_unit_to_one_decimal() {
        let live = live_with("dev1", "temp", Some(42.567), Some("C"));
        let render = resolve_value(&config("dev1", "temp"), &live);
        assert_eq!(render.text, "42.6");
        assert_eq!(render.unit.as_deref(), Some("C"));
        assert_eq!(render.tone, Tone::Neutral);
    }

    #[test]
    fn missing_register_renders_placeholder() {
        let live = live_with("dev1", "temp", Some(42.0), None);
        let render = resolve_value(&config("dev1", "voltage"), &live);
        assert_eq!(render.text, "--");
        assert_eq!(render.tone, Tone::Neutral);
    }

    #[test]
    fn thresholds_pick_ordered_tone() {
        let live = live_with("dev1", "temp", Some(85.0), None);
        let mut cfg = config("dev1", "temp");
        cfg.warning_threshold = Some(70.0);
        cfg.critical_threshold = Some(90.0);
        assert_eq!(resolve_value(&cfg, &live).tone, Tone::Warning);

        let hot = live_with("dev1", "temp", Some(95.0), None);
        assert_eq!(resolve_value(&cfg, &hot).tone, Tone::Critical);

        let cool = live_with("dev1", "temp", Some(20.0), None);
        assert_eq!(resolve_value(&cfg, &cool).tone, Tone::Ok);
    }

    #[test]
    fn unit_override_beats_register_unit() {
        let live = live_with("dev1", "power", Some(1500.0), Some("W"));
        let mut cfg = config("dev1", "power");
        cfg.unit_override = Some("kW".into());
        assert_eq!(resolve_value(&cfg, &live).unit.as_deref(), Some("kW"));
    }
}
