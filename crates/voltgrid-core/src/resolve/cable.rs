// ── cable flow resolution ──

use serde::Serialize;

use crate::model::live::LiveData;
use crate::model::widget::{CableConfig, PathStyle};

/// Animated-direction classification of a cable connector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum FlowState {
    Forward,
    Reverse,
    Stopped,
}

/// Tri-state flow from a live value and two thresholds.
///
/// A missing value defaults to forward -- configs that predate flow
/// thresholds carried no data source and always animated.
pub fn flow_state(value: Option<f64>, upper: f64, lower: f64) -> FlowState {
    match value {
        None => FlowState::Forward,
        Some(v) if v > upper => FlowState::Forward,
        Some(v) if v < lower => FlowState::Reverse,
        Some(_) => FlowState::Stopped,
    }
}

/// Render inputs for a cable connector. Endpoints stay in grid
/// coordinates; the renderer owns clamping and pixel mapping.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CableRender {
    pub start: (f64, f64),
    pub end: (f64, f64),
    pub path_style: PathStyle,
    pub color: String,
    pub thickness: f64,
    pub animated: bool,
    /// Seconds per dash cycle.
    pub animation_speed: f64,
    pub flow: FlowState,
    pub reverse_color: Option<String>,
}

/// Resolve a cable widget against the current snapshot.
pub fn resolve_cable(config: &CableConfig, live: &LiveData) -> CableRender {
    let flow = if config.register_name.is_empty() {
        // No data source configured: always animate forward.
        FlowState::Forward
    } else {
        flow_state(
            live.value(&config.device_id, &config.register_name),
            config.flow_upper_threshold,
            config.flow_lower_threshold,
        )
    };

    CableRender {
        start: (config.start_col, config.start_row),
        end: (config.end_col, config.end_row),
        path_style: config.path_style,
        color: config.color.clone(),
        thickness: config.thickness,
        animated: config.animated,
        animation_speed: config.animation_speed,
        flow,
        reverse_color: config.reverse_color.clone(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::live::Reading;
    use chrono::Utc;
    use std::collections::HashMap;

    fn live_with(value: Option<f64>) -> LiveData {
        let now = Utc::now();
        let mut live = LiveData::empty(now);
        live.registers.insert(
            "grid".into(),
            HashMap::from([(
                "power".into(),
                Reading {
                    value,
                    unit: Some("kW".into()),
                    timestamp: now,
                },
            )]),
        );
        live
    }

    #[test]
    fn flow_is_exactly_one_of_three_states() {
        // value > upper -> forward, value < lower -> reverse, else stopped
        assert_eq!(flow_state(Some(10.0), 5.0, -5.0), FlowState::Forward);
        assert_eq!(flow_state(Some(-10.0), 5.0, -5.0), FlowState::Reverse);
        assert_eq!(flow_state(Some(0.0), 5.0, -5.0), FlowState::Stopped);
        // Boundary values do not animate.
        assert_eq!(flow_state(Some(5.0), 5.0, -5.0), FlowState::Stopped);
        assert_eq!(flow_state(Some(-5.0), 5.0, -5.0), FlowState::Stopped);
        assert_eq!(flow_state(None, 5.0, -5.0), FlowState::Forward);
    }

    #[test]
    fn configured_source_drives_reverse_flow() {
        let config = CableConfig {
            device_id: "grid".into(),
            register_name: "power".into(),
            flow_upper_threshold: 5.0,
            flow_lower_threshold: -5.0,
            ..CableConfig::default()
        };
        assert_eq!(resolve_cable(&config, &live_with(Some(-10.0))).flow, FlowState::Reverse);
    }

    #[test]
    fn unconfigured_source_always_flows_forward() {
        let config = CableConfig::default();
        assert_eq!(resolve_cable(&config, &live_with(Some(-10.0))).flow, FlowState::Forward);
    }
}
