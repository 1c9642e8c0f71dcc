// ── gauge resolution ──

use serde::Serialize;

use crate::model::live::LiveData;
use crate::model::widget::{GaugeConfig, GaugeStyle, Orientation, TankShape};
use crate::timefmt;

/// Normalized render contract shared by every gauge style.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GaugeRender {
    pub style: GaugeStyle,
    pub orientation: Orientation,
    pub shape: TankShape,
    pub label: String,
    /// Always within `[0, 100]`.
    pub percentage: f64,
    pub value_text: String,
    pub unit: Option<String>,
    pub min: f64,
    pub max: f64,
    pub fill_color: String,
    pub show_value: bool,
    pub show_min_max: bool,
    pub decimals: u8,
}

/// Map a value into `[0, 100]` over the configured range. A degenerate
/// range (`max <= min`) or non-finite input resolves to `0` -- renderers
/// must never see NaN.
pub fn percentage(value: f64, min: f64, max: f64) -> f64 {
    if max <= min {
        return 0.0;
    }
    let raw = ((value - min) / (max - min)) * 100.0;
    if raw.is_finite() { raw.clamp(0.0, 100.0) } else { 0.0 }
}

fn zone_color(config: &GaugeConfig, value: f64) -> String {
    if value < config.zone_low_threshold {
        config.zone_low_color.clone()
    } else if value > config.zone_high_threshold {
        config.zone_high_color.clone()
    } else {
        config.zone_normal_color.clone()
    }
}

/// Resolve a gauge widget against the current snapshot.
pub fn resolve_gauge(config: &GaugeConfig, live: &LiveData) -> GaugeRender {
    let value = live.value(&config.device_id, &config.register_name);
    let unit = live
        .unit(&config.device_id, &config.register_name)
        .map(ToOwned::to_owned);

    let fill_color = match value {
        None => crate::palette::NEUTRAL.to_owned(),
        Some(v) if config.zones_enabled => zone_color(config, v),
        Some(_) => config.fill_color.clone(),
    };

    GaugeRender {
        style: config.style,
        orientation: config.orientation,
        shape: config.tank_shape,
        label: config.label.clone(),
        percentage: value.map_or(0.0, |v| percentage(v, config.min_value, config.max_value)),
        value_text: timefmt::fixed_or_placeholder(value, config.decimals),
        unit,
        min: config.min_value,
        max: config.max_value,
        fill_color,
        show_value: config.show_value,
        show_min_max: config.show_min_max,
        decimals: config.decimals,
    }
}
