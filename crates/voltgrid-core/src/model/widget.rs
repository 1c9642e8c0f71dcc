// ── Widget domain types ──
//
// A widget is a positioned, typed visual element on a dashboard grid.
// Its `config` is a tagged union keyed by `widget_type` -- each variant
// carries its own strongly-typed struct, so a mistyped key is a compile
// error here rather than a silently-wrong lookup at render time.

use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::chart::{Aggregation, ChartParameter, TimeRange};
use crate::condition::ConditionOp;
use crate::model::alarm::AlarmSeverity;

/// Position and extent of a widget, in grid-cell units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridRect {
    pub col: u16,
    pub row: u16,
    #[serde(default = "default_span")]
    pub w: u16,
    #[serde(default = "default_span")]
    pub h: u16,
}

fn default_span() -> u16 {
    1
}

impl Default for GridRect {
    fn default() -> Self {
        Self {
            col: 0,
            row: 0,
            w: 1,
            h: 1,
        }
    }
}

/// A positioned, typed visual element on a dashboard.
///
/// Created with a default config for its type, mutated in place on save,
/// deleted by the hosting canvas. Last-write-wins; not versioned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Widget {
    pub id: Uuid,
    #[serde(default)]
    pub grid: GridRect,
    /// Stacking order; higher draws on top.
    #[serde(default)]
    pub z: i32,
    pub config: WidgetConfig,
}

impl Widget {
    /// A fresh widget of the given kind with its documented default config.
    pub fn new(kind: WidgetKind, grid: GridRect) -> Self {
        Self {
            id: Uuid::new_v4(),
            grid,
            z: 0,
            config: WidgetConfig::default_for(kind),
        }
    }

    pub fn kind(&self) -> Option<WidgetKind> {
        self.config.kind()
    }
}

/// Closed vocabulary of widget types.
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
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum WidgetKind {
    ValueDisplay,
    Chart,
    Image,
    AlarmList,
    StatusIndicator,
    Text,
    Gauge,
    Cable,
}

/// Typed widget configuration, tagged by `widget_type`.
///
/// An unrecognized tag deserializes to [`WidgetConfig::Unknown`] rather
/// than failing -- the renderer shows a placeholder for it and the rest
/// of the dashboard is unaffected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "widget_type", rename_all = "snake_case")]
pub enum WidgetConfig {
    ValueDisplay(ValueDisplayConfig),
    Chart(ChartConfig),
    Image(ImageConfig),
    AlarmList(AlarmListConfig),
    StatusIndicator(StatusIndicatorConfig),
    Text(TextConfig),
    Gauge(GaugeConfig),
    Cable(CableConfig),
    #[serde(other)]
    Unknown,
}

impl WidgetConfig {
    /// The documented default config for a widget kind.
    pub fn default_for(kind: WidgetKind) -> Self {
        match kind {
            WidgetKind::ValueDisplay => Self::ValueDisplay(ValueDisplayConfig::default()),
            WidgetKind::Chart => Self::Chart(ChartConfig::default()),
            WidgetKind::Image => Self::Image(ImageConfig::default()),
            WidgetKind::AlarmList => Self::AlarmList(AlarmListConfig::default()),
            WidgetKind::StatusIndicator => {
                Self::StatusIndicator(StatusIndicatorConfig::default())
            }
            WidgetKind::Text => Self::Text(TextConfig::default()),
            WidgetKind::Gauge => Self::Gauge(GaugeConfig::default()),
            WidgetKind::Cable => Self::Cable(CableConfig::default()),
        }
    }

    pub fn kind(&self) -> Option<WidgetKind> {
        match self {
            Self::ValueDisplay(_) => Some(WidgetKind::ValueDisplay),
            Self::Chart(_) => Some(WidgetKind::Chart),
            Self::Image(_) => Some(WidgetKind::Image),
            Self::AlarmList(_) => Some(WidgetKind::AlarmList),
            Self::StatusIndicator(_) => Some(WidgetKind::StatusIndicator),
            Self::Text(_) => Some(WidgetKind::Text),
            Self::Gauge(_) => Some(WidgetKind::Gauge),
            Self::Cable(_) => Some(WidgetKind::Cable),
            Self::Unknown => None,
        }
    }

    /// Lenient parse: malformed or unrecognized config becomes
    /// [`WidgetConfig::Unknown`] instead of an error.
    pub fn parse(value: &serde_json::Value) -> Self {
        match Self::deserialize(value) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(error = %e, "widget config failed to parse, rendering placeholder");
                Self::Unknown
            }
        }
    }
}

// ── value_display ────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValueDisplayConfig {
    pub label: String,
    /// Empty selects the site aggregate pseudo-device.
    pub device_id: String,
    pub register_name: String,
    pub decimals: u8,
    /// Overrides the unit reported by the register, when set.
    pub unit_override: Option<String>,
    pub warning_threshold: Option<f64>,
    pub critical_threshold: Option<f64>,
}

impl Default for ValueDisplayConfig {
    fn default() -> Self {
        Self {
            label: String::new(),
            device_id: String::new(),
            register_name: String::new(),
            decimals: 1,
            unit_override: None,
            warning_threshold: None,
            critical_threshold: None,
        }
    }
}

// ── gauge ────────────────────────────────────────────────────────────

/// Visual family for a bounded numeric value.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum GaugeStyle {
    #[default]
    Dial,
    Tank,
    Thermometer,
    Bar,
}

// Unknown style names fall back to Dial instead of failing the whole
// widget -- persisted configs may predate a style rename.
impl<'de> Deserialize<'de> for GaugeStyle {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(raw.parse().unwrap_or_default())
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Orientation {
    #[default]
    Vertical,
    Horizontal,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TankShape {
    #[default]
    Cylinder,
    Rectangular,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GaugeConfig {
    pub label: String,
    pub device_id: String,
    pub register_name: String,
    pub style: GaugeStyle,
    pub orientation: Orientation,
    pub tank_shape: TankShape,
    pub min_value: f64,
    pub max_value: f64,
    pub decimals: u8,
    /// Static fill color; ignored when zones are enabled.
    pub fill_color: String,
    pub zones_enabled: bool,
    pub zone_low_threshold: f64,
    pub zone_high_threshold: f64,
    pub zone_low_color: String,
    pub zone_normal_color: String,
    pub zone_high_color: String,
    pub show_value: bool,
    pub show_min_max: bool,
}

impl Default for GaugeConfig {
    fn default() -> Self {
        Self {
            label: String::new(),
            device_id: String::new(),
            register_name: String::new(),
            style: GaugeStyle::Dial,
            orientation: Orientation::Vertical,
            tank_shape: TankShape::Cylinder,
            min_value: 0.0,
            max_value: 100.0,
            decimals: 1,
            fill_color: crate::palette::GAUGE_FILL.to_owned(),
            zones_enabled: false,
            zone_low_threshold: 25.0,
            zone_high_threshold: 75.0,
            zone_low_color: crate::palette::ZONE_LOW.to_owned(),
            zone_normal_color: crate::palette::ZONE_NORMAL.to_owned(),
            zone_high_color: crate::palette::ZONE_HIGH.to_owned(),
            show_value: true,
            show_min_max: true,
        }
    }
}

// ── image ────────────────────────────────────────────────────────────

/// One register value shown in the caption strip under an image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValueStripEntry {
    pub label: String,
    pub device_id: String,
    pub register_name: String,
    pub decimals: u8,
}

impl Default for ValueStripEntry {
    fn default() -> Self {
        Self {
            label: String::new(),
            device_id: String::new(),
            register_name: String::new(),
            decimals: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageConfig {
    pub image_url: String,
    /// Shown instead of `image_url` while the condition holds.
    pub alt_image_url: Option<String>,
    pub condition_device_id: String,
    pub condition_register: String,
    pub condition_operator: Option<ConditionOp>,
    pub condition_threshold: Option<f64>,
    /// Device whose online state drives the status dot; empty hides it.
    pub status_device_id: String,
    /// Up to two register values rendered under the image.
    pub value_strip: Vec<ValueStripEntry>,
}

// ── alarm_list ───────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlarmListConfig {
    pub title: String,
    /// Empty means all severities.
    pub severities: Vec<AlarmSeverity>,
    pub show_resolved: bool,
    pub max_items: usize,
}

impl Default for AlarmListConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            severities: Vec::new(),
            show_resolved: false,
            max_items: 8,
        }
    }
}

// ── status_indicator ─────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusIndicatorConfig {
    pub label: String,
    pub device_id: String,
}

// ── text ─────────────────────────────────────────────────────────────

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TextSize {
    Small,
    #[default]
    Medium,
    Large,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TextConfig {
    pub content: String,
    pub size: TextSize,
    pub align: TextAlign,
    pub color: Option<String>,
    pub bold: bool,
}

// ── cable ────────────────────────────────────────────────────────────

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PathStyle {
    #[default]
    Straight,
    Curved,
    Orthogonal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CableConfig {
    /// Flow data source; empty device and register means "no source",
    /// which animates forward unconditionally (pre-threshold configs).
    pub device_id: String,
    pub register_name: String,
    /// Endpoints in grid coordinates; may sit between cell boundaries.
    pub start_col: f64,
    pub start_row: f64,
    pub end_col: f64,
    pub end_row: f64,
    pub path_style: PathStyle,
    pub color: String,
    pub thickness: f64,
    pub animated: bool,
    /// Seconds per dash cycle.
    pub animation_speed: f64,
    pub flow_upper_threshold: f64,
    pub flow_lower_threshold: f64,
    /// Stroke color while flow runs in reverse, when set.
    pub reverse_color: Option<String>,
}

impl Default for CableConfig {
    fn default() -> Self {
        Self {
            device_id: String::new(),
            register_name: String::new(),
            start_col: 0.0,
            start_row: 0.0,
            end_col: 2.0,
            end_row: 0.0,
            path_style: PathStyle::Straight,
            color: crate::palette::CABLE.to_owned(),
            thickness: 3.0,
            animated: true,
            animation_speed: 1.0,
            flow_upper_threshold: 0.0,
            flow_lower_threshold: 0.0,
            reverse_color: None,
        }
    }
}

// ── chart ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub title: String,
    pub parameters: Vec<ChartParameter>,
    pub time_range: TimeRange,
    /// `None` auto-selects by range (≤6h raw, 24h hourly, 7d daily).
    pub aggregation: Option<Aggregation>,
    pub show_legend: bool,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            parameters: Vec::new(),
            time_range: TimeRange::Last24Hours,
            aggregation: None,
            show_legend: true,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn unknown_widget_type_parses_to_placeholder() {
        let config = WidgetConfig::parse(&json!({ "widget_type": "foo" }));
        assert_eq!(config, WidgetConfig::Unknown);
    }

    #[test]
    fn missing_keys_take_defaults() {
        let config = WidgetConfig::parse(&json!({
            "widget_type": "value_display",
            "register_name": "temp",
        }));
        let WidgetConfig::ValueDisplay(v) = config else {
            panic!("expected value_display");
        };
        assert_eq!(v.register_name, "temp");
        assert_eq!(v.decimals, 1);
        assert!(v.device_id.is_empty());
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let config = WidgetConfig::parse(&json!({
            "widget_type": "text",
            "content": "hello",
            "legacy_font": "comic sans",
        }));
        let WidgetConfig::Text(t) = config else {
            panic!("expected text");
        };
        assert_eq!(t.content, "hello");
    }

    #[test]
    fn unknown_gauge_style_falls_back_to_dial() {
        let config = WidgetConfig::parse(&json!({
            "widget_type": "gauge",
            "style": "hologram",
        }));
        let WidgetConfig::Gauge(g) = config else {
            panic!("expected gauge");
        };
        assert_eq!(g.style, GaugeStyle::Dial);
    }

    #[test]
    fn every_default_config_round_trips() {
        use strum::IntoEnumIterator;
        for kind in WidgetKind::iter() {
            let config = WidgetConfig::default_for(kind);
            let value = serde_json::to_value(&config).unwrap();
            assert_eq!(WidgetConfig::parse(&value), config, "round trip for {kind}");
        }
    }

    #[test]
    fn widget_json_nests_config_under_type_tag() {
        let widget = Widget::new(
            WidgetKind::Text,
            GridRect {
                col: 2,
                row: 1,
                w: 3,
                h: 1,
            },
        );
        let value = serde_json::to_value(&widget).unwrap();
        assert_eq!(value["config"]["widget_type"], "text");
        assert_eq!(value["grid"]["col"], 2);
    }
}
