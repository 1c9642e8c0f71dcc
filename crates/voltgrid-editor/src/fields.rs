//! Per-widget-type field descriptors.
//!
//! The config dialog is schema-driven: for each widget type this module
//! lists the ordered fields the form renders. Field keys match the
//! serde names of the corresponding config struct, so a completed form
//! deserializes straight into a typed [`WidgetConfig`] variant.

use strum::IntoEnumIterator;

use voltgrid_core::chart::{AxisSide, SeriesKind, TimeRange};
use voltgrid_core::condition::ConditionOp;
use voltgrid_core::model::widget::{
    GaugeStyle, Orientation, PathStyle, TankShape, TextAlign, TextSize, WidgetKind,
};
use voltgrid_core::model::AlarmSeverity;
use voltgrid_live::CatalogDevice;

/// How a field is rendered and which values it accepts.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    Text,
    Number {
        min: Option<f64>,
        max: Option<f64>,
    },
    Toggle,
    /// Closed vocabulary; options are the serialized enum names.
    Select { options: Vec<String> },
    Color,
    /// Populated from the device catalog collaborator.
    DevicePicker,
    /// Registers of the picked device, filtered to readable access.
    RegisterPicker,
    /// Operator dropdown reusing the condition evaluator's vocabulary.
    ConditionOperator,
    /// Preset library plus upload.
    ImagePicker,
    /// Multi-select over alarm severities.
    SeveritySet,
    /// Repeating sub-form of chart parameters.
    ParameterList,
    /// Repeating sub-form of caption-strip entries (max two).
    ValueStripList,
}

/// One form field of a widget config dialog.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    /// Serde key in the config struct.
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
}

fn select<T: IntoEnumIterator + std::fmt::Display>() -> FieldKind {
    FieldKind::Select {
        options: T::iter().map(|v| v.to_string()).collect(),
    }
}

/// Ordered fields for a widget type's config dialog.
pub fn fields_for(kind: WidgetKind) -> Vec<FieldDescriptor> {
    use FieldKind as F;
    match kind {
        WidgetKind::ValueDisplay => vec![
            field("label", "Label", F::Text),
            field("device_id", "Device", F::DevicePicker),
            field("register_name", "Register", F::RegisterPicker),
            field("decimals", "Decimals", F::Number { min: Some(0.0), max: Some(6.0) }),
            field("unit_override", "Unit override", F::Text),
            field("warning_threshold", "Warning threshold", F::Number { min: None, max: None }),
            field("critical_threshold", "Critical threshold", F::Number { min: None, max: None }),
        ],
        WidgetKind::Gauge => vec![
            field("label", "Label", F::Text),
            field("device_id", "Device", F::DevicePicker),
            field("register_name", "Register", F::RegisterPicker),
            field("style", "Gauge style", select::<GaugeStyle>()),
            field("orientation", "Orientation", select::<Orientation>()),
            field("tank_shape", "Tank shape", select::<TankShape>()),
            field("min_value", "Minimum", F::Number { min: None, max: None }),
            field("max_value", "Maximum", F::Number { min: None, max: None }),
            field("decimals", "Decimals", F::Number { min: Some(0.0), max: Some(6.0) }),
            field("fill_color", "Fill color", F::Color),
            field("zones_enabled", "Color zones", F::Toggle),
            field("zone_low_threshold", "Low zone below", F::Number { min: None, max: None }),
            field("zone_high_threshold", "High zone above", F::Number { min: None, max: None }),
            field("zone_low_color", "Low zone color", F::Color),
            field("zone_normal_color", "Normal zone color", F::Color),
            field("zone_high_color", "High zone color", F::Color),
            field("show_value", "Show value", F::Toggle),
            field("show_min_max", "Show min/max", F::Toggle),
        ],
        WidgetKind::Image => vec![
            field("image_url", "Image", F::ImagePicker),
            field("alt_image_url", "Conditional image", F::ImagePicker),
            field("condition_device_id", "Condition device", F::DevicePicker),
            field("condition_register", "Condition register", F::RegisterPicker),
            field("condition_operator", "Operator", F::ConditionOperator),
            field("condition_threshold", "Threshold", F::Number { min: None, max: None }),
            field("status_device_id", "Status device", F::DevicePicker),
            field("value_strip", "Caption values", F::ValueStripList),
        ],
        WidgetKind::AlarmList => vec![
            field("title", "Title", F::Text),
            field("severities", "Severities", F::SeveritySet),
            field("show_resolved", "Show resolved", F::Toggle),
            field("max_items", "Max items", F::Number { min: Some(1.0), max: Some(50.0) }),
        ],
        WidgetKind::StatusIndicator => vec![
            field("label", "Label", F::Text),
            field("device_id", "Device", F::DevicePicker),
        ],
        WidgetKind::Text => vec![
            field("content", "Content", F::Text),
            field("size", "Size", select::<TextSize>()),
            field("align", "Alignment", select::<TextAlign>()),
            field("color", "Color", F::Color),
            field("bold", "Bold", F::Toggle),
        ],
        WidgetKind::Cable => vec![
            field("device_id", "Flow device", F::DevicePicker),
            field("register_name", "Flow register", F::RegisterPicker),
            field("start_col", "Start column", F::Number { min: Some(0.0), max: None }),
            field("start_row", "Start row", F::Number { min: Some(0.0), max: None }),
            field("end_col", "End column", F::Number { min: Some(0.0), max: None }),
            field("end_row", "End row", F::Number { min: Some(0.0), max: None }),
            field("path_style", "Path style", select::<PathStyle>()),
            field("color", "Color", F::Color),
            field("thickness", "Thickness", F::Number { min: Some(0.5), max: Some(20.0) }),
            field("animated", "Animated", F::Toggle),
            field("animation_speed", "Animation speed (s)", F::Number { min: Some(0.1), max: Some(30.0) }),
            field("flow_upper_threshold", "Forward above", F::Number { min: None, max: None }),
            field("flow_lower_threshold", "Reverse below", F::Number { min: None, max: None }),
            field("reverse_color", "Reverse color", F::Color),
        ],
        WidgetKind::Chart => vec![
            field("title", "Title", F::Text),
            field("parameters", "Parameters", F::ParameterList),
            field("time_range", "Time range", select::<TimeRange>()),
            field("aggregation", "Aggregation", select::<voltgrid_core::chart::Aggregation>()),
            field("show_legend", "Show legend", F::Toggle),
        ],
    }
}

fn field(key: &'static str, label: &'static str, kind: FieldKind) -> FieldDescriptor {
    FieldDescriptor { key, label, kind }
}

/// Operator options offered by condition-builder fields; the same
/// vocabulary the evaluator accepts.
pub fn operator_options() -> Vec<String> {
    ConditionOp::iter().map(|op| op.to_string()).collect()
}

/// Severity options offered by severity-set fields.
pub fn severity_options() -> Vec<String> {
    AlarmSeverity::iter().map(|s| s.to_string()).collect()
}

/// Axis-side options for chart parameter rows.
pub fn axis_options() -> Vec<String> {
    AxisSide::iter().map(|s| s.to_string()).collect()
}

/// Series-kind options for chart parameter rows.
pub fn series_kind_options() -> Vec<String> {
    SeriesKind::iter().map(|s| s.to_string()).collect()
}

/// `(id, name)` pairs for a device picker.
pub fn device_options(devices: &[CatalogDevice]) -> Vec<(String, String)> {
    devices
        .iter()
        .map(|d| (d.id.clone(), d.name.clone()))
        .collect()
}

/// Register names a widget may bind to on one device -- write-only
/// registers are excluded.
pub fn register_options(device: &CatalogDevice) -> Vec<String> {
    device
        .readable_registers()
        .map(|r| r.name.clone())
        .collect()
}
