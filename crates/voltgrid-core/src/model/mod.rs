//! Domain model: widgets and their typed configs, the live telemetry
//! snapshot, and alarms.

pub mod alarm;
pub mod live;
pub mod widget;

pub use alarm::{Alarm, AlarmQuery, AlarmSeverity};
pub use live::{DeviceStatus, LiveData, Reading, SITE_AGGREGATE_DEVICE};
pub use widget::{
    AlarmListConfig, CableConfig, ChartConfig, GaugeConfig, GaugeStyle, GridRect, ImageConfig,
    Orientation, PathStyle, StatusIndicatorConfig, TankShape, TextAlign, TextConfig, TextSize,
    ValueDisplayConfig, ValueStripEntry, Widget, WidgetConfig, WidgetKind,
};
