//! Default hex palette for widget config defaults and semantic tones.
//!
//! Renderers take colors from config verbatim; these are only the values
//! seeded into fresh configs and the fixed tone colors for value displays.

/// Healthy / in-range readings.
pub const OK: &str = "#22c55e";
/// Warning-threshold readings.
pub const WARNING: &str = "#f59e0b";
/// Critical-threshold readings.
pub const CRITICAL: &str = "#ef4444";
/// No data or no thresholds configured.
pub const NEUTRAL: &str = "#9ca3af";

/// Default gauge fill when zones are disabled.
pub const GAUGE_FILL: &str = "#3b82f6";
/// Below the low zone threshold.
pub const ZONE_LOW: &str = "#3b82f6";
/// Between the zone thresholds.
pub const ZONE_NORMAL: &str = "#22c55e";
/// Above the high zone threshold.
pub const ZONE_HIGH: &str = "#ef4444";

/// Default cable stroke.
pub const CABLE: &str = "#64748b";

/// Cycled through chart parameters that don't set an explicit color.
pub const CHART_SERIES: &[&str] = &[
    "#3b82f6", "#f59e0b", "#22c55e", "#a855f7", "#06b6d4", "#ef4444",
];

/// Series color for a parameter index, cycling past the palette end.
pub fn chart_series(index: usize) -> &'static str {
    CHART_SERIES[index % CHART_SERIES.len()]
}
