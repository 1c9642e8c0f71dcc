//! Chart data shaping: time ranges, aggregation selection, timestamp
//! union with left-join null fill, deterministic downsampling, and
//! Y-axis domain computation.
//!
//! The historical-data provider returns per-parameter sample lists, not
//! a pre-joined table. The engine unions all timestamps, sorts them, and
//! left-joins each parameter -- a parameter with no sample at a
//! timestamp gets `None`, never `0`, so gaps stay visible as gaps.

use std::collections::{BTreeSet, HashMap};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Default cap on rendered chart points; inputs above it are thinned
/// deterministically. Settings may override per deployment.
pub const DOWNSAMPLE_CAP: usize = 100;

/// Query window for a chart widget.
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
    strum::EnumIter,
)]
pub enum TimeRange {
    #[serde(rename = "1h")]
    #[strum(serialize = "1h")]
    LastHour,
    #[serde(rename = "6h")]
    #[strum(serialize = "6h")]
    Last6Hours,
    #[default]
    #[serde(rename = "24h")]
    #[strum(serialize = "24h")]
    Last24Hours,
    #[serde(rename = "7d")]
    #[strum(serialize = "7d")]
    Last7Days,
}

impl TimeRange {
    pub fn duration(self) -> Duration {
        match self {
            Self::LastHour => Duration::hours(1),
            Self::Last6Hours => Duration::hours(6),
            Self::Last24Hours => Duration::hours(24),
            Self::Last7Days => Duration::days(7),
        }
    }

    /// Aggregation used when the config doesn't pin one.
    pub fn default_aggregation(self) -> Aggregation {
        match self {
            Self::LastHour | Self::Last6Hours => Aggregation::Raw,
            Self::Last24Hours => Aggregation::Hourly,
            Self::Last7Days => Aggregation::Daily,
        }
    }

    /// X-axis tick label for a timestamp within this range.
    pub fn time_label(self, ts: DateTime<Utc>) -> String {
        match self {
            Self::LastHour | Self::Last6Hours | Self::Last24Hours => {
                ts.format("%H:%M").to_string()
            }
            Self::Last7Days => ts.format("%b %d %H:%M").to_string(),
        }
    }
}

/// Time-bucketing granularity applied by the historical-data service.
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
pub enum Aggregation {
    #[default]
    Raw,
    Hourly,
    Daily,
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
pub enum AxisSide {
    #[default]
    Left,
    Right,
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
pub enum SeriesKind {
    #[default]
    Line,
    Area,
    Bar,
}

/// One plotted parameter of a chart widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartParameter {
    pub device_id: String,
    pub register_name: String,
    pub label: String,
    pub unit: Option<String>,
    /// Explicit series color; falls back to the palette by index.
    pub color: Option<String>,
    pub y_axis: AxisSide,
    pub chart_type: SeriesKind,
}

impl Default for ChartParameter {
    fn default() -> Self {
        Self {
            device_id: String::new(),
            register_name: String::new(),
            label: String::new(),
            unit: None,
            color: None,
            y_axis: AxisSide::Left,
            chart_type: SeriesKind::Line,
        }
    }
}

impl ChartParameter {
    pub fn color_at(&self, index: usize) -> String {
        self.color
            .clone()
            .unwrap_or_else(|| crate::palette::chart_series(index).to_owned())
    }
}

/// One `{timestamp, value}` sample from the historical-data provider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesSample {
    pub timestamp: DateTime<Utc>,
    pub value: f64,
}

/// A joined chart row. `values` is indexed by parameter position;
/// `None` marks a parameter with no sample at this timestamp.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub timestamp: DateTime<Utc>,
    pub time_label: String,
    pub values: Vec<Option<f64>>,
}

/// Union all parameter timestamps, sort ascending, and left-join each
/// parameter's samples.
pub fn build_points(series: &[Vec<SeriesSample>], range: TimeRange) -> Vec<ChartPoint> {
    let mut stamps: BTreeSet<DateTime<Utc>> = BTreeSet::new();
    for samples in series {
        for s in samples {
            stamps.insert(s.timestamp);
        }
    }

    let lookups: Vec<HashMap<DateTime<Utc>, f64>> = series
        .iter()
        .map(|samples| samples.iter().map(|s| (s.timestamp, s.value)).collect())
        .collect();

    stamps
        .into_iter()
        .map(|ts| ChartPoint {
            timestamp: ts,
            time_label: range.time_label(ts),
            values: lookups.iter().map(|m| m.get(&ts).copied()).collect(),
        })
        .collect()
}

/// Thin a point list to at most `cap` entries by keeping every
/// `ceil(n/cap)`-th element. Deterministic: same input, same output.
pub fn downsample<T>(points: Vec<T>, cap: usize) -> Vec<T> {
    if cap == 0 || points.len() <= cap {
        return points;
    }
    let step = points.len().div_ceil(cap);
    points.into_iter().step_by(step).collect()
}

/// Y-axis domain over one side's values: pad by 10% of the range (±1
/// when the range is zero) and round outward to one decimal place.
/// `None` when the side has no finite values.
pub fn axis_domain(values: impl IntoIterator<Item = f64>) -> Option<(f64, f64)> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for v in values {
        if v.is_finite() {
            min = min.min(v);
            max = max.max(v);
        }
    }
    if min > max {
        return None;
    }
    let range = max - min;
    let pad = if range == 0.0 { 1.0 } else { range * 0.10 };
    let lo = ((min - pad) * 10.0).floor() / 10.0;
    let hi = ((max + pad) * 10.0).ceil() / 10.0;
    Some((lo, hi))
}

/// A fully-resolved chart fetch request, handed to the runtime.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartRequest {
    pub title: String,
    pub parameters: Vec<ChartParameter>,
    pub range: TimeRange,
    pub aggregation: Aggregation,
    pub show_legend: bool,
}

impl ChartRequest {
    pub fn from_config(config: &crate::model::widget::ChartConfig) -> Self {
        Self {
            title: config.title.clone(),
            parameters: config.parameters.clone(),
            range: config.time_range,
            aggregation: config
                .aggregation
                .unwrap_or_else(|| config.time_range.default_aggregation()),
            show_legend: config.show_legend,
        }
    }
}
