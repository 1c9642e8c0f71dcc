//! End-to-end scenarios: persisted JSON config -> resolver -> renderer.
//!
//! Exercises the full pipeline the hosting canvas drives, including the
//! defined empty states for missing data and unknown widget types.

use std::collections::HashMap;

use chrono::Utc;

use voltgrid_core::chart::{SeriesSample, TimeRange, build_points};
use voltgrid_core::model::live::{LiveData, Reading};
use voltgrid_core::model::widget::{GridRect, Widget, WidgetConfig};
use voltgrid_core::resolve::{FlowState, ResolveContext, ResolvedWidget, resolve};
use voltgrid_svg::{RenderOptions, WidgetData, render_widget};

fn widget_from_json(config: serde_json::Value) -> Widget {
    Widget {
        id: uuid::Uuid::new_v4(),
        grid: GridRect::default(),
        z: 0,
        config: WidgetConfig::parse(&config),
    }
}

fn live_with(device: &str, register: &str, value: f64, unit: &str) -> LiveData {
    let now = Utc::now();
    let mut live = LiveData::empty(now);
    live.registers.insert(
        device.into(),
        HashMap::from([(
            register.into(),
            Reading {
                value: Some(value),
                unit: Some(unit.into()),
                timestamp: now,
            },
        )]),
    );
    live
}

fn ctx(live: &LiveData) -> ResolveContext<'_> {
    ResolveContext {
        site_id: "site-1",
        now: live.timestamp,
    }
}

#[test]
fn value_display_formats_register_to_decimals() {
    let live = live_with("dev1", "temp", 42.567, "C");
    let widget = widget_from_json(serde_json::json!({
        "widget_type": "value_display",
        "device_id": "dev1",
        "register_name": "temp",
        "decimals": 1,
    }));
    let resolved = resolve(&widget, &live, &ctx(&live));
    let svg = render_widget(&resolved, WidgetData::None, &RenderOptions::default());
    assert!(svg.contains(">42.6 C</text>"));
}

#[test]
fn missing_register_renders_placeholder_dashes() {
    let live = live_with("dev1", "temp", 42.567, "C");
    let widget = widget_from_json(serde_json::json!({
        "widget_type": "value_display",
        "device_id": "dev1",
        "register_name": "humidity",
    }));
    let resolved = resolve(&widget, &live, &ctx(&live));
    let svg = render_widget(&resolved, WidgetData::None, &RenderOptions::default());
    assert!(svg.contains(">--</text>"));
}

#[test]
fn gauge_zones_pick_high_band_color() {
    let live = live_with("bat", "soc", 80.0, "%");
    let widget = widget_from_json(serde_json::json!({
        "widget_type": "gauge",
        "device_id": "bat",
        "register_name": "soc",
        "min_value": 0.0,
        "max_value": 100.0,
        "zones_enabled": true,
        "zone_low_threshold": 25.0,
        "zone_high_threshold": 75.0,
        "zone_high_color": "#b91c1c",
    }));
    let resolved = resolve(&widget, &live, &ctx(&live));
    let ResolvedWidget::Gauge(ref gauge) = resolved else {
        panic!("expected gauge");
    };
    assert!((gauge.percentage - 80.0).abs() < f64::EPSILON);
    assert_eq!(gauge.fill_color, "#b91c1c");
    let svg = render_widget(&resolved, WidgetData::None, &RenderOptions::default());
    assert!(svg.contains("#b91c1c"));
}

#[test]
fn cable_reverses_below_lower_threshold() {
    let live = live_with("grid", "power", -10.0, "kW");
    let widget = widget_from_json(serde_json::json!({
        "widget_type": "cable",
        "device_id": "grid",
        "register_name": "power",
        "flow_upper_threshold": 5.0,
        "flow_lower_threshold": -5.0,
        "end_col": 3.0,
    }));
    let resolved = resolve(&widget, &live, &ctx(&live));
    let ResolvedWidget::Cable(ref cable) = resolved else {
        panic!("expected cable");
    };
    assert_eq!(cable.flow, FlowState::Reverse);
    let svg = render_widget(&resolved, WidgetData::None, &RenderOptions::default());
    assert!(svg.contains("--flow-direction: reverse"));
}

#[test]
fn chart_union_null_fills_sparse_series() {
    let base = Utc::now();
    let at = |secs: i64| base + chrono::Duration::seconds(secs);
    let series_a = vec![
        SeriesSample { timestamp: at(0), value: 1.0 },
        SeriesSample { timestamp: at(10), value: 2.0 },
        SeriesSample { timestamp: at(20), value: 3.0 },
    ];
    let series_b = vec![
        SeriesSample { timestamp: at(0), value: 4.0 },
        SeriesSample { timestamp: at(20), value: 5.0 },
    ];
    let points = build_points(&[series_a, series_b], TimeRange::LastHour);
    assert_eq!(points.len(), 3);
    assert_eq!(points[1].values, vec![Some(2.0), None]);
}

#[test]
fn unknown_widget_type_renders_literal_placeholder() {
    let live = LiveData::empty(Utc::now());
    let widget = widget_from_json(serde_json::json!({ "widget_type": "foo" }));
    let resolved = resolve(&widget, &live, &ctx(&live));
    let svg = render_widget(&resolved, WidgetData::None, &RenderOptions::default());
    assert!(svg.contains("Unknown widget type"));
}
