//! Top-level widget rendering: dispatches a resolved widget to its
//! family renderer and draws the simple presentational widgets (value
//! card, status indicator, text, image, alarm list) directly.
//!
//! Failures never escape a widget: unknown types and failed fetches
//! render inline placeholders instead of propagating.

use chrono::{DateTime, Utc};
use voltgrid_core::model::Alarm;
use voltgrid_core::model::widget::{TextAlign, TextSize};
use voltgrid_core::resolve::{
    AlarmListRender, ImageRender, ResolvedWidget, StatusRender, TextRender,
    UNKNOWN_WIDGET_PLACEHOLDER, ValueRender,
};
use voltgrid_core::chart::ChartPoint;
use voltgrid_core::timefmt;

use crate::cable::{EditMode, GridSize, render_cable};
use crate::chart::render_chart;
use crate::gauge::render_gauge;
use crate::svg::{esc, num};

const MUTED: &str = "#6b7280";
const INK: &str = "#111827";
const ONLINE: &str = "#22c55e";
const OFFLINE: &str = "#ef4444";
const UNKNOWN_DOT: &str = "#9ca3af";

/// Data fetched by the runtime for widgets that are not pure functions
/// of the live snapshot.
#[derive(Debug, Clone, Copy, Default)]
pub enum WidgetData<'a> {
    #[default]
    None,
    Chart(&'a [ChartPoint]),
    Alarms(&'a [Alarm]),
}

/// Ambient render inputs for one widget.
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    /// Pixel box the fragment is drawn into.
    pub width: f64,
    pub height: f64,
    /// Canvas grid, used by cable geometry.
    pub grid: GridSize,
    /// Wall clock for relative timestamps in alarm rows.
    pub now: DateTime<Utc>,
    /// Cable edit affordances; `None` outside edit mode.
    pub edit: Option<EditMode>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: 200.0,
            height: 200.0,
            grid: GridSize::default(),
            now: Utc::now(),
            edit: None,
        }
    }
}

/// Render any resolved widget to an SVG fragment.
pub fn render_widget(
    resolved: &ResolvedWidget,
    data: WidgetData<'_>,
    opts: &RenderOptions,
) -> String {
    match resolved {
        ResolvedWidget::Value(v) => render_value(v, opts),
        ResolvedWidget::Gauge(g) => render_gauge(g),
        ResolvedWidget::Image(i) => render_image(i, opts),
        ResolvedWidget::Status(s) => render_status(s, opts),
        ResolvedWidget::Cable(c) => render_cable(c, opts.grid, opts.edit),
        ResolvedWidget::Chart(request) => {
            let points: &[ChartPoint] = match data {
                WidgetData::Chart(points) => points,
                WidgetData::None | WidgetData::Alarms(_) => &[],
            };
            render_chart(request, points, opts.width, opts.height)
        }
        ResolvedWidget::AlarmList(render) => {
            let alarms: &[Alarm] = match data {
                WidgetData::Alarms(alarms) => alarms,
                WidgetData::None | WidgetData::Chart(_) => &[],
            };
            render_alarm_list(render, alarms, opts)
        }
        ResolvedWidget::Text(t) => render_text(t, opts),
        ResolvedWidget::Unknown => render_placeholder(UNKNOWN_WIDGET_PLACEHOLDER, opts),
    }
}

/// Inline error box for a widget whose fetch failed. Contained to the
/// widget: siblings and the page never see the failure.
pub fn render_widget_error(message: &str, opts: &RenderOptions) -> String {
    render_placeholder(message, opts)
}

fn render_placeholder(message: &str, opts: &RenderOptions) -> String {
    format!(
        "<rect x=\"1\" y=\"1\" width=\"{w}\" height=\"{h}\" rx=\"6\" fill=\"#f9fafb\" \
         stroke=\"#e5e7eb\" stroke-dasharray=\"4 3\"/>\
         <text x=\"{cx}\" y=\"{cy}\" text-anchor=\"middle\" font-size=\"12\" \
         fill=\"{MUTED}\">{}</text>",
        esc(message),
        w = num(opts.width - 2.0),
        h = num(opts.height - 2.0),
        cx = num(opts.width / 2.0),
        cy = num(opts.height / 2.0),
    )
}

fn render_value(v: &ValueRender, opts: &RenderOptions) -> String {
    let mut out = String::new();
    let cx = opts.width / 2.0;
    if !v.label.is_empty() {
        out.push_str(&format!(
            "<text x=\"{x}\" y=\"{y}\" text-anchor=\"middle\" font-size=\"12\" \
             fill=\"{MUTED}\">{}</text>",
            esc(&v.label),
            x = num(cx),
            y = num(opts.height * 0.28),
        ));
    }
    let unit = v.unit.as_deref().unwrap_or("");
    out.push_str(&format!(
        "<text class=\"vg-anim\" x=\"{x}\" y=\"{y}\" text-anchor=\"middle\" \
         font-size=\"26\" font-weight=\"600\" fill=\"{}\">{}</text>",
        v.tone.as_hex(),
        esc(format!("{} {unit}", v.text).trim_end()),
        x = num(cx),
        y = num(opts.height * 0.62),
    ));
    out
}

fn render_status(s: &StatusRender, opts: &RenderOptions) -> String {
    let (dot, state) = match s.online {
        Some(true) => (ONLINE, "Online"),
        Some(false) => (OFFLINE, "Offline"),
        None => (UNKNOWN_DOT, "Unknown"),
    };
    let cx = opts.width / 2.0;
    let mut out = format!(
        "<circle cx=\"{x}\" cy=\"{y}\" r=\"7\" fill=\"{dot}\"/>\
         <text x=\"{tx}\" y=\"{ty}\" font-size=\"14\" fill=\"{INK}\">{state}</text>",
        x = num(cx - 44.0),
        y = num(opts.height * 0.42),
        tx = num(cx - 30.0),
        ty = num(opts.height * 0.42 + 5.0),
    );
    if !s.label.is_empty() {
        out.push_str(&format!(
            "<text x=\"{x}\" y=\"{y}\" text-anchor=\"middle\" font-size=\"12\" \
             fill=\"{MUTED}\">{}</text>",
            esc(&s.label),
            x = num(cx),
            y = num(opts.height * 0.2),
        ));
    }
    out.push_str(&format!(
        "<text x=\"{x}\" y=\"{y}\" text-anchor=\"middle\" font-size=\"11\" \
         fill=\"{MUTED}\">{}</text>",
        esc(&s.last_seen_text),
        x = num(cx),
        y = num(opts.height * 0.66),
    ));
    out
}

fn render_text(t: &TextRender, opts: &RenderOptions) -> String {
    let size = match t.size {
        TextSize::Small => 12.0,
        TextSize::Medium => 16.0,
        TextSize::Large => 24.0,
    };
    let (anchor, x) = match t.align {
        TextAlign::Left => ("start", 8.0),
        TextAlign::Center => ("middle", opts.width / 2.0),
        TextAlign::Right => ("end", opts.width - 8.0),
    };
    format!(
        "<text x=\"{x}\" y=\"{y}\" text-anchor=\"{anchor}\" font-size=\"{size}\"{weight} \
         fill=\"{color}\">{}</text>",
        esc(&t.content),
        x = num(x),
        y = num(opts.height / 2.0),
        size = num(size),
        weight = if t.bold { " font-weight=\"700\"" } else { "" },
        color = t.color.as_deref().map_or(INK.to_owned(), esc),
    )
}

fn render_image(i: &ImageRender, opts: &RenderOptions) -> String {
    let mut out = String::new();
    let strip_h = if i.values.is_empty() { 0.0 } else { 26.0 };
    let img_h = opts.height - strip_h;

    match &i.url {
        Some(url) => out.push_str(&format!(
            "<image href=\"{}\" x=\"0\" y=\"0\" width=\"{w}\" height=\"{h}\" \
             preserveAspectRatio=\"xMidYMid meet\"/>",
            esc(url),
            w = num(opts.width),
            h = num(img_h),
        )),
        None => out.push_str(&render_placeholder("No image", opts)),
    }

    if let Some(online) = i.online {
        let dot = if online { ONLINE } else { OFFLINE };
        out.push_str(&format!(
            "<circle cx=\"{x}\" cy=\"10\" r=\"5\" fill=\"{dot}\" stroke=\"#ffffff\" \
             stroke-width=\"1.5\"/>",
            x = num(opts.width - 10.0),
        ));
    }

    // Caption strip: up to two resolved values under the image.
    #[allow(clippy::cast_precision_loss, clippy::as_conversions)]
    for (index, value) in i.values.iter().enumerate() {
        let slot = opts.width / (i.values.len() as f64);
        let x = slot * (index as f64) + slot / 2.0;
        let unit = value.unit.as_deref().unwrap_or("");
        let caption = if value.label.is_empty() {
            format!("{} {unit}", value.text).trim_end().to_owned()
        } else {
            format!("{}: {} {unit}", value.label, value.text)
                .trim_end()
                .to_owned()
        };
        out.push_str(&format!(
            "<text x=\"{x}\" y=\"{y}\" text-anchor=\"middle\" font-size=\"11\" \
             fill=\"{INK}\">{}</text>",
            esc(&caption),
            x = num(x),
            y = num(opts.height - 9.0),
        ));
    }

    out
}

fn render_alarm_list(render: &AlarmListRender, alarms: &[Alarm], opts: &RenderOptions) -> String {
    let mut out = String::new();
    let mut y = 18.0;

    if !render.title.is_empty() {
        out.push_str(&format!(
            "<text x=\"8\" y=\"{y}\" font-size=\"13\" font-weight=\"600\" \
             fill=\"{INK}\">{}</text>",
            esc(&render.title),
            y = num(y),
        ));
        y += 20.0;
    }

    if alarms.is_empty() {
        out.push_str(&format!(
            "<text x=\"8\" y=\"{y}\" font-size=\"11\" fill=\"{MUTED}\">No alarms</text>",
            y = num(y),
        ));
        return out;
    }

    for alarm in alarms.iter().take(render.query.max_items) {
        if y > opts.height - 8.0 {
            break;
        }
        let dot = match alarm.severity {
            voltgrid_core::model::AlarmSeverity::Critical => OFFLINE,
            voltgrid_core::model::AlarmSeverity::Warning => "#f59e0b",
            voltgrid_core::model::AlarmSeverity::Info => "#3b82f6",
        };
        let age = timefmt::relative(alarm.raised_at, opts.now);
        out.push_str(&format!(
            "<circle cx=\"12\" cy=\"{cy}\" r=\"4\" fill=\"{dot}\"/>\
             <text x=\"22\" y=\"{ty}\" font-size=\"11\" fill=\"{INK}\">{}</text>\
             <text x=\"{ax}\" y=\"{ty}\" text-anchor=\"end\" font-size=\"10\" \
             fill=\"{MUTED}\">{age}</text>",
            esc(&alarm.message),
            cy = num(y - 4.0),
            ty = num(y),
            ax = num(opts.width - 8.0),
        ));
        y += 18.0;
    }

    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Duration;
    use std::collections::HashMap;
    use voltgrid_core::model::live::{LiveData, Reading};
    use voltgrid_core::model::widget::{
        GridRect, ValueDisplayConfig, Widget, WidgetConfig, WidgetKind,
    };
    use voltgrid_core::model::{AlarmQuery, AlarmSeverity};
    use voltgrid_core::resolve::{ResolveContext, resolve};

    fn opts(now: DateTime<Utc>) -> RenderOptions {
        RenderOptions {
            now,
            ..RenderOptions::default()
        }
    }

    #[test]
    fn value_display_renders_formatted_value_with_unit() {
        let now = Utc::now();
        let mut live = LiveData::empty(now);
        live.registers.insert(
            "dev1".into(),
            HashMap::from([(
                "temp".into(),
                Reading {
                    value: Some(42.567),
                    unit: Some("C".into()),
                    timestamp: now,
                },
            )]),
        );
        let mut widget = Widget::new(WidgetKind::ValueDisplay, GridRect::default());
        widget.config = WidgetConfig::ValueDisplay(ValueDisplayConfig {
            device_id: "dev1".into(),
            register_name: "temp".into(),
            ..ValueDisplayConfig::default()
        });
        let resolved = resolve(
            &widget,
            &live,
            &ResolveContext {
                site_id: "s1",
                now,
            },
        );
        let svg = render_widget(&resolved, WidgetData::None, &opts(now));
        assert!(svg.contains(">42.6 C</text>"));
    }

    #[test]
    fn missing_register_renders_dashes() {
        let now = Utc::now();
        let mut widget = Widget::new(WidgetKind::ValueDisplay, GridRect::default());
        widget.config = WidgetConfig::ValueDisplay(ValueDisplayConfig {
            device_id: "dev1".into(),
            register_name: "temp".into(),
            ..ValueDisplayConfig::default()
        });
        let resolved = resolve(
            &widget,
            &LiveData::empty(now),
            &ResolveContext {
                site_id: "s1",
                now,
            },
        );
        let svg = render_widget(&resolved, WidgetData::None, &opts(now));
        assert!(svg.contains(">--</text>"));
    }

    #[test]
    fn unknown_widget_type_renders_literal_placeholder() {
        let svg = render_widget(&ResolvedWidget::Unknown, WidgetData::None, &opts(Utc::now()));
        assert!(svg.contains(UNKNOWN_WIDGET_PLACEHOLDER));
    }

    #[test]
    fn alarm_rows_carry_severity_dot_and_relative_age() {
        let now = Utc::now();
        let render = AlarmListRender {
            title: "Alarms".into(),
            query: AlarmQuery {
                site_id: "s1".into(),
                severities: Vec::new(),
                show_resolved: false,
                max_items: 8,
            },
        };
        let alarms = vec![Alarm {
            id: "a1".into(),
            site_id: "s1".into(),
            device_id: None,
            severity: AlarmSeverity::Critical,
            message: "Grid outage".into(),
            raised_at: now - Duration::minutes(7),
            resolved_at: None,
        }];
        let svg = render_alarm_list(&render, &alarms, &opts(now));
        assert!(svg.contains("Grid outage"));
        assert!(svg.contains("7m ago"));
        assert!(svg.contains(OFFLINE));
    }

    #[test]
    fn alarm_list_caps_rows_at_max_items() {
        let now = Utc::now();
        let render = AlarmListRender {
            title: String::new(),
            query: AlarmQuery {
                site_id: "s1".into(),
                severities: Vec::new(),
                show_resolved: false,
                max_items: 2,
            },
        };
        let alarms: Vec<Alarm> = (0..5)
            .map(|i| Alarm {
                id: format!("a{i}"),
                site_id: "s1".into(),
                device_id: None,
                severity: AlarmSeverity::Info,
                message: format!("event {i}"),
                raised_at: now,
                resolved_at: None,
            })
            .collect();
        let svg = render_alarm_list(
            &render,
            &alarms,
            &RenderOptions {
                height: 400.0,
                now,
                ..RenderOptions::default()
            },
        );
        assert!(svg.contains("event 0") && svg.contains("event 1"));
        assert!(!svg.contains("event 2"));
    }

    #[test]
    fn fetch_failure_renders_inline_error_only() {
        let svg = render_widget_error("No data available", &opts(Utc::now()));
        assert!(svg.contains("No data available"));
    }
}
