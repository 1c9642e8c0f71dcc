//! Time-series chart renderer with independent left/right Y-axes.
//!
//! Data arrives pre-shaped by `voltgrid_core::chart` (unioned, joined,
//! downsampled); this module only maps it to pixels. Each parameter
//! draws as its own line/area/bar primitive against its assigned axis,
//! and every x slot carries a `<title>` tooltip listing the formatted
//! value and unit of each series.

use voltgrid_core::chart::{AxisSide, ChartPoint, ChartRequest, SeriesKind, axis_domain};
use voltgrid_core::timefmt;

use crate::svg::{esc, num};

const MARGIN_LEFT: f64 = 46.0;
const MARGIN_RIGHT: f64 = 46.0;
const MARGIN_TOP: f64 = 26.0;
const MARGIN_BOTTOM: f64 = 24.0;
const GRID_COLOR: &str = "#e5e7eb";
const AXIS_TEXT: &str = "#6b7280";

/// Message shown when a chart has nothing to plot.
pub const NO_DATA_MESSAGE: &str = "No data available";

struct Plot {
    x0: f64,
    y0: f64,
    w: f64,
    h: f64,
}

impl Plot {
    #[allow(clippy::cast_precision_loss, clippy::as_conversions)]
    fn x_at(&self, index: usize, count: usize) -> f64 {
        if count <= 1 {
            self.x0 + self.w / 2.0
        } else {
            self.x0 + self.w * (index as f64) / ((count - 1) as f64)
        }
    }

    fn y_at(&self, value: f64, domain: (f64, f64)) -> f64 {
        let (lo, hi) = domain;
        let span = hi - lo;
        if span <= 0.0 {
            return self.y0 + self.h / 2.0;
        }
        self.y0 + self.h * (1.0 - (value - lo) / span)
    }
}

/// Per-side value domain over the parameters assigned to that side.
fn side_domain(request: &ChartRequest, points: &[ChartPoint], side: AxisSide) -> Option<(f64, f64)> {
    let values = points.iter().flat_map(|p| {
        request
            .parameters
            .iter()
            .enumerate()
            .filter(move |(_, param)| param.y_axis == side)
            .filter_map(move |(i, _)| p.values.get(i).copied().flatten())
    });
    axis_domain(values)
}

/// Render a chart fragment into a `width x height` pixel box.
pub fn render_chart(
    request: &ChartRequest,
    points: &[ChartPoint],
    width: f64,
    height: f64,
) -> String {
    let mut out = String::new();

    if !request.title.is_empty() {
        out.push_str(&format!(
            "<text x=\"{x}\" y=\"16\" text-anchor=\"middle\" font-size=\"13\" \
             fill=\"#111827\">{}</text>",
            esc(&request.title),
            x = num(width / 2.0),
        ));
    }

    if points.is_empty() || request.parameters.is_empty() {
        out.push_str(&format!(
            "<text x=\"{x}\" y=\"{y}\" text-anchor=\"middle\" font-size=\"12\" \
             fill=\"{AXIS_TEXT}\">{NO_DATA_MESSAGE}</text>",
            x = num(width / 2.0),
            y = num(height / 2.0),
        ));
        return out;
    }

    let plot = Plot {
        x0: MARGIN_LEFT,
        y0: MARGIN_TOP,
        w: (width - MARGIN_LEFT - MARGIN_RIGHT).max(10.0),
        h: (height - MARGIN_TOP - MARGIN_BOTTOM).max(10.0),
    };

    let left = side_domain(request, points, AxisSide::Left);
    let right = side_domain(request, points, AxisSide::Right);

    // Horizontal gridlines and axis labels.
    for step in 0..=4u8 {
        let frac = f64::from(step) / 4.0;
        let y = plot.y0 + plot.h * frac;
        out.push_str(&format!(
            "<line x1=\"{x1}\" y1=\"{y}\" x2=\"{x2}\" y2=\"{y}\" stroke=\"{GRID_COLOR}\"/>",
            x1 = num(plot.x0),
            x2 = num(plot.x0 + plot.w),
            y = num(y),
        ));
        if let Some((lo, hi)) = left {
            out.push_str(&format!(
                "<text x=\"{x}\" y=\"{y}\" text-anchor=\"end\" font-size=\"10\" \
                 fill=\"{AXIS_TEXT}\">{}</text>",
                timefmt::fixed(hi - (hi - lo) * frac, 1),
                x = num(plot.x0 - 6.0),
                y = num(y + 3.0),
            ));
        }
        if let Some((lo, hi)) = right {
            out.push_str(&format!(
                "<text x=\"{x}\" y=\"{y}\" text-anchor=\"start\" font-size=\"10\" \
                 fill=\"{AXIS_TEXT}\">{}</text>",
                timefmt::fixed(hi - (hi - lo) * frac, 1),
                x = num(plot.x0 + plot.w + 6.0),
                y = num(y + 3.0),
            ));
        }
    }

    // X labels: first, middle, last.
    let count = points.len();
    for index in [0, count / 2, count - 1] {
        let Some(point) = points.get(index) else {
            continue;
        };
        out.push_str(&format!(
            "<text x=\"{x}\" y=\"{y}\" text-anchor=\"middle\" font-size=\"10\" \
             fill=\"{AXIS_TEXT}\">{}</text>",
            esc(&point.time_label),
            x = num(plot.x_at(index, count)),
            y = num(plot.y0 + plot.h + 16.0),
        ));
    }

    // Bars first so lines stay readable on top.
    let bar_series: Vec<usize> = request
        .parameters
        .iter()
        .enumerate()
        .filter(|(_, p)| p.chart_type == SeriesKind::Bar)
        .map(|(i, _)| i)
        .collect();

    for (slot, &series) in bar_series.iter().enumerate() {
        let param = &request.parameters[series];
        let domain = match param.y_axis {
            AxisSide::Left => left,
            AxisSide::Right => right,
        };
        let Some(domain) = domain else { continue };
        let color = param.color_at(series);
        #[allow(clippy::cast_precision_loss, clippy::as_conversions)]
        let slot_w = plot.w / (count as f64);
        let bar_w = (slot_w * 0.6 / (bar_series.len() as f64).max(1.0)).max(1.0);
        let baseline = plot.y_at(domain.0.max(0.0).min(domain.1), domain);

        for (i, point) in points.iter().enumerate() {
            let Some(value) = point.values.get(series).copied().flatten() else {
                continue;
            };
            let y = plot.y_at(value, domain);
            #[allow(clippy::cast_precision_loss, clippy::as_conversions)]
            let x = plot.x_at(i, count) - bar_w * (bar_series.len() as f64) / 2.0
                + bar_w * (slot as f64);
            let (top, h) = if y <= baseline {
                (y, baseline - y)
            } else {
                (baseline, y - baseline)
            };
            out.push_str(&format!(
                "<rect x=\"{x}\" y=\"{y}\" width=\"{w}\" height=\"{h}\" fill=\"{color}\" \
                 fill-opacity=\"0.85\"/>",
                x = num(x),
                y = num(top),
                w = num(bar_w),
                h = num(h.max(0.5)),
            ));
        }
    }

    // Lines and areas: one polyline per contiguous run, broken at nulls.
    for (series, param) in request.parameters.iter().enumerate() {
        if param.chart_type == SeriesKind::Bar {
            continue;
        }
        let domain = match param.y_axis {
            AxisSide::Left => left,
            AxisSide::Right => right,
        };
        let Some(domain) = domain else { continue };
        let color = param.color_at(series);

        let mut run: Vec<(f64, f64)> = Vec::new();
        let flush = |run: &mut Vec<(f64, f64)>, out: &mut String| {
            if run.len() == 1 {
                // An isolated sample still deserves a mark.
                let (x, y) = run[0];
                out.push_str(&format!(
                    "<circle cx=\"{}\" cy=\"{}\" r=\"2.5\" fill=\"{color}\"/>",
                    num(x),
                    num(y),
                ));
                run.clear();
                return;
            }
            if run.is_empty() {
                return;
            }
            let line: Vec<String> = run
                .iter()
                .enumerate()
                .map(|(i, (x, y))| {
                    format!("{} {} {}", if i == 0 { "M" } else { "L" }, num(*x), num(*y))
                })
                .collect();
            if param.chart_type == SeriesKind::Area {
                let bottom = plot.y0 + plot.h;
                let first = run[0].0;
                let last = run[run.len() - 1].0;
                out.push_str(&format!(
                    "<path d=\"{} L {} {} L {} {} Z\" fill=\"{color}\" \
                     fill-opacity=\"0.18\" stroke=\"none\"/>",
                    line.join(" "),
                    num(last),
                    num(bottom),
                    num(first),
                    num(bottom),
                ));
            }
            out.push_str(&format!(
                "<path d=\"{}\" fill=\"none\" stroke=\"{color}\" stroke-width=\"2\"/>",
                line.join(" "),
            ));
            run.clear();
        };

        for (i, point) in points.iter().enumerate() {
            match point.values.get(series).copied().flatten() {
                Some(value) => run.push((plot.x_at(i, count), plot.y_at(value, domain))),
                None => flush(&mut run, &mut out),
            }
        }
        flush(&mut run, &mut out);
    }

    // Shared tooltips: one hover band per x slot listing every series.
    #[allow(clippy::cast_precision_loss, clippy::as_conversions)]
    let band_w = plot.w / (count as f64);
    for (i, point) in points.iter().enumerate() {
        let mut lines = vec![point.time_label.clone()];
        for (series, param) in request.parameters.iter().enumerate() {
            let value = point.values.get(series).copied().flatten();
            let unit = param.unit.as_deref().unwrap_or("");
            lines.push(
                format!(
                    "{}: {} {unit}",
                    if param.label.is_empty() {
                        &param.register_name
                    } else {
                        &param.label
                    },
                    timefmt::fixed_or_placeholder(value, 1),
                )
                .trim_end()
                .to_owned(),
            );
        }
        out.push_str(&format!(
            "<g><title>{}</title><rect x=\"{x}\" y=\"{y}\" width=\"{w}\" height=\"{h}\" \
             fill=\"transparent\"/></g>",
            esc(&lines.join("\n")),
            x = num(plot.x_at(i, count) - band_w / 2.0),
            y = num(plot.y0),
            w = num(band_w),
            h = num(plot.h),
        ));
    }

    // Legend.
    if request.show_legend {
        let mut x = plot.x0;
        for (series, param) in request.parameters.iter().enumerate() {
            let label = if param.label.is_empty() {
                &param.register_name
            } else {
                &param.label
            };
            out.push_str(&format!(
                "<rect x=\"{x}\" y=\"{y}\" width=\"8\" height=\"8\" fill=\"{color}\"/>\
                 <text x=\"{tx}\" y=\"{ty}\" font-size=\"10\" fill=\"{AXIS_TEXT}\">{}</text>",
                esc(label),
                color = param.color_at(series),
                x = num(x),
                y = num(6.0),
                tx = num(x + 12.0),
                ty = num(13.0),
            ));
            #[allow(clippy::cast_precision_loss, clippy::as_conversions)]
            let advance = 20.0 + (label.chars().count() as f64) * 6.0;
            x += advance;
        }
    }

    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use voltgrid_core::chart::{
        Aggregation, ChartParameter, SeriesSample, TimeRange, build_points,
    };

    fn request(parameters: Vec<ChartParameter>) -> ChartRequest {
        ChartRequest {
            title: "Site power".into(),
            parameters,
            range: TimeRange::LastHour,
            aggregation: Aggregation::Raw,
            show_legend: true,
        }
    }

    fn param(label: &str, side: AxisSide, kind: SeriesKind) -> ChartParameter {
        ChartParameter {
            device_id: "dev".into(),
            register_name: label.to_lowercase(),
            label: label.into(),
            unit: Some("kW".into()),
            color: None,
            y_axis: side,
            chart_type: kind,
        }
    }

    fn samples(values: &[(i64, f64)]) -> Vec<SeriesSample> {
        values
            .iter()
            .map(|&(secs, value)| SeriesSample {
                timestamp: Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap(),
                value,
            })
            .collect()
    }

    #[test]
    fn empty_points_render_no_data_message() {
        let svg = render_chart(&request(vec![]), &[], 400.0, 200.0);
        assert!(svg.contains(NO_DATA_MESSAGE));
    }

    #[test]
    fn null_gaps_split_line_into_segments() {
        let a = samples(&[(0, 1.0), (10, 2.0), (30, 3.0), (40, 4.0)]);
        let b = samples(&[(0, 5.0), (20, 6.0), (40, 7.0)]);
        let points = build_points(&[a, b], TimeRange::LastHour);
        let svg = render_chart(
            &request(vec![
                param("Load", AxisSide::Left, SeriesKind::Line),
                param("Solar", AxisSide::Left, SeriesKind::Line),
            ]),
            &points,
            400.0,
            200.0,
        );
        // Series A is absent at the t=20 union slot: two line runs.
        // Series B only has isolated samples against the 5-slot union,
        // so it degrades to three point markers instead of a line.
        assert_eq!(svg.matches("stroke-width=\"2\"").count(), 2);
        assert_eq!(svg.matches("r=\"2.5\"").count(), 3);
    }

    #[test]
    fn dual_axes_emit_labels_on_both_sides() {
        let a = samples(&[(0, 1.0), (10, 2.0)]);
        let b = samples(&[(0, 400.0), (10, 420.0)]);
        let points = build_points(&[a, b], TimeRange::LastHour);
        let svg = render_chart(
            &request(vec![
                param("Power", AxisSide::Left, SeriesKind::Line),
                param("Voltage", AxisSide::Right, SeriesKind::Line),
            ]),
            &points,
            400.0,
            200.0,
        );
        assert!(svg.contains("text-anchor=\"end\""));
        assert!(svg.contains("text-anchor=\"start\""));
        // Right-side domain is padded 10% and rounded outward.
        assert!(svg.contains(">422<") || svg.contains(">422.0<"));
    }

    #[test]
    fn tooltips_show_placeholder_for_missing_series_values() {
        let a = samples(&[(0, 1.0), (10, 2.0)]);
        let b = samples(&[(0, 5.0)]);
        let points = build_points(&[a, b], TimeRange::LastHour);
        let svg = render_chart(
            &request(vec![
                param("Load", AxisSide::Left, SeriesKind::Line),
                param("Solar", AxisSide::Left, SeriesKind::Line),
            ]),
            &points,
            400.0,
            200.0,
        );
        assert!(svg.contains("Solar: --"));
        assert!(svg.contains("Load: 2.0 kW"));
    }

    #[test]
    fn area_series_close_to_the_baseline() {
        let points = build_points(&[samples(&[(0, 1.0), (10, 2.0)])], TimeRange::LastHour);
        let svg = render_chart(
            &request(vec![param("Load", AxisSide::Left, SeriesKind::Area)]),
            &points,
            400.0,
            200.0,
        );
        assert!(svg.contains("fill-opacity=\"0.18\""));
        assert!(svg.contains(" Z\""));
    }

    #[test]
    fn bar_series_emit_one_rect_per_sample() {
        let points = build_points(&[samples(&[(0, 1.0), (10, 2.0), (20, 3.0)])], TimeRange::LastHour);
        let svg = render_chart(
            &request(vec![param("Load", AxisSide::Left, SeriesKind::Bar)]),
            &points,
            400.0,
            200.0,
        );
        assert_eq!(svg.matches("fill-opacity=\"0.85\"").count(), 3);
    }
}
