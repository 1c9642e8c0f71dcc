// ── Dial gauge ──
//
// A 270° arc that opens at the bottom: start angle 135° in SVG screen
// coordinates, sweeping clockwise through the top. The filled arc spans
// `sweep * percentage / 100` and the needle points at its end.

use voltgrid_core::resolve::GaugeRender;
use voltgrid_core::timefmt;

use crate::svg::{arc_path, num, polar};

const CX: f64 = 100.0;
const CY: f64 = 105.0;
const RADIUS: f64 = 70.0;
const START_DEG: f64 = 135.0;
const SWEEP_DEG: f64 = 270.0;
const TRACK_COLOR: &str = "#e5e7eb";
const STROKE_WIDTH: f64 = 12.0;

pub(crate) fn render(g: &GaugeRender) -> String {
    let mut out = String::new();

    let track = arc_path(CX, CY, RADIUS, START_DEG, START_DEG + SWEEP_DEG);
    out.push_str(&format!(
        "<path d=\"{track}\" fill=\"none\" stroke=\"{TRACK_COLOR}\" \
         stroke-width=\"{w}\" stroke-linecap=\"round\"/>",
        w = num(STROKE_WIDTH),
    ));

    let sweep = SWEEP_DEG * g.percentage / 100.0;
    if sweep > 0.0 {
        let fill = arc_path(CX, CY, RADIUS, START_DEG, START_DEG + sweep);
        out.push_str(&format!(
            "<path class=\"vg-anim\" d=\"{fill}\" fill=\"none\" stroke=\"{color}\" \
             stroke-width=\"{w}\" stroke-linecap=\"round\"/>",
            color = crate::svg::esc(&g.fill_color),
            w = num(STROKE_WIDTH),
        ));
    }

    // Needle points at the end of the filled sweep.
    let needle_deg = START_DEG + sweep;
    let (nx, ny) = polar(CX, CY, RADIUS - 18.0, needle_deg);
    out.push_str(&format!(
        "<line class=\"vg-anim\" x1=\"{cx}\" y1=\"{cy}\" x2=\"{nx}\" y2=\"{ny}\" \
         stroke=\"#374151\" stroke-width=\"3\" stroke-linecap=\"round\"/>\
         <circle cx=\"{cx}\" cy=\"{cy}\" r=\"6\" fill=\"#374151\"/>",
        cx = num(CX),
        cy = num(CY),
        nx = num(nx),
        ny = num(ny),
    ));

    if g.show_value {
        let unit = g.unit.as_deref().unwrap_or("");
        out.push_str(&format!(
            "<text x=\"{cx}\" y=\"155\" text-anchor=\"middle\" font-size=\"18\" \
             fill=\"#111827\">{}</text>",
            crate::svg::esc(format!("{} {unit}", g.value_text).trim_end()),
            cx = num(CX),
        ));
    }

    if g.show_min_max {
        let (min_x, min_y) = polar(CX, CY, RADIUS + 22.0, START_DEG);
        let (max_x, max_y) = polar(CX, CY, RADIUS + 22.0, START_DEG + SWEEP_DEG);
        out.push_str(&format!(
            "<text x=\"{}\" y=\"{}\" text-anchor=\"middle\" font-size=\"11\" \
             fill=\"#6b7280\">{}</text>\
             <text x=\"{}\" y=\"{}\" text-anchor=\"middle\" font-size=\"11\" \
             fill=\"#6b7280\">{}</text>",
            num(min_x),
            num(min_y),
            timefmt::fixed(g.min, 0),
            num(max_x),
            num(max_y),
            timefmt::fixed(g.max, 0),
        ));
    }

    if !g.label.is_empty() {
        out.push_str(&format!(
            "<text x=\"{cx}\" y=\"190\" text-anchor=\"middle\" font-size=\"13\" \
             fill=\"#6b7280\">{}</text>",
            crate::svg::esc(&g.label),
            cx = num(CX),
        ));
    }

    out
}
