// ── Tank gauge ──
//
// A clipped fill proportional to percentage. Cylinder variants add
// elliptical caps and a liquid-surface ellipse at the fill boundary;
// a gradient overlay supplies the glass depth effect. Both vertical and
// horizontal orientations are supported.

use voltgrid_core::model::widget::{Orientation, TankShape};
use voltgrid_core::resolve::GaugeRender;

use crate::svg::{esc, num};

const OUTLINE: &str = "#9ca3af";
const GLOSS_ID: &str = "vg-tank-gloss";

pub(crate) fn render(g: &GaugeRender) -> String {
    let mut out = String::new();
    out.push_str(&gloss_defs(g.orientation));
    match g.orientation {
        Orientation::Vertical => render_vertical(g, &mut out),
        Orientation::Horizontal => render_horizontal(g, &mut out),
    }
    captions(g, &mut out);
    out
}

/// Gradient running across the tank body, perpendicular to the fill.
fn gloss_defs(orientation: Orientation) -> String {
    let (x2, y2) = match orientation {
        Orientation::Vertical => ("1", "0"),
        Orientation::Horizontal => ("0", "1"),
    };
    format!(
        "<defs><linearGradient id=\"{GLOSS_ID}\" x1=\"0\" y1=\"0\" x2=\"{x2}\" y2=\"{y2}\">\
         <stop offset=\"0\" stop-color=\"#ffffff\" stop-opacity=\"0.35\"/>\
         <stop offset=\"0.5\" stop-color=\"#ffffff\" stop-opacity=\"0\"/>\
         <stop offset=\"1\" stop-color=\"#000000\" stop-opacity=\"0.12\"/>\
         </linearGradient></defs>",
    )
}

fn render_vertical(g: &GaugeRender, out: &mut String) {
    // Body spans x 60..140, y 25..165.
    let (x, y, w, h) = (60.0, 25.0, 80.0, 140.0);
    let fill_h = h * g.percentage / 100.0;
    let fill_y = y + h - fill_h;
    let color = esc(&g.fill_color);

    match g.shape {
        TankShape::Rectangular => {
            out.push_str(&format!(
                "<rect x=\"{x}\" y=\"{y}\" width=\"{w}\" height=\"{h}\" rx=\"6\" \
                 fill=\"none\" stroke=\"{OUTLINE}\" stroke-width=\"2\"/>",
                x = num(x),
                y = num(y),
                w = num(w),
                h = num(h),
            ));
            if fill_h > 0.0 {
                out.push_str(&format!(
                    "<rect class=\"vg-anim\" x=\"{x}\" y=\"{fy}\" width=\"{w}\" \
                     height=\"{fh}\" rx=\"6\" fill=\"{color}\"/>",
                    x = num(x),
                    fy = num(fill_y),
                    w = num(w),
                    fh = num(fill_h),
                ));
            }
            out.push_str(&format!(
                "<rect x=\"{x}\" y=\"{y}\" width=\"{w}\" height=\"{h}\" rx=\"6\" \
                 fill=\"url(#{GLOSS_ID})\"/>",
                x = num(x),
                y = num(y),
                w = num(w),
                h = num(h),
            ));
        }
        TankShape::Cylinder => {
            let (cx, rx, ry) = (x + w / 2.0, w / 2.0, 10.0);
            // Fill body, then the liquid surface ellipse at the boundary.
            if fill_h > 0.0 {
                out.push_str(&format!(
                    "<g class=\"vg-anim\"><rect x=\"{x}\" y=\"{fy}\" width=\"{w}\" \
                     height=\"{fh}\" fill=\"{color}\"/>\
                     <ellipse cx=\"{cx}\" cy=\"{by}\" rx=\"{rx}\" ry=\"{ry}\" fill=\"{color}\"/>\
                     <ellipse cx=\"{cx}\" cy=\"{fy}\" rx=\"{rx}\" ry=\"{ry}\" fill=\"{color}\" \
                     stroke=\"#ffffff\" stroke-opacity=\"0.4\"/></g>",
                    x = num(x),
                    fy = num(fill_y),
                    w = num(w),
                    fh = num(fill_h),
                    cx = num(cx),
                    by = num(y + h),
                    rx = num(rx),
                    ry = num(ry),
                ));
            }
            // Shell: side walls plus end caps.
            out.push_str(&format!(
                "<ellipse cx=\"{cx}\" cy=\"{by}\" rx=\"{rx}\" ry=\"{ry}\" fill=\"none\" \
                 stroke=\"{OUTLINE}\" stroke-width=\"2\"/>\
                 <ellipse cx=\"{cx}\" cy=\"{ty}\" rx=\"{rx}\" ry=\"{ry}\" fill=\"none\" \
                 stroke=\"{OUTLINE}\" stroke-width=\"2\"/>\
                 <line x1=\"{x}\" y1=\"{ty}\" x2=\"{x}\" y2=\"{by}\" stroke=\"{OUTLINE}\" \
                 stroke-width=\"2\"/>\
                 <line x1=\"{x2}\" y1=\"{ty}\" x2=\"{x2}\" y2=\"{by}\" stroke=\"{OUTLINE}\" \
                 stroke-width=\"2\"/>\
                 <rect x=\"{x}\" y=\"{ty}\" width=\"{w}\" height=\"{h}\" \
                 fill=\"url(#{GLOSS_ID})\"/>",
                cx = num(cx),
                ty = num(y),
                by = num(y + h),
                rx = num(rx),
                ry = num(ry),
                x = num(x),
                x2 = num(x + w),
                w = num(w),
                h = num(h),
            ));
        }
    }
}

fn render_horizontal(g: &GaugeRender, out: &mut String) {
    // Body spans x 20..180, y 65..135.
    let (x, y, w, h) = (20.0, 65.0, 160.0, 70.0);
    let fill_w = w * g.percentage / 100.0;
    let color = esc(&g.fill_color);

    match g.shape {
        TankShape::Rectangular => {
            out.push_str(&format!(
                "<rect x=\"{x}\" y=\"{y}\" width=\"{w}\" height=\"{h}\" rx=\"6\" \
                 fill=\"none\" stroke=\"{OUTLINE}\" stroke-width=\"2\"/>",
                x = num(x),
                y = num(y),
                w = num(w),
                h = num(h),
            ));
            if fill_w > 0.0 {
                out.push_str(&format!(
                    "<rect class=\"vg-anim\" x=\"{x}\" y=\"{y}\" width=\"{fw}\" \
                     height=\"{h}\" rx=\"6\" fill=\"{color}\"/>",
                    x = num(x),
                    y = num(y),
                    fw = num(fill_w),
                    h = num(h),
                ));
            }
            out.push_str(&format!(
                "<rect x=\"{x}\" y=\"{y}\" width=\"{w}\" height=\"{h}\" rx=\"6\" \
                 fill=\"url(#{GLOSS_ID})\"/>",
                x = num(x),
                y = num(y),
                w = num(w),
                h = num(h),
            ));
        }
        TankShape::Cylinder => {
            let (cy, rx, ry) = (y + h / 2.0, 10.0, h / 2.0);
            if fill_w > 0.0 {
                out.push_str(&format!(
                    "<g class=\"vg-anim\"><rect x=\"{x}\" y=\"{y}\" width=\"{fw}\" \
                     height=\"{h}\" fill=\"{color}\"/>\
                     <ellipse cx=\"{x}\" cy=\"{cy}\" rx=\"{rx}\" ry=\"{ry}\" fill=\"{color}\"/>\
                     <ellipse cx=\"{sx}\" cy=\"{cy}\" rx=\"{rx}\" ry=\"{ry}\" fill=\"{color}\" \
                     stroke=\"#ffffff\" stroke-opacity=\"0.4\"/></g>",
                    x = num(x),
                    y = num(y),
                    fw = num(fill_w),
                    h = num(h),
                    cy = num(cy),
                    sx = num(x + fill_w),
                    rx = num(rx),
                    ry = num(ry),
                ));
            }
            out.push_str(&format!(
                "<ellipse cx=\"{lx}\" cy=\"{cy}\" rx=\"{rx}\" ry=\"{ry}\" fill=\"none\" \
                 stroke=\"{OUTLINE}\" stroke-width=\"2\"/>\
                 <ellipse cx=\"{rxc}\" cy=\"{cy}\" rx=\"{rx}\" ry=\"{ry}\" fill=\"none\" \
                 stroke=\"{OUTLINE}\" stroke-width=\"2\"/>\
                 <line x1=\"{lx}\" y1=\"{y}\" x2=\"{rxc}\" y2=\"{y}\" stroke=\"{OUTLINE}\" \
                 stroke-width=\"2\"/>\
                 <line x1=\"{lx}\" y1=\"{by}\" x2=\"{rxc}\" y2=\"{by}\" stroke=\"{OUTLINE}\" \
                 stroke-width=\"2\"/>\
                 <rect x=\"{lx}\" y=\"{y}\" width=\"{w}\" height=\"{h}\" \
                 fill=\"url(#{GLOSS_ID})\"/>",
                lx = num(x),
                rxc = num(x + w),
                cy = num(cy),
                rx = num(rx),
                ry = num(ry),
                y = num(y),
                by = num(y + h),
                w = num(w),
                h = num(h),
            ));
        }
    }
}

fn captions(g: &GaugeRender, out: &mut String) {
    if g.show_value {
        let unit = g.unit.as_deref().unwrap_or("");
        out.push_str(&format!(
            "<text x=\"100\" y=\"16\" text-anchor=\"middle\" font-size=\"14\" \
             fill=\"#111827\">{}</text>",
            esc(format!("{} {unit}", g.value_text).trim_end()),
        ));
    }
    if g.show_min_max {
        out.push_str(&format!(
            "<text x=\"10\" y=\"180\" text-anchor=\"start\" font-size=\"11\" \
             fill=\"#6b7280\">{}</text>\
             <text x=\"190\" y=\"180\" text-anchor=\"end\" font-size=\"11\" \
             fill=\"#6b7280\">{}</text>",
            voltgrid_core::timefmt::fixed(g.min, 0),
            voltgrid_core::timefmt::fixed(g.max, 0),
        ));
    }
    if !g.label.is_empty() {
        out.push_str(&format!(
            "<text x=\"100\" y=\"196\" text-anchor=\"middle\" font-size=\"12\" \
             fill=\"#6b7280\">{}</text>",
            esc(&g.label),
        ));
    }
}
