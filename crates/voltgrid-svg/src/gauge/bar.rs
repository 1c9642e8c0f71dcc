// ── Bar gauge ──
//
// The simplest family member: a rounded track with a proportional fill
// and optional min/max captions at the scale ends.

use voltgrid_core::model::widget::Orientation;
use voltgrid_core::resolve::GaugeRender;
use voltgrid_core::timefmt;

use crate::svg::{esc, num};

const TRACK_COLOR: &str = "#e5e7eb";

pub(crate) fn render(g: &GaugeRender) -> String {
    let mut out = String::new();
    let color = esc(&g.fill_color);

    match g.orientation {
        Orientation::Horizontal => {
            let (x, y, w, h) = (20.0, 90.0, 160.0, 20.0);
            let fill_w = w * g.percentage / 100.0;
            out.push_str(&format!(
                "<rect x=\"{x}\" y=\"{y}\" width=\"{w}\" height=\"{h}\" rx=\"10\" \
                 fill=\"{TRACK_COLOR}\"/>",
                x = num(x),
                y = num(y),
                w = num(w),
                h = num(h),
            ));
            if fill_w > 0.0 {
                out.push_str(&format!(
                    "<rect class=\"vg-anim\" x=\"{x}\" y=\"{y}\" width=\"{fw}\" \
                     height=\"{h}\" rx=\"10\" fill=\"{color}\"/>",
                    x = num(x),
                    y = num(y),
                    fw = num(fill_w),
                    h = num(h),
                ));
            }
            if g.show_min_max {
                out.push_str(&format!(
                    "<text x=\"{x}\" y=\"128\" text-anchor=\"start\" font-size=\"11\" \
                     fill=\"#6b7280\">{}</text>\
                     <text x=\"{x2}\" y=\"128\" text-anchor=\"end\" font-size=\"11\" \
                     fill=\"#6b7280\">{}</text>",
                    timefmt::fixed(g.min, 0),
                    timefmt::fixed(g.max, 0),
                    x = num(x),
                    x2 = num(x + w),
                ));
            }
            if g.show_value {
                let unit = g.unit.as_deref().unwrap_or("");
                out.push_str(&format!(
                    "<text x=\"100\" y=\"78\" text-anchor=\"middle\" font-size=\"15\" \
                     fill=\"#111827\">{}</text>",
                    esc(format!("{} {unit}", g.value_text).trim_end()),
                ));
            }
        }
        Orientation::Vertical => {
            let (x, y, w, h) = (90.0, 20.0, 20.0, 150.0);
            let fill_h = h * g.percentage / 100.0;
            out.push_str(&format!(
                "<rect x=\"{x}\" y=\"{y}\" width=\"{w}\" height=\"{h}\" rx=\"10\" \
                 fill=\"{TRACK_COLOR}\"/>",
                x = num(x),
                y = num(y),
                w = num(w),
                h = num(h),
            ));
            if fill_h > 0.0 {
                out.push_str(&format!(
                    "<rect class=\"vg-anim\" x=\"{x}\" y=\"{fy}\" width=\"{w}\" \
                     height=\"{fh}\" rx=\"10\" fill=\"{color}\"/>",
                    x = num(x),
                    fy = num(y + h - fill_h),
                    w = num(w),
                    fh = num(fill_h),
                ));
            }
            if g.show_min_max {
                out.push_str(&format!(
                    "<text x=\"{tx}\" y=\"{by}\" text-anchor=\"start\" font-size=\"11\" \
                     fill=\"#6b7280\">{}</text>\
                     <text x=\"{tx}\" y=\"{ty}\" text-anchor=\"start\" font-size=\"11\" \
                     fill=\"#6b7280\">{}</text>",
                    timefmt::fixed(g.min, 0),
                    timefmt::fixed(g.max, 0),
                    tx = num(x + w + 8.0),
                    by = num(y + h),
                    ty = num(y + 8.0),
                ));
            }
            if g.show_value {
                let unit = g.unit.as_deref().unwrap_or("");
                out.push_str(&format!(
                    "<text x=\"100\" y=\"188\" text-anchor=\"middle\" font-size=\"15\" \
                     fill=\"#111827\">{}</text>",
                    esc(format!("{} {unit}", g.value_text).trim_end()),
                ));
            }
        }
    }

    if !g.label.is_empty() {
        out.push_str(&format!(
            "<text x=\"100\" y=\"10\" text-anchor=\"middle\" font-size=\"12\" \
             fill=\"#6b7280\">{}</text>",
            esc(&g.label),
        ));
    }

    out
}
