// ── Thermometer gauge ──
//
// Fixed bulb (always fully filled) plus a tube whose fill rises from
// the bulb proportionally to percentage. Tick marks sit at fixed
// 0/25/50/75/100% positions.

use voltgrid_core::resolve::GaugeRender;

use crate::svg::{esc, num};

const BULB_CX: f64 = 100.0;
const BULB_CY: f64 = 156.0;
const BULB_R: f64 = 22.0;
const TUBE_X: f64 = 92.0;
const TUBE_W: f64 = 16.0;
const TUBE_TOP: f64 = 28.0;
const TUBE_BOTTOM: f64 = 140.0;
const OUTLINE: &str = "#9ca3af";

pub(crate) fn render(g: &GaugeRender) -> String {
    let mut out = String::new();
    let color = esc(&g.fill_color);
    let tube_len = TUBE_BOTTOM - TUBE_TOP;
    let fill_h = tube_len * g.percentage / 100.0;

    // Tube shell and bulb outline.
    out.push_str(&format!(
        "<rect x=\"{tx}\" y=\"{ty}\" width=\"{tw}\" height=\"{th}\" rx=\"8\" \
         fill=\"#f3f4f6\" stroke=\"{OUTLINE}\" stroke-width=\"2\"/>\
         <circle cx=\"{bx}\" cy=\"{by}\" r=\"{br}\" fill=\"#f3f4f6\" \
         stroke=\"{OUTLINE}\" stroke-width=\"2\"/>",
        tx = num(TUBE_X),
        ty = num(TUBE_TOP),
        tw = num(TUBE_W),
        th = num(tube_len),
        bx = num(BULB_CX),
        by = num(BULB_CY),
        br = num(BULB_R),
    ));

    // Bulb is always full; the tube column rises with percentage.
    out.push_str(&format!(
        "<circle cx=\"{bx}\" cy=\"{by}\" r=\"{br}\" fill=\"{color}\"/>",
        bx = num(BULB_CX),
        by = num(BULB_CY),
        br = num(BULB_R - 4.0),
    ));
    if fill_h > 0.0 {
        out.push_str(&format!(
            "<rect class=\"vg-anim\" x=\"{x}\" y=\"{y}\" width=\"{w}\" height=\"{h}\" \
             rx=\"4\" fill=\"{color}\"/>",
            x = num(TUBE_X + 4.0),
            y = num(TUBE_BOTTOM - fill_h),
            w = num(TUBE_W - 8.0),
            h = num(fill_h + 8.0),
        ));
    }

    // Fixed ticks at 0/25/50/75/100%.
    for step in 0..=4u8 {
        let frac = f64::from(step) / 4.0;
        let y = TUBE_BOTTOM - tube_len * frac;
        out.push_str(&format!(
            "<line x1=\"{x1}\" y1=\"{y}\" x2=\"{x2}\" y2=\"{y}\" stroke=\"{OUTLINE}\" \
             stroke-width=\"1.5\"/>",
            x1 = num(TUBE_X + TUBE_W + 4.0),
            x2 = num(TUBE_X + TUBE_W + 12.0),
            y = num(y),
        ));
        if g.show_min_max {
            let bound = g.min + (g.max - g.min) * frac;
            out.push_str(&format!(
                "<text x=\"{x}\" y=\"{y}\" text-anchor=\"start\" font-size=\"10\" \
                 fill=\"#6b7280\">{}</text>",
                voltgrid_core::timefmt::fixed(bound, 0),
                x = num(TUBE_X + TUBE_W + 16.0),
                y = num(y + 3.0),
            ));
        }
    }

    if g.show_value {
        let unit = g.unit.as_deref().unwrap_or("");
        out.push_str(&format!(
            "<text x=\"{x}\" y=\"100\" text-anchor=\"end\" font-size=\"15\" \
             fill=\"#111827\">{}</text>",
            esc(format!("{} {unit}", g.value_text).trim_end()),
            x = num(TUBE_X - 10.0),
        ));
    }

    if !g.label.is_empty() {
        out.push_str(&format!(
            "<text x=\"100\" y=\"196\" text-anchor=\"middle\" font-size=\"12\" \
             fill=\"#6b7280\">{}</text>",
            esc(&g.label),
        ));
    }

    out
}
