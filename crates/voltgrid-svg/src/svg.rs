// ── Shared SVG emission helpers ──
//
// Renderers build markup with `format!` against these helpers. Numbers
// are formatted to at most two decimals with trailing zeros trimmed so
// generated paths are stable across runs (snapshot-test friendly).

/// Deterministic coordinate formatting for path/attribute values.
pub(crate) fn num(v: f64) -> String {
    if !v.is_finite() {
        return "0".to_owned();
    }
    let s = format!("{v:.2}");
    let trimmed = s.trim_end_matches('0').trim_end_matches('.');
    if trimmed.is_empty() || trimmed == "-0" || trimmed == "-" {
        "0".to_owned()
    } else {
        trimmed.to_owned()
    }
}

/// Escape text content and attribute values.
pub(crate) fn esc(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// Convert polar coordinates (degrees, SVG screen orientation: y grows
/// downward, so increasing angle sweeps clockwise) to Cartesian.
pub(crate) fn polar(cx: f64, cy: f64, radius: f64, angle_deg: f64) -> (f64, f64) {
    let rad = angle_deg.to_radians();
    (cx + radius * rad.cos(), cy + radius * rad.sin())
}

/// Circular-arc path segment from `start_deg` to `end_deg` (clockwise).
///
/// The large-arc flag must be `1` exactly when the sweep exceeds 180° --
/// with the wrong flag SVG draws the complementary arc and the geometry
/// visibly breaks.
pub(crate) fn arc_path(cx: f64, cy: f64, radius: f64, start_deg: f64, end_deg: f64) -> String {
    let (x0, y0) = polar(cx, cy, radius, start_deg);
    let (x1, y1) = polar(cx, cy, radius, end_deg);
    let large_arc = i32::from(end_deg - start_deg > 180.0);
    format!(
        "M {} {} A {} {} 0 {} 1 {} {}",
        num(x0),
        num(y0),
        num(radius),
        num(radius),
        large_arc,
        num(x1),
        num(y1),
    )
}
