//! Cable/connector renderer: grid-anchored path generation plus the
//! dashed-stroke flow animation.
//!
//! Grid coordinates are clamped into the canvas before mapping, so a
//! stale config can never draw off-canvas. One grid cell maps to 100
//! view-box units -- the drawing is resolution independent and the host
//! scales the `<svg>` element.

use voltgrid_core::model::widget::PathStyle;
use voltgrid_core::resolve::{CableRender, FlowState};

use crate::svg::num;

/// View-box units per grid cell.
pub const CELL_UNITS: f64 = 100.0;

const HIT_MIN_WIDTH: f64 = 24.0;
const SELECTION_COLOR: &str = "#60a5fa";

/// Canvas dimensions in grid cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSize {
    pub cols: u16,
    pub rows: u16,
}

impl GridSize {
    /// View box string for a canvas of this size.
    pub fn view_box(self) -> String {
        format!(
            "0 0 {} {}",
            num(f64::from(self.cols) * CELL_UNITS),
            num(f64::from(self.rows) * CELL_UNITS)
        )
    }
}

impl Default for GridSize {
    fn default() -> Self {
        Self { cols: 12, rows: 8 }
    }
}

/// Edit-mode affordances. Geometry mutation stays with the caller; the
/// emitted handles carry `data-handle` attributes for it to wire up.
#[derive(Debug, Clone, Copy, Default)]
pub struct EditMode {
    pub selected: bool,
}

fn to_canvas(point: (f64, f64), grid: GridSize) -> (f64, f64) {
    let clamp = |v: f64, hi: f64| if v.is_finite() { v.clamp(0.0, hi) } else { 0.0 };
    (
        clamp(point.0, f64::from(grid.cols)) * CELL_UNITS,
        clamp(point.1, f64::from(grid.rows)) * CELL_UNITS,
    )
}

/// Path data for a cable, in canvas units.
pub fn cable_path(cable: &CableRender, grid: GridSize) -> String {
    let (x0, y0) = to_canvas(cable.start, grid);
    let (x1, y1) = to_canvas(cable.end, grid);

    match cable.path_style {
        PathStyle::Straight => straight(x0, y0, x1, y1),
        PathStyle::Curved => {
            let (dx, dy) = (x1 - x0, y1 - y0);
            let chord = dx.hypot(dy);
            if chord == 0.0 {
                // Zero-length chord: no perpendicular exists.
                return straight(x0, y0, x1, y1);
            }
            // Control point offset perpendicular to the chord by 30% of
            // its length; (-dy, dx)/chord is the unit perpendicular.
            let (mx, my) = ((x0 + x1) / 2.0, (y0 + y1) / 2.0);
            let (cx, cy) = (mx - dy * 0.3, my + dx * 0.3);
            format!(
                "M {} {} Q {} {} {} {}",
                num(x0),
                num(y0),
                num(cx),
                num(cy),
                num(x1),
                num(y1),
            )
        }
        PathStyle::Orthogonal => {
            // Two right-angle segments through the horizontal midpoint.
            let mx = (x0 + x1) / 2.0;
            format!(
                "M {} {} L {} {} L {} {} L {} {}",
                num(x0),
                num(y0),
                num(mx),
                num(y0),
                num(mx),
                num(y1),
                num(x1),
                num(y1),
            )
        }
    }
}

/// Render a cable fragment.
///
/// Flow encoding: while animated and flowing, the dash offset animates
/// with direction from `--flow-direction`; `stopped` keeps static
/// dashes so an idle cable still reads as animatable, and a
/// non-animated cable draws solid.
pub fn render_cable(cable: &CableRender, grid: GridSize, edit: Option<EditMode>) -> String {
    let d = cable_path(cable, grid);
    let thickness = if cable.thickness.is_finite() && cable.thickness > 0.0 {
        cable.thickness
    } else {
        1.0
    };
    let speed = if cable.animation_speed.is_finite() && cable.animation_speed > 0.0 {
        cable.animation_speed
    } else {
        1.0
    };

    let color = match cable.flow {
        FlowState::Reverse => cable.reverse_color.as_deref().unwrap_or(&cable.color),
        FlowState::Forward | FlowState::Stopped => &cable.color,
    };

    // Dash pattern scales with stroke width so thick and thin cables
    // both read correctly.
    let dash = format!("{} {}", num(thickness * 4.0), num(thickness * 2.0));
    let cycle = thickness * 6.0;

    let mut out = String::new();

    if edit.is_some_and(|e| e.selected) {
        out.push_str(&format!(
            "<path d=\"{d}\" fill=\"none\" stroke=\"{SELECTION_COLOR}\" \
             stroke-width=\"{w}\" stroke-opacity=\"0.5\"/>",
            w = num(thickness + 6.0),
        ));
    }

    let flowing = cable.animated && cable.flow != FlowState::Stopped;
    if flowing {
        let direction = match cable.flow {
            FlowState::Reverse => "reverse",
            FlowState::Forward | FlowState::Stopped => "normal",
        };
        out.push_str(&format!(
            "<path class=\"vg-flow\" d=\"{d}\" fill=\"none\" stroke=\"{color}\" \
             stroke-width=\"{w}\" stroke-dasharray=\"{dash}\" stroke-linecap=\"round\" \
             style=\"--flow-duration: {speed}s; --flow-direction: {direction}; \
             --flow-offset: -{cycle}\"/>",
            color = crate::svg::esc(color),
            w = num(thickness),
            speed = num(speed),
            cycle = num(cycle),
        ));
    } else if cable.animated {
        // Stopped: static dashes, not a solid line -- idle is visually
        // distinct from never-animated.
        out.push_str(&format!(
            "<path d=\"{d}\" fill=\"none\" stroke=\"{color}\" stroke-width=\"{w}\" \
             stroke-dasharray=\"{dash}\" stroke-linecap=\"round\"/>",
            color = crate::svg::esc(color),
            w = num(thickness),
        ));
    } else {
        out.push_str(&format!(
            "<path d=\"{d}\" fill=\"none\" stroke=\"{color}\" stroke-width=\"{w}\" \
             stroke-linecap=\"round\"/>",
            color = crate::svg::esc(color),
            w = num(thickness),
        ));
    }

    if edit.is_some() {
        let (x0, y0) = to_canvas(cable.start, grid);
        let (x1, y1) = to_canvas(cable.end, grid);
        out.push_str(&format!(
            "<path class=\"vg-hit\" d=\"{d}\" stroke-width=\"{w}\"/>\
             <circle class=\"vg-handle\" data-handle=\"start\" cx=\"{x0}\" cy=\"{y0}\" \
             r=\"7\" fill=\"#ffffff\" stroke=\"{SELECTION_COLOR}\" stroke-width=\"2\"/>\
             <circle class=\"vg-handle\" data-handle=\"end\" cx=\"{x1}\" cy=\"{y1}\" \
             r=\"7\" fill=\"#ffffff\" stroke=\"{SELECTION_COLOR}\" stroke-width=\"2\"/>",
            w = num((thickness * 4.0).max(HIT_MIN_WIDTH)),
            x0 = num(x0),
            y0 = num(y0),
            x1 = num(x1),
            y1 = num(y1),
        ));
    }

    out
}

fn straight(x0: f64, y0: f64, x1: f64, y1: f64) -> String {
    format!("M {} {} L {} {}", num(x0), num(y0), num(x1), num(y1))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use voltgrid_core::model::widget::CableConfig;
    use voltgrid_core::resolve::resolve_cable;
    use voltgrid_core::model::live::LiveData;
    use chrono::Utc;

    fn cable(style: PathStyle, start: (f64, f64), end: (f64, f64)) -> CableRender {
        CableRender {
            start,
            end,
            path_style: style,
            color: "#64748b".into(),
            thickness: 3.0,
            animated: true,
            animation_speed: 1.0,
            flow: FlowState::Forward,
            reverse_color: None,
        }
    }

    #[test]
    fn path_styles_generate_expected_geometry() {
        let grid = GridSize::default();
        insta::assert_snapshot!(
            cable_path(&cable(PathStyle::Straight, (0.0, 0.0), (2.0, 1.0)), grid),
            @"M 0 0 L 200 100"
        );
        insta::assert_snapshot!(
            cable_path(&cable(PathStyle::Curved, (0.0, 0.0), (2.0, 0.0)), grid),
            @"M 0 0 Q 100 60 200 0"
        );
        insta::assert_snapshot!(
            cable_path(&cable(PathStyle::Orthogonal, (0.0, 0.0), (2.0, 1.0)), grid),
            @"M 0 0 L 100 0 L 100 100 L 200 100"
        );
    }

    #[test]
    fn zero_length_curved_chord_degenerates_to_straight() {
        let grid = GridSize::default();
        let path = cable_path(&cable(PathStyle::Curved, (1.0, 1.0), (1.0, 1.0)), grid);
        assert_eq!(path, "M 100 100 L 100 100");
    }

    #[test]
    fn endpoints_clamp_into_the_grid() {
        let grid = GridSize { cols: 12, rows: 8 };
        let path = cable_path(&cable(PathStyle::Straight, (-5.0, 3.0), (20.0, 9.0)), grid);
        assert_eq!(path, "M 0 300 L 1200 800");
    }

    #[test]
    fn non_finite_endpoints_fall_back_to_origin() {
        let grid = GridSize::default();
        let path = cable_path(
            &cable(PathStyle::Straight, (f64::NAN, 0.0), (1.0, f64::INFINITY)),
            grid,
        );
        assert_eq!(path, "M 0 0 L 100 0");
    }

    #[test]
    fn dash_pattern_scales_with_thickness() {
        let mut c = cable(PathStyle::Straight, (0.0, 0.0), (2.0, 0.0));
        c.thickness = 5.0;
        let svg = render_cable(&c, GridSize::default(), None);
        assert!(svg.contains("stroke-dasharray=\"20 10\""));
        assert!(svg.contains("--flow-offset: -30"));
    }

    #[test]
    fn reverse_flow_runs_animation_backwards_and_recolors() {
        let mut c = cable(PathStyle::Straight, (0.0, 0.0), (2.0, 0.0));
        c.flow = FlowState::Reverse;
        c.reverse_color = Some("#f97316".into());
        let svg = render_cable(&c, GridSize::default(), None);
        assert!(svg.contains("--flow-direction: reverse"));
        assert!(svg.contains("stroke=\"#f97316\""));
    }

    #[test]
    fn stopped_flow_keeps_static_dashes() {
        let mut c = cable(PathStyle::Straight, (0.0, 0.0), (2.0, 0.0));
        c.flow = FlowState::Stopped;
        let svg = render_cable(&c, GridSize::default(), None);
        assert!(!svg.contains("vg-flow"));
        assert!(svg.contains("stroke-dasharray"));
    }

    #[test]
    fn non_animated_cable_draws_solid() {
        let mut c = cable(PathStyle::Straight, (0.0, 0.0), (2.0, 0.0));
        c.animated = false;
        let svg = render_cable(&c, GridSize::default(), None);
        assert!(!svg.contains("stroke-dasharray"));
    }

    #[test]
    fn edit_mode_adds_hit_path_and_handles() {
        let c = cable(PathStyle::Straight, (0.0, 0.0), (2.0, 1.0));
        let svg = render_cable(&c, GridSize::default(), Some(EditMode { selected: true }));
        assert!(svg.contains("vg-hit"));
        assert!(svg.contains("data-handle=\"start\""));
        assert!(svg.contains("data-handle=\"end\""));
        assert!(svg.contains(SELECTION_COLOR));
        // Wide invisible hit stroke.
        assert!(svg.contains("stroke-width=\"24\""));
    }

    #[test]
    fn resolver_output_plugs_straight_in() {
        let config = CableConfig {
            start_col: 1.0,
            start_row: 1.0,
            end_col: 3.0,
            end_row: 1.0,
            ..CableConfig::default()
        };
        let resolved = resolve_cable(&config, &LiveData::empty(Utc::now()));
        let svg = render_cable(&resolved, GridSize::default(), None);
        assert!(svg.contains("M 100 100 L 300 100"));
        // Unconfigured source animates forward.
        assert!(svg.contains("vg-flow"));
    }
}
