//! Gauge renderer family: dial, tank, thermometer, bar.
//!
//! All four consume the same normalized [`GaugeRender`] contract -- the
//! fill color and percentage arrive already resolved, nothing here
//! recomputes them. Every fragment targets a `0 0 200 200` view box.

mod bar;
mod dial;
mod tank;
mod thermometer;

use voltgrid_core::model::widget::GaugeStyle;
use voltgrid_core::resolve::GaugeRender;

/// View box every gauge fragment is drawn against.
pub const GAUGE_VIEW_BOX: &str = "0 0 200 200";

/// Render a gauge fragment for the resolved contract.
pub fn render_gauge(g: &GaugeRender) -> String {
    match g.style {
        GaugeStyle::Dial => dial::render(g),
        GaugeStyle::Tank => tank::render(g),
        GaugeStyle::Thermometer => thermometer::render(g),
        GaugeStyle::Bar => bar::render(g),
    }
}
