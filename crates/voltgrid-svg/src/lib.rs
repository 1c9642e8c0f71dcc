//! SVG renderers for the voltgrid widget engine.
//!
//! Consumes the resolved render contracts from `voltgrid-core` and
//! emits SVG fragments:
//!
//! - **[`gauge`]** — dial, tank (vertical/horizontal, cylinder or
//!   rectangular), thermometer, and bar, all drawn from the same
//!   normalized percentage/color contract.
//! - **[`cable`]** — grid-anchored connectors with straight, curved,
//!   and orthogonal paths and a dashed-stroke flow animation whose
//!   direction and speed are CSS-variable parameters.
//! - **[`chart`]** — dual-axis time-series rendering over pre-shaped
//!   chart points.
//! - **[`widget`]** — the dispatcher plus the simple presentational
//!   widgets (value card, status dot, text, image, alarm list) and the
//!   inline placeholder/error states.
//!
//! Fragments are host-agnostic: the host wraps them in an `<svg>`
//! element sized to the widget's grid cell and embeds [`stylesheet`]
//! once per document for transitions and flow keyframes.

pub mod cable;
pub mod chart;
pub mod gauge;
mod style;
mod svg;
pub mod widget;

pub use cable::{CELL_UNITS, EditMode, GridSize, cable_path, render_cable};
pub use chart::{NO_DATA_MESSAGE, render_chart};
pub use gauge::{GAUGE_VIEW_BOX, render_gauge};
pub use style::stylesheet;
pub use widget::{RenderOptions, WidgetData, render_widget, render_widget_error};
