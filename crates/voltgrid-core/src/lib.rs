//! Declarative widget engine core for energy-telemetry dashboards.
//!
//! This crate owns the pure half of the engine: the typed widget
//! configuration schema, the live-data snapshot model, and the
//! resolvers that turn `config + LiveData` into primitive render
//! inputs. Nothing here performs I/O:
//!
//! - **[`model`]** — domain types. [`Widget`] positions a typed config
//!   on the dashboard grid; [`WidgetConfig`] is a tagged union keyed by
//!   `widget_type`, so each widget family carries its own struct and
//!   unknown types degrade to a placeholder instead of failing.
//!   [`LiveData`] is the immutable per-tick telemetry snapshot.
//!
//! - **[`resolve`]** — per-widget pure functions from config + snapshot
//!   to render contracts ([`GaugeRender`], [`CableRender`], ...). Total
//!   over missing data: absent devices and registers become `"--"`,
//!   neutral color, zero percentage.
//!
//! - **[`condition`]** — the threshold evaluator shared by conditional
//!   imagery, gauge color zones, and cable flow direction.
//!
//! - **[`chart`]** — chart data shaping: timestamp union with left-join
//!   null fill, deterministic downsampling, and Y-axis domains.
//!
//! Rendering lives in `voltgrid-svg`; polling, visibility pause, and
//! the external-store boundary live in `voltgrid-live`.

pub mod chart;
pub mod condition;
pub mod error;
pub mod model;
pub mod palette;
pub mod resolve;
pub mod timefmt;

// ── Primary re-exports ──────────────────────────────────────────────
pub use condition::{ConditionOp, ThresholdRule, evaluate};
pub use error::CoreError;
pub use model::{
    Alarm, AlarmQuery, AlarmSeverity, DeviceStatus, LiveData, Reading, SITE_AGGREGATE_DEVICE,
    Widget, WidgetConfig, WidgetKind,
};
pub use resolve::{
    CableRender, FlowState, GaugeRender, ImageRender, ResolveContext, ResolvedWidget,
    StatusRender, Tone, UNKNOWN_WIDGET_PLACEHOLDER, ValueRender, resolve,
};
