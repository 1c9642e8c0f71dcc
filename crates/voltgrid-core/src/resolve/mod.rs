//! Per-widget resolvers: `(config, LiveData) -> render inputs`.
//!
//! Every resolver is a total pure function -- missing devices,
//! registers, and config keys produce the documented empty state, never
//! an error. The one exception to purity is declared, not hidden:
//! alarm lists and charts resolve to typed *queries* that the runtime
//! executes against external stores.

pub mod cable;
pub mod gauge;
pub mod image;
pub mod status;
pub mod value;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::chart::ChartRequest;
use crate::model::alarm::AlarmQuery;
use crate::model::live::LiveData;
use crate::model::widget::{TextConfig, Widget, WidgetConfig};

pub use cable::{CableRender, FlowState, flow_state, resolve_cable};
pub use gauge::{GaugeRender, percentage, resolve_gauge};
pub use image::{ImageRender, resolve_image};
pub use status::{StatusRender, resolve_status};
pub use value::{Tone, ValueRender, resolve_value};

/// Placeholder text rendered for an unrecognized widget type.
pub const UNKNOWN_WIDGET_PLACEHOLDER: &str = "Unknown widget type";

/// Ambient inputs shared by all resolvers on one render pass.
#[derive(Debug, Clone, Copy)]
pub struct ResolveContext<'a> {
    /// Site whose dashboard is being rendered; scopes alarm queries.
    pub site_id: &'a str,
    /// Wall-clock "now" for relative time formatting. Injected so
    /// resolution stays deterministic under test.
    pub now: DateTime<Utc>,
}

/// Render inputs for an alarm list: a title plus the query the runtime
/// executes on its own refresh cadence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlarmListRender {
    pub title: String,
    pub query: AlarmQuery,
}

/// Render inputs for a text widget (config passthrough).
pub type TextRender = TextConfig;

/// The resolved form of a widget, ready for its renderer.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedWidget {
    Value(ValueRender),
    Gauge(GaugeRender),
    Image(ImageRender),
    Status(StatusRender),
    Cable(CableRender),
    /// Executed by the runtime against the historical-data provider.
    Chart(ChartRequest),
    /// Executed by the runtime against the alarm store.
    AlarmList(AlarmListRender),
    Text(TextRender),
    /// Unrecognized `widget_type`; renders the literal placeholder.
    Unknown,
}

/// Resolve one widget against the current snapshot.
pub fn resolve(widget: &Widget, live: &LiveData, ctx: &ResolveContext<'_>) -> ResolvedWidget {
    match &widget.config {
        WidgetConfig::ValueDisplay(c) => ResolvedWidget::Value(resolve_value(c, live)),
        WidgetConfig::Gauge(c) => ResolvedWidget::Gauge(resolve_gauge(c, live)),
        WidgetConfig::Image(c) => ResolvedWidget::Image(resolve_image(c, live)),
        WidgetConfig::StatusIndicator(c) => {
            ResolvedWidget::Status(resolve_status(c, live, ctx.now))
        }
        WidgetConfig::Cable(c) => ResolvedWidget::Cable(resolve_cable(c, live)),
        WidgetConfig::Chart(c) => ResolvedWidget::Chart(ChartRequest::from_config(c)),
        WidgetConfig::AlarmList(c) => ResolvedWidget::AlarmList(AlarmListRender {
            title: c.title.clone(),
            query: AlarmQuery {
                site_id: ctx.site_id.to_owned(),
                severities: c.severities.clone(),
                show_resolved: c.show_resolved,
                max_items: c.max_items,
            },
        }),
        WidgetConfig::Text(c) => ResolvedWidget::Text(c.clone()),
        WidgetConfig::Unknown => ResolvedWidget::Unknown,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::widget::{GridRect, WidgetKind};
    use pretty_assertions::assert_eq;

    fn ctx(now: DateTime<Utc>) -> ResolveContext<'static> {
        ResolveContext {
            site_id: "site-1",
            now,
        }
    }

    #[test]
    fn unknown_widget_resolves_to_placeholder_without_panicking() {
        let mut widget = Widget::new(WidgetKind::Text, GridRect::default());
        widget.config = WidgetConfig::parse(&serde_json::json!({ "widget_type": "foo" }));
        let now = Utc::now();
        let resolved = resolve(&widget, &LiveData::empty(now), &ctx(now));
        assert_eq!(resolved, ResolvedWidget::Unknown);
    }

    #[test]
    fn alarm_list_resolves_to_site_scoped_query() {
        let widget = Widget::new(WidgetKind::AlarmList, GridRect::default());
        let now = Utc::now();
        let resolved = resolve(&widget, &LiveData::empty(now), &ctx(now));
        let ResolvedWidget::AlarmList(render) = resolved else {
            panic!("expected alarm list");
        };
        assert_eq!(render.query.site_id, "site-1");
        assert_eq!(render.query.max_items, 8);
        assert!(!render.query.show_resolved);
    }

    #[test]
    fn chart_resolves_auto_aggregation() {
        let widget = Widget::new(WidgetKind::Chart, GridRect::default());
        let now = Utc::now();
        let ResolvedWidget::Chart(request) =
            resolve(&widget, &LiveData::empty(now), &ctx(now))
        else {
            panic!("expected chart");
        };
        assert_eq!(request.aggregation, crate::chart::Aggregation::Hourly);
    }
}
