// ── status_indicator resolution ──

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::model::live::LiveData;
use crate::model::widget::StatusIndicatorConfig;
use crate::timefmt;

/// Render inputs for a status indicator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusRender {
    pub label: String,
    /// `None` when the device is unknown to the feed.
    pub online: Option<bool>,
    /// Relative "last seen" text, or `"--"` when never seen.
    pub last_seen_text: String,
}

/// Passthrough of `device_status` with relative last-seen formatting.
pub fn resolve_status(
    config: &StatusIndicatorConfig,
    live: &LiveData,
    now: DateTime<Utc>,
) -> StatusRender {
    let status = live.status(&config.device_id);
    StatusRender {
        label: config.label.clone(),
        online: status.map(|s| s.is_online),
        last_seen_text: status
            .and_then(|s| s.last_seen)
            .map_or_else(|| timefmt::NO_VALUE.to_owned(), |t| timefmt::relative(t, now)),
    }
}
