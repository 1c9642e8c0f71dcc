// ── icon/image resolution ──

use serde::Serialize;

use crate::condition;
use crate::model::live::LiveData;
use crate::model::widget::{ImageConfig, ValueDisplayConfig};
use crate::resolve::value::{ValueRender, resolve_value};

/// Render inputs for an image widget: the chosen image, an optional
/// online dot, and up to two caption values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageRender {
    /// `None` when no image is configured yet.
    pub url: Option<String>,
    /// `None` hides the status dot (no status device configured, or the
    /// device is unknown to the feed).
    pub online: Option<bool>,
    pub values: Vec<ValueRender>,
}

/// Resolve an image widget. The conditional image and the status dot
/// are independent: one watches a register, the other `device_status`.
pub fn resolve_image(config: &ImageConfig, live: &LiveData) -> ImageRender {
    let condition_met = condition::evaluate(
        live.value(&config.condition_device_id, &config.condition_register),
        config.condition_operator,
        config.condition_threshold,
    );

    let url = if condition_met && config.alt_image_url.is_some() {
        config.alt_image_url.clone()
    } else if config.image_url.is_empty() {
        None
    } else {
        Some(config.image_url.clone())
    };

    let online = if config.status_device_id.is_empty() {
        None
    } else {
        live.status(&config.status_device_id).map(|s| s.is_online)
    };

    let values = config
        .value_strip
        .iter()
        .take(2)
        .map(|entry| {
            resolve_value(
                &ValueDisplayConfig {
                    label: entry.label.clone(),
                    device_id: entry.device_id.clone(),
                    register_name: entry.register_name.clone(),
                    decimals: entry.decimals,
                    ..ValueDisplayConfig::default()
                },
                live,
            )
        })
        .collect();

    ImageRender {
        url,
        online,
        values,
    }
}
