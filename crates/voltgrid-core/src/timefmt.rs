//! Value and timestamp formatting shared across widgets.

use chrono::{DateTime, Utc};

/// Placeholder for an absent reading.
pub const NO_VALUE: &str = "--";

/// Fixed-point formatting with the configured decimal count.
pub fn fixed(value: f64, decimals: u8) -> String {
    format!("{value:.prec$}", prec = usize::from(decimals))
}

/// Fixed-point formatting, or `"--"` when the value is absent.
pub fn fixed_or_placeholder(value: Option<f64>, decimals: u8) -> String {
    value.map_or_else(|| NO_VALUE.to_owned(), |v| fixed(v, decimals))
}

/// Relative "last seen" style formatting.
///
/// `<1min` reads "Just now", then minutes, hours, and days. Timestamps
/// ahead of `now` (clock skew between feed and host) clamp to "Just now".
pub fn relative(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(then);
    let minutes = elapsed.num_minutes();
    if minutes < 1 {
        "Just now".to_owned()
    } else if minutes < 60 {
        format!("{minutes}m ago")
    } else if elapsed.num_hours() < 24 {
        format!("{}h ago", elapsed.num_hours())
    } else {
        format!("{}d ago", elapsed.num_days())
    }
}

/// Long-form timestamp for contexts where a relative label is too vague
/// (alarm detail rows, tooltips).
pub fn long_form(ts: DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M").to_string()
}
