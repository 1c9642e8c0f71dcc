// ── Live telemetry snapshot ──
//
// A point-in-time bundle of per-device register readings and online
// status, produced by the external live-data feed on each poll tick and
// replaced wholesale. Widgets share it as `Arc<LiveData>` and never
// mutate it. A missing device or register key means "no data" -- every
// resolver renders a defined empty state for it.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Pseudo-device key holding site-level aggregate registers (total
/// consumption, total generation, ...). Configs with an empty
/// `device_id` resolve against this key.
pub const SITE_AGGREGATE_DEVICE: &str = "site";

/// One register sample. `value: None` means the device reported the
/// register without a usable reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub value: Option<f64>,
    pub unit: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// Device reachability as reported by the feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceStatus {
    pub is_online: bool,
    pub last_seen: Option<DateTime<Utc>>,
}

/// Point-in-time telemetry for one site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiveData {
    pub timestamp: DateTime<Utc>,
    /// device id -> register name -> reading.
    #[serde(default)]
    pub registers: HashMap<String, HashMap<String, Reading>>,
    /// device id -> reachability.
    #[serde(default)]
    pub device_status: HashMap<String, DeviceStatus>,
}

impl LiveData {
    /// A snapshot with no data, stamped at `timestamp`.
    pub fn empty(timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            registers: HashMap::new(),
            device_status: HashMap::new(),
        }
    }

    /// Resolve a configured device id to a lookup key -- empty selects
    /// the site aggregate pseudo-device.
    pub fn device_key(device_id: &str) -> &str {
        if device_id.is_empty() {
            SITE_AGGREGATE_DEVICE
        } else {
            device_id
        }
    }

    /// Look up a register reading. Absence is not an error.
    pub fn reading(&self, device_id: &str, register_name: &str) -> Option<&Reading> {
        self.registers
            .get(Self::device_key(device_id))?
            .get(register_name)
    }

    /// Numeric value of a register, if present and non-null.
    pub fn value(&self, device_id: &str, register_name: &str) -> Option<f64> {
        self.reading(device_id, register_name)?.value
    }

    /// Unit reported for a register, if any.
    pub fn unit(&self, device_id: &str, register_name: &str) -> Option<&str> {
        self.reading(device_id, register_name)?.unit.as_deref()
    }

    pub fn status(&self, device_id: &str) -> Option<&DeviceStatus> {
        self.device_status.get(Self::device_key(device_id))
    }
}
