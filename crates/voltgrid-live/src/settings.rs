//! Runtime settings: poll cadences, downsample cap, grid geometry.
//!
//! Loaded figment-style -- defaults, then an optional TOML file, then
//! `VOLTGRID_`-prefixed environment overrides.

use std::path::Path;
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

use crate::error::LiveError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeSettings {
    /// Live telemetry poll cadence.
    pub live_poll_interval_secs: u64,
    /// Chart historical refresh cadence.
    pub chart_refresh_secs: u64,
    /// Alarm list refresh cadence.
    pub alarm_refresh_secs: u64,
    /// Maximum rendered chart points before downsampling kicks in.
    pub downsample_cap: usize,
    /// Canvas grid geometry, in cells.
    pub grid_columns: u16,
    pub grid_rows: u16,
}

impl Default for RuntimeSettings {
    fn default() -> Self {
        Self {
            live_poll_interval_secs: 5,
            chart_refresh_secs: 30,
            alarm_refresh_secs: 30,
            downsample_cap: voltgrid_core::chart::DOWNSAMPLE_CAP,
            grid_columns: 12,
            grid_rows: 8,
        }
    }
}

impl RuntimeSettings {
    pub fn live_poll_interval(&self) -> Duration {
        Duration::from_secs(self.live_poll_interval_secs.max(1))
    }

    pub fn chart_refresh_interval(&self) -> Duration {
        Duration::from_secs(self.chart_refresh_secs.max(1))
    }

    pub fn alarm_refresh_interval(&self) -> Duration {
        Duration::from_secs(self.alarm_refresh_secs.max(1))
    }

    /// Load from `voltgrid.toml` in the working directory plus env.
    pub fn load() -> Result<Self, LiveError> {
        Self::load_from("voltgrid.toml")
    }

    /// Load from an explicit TOML path plus env. A missing file is not
    /// an error; defaults apply.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, LiveError> {
        let settings = Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed("VOLTGRID_"))
            .extract()?;
        Ok(settings)
    }
}
