//! Boundary traits for the external collaborators the engine consumes.
//!
//! Transport is owned by the host: implementations wrap whatever REST
//! endpoint or backend serves the data. The engine only depends on
//! these shapes. All traits are object-safe so hosts can hand the
//! runtime `Arc<dyn ...>` values.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use voltgrid_core::chart::{Aggregation, SeriesSample};
use voltgrid_core::model::{Alarm, AlarmQuery, LiveData};

use crate::error::LiveError;

/// Periodic live-telemetry delivery for one site.
#[async_trait]
pub trait LiveDataSource: Send + Sync {
    async fn fetch(&self, site_id: &str) -> Result<LiveData, LiveError>;
}

/// One requested parameter of a historical query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryParameter {
    pub device_id: String,
    pub register_name: String,
}

/// Historical-data query: site, parameter set, window, aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryQuery {
    pub site_id: String,
    pub parameters: Vec<HistoryParameter>,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub aggregation: Aggregation,
}

/// Historical aggregate store.
///
/// Returns one sample list per requested parameter, index-aligned with
/// `query.parameters` -- not a pre-joined table. Joining is the
/// engine's job.
#[async_trait]
pub trait HistoryProvider: Send + Sync {
    async fn query(&self, query: &HistoryQuery) -> Result<Vec<Vec<SeriesSample>>, LiveError>;
}

/// Alarm store queried by alarm-list widgets. Results are expected
/// newest-first and capped at `query.max_items`.
#[async_trait]
pub trait AlarmStore: Send + Sync {
    async fn query(&self, query: &AlarmQuery) -> Result<Vec<Alarm>, LiveError>;
}

/// How a register may be accessed.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RegisterAccess {
    Read,
    Write,
    ReadWrite,
}

impl RegisterAccess {
    /// Whether the register can feed a widget.
    pub fn is_readable(self) -> bool {
        matches!(self, Self::Read | Self::ReadWrite)
    }
}

/// A register advertised by the device catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterDescriptor {
    pub name: String,
    pub unit: Option<String>,
    pub access: RegisterAccess,
}

/// A device row from the catalog, used to populate config pickers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogDevice {
    pub id: String,
    pub name: String,
    pub device_type: String,
    pub registers: Vec<RegisterDescriptor>,
}

impl CatalogDevice {
    /// Registers a widget may bind to (`read` or `readwrite`).
    pub fn readable_registers(&self) -> impl Iterator<Item = &RegisterDescriptor> {
        self.registers.iter().filter(|r| r.access.is_readable())
    }
}

/// Device/template catalog for the config dialog.
#[async_trait]
pub trait DeviceCatalog: Send + Sync {
    async fn list_devices(&self, site_id: &str) -> Result<Vec<CatalogDevice>, LiveError>;
}

/// A preset image offered by the library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresetImage {
    pub name: String,
    pub url: String,
}

/// Image asset provider for icon widgets. Upload returns the hosted
/// URL; storage itself is opaque to the engine.
#[async_trait]
pub trait ImageLibrary: Send + Sync {
    async fn presets(&self) -> Result<Vec<PresetImage>, LiveError>;
    async fn upload(&self, filename: &str, bytes: Vec<u8>) -> Result<String, LiveError>;
}
