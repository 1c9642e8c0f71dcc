//! Async runtime for the voltgrid widget engine.
//!
//! Sits between the pure core and the hosting canvas:
//!
//! - **[`sources`]** — object-safe boundary traits for the external
//!   collaborators (live feed, historical store, alarm store, device
//!   catalog, image library). Transport belongs to the host; the
//!   engine depends only on these shapes.
//! - **[`scheduler`]** — the visibility-aware poll scheduler: an
//!   explicit `Active`/`Paused` machine that runs no timer while the
//!   page is hidden and refetches immediately on resume.
//! - **[`runtime`]** — [`CanvasRuntime`] owns the shared live-data
//!   poll and per-widget chart/alarm refresh tasks, vending snapshots
//!   through `watch` channels. [`WidgetTask`] ties a refresh task to a
//!   widget's lifetime; dropping it cancels timers and in-flight
//!   fetches. [`ResolveCache`] memoizes the resolve step per widget.
//! - **[`settings`]** — poll cadences and grid geometry via figment
//!   (defaults, TOML file, `VOLTGRID_` env).

pub mod error;
pub mod runtime;
pub mod scheduler;
pub mod settings;
pub mod sources;

pub use error::LiveError;
pub use runtime::{
    CanvasRuntime, CanvasSources, FETCH_ERROR_MESSAGE, FetchState, ResolveCache, WidgetTask,
};
pub use scheduler::{PollScheduler, Visibility};
pub use settings::RuntimeSettings;
pub use sources::{
    AlarmStore, CatalogDevice, DeviceCatalog, HistoryParameter, HistoryProvider, HistoryQuery,
    ImageLibrary, LiveDataSource, PresetImage, RegisterAccess, RegisterDescriptor,
};
