//! Canvas runtime: owns the poll tasks and vends reactive snapshots.
//!
//! One live-data poll feeds every widget through a `watch` channel of
//! `Arc<LiveData>`; chart and alarm widgets get their own slower
//! refresh tasks. All tasks honor the shared visibility state and the
//! runtime's cancellation token; per-widget tasks additionally die with
//! their [`WidgetTask`] handle, so unmounting a widget clears its
//! timers and abandons any in-flight fetch.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::{Mutex, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use voltgrid_core::chart::{ChartPoint, ChartRequest, build_points, downsample};
use voltgrid_core::model::widget::Widget;
use voltgrid_core::model::{Alarm, AlarmQuery, LiveData};
use voltgrid_core::resolve::{ResolveContext, ResolvedWidget, resolve};

use crate::scheduler::{PollScheduler, Visibility};
use crate::settings::RuntimeSettings;
use crate::sources::{AlarmStore, HistoryParameter, HistoryProvider, HistoryQuery, LiveDataSource};

/// Inline message for a widget whose fetch failed.
pub const FETCH_ERROR_MESSAGE: &str = "No data available";

/// External collaborators the runtime polls.
#[derive(Clone)]
pub struct CanvasSources {
    pub live: Arc<dyn LiveDataSource>,
    pub history: Arc<dyn HistoryProvider>,
    pub alarms: Arc<dyn AlarmStore>,
}

/// Lifecycle of one widget's fetched data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchState<T> {
    Loading,
    Ready(T),
    /// Contained to this widget; siblings keep rendering.
    Error(String),
}

/// Handle to a per-widget refresh task. Dropping it cancels the task
/// and abandons any in-flight fetch.
pub struct WidgetTask<T> {
    rx: watch::Receiver<FetchState<T>>,
    cancel: CancellationToken,
}

impl<T: Clone> WidgetTask<T> {
    pub fn state(&self) -> FetchState<T> {
        self.rx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<FetchState<T>> {
        self.rx.clone()
    }
}

impl<T> Drop for WidgetTask<T> {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// The hosting canvas's runtime for one site.
pub struct CanvasRuntime {
    site_id: String,
    settings: RuntimeSettings,
    sources: CanvasSources,
    visibility: watch::Sender<Visibility>,
    live_tx: watch::Sender<Arc<LiveData>>,
    cancel: CancellationToken,
    tasks: Mutex<Vec<JoinHandle<()>>>,
}

impl CanvasRuntime {
    /// Build a runtime. Does not poll until [`start()`](Self::start).
    pub fn new(
        site_id: impl Into<String>,
        settings: RuntimeSettings,
        sources: CanvasSources,
    ) -> Self {
        let (visibility, _) = watch::channel(Visibility::Visible);
        let (live_tx, _) = watch::channel(Arc::new(LiveData::empty(Utc::now())));
        Self {
            site_id: site_id.into(),
            settings,
            sources,
            visibility,
            live_tx,
            cancel: CancellationToken::new(),
            tasks: Mutex::new(Vec::new()),
        }
    }

    pub fn site_id(&self) -> &str {
        &self.site_id
    }

    pub fn settings(&self) -> &RuntimeSettings {
        &self.settings
    }

    /// Spawn the shared live-data poll task.
    pub async fn start(&self) {
        let scheduler = PollScheduler::new(
            self.settings.live_poll_interval(),
            self.visibility.subscribe(),
            self.cancel.child_token(),
        );
        let source = Arc::clone(&self.sources.live);
        let site_id = self.site_id.clone();
        let live_tx = self.live_tx.clone();

        let handle = tokio::spawn(scheduler.run(move || {
            let source = Arc::clone(&source);
            let site_id = site_id.clone();
            let live_tx = live_tx.clone();
            async move {
                match source.fetch(&site_id).await {
                    Ok(snapshot) => {
                        live_tx.send_replace(Arc::new(snapshot));
                    }
                    Err(e) => {
                        // Keep the previous snapshot; widgets degrade to
                        // stale data rather than blanking out.
                        warn!(error = %e, "live poll failed, keeping last snapshot");
                    }
                }
            }
        }));
        self.tasks.lock().await.push(handle);
        debug!(site = %self.site_id, "live poll started");
    }

    /// Current snapshot receiver. Widgets resolve against whatever
    /// `Arc<LiveData>` this holds; they never mutate it.
    pub fn subscribe_live(&self) -> watch::Receiver<Arc<LiveData>> {
        self.live_tx.subscribe()
    }

    /// Report host page visibility; pauses or resumes every poll task.
    pub fn set_visibility(&self, visibility: Visibility) {
        // `send_replace` stores the value even with no subscribers yet,
        // so visibility reported before `start()` still takes effect.
        self.visibility.send_replace(visibility);
    }

    /// Spawn the refresh task for one chart widget.
    pub async fn spawn_chart(&self, request: ChartRequest) -> WidgetTask<Arc<Vec<ChartPoint>>> {
        let cancel = self.cancel.child_token();
        let scheduler = PollScheduler::new(
            self.settings.chart_refresh_interval(),
            self.visibility.subscribe(),
            cancel.clone(),
        );
        let (tx, rx) = watch::channel(FetchState::Loading);
        let history = Arc::clone(&self.sources.history);
        let site_id = self.site_id.clone();
        let cap = self.settings.downsample_cap;

        let handle = tokio::spawn(scheduler.run(move || {
            let history = Arc::clone(&history);
            let site_id = site_id.clone();
            let request = request.clone();
            let tx = tx.clone();
            async move {
                let end = Utc::now();
                let query = HistoryQuery {
                    site_id,
                    parameters: request
                        .parameters
                        .iter()
                        .map(|p| HistoryParameter {
                            device_id: p.device_id.clone(),
                            register_name: p.register_name.clone(),
                        })
                        .collect(),
                    start: end - request.range.duration(),
                    end,
                    aggregation: request.aggregation,
                };
                match history.query(&query).await {
                    Ok(series) => {
                        let points = downsample(build_points(&series, request.range), cap);
                        tx.send_replace(FetchState::Ready(Arc::new(points)));
                    }
                    Err(e) => {
                        warn!(error = %e, "chart refresh failed");
                        tx.send_replace(FetchState::Error(FETCH_ERROR_MESSAGE.to_owned()));
                    }
                }
            }
        }));
        self.tasks.lock().await.push(handle);

        WidgetTask { rx, cancel }
    }

    /// Spawn the refresh task for one alarm-list widget.
    pub async fn spawn_alarms(&self, query: AlarmQuery) -> WidgetTask<Arc<Vec<Alarm>>> {
        let cancel = self.cancel.child_token();
        let scheduler = PollScheduler::new(
            self.settings.alarm_refresh_interval(),
            self.visibility.subscribe(),
            cancel.clone(),
        );
        let (tx, rx) = watch::channel(FetchState::Loading);
        let store = Arc::clone(&self.sources.alarms);

        let handle = tokio::spawn(scheduler.run(move || {
            let store = Arc::clone(&store);
            let query = query.clone();
            let tx = tx.clone();
            async move {
                match store.query(&query).await {
                    Ok(mut alarms) => {
                        // Contract is newest-first and capped; enforce it
                        // even for sloppy store implementations.
                        alarms.sort_by(|a, b| b.raised_at.cmp(&a.raised_at));
                        alarms.truncate(query.max_items);
                        tx.send_replace(FetchState::Ready(Arc::new(alarms)));
                    }
                    Err(e) => {
                        warn!(error = %e, "alarm refresh failed");
                        tx.send_replace(FetchState::Error(FETCH_ERROR_MESSAGE.to_owned()));
                    }
                }
            }
        }));
        self.tasks.lock().await.push(handle);

        WidgetTask { rx, cancel }
    }

    /// Cancel every task and wait for them to wind down.
    pub async fn shutdown(&self) {
        self.cancel.cancel();
        let mut tasks = self.tasks.lock().await;
        for task in tasks.drain(..) {
            let _ = task.await;
        }
        debug!(site = %self.site_id, "runtime shut down");
    }
}

/// Per-widget memoization of the resolve step.
///
/// Re-resolving is skipped when both the snapshot (by identity) and the
/// widget config are unchanged. Relative times derive from the snapshot
/// timestamp, so a cache hit is exact, not approximate.
#[derive(Default)]
pub struct ResolveCache {
    last: Option<(Arc<LiveData>, Widget, ResolvedWidget)>,
}

impl ResolveCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resolve(
        &mut self,
        widget: &Widget,
        live: &Arc<LiveData>,
        site_id: &str,
    ) -> ResolvedWidget {
        if let Some((cached_live, cached_widget, cached)) = &self.last {
            if Arc::ptr_eq(cached_live, live) && cached_widget == widget {
                return cached.clone();
            }
        }
        let resolved = resolve(
            widget,
            live,
            &ResolveContext {
                site_id,
                now: live.timestamp,
            },
        );
        self.last = Some((Arc::clone(live), widget.clone(), resolved.clone()));
        resolved
    }
}
