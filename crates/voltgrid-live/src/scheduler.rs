//! Visibility-aware polling scheduler.
//!
//! An explicit two-state machine (`Active` / `Paused`) driven by a
//! visibility watch channel. While hidden no timer runs at all;
//! resuming always performs one immediate fetch before re-arming the
//! interval, so a tab that was hidden for an hour doesn't show
//! hour-old data for another poll period.

use std::future::Future;
use std::time::Duration;

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Host page visibility, as reported by the embedding canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Visible,
    Hidden,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Active,
    Paused,
}

/// Drives a fetch callback on a fixed interval while visible.
pub struct PollScheduler {
    interval: Duration,
    visibility: watch::Receiver<Visibility>,
    cancel: CancellationToken,
}

impl PollScheduler {
    pub fn new(
        interval: Duration,
        visibility: watch::Receiver<Visibility>,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            interval,
            visibility,
            cancel,
        }
    }

    /// Run until cancelled. Fires `tick` once immediately when starting
    /// visible, then on every interval while visible, and once on every
    /// hidden-to-visible transition.
    pub async fn run<F, Fut>(mut self, mut tick: F)
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = ()>,
    {
        let mut state = match *self.visibility.borrow_and_update() {
            Visibility::Visible => State::Active,
            Visibility::Hidden => State::Paused,
        };
        if state == State::Active {
            tick().await;
        }

        loop {
            match state {
                State::Active => {
                    tokio::select! {
                        biased;
                        () = self.cancel.cancelled() => break,
                        changed = self.visibility.changed() => {
                            let Ok(()) = changed else { break };
                            if *self.visibility.borrow_and_update() == Visibility::Hidden {
                                debug!("polling paused (page hidden)");
                                state = State::Paused;
                            }
                        }
                        () = tokio::time::sleep(self.interval) => tick().await,
                    }
                }
                State::Paused => {
                    // No timer while hidden -- only cancellation or a
                    // visibility change can wake the task.
                    tokio::select! {
                        biased;
                        () = self.cancel.cancelled() => break,
                        changed = self.visibility.changed() => {
                            let Ok(()) = changed else { break };
                            if *self.visibility.borrow_and_update() == Visibility::Visible {
                                debug!("polling resumed, refetching immediately");
                                state = State::Active;
                                tick().await;
                            }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counter_tick(
        count: &Arc<AtomicUsize>,
    ) -> impl FnMut() -> std::future::Ready<()> + use<> {
        let count = Arc::clone(count);
        move || {
            count.fetch_add(1, Ordering::SeqCst);
            std::future::ready(())
        }
    }

    /// Let the spawned scheduler task catch up with channel sends.
    async fn drain() {
        for _ in 0..16 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn ticks_immediately_then_on_interval_while_visible() {
        let (_vis_tx, vis_rx) = watch::channel(Visibility::Visible);
        let count = Arc::new(AtomicUsize::new(0));
        let cancel = CancellationToken::new();
        let scheduler = PollScheduler::new(Duration::from_secs(5), vis_rx, cancel.clone());
        let task = tokio::spawn(scheduler.run(counter_tick(&count)));

        drain().await;
        assert_eq!(count.load(Ordering::SeqCst), 1);

        tokio::time::advance(Duration::from_secs(5)).await;
        drain().await;
        assert_eq!(count.load(Ordering::SeqCst), 2);

        cancel.cancel();
        drain().await;
        assert!(task.is_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn no_tick_fires_while_hidden() {
        let (vis_tx, vis_rx) = watch::channel(Visibility::Hidden);
        let count = Arc::new(AtomicUsize::new(0));
        let cancel = CancellationToken::new();
        let scheduler = PollScheduler::new(Duration::from_secs(5), vis_rx, cancel.clone());
        let _task = tokio::spawn(scheduler.run(counter_tick(&count)));

        drain().await;
        tokio::time::advance(Duration::from_secs(300)).await;
        drain().await;
        assert_eq!(count.load(Ordering::SeqCst), 0);

        // Resuming fetches immediately, before the timer re-arms.
        vis_tx.send(Visibility::Visible).unwrap();
        drain().await;
        assert_eq!(count.load(Ordering::SeqCst), 1);

        tokio::time::advance(Duration::from_secs(5)).await;
        drain().await;
        assert_eq!(count.load(Ordering::SeqCst), 2);

        cancel.cancel();
    }

    #[tokio::test(start_paused = true)]
    async fn hiding_stops_the_interval_mid_flight() {
        let (vis_tx, vis_rx) = watch::channel(Visibility::Visible);
        let count = Arc::new(AtomicUsize::new(0));
        let cancel = CancellationToken::new();
        let scheduler = PollScheduler::new(Duration::from_secs(5), vis_rx, cancel.clone());
        let _task = tokio::spawn(scheduler.run(counter_tick(&count)));

        drain().await;
        assert_eq!(count.load(Ordering::SeqCst), 1);

        vis_tx.send(Visibility::Hidden).unwrap();
        drain().await;
        tokio::time::advance(Duration::from_secs(600)).await;
        drain().await;
        assert_eq!(count.load(Ordering::SeqCst), 1);

        cancel.cancel();
    }

    #[tokio::test(start_paused = true)]
    async fn cancellation_ends_the_loop_while_paused() {
        let (_vis_tx, vis_rx) = watch::channel(Visibility::Hidden);
        let count = Arc::new(AtomicUsize::new(0));
        let cancel = CancellationToken::new();
        let scheduler = PollScheduler::new(Duration::from_secs(5), vis_rx, cancel.clone());
        let task = tokio::spawn(scheduler.run(counter_tick(&count)));

        drain().await;
        cancel.cancel();
        drain().await;
        assert!(task.is_finished());
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }
}
