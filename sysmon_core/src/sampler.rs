//! Background poller: runs a cycle every period or on manual refresh, hands the
//! sample to a render sink and alerts/failures to a notifier.

use std::sync::Arc;
use std::time::Duration;

use chrono::Local;
use tokio::sync::{mpsc, watch, Notify};
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::error::SinkClosed;
use crate::metrics::MetricSampler;
use crate::notify::{AlertEvent, Notice, Notifier};
use crate::state::Monitor;
use crate::types::Sample;

/// Where finished samples go for display.
pub trait RenderSink: Send + Sync {
    fn render(&self, sample: Arc<Sample>) -> Result<(), SinkClosed>;

    /// The consumer is gone; further cycles would be wasted.
    fn is_closed(&self) -> bool;
}

// Latest-value handoff: presenters only ever need the newest sample.
impl RenderSink for watch::Sender<Option<Arc<Sample>>> {
    fn render(&self, sample: Arc<Sample>) -> Result<(), SinkClosed> {
        self.send(Some(sample)).map_err(|_| SinkClosed)
    }

    fn is_closed(&self) -> bool {
        watch::Sender::is_closed(self)
    }
}

impl RenderSink for mpsc::UnboundedSender<Arc<Sample>> {
    fn render(&self, sample: Arc<Sample>) -> Result<(), SinkClosed> {
        self.send(sample).map_err(|_| SinkClosed)
    }

    fn is_closed(&self) -> bool {
        mpsc::UnboundedSender::is_closed(self)
    }
}

/// Handle to a running poll loop.
pub struct Poller {
    refresh: Arc<Notify>,
    task: JoinHandle<()>,
}

impl Poller {
    /// Request a cycle now. Requests made while a cycle runs collapse into one.
    pub fn refresh(&self) {
        self.refresh.notify_one();
    }

    pub fn refresh_handle(&self) -> RefreshHandle {
        RefreshHandle(Arc::clone(&self.refresh))
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    pub fn shutdown(self) {
        self.task.abort();
    }

    /// Wait for the loop to end on its own (render sink closed).
    pub async fn join(self) {
        let _ = self.task.await;
    }
}

/// Cloneable trigger for manual refreshes (e.g. a key binding).
#[derive(Clone)]
pub struct RefreshHandle(Arc<Notify>);

impl RefreshHandle {
    pub fn refresh(&self) {
        self.0.notify_one();
    }
}

pub fn spawn_poller<S, R, N>(monitor: Monitor<S>, period: Duration, sink: R, notifier: N) -> Poller
where
    S: MetricSampler,
    R: RenderSink + 'static,
    N: Notifier + 'static,
{
    let refresh = Arc::new(Notify::new());
    let trigger = Arc::clone(&refresh);
    let task = tokio::spawn(async move {
        let mut ticker = interval(period.max(Duration::from_millis(1)));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut failing = false;
        info!(period_ms = period.as_millis() as u64, "poller started");
        loop {
            tokio::select! {
                _ = ticker.tick() => {}
                _ = trigger.notified() => {
                    debug!("manual refresh");
                    ticker.reset();
                }
            }

            // Failed cycles never reach `render`, so check here as well.
            if sink.is_closed() {
                info!("render sink closed; poller stopping");
                break;
            }

            match monitor.run_cycle().await {
                Ok(report) => {
                    failing = false;
                    let at = report.sample.timestamp;
                    if sink.render(report.sample).is_err() {
                        info!("render sink closed; poller stopping");
                        break;
                    }
                    for alert in report.alerts {
                        info!(kind = %alert.kind, value = alert.value, "{}", alert.message());
                        notifier.notify(&Notice::Alert(AlertEvent { alert, at }));
                    }
                }
                Err(e) => {
                    warn!("sampling cycle failed: {e}");
                    // One notice per failure streak; the loop keeps ticking.
                    if !failing {
                        failing = true;
                        notifier.notify(&Notice::SamplingFailed {
                            message: e.to_string(),
                            at: Local::now(),
                        });
                    }
                }
            }
        }
    });
    Poller { refresh, task }
}
