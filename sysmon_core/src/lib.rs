//! sysmon_core: host sampling, derived rates, process ranking and threshold alerts.

pub mod alerts;
pub mod config;
pub mod error;
pub mod metrics;
pub mod notify;
pub mod ranker;
pub mod rate;
pub mod render;
pub mod sampler;
pub mod state;
pub mod types;

pub use alerts::{evaluate, Alert, AlertKind, AlertThresholds};
pub use config::Config;
pub use error::{ConfigError, SampleError, SinkClosed};
pub use metrics::{MetricSampler, SysinfoSampler};
pub use notify::{AlertEvent, AlertLog, ChannelNotifier, Notice, Notifier, Notifiers};
pub use ranker::{rank, TOP_PROCESSES};
pub use rate::{compute_rate, RateTracker};
pub use sampler::{spawn_poller, Poller, RefreshHandle, RenderSink};
pub use state::{CycleReport, Monitor};
pub use types::{NetCounterSnapshot, NetRate, ProcessInfo, Sample};
