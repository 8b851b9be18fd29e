//! Cycle state: the sampler and the previous network snapshot behind one lock.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::Local;
use tokio::sync::Mutex;
use tracing::debug;

use crate::alerts::{evaluate, Alert, AlertThresholds};
use crate::config::Config;
use crate::error::SampleError;
use crate::metrics::MetricSampler;
use crate::rate::RateTracker;
use crate::ranker::rank;
use crate::types::Sample;

/// Result of one cycle: the sample to render and the alerts it fired.
#[derive(Debug, Clone)]
pub struct CycleReport {
    pub sample: Arc<Sample>,
    pub alerts: Vec<Alert>,
}

struct Collector<S> {
    sampler: S,
    rates: RateTracker,
    disk_path: PathBuf,
    top_n: usize,
}

impl<S: MetricSampler> Collector<S> {
    // Blocking: runs on a spawn_blocking worker.
    fn collect(&mut self) -> Result<Sample, SampleError> {
        let cpu_percent = self.sampler.sample_cpu()?;
        let ram_percent = self.sampler.sample_ram()?;
        let disk_percent = self.sampler.sample_disk(&self.disk_path)?;
        let net = self.sampler.sample_network()?;
        let rate = self.rates.advance(net);
        let processes = rank(self.sampler.enumerate_processes()?, self.top_n);
        Ok(Sample {
            cpu_percent,
            ram_percent,
            disk_percent,
            net_sent_rate: rate.sent,
            net_recv_rate: rate.recv,
            processes,
            timestamp: Local::now(),
        })
    }
}

/// Cheap to clone; clones share the same sampler and snapshot.
pub struct Monitor<S> {
    inner: Arc<Mutex<Collector<S>>>,
    thresholds: AlertThresholds,
}

impl<S> Clone for Monitor<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            thresholds: self.thresholds,
        }
    }
}

impl<S: MetricSampler> Monitor<S> {
    /// Takes the initial network snapshot so the first cycle already has a baseline.
    pub fn new(mut sampler: S, cfg: &Config) -> Result<Self, SampleError> {
        let initial = sampler.sample_network()?;
        let rates = RateTracker::new(initial).with_clamp_on_reset(cfg.clamp_counter_reset);
        Ok(Self {
            inner: Arc::new(Mutex::new(Collector {
                sampler,
                rates,
                disk_path: cfg.disk_path.clone(),
                top_n: cfg.top_n,
            })),
            thresholds: cfg.thresholds,
        })
    }

    pub fn thresholds(&self) -> &AlertThresholds {
        &self.thresholds
    }

    /// Sample, derive rates, rank and evaluate. Concurrent callers are serialized.
    pub async fn run_cycle(&self) -> Result<CycleReport, SampleError> {
        let mut guard = Arc::clone(&self.inner).lock_owned().await;
        let sample = tokio::task::spawn_blocking(move || guard.collect()).await??;
        let alerts = evaluate(
            sample.cpu_percent,
            sample.ram_percent,
            sample.disk_percent,
            &self.thresholds,
        );
        debug!(
            cpu = sample.cpu_percent,
            ram = sample.ram_percent,
            disk = sample.disk_percent,
            sent = sample.net_sent_rate,
            recv = sample.net_recv_rate,
            alerts = alerts.len(),
            "cycle complete"
        );
        Ok(CycleReport {
            sample: Arc::new(sample),
            alerts,
        })
    }
}
