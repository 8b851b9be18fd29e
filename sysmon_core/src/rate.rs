//! Network throughput from two cumulative counter snapshots.

use crate::types::{NetCounterSnapshot, NetRate};

/// Bytes/sec between `prev` and `curr`. Zero when no time has elapsed (or the
/// clock went backwards). A counter that went down yields a negative rate.
pub fn compute_rate(prev: &NetCounterSnapshot, curr: &NetCounterSnapshot) -> NetRate {
    let elapsed = match curr.at.checked_duration_since(prev.at) {
        Some(d) if !d.is_zero() => d.as_secs_f64(),
        _ => return NetRate::default(),
    };
    NetRate {
        sent: (curr.bytes_sent as f64 - prev.bytes_sent as f64) / elapsed,
        recv: (curr.bytes_recv as f64 - prev.bytes_recv as f64) / elapsed,
    }
}

/// Owns the single "previous" snapshot carried between cycles.
#[derive(Debug, Clone)]
pub struct RateTracker {
    prev: NetCounterSnapshot,
    clamp_reset: bool,
}

impl RateTracker {
    pub fn new(initial: NetCounterSnapshot) -> Self {
        Self {
            prev: initial,
            clamp_reset: false,
        }
    }

    /// Floor negative rates (counter reset/wrap) at zero instead of reporting them.
    pub fn with_clamp_on_reset(mut self, clamp: bool) -> Self {
        self.clamp_reset = clamp;
        self
    }

    pub fn previous(&self) -> &NetCounterSnapshot {
        &self.prev
    }

    /// Rate since the previous snapshot; `curr` becomes the new previous.
    pub fn advance(&mut self, curr: NetCounterSnapshot) -> NetRate {
        let mut rate = compute_rate(&self.prev, &curr);
        if self.clamp_reset {
            rate.sent = rate.sent.max(0.0);
            rate.recv = rate.recv.max(0.0);
        }
        self.prev = curr;
        rate
    }
}
