//! Top-N process selection by CPU usage.

use crate::types::ProcessInfo;

pub const TOP_PROCESSES: usize = 20;

/// Highest CPU first, truncated to `limit`. The sort is stable, so processes
/// with equal CPU keep the order they were enumerated in.
pub fn rank(mut processes: Vec<ProcessInfo>, limit: usize) -> Vec<ProcessInfo> {
    processes.sort_by(|a, b| sort_key(b).total_cmp(&sort_key(a)));
    processes.truncate(limit);
    processes
}

// NaN sinks to the bottom; -0.0 and 0.0 compare equal.
fn sort_key(p: &ProcessInfo) -> f32 {
    if p.cpu_percent.is_nan() {
        f32::NEG_INFINITY
    } else {
        p.cpu_percent + 0.0
    }
}
