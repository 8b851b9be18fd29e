//! Data types produced by one sampling cycle.
//! Keep this module minimal and stable: presenters and the JSON output depend on it.

use chrono::{DateTime, Local};
use serde::Serialize;
use std::time::Instant;

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct ProcessInfo {
    pub pid: u32,
    pub name: String,
    pub cpu_percent: f32,
    pub mem_percent: f32,
}

/// Cumulative network byte counters at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetCounterSnapshot {
    pub bytes_sent: u64,
    pub bytes_recv: u64,
    pub at: Instant,
}

impl NetCounterSnapshot {
    pub fn new(bytes_sent: u64, bytes_recv: u64, at: Instant) -> Self {
        Self {
            bytes_sent,
            bytes_recv,
            at,
        }
    }
}

/// Bytes per second in each direction.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Default)]
pub struct NetRate {
    pub sent: f64,
    pub recv: f64,
}

#[derive(Debug, Serialize, Clone)]
pub struct Sample {
    pub cpu_percent: f32,
    pub ram_percent: f32,
    pub disk_percent: f32,
    pub net_sent_rate: f64,
    pub net_recv_rate: f64,
    // ranked, at most `top_n` entries
    pub processes: Vec<ProcessInfo>,
    pub timestamp: DateTime<Local>,
}
