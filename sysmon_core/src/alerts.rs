//! Threshold alerts for CPU, RAM and disk usage.
//!
//! Evaluation is stateless: every call re-derives the fired set from the
//! current values, so a condition that persists fires on every cycle.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum AlertKind {
    CpuHigh,
    RamHigh,
    DiskHigh,
}

impl AlertKind {
    pub fn label(self) -> &'static str {
        match self {
            AlertKind::CpuHigh => "CPU",
            AlertKind::RamHigh => "RAM",
            AlertKind::DiskHigh => "Disk",
        }
    }
}

impl fmt::Display for AlertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Percentages above which a metric alerts. Fixed once the monitor starts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertThresholds {
    pub cpu: f32,
    pub ram: f32,
    pub disk: f32,
}

impl Default for AlertThresholds {
    fn default() -> Self {
        Self {
            cpu: 80.0,
            ram: 80.0,
            disk: 90.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Alert {
    pub kind: AlertKind,
    pub value: f32,
}

impl Alert {
    /// Text shown to the user.
    pub fn message(&self) -> String {
        format!("{} usage high: {:.1}%", self.kind.label(), self.value)
    }

    /// Text written to the alert log.
    pub fn log_line(&self) -> String {
        format!("{} usage alert: {:.1}%", self.kind.label(), self.value)
    }
}

/// Alerts whose value is strictly above its threshold, in CPU, RAM, Disk order.
pub fn evaluate(cpu: f32, ram: f32, disk: f32, thresholds: &AlertThresholds) -> Vec<Alert> {
    [
        (AlertKind::CpuHigh, cpu, thresholds.cpu),
        (AlertKind::RamHigh, ram, thresholds.ram),
        (AlertKind::DiskHigh, disk, thresholds.disk),
    ]
    .into_iter()
    .filter(|&(_, value, threshold)| value > threshold)
    .map(|(kind, value, _)| Alert { kind, value })
    .collect()
}
