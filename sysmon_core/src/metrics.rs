//! Metrics collection using sysinfo.

use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant};

use sysinfo::{
    CpuRefreshKind, Disks, MemoryRefreshKind, Networks, ProcessRefreshKind, ProcessesToUpdate,
    RefreshKind, System,
};
use tracing::trace;

use crate::error::SampleError;
use crate::types::{NetCounterSnapshot, ProcessInfo};

pub const UNKNOWN_PROCESS: &str = "Unknown";

/// Instantaneous OS readings. Implementations may block (CPU sampling does),
/// so callers run them on a blocking worker.
pub trait MetricSampler: Send + 'static {
    fn sample_cpu(&mut self) -> Result<f32, SampleError>;
    fn sample_ram(&mut self) -> Result<f32, SampleError>;
    fn sample_disk(&mut self, path: &Path) -> Result<f32, SampleError>;
    fn sample_network(&mut self) -> Result<NetCounterSnapshot, SampleError>;
    fn enumerate_processes(&mut self) -> Result<Vec<ProcessInfo>, SampleError>;
}

/// One row of the OS process table before defaults are applied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcessEntry {
    pub pid: u32,
    pub name: Option<String>,
    pub cpu_percent: Option<f32>,
    pub mem_percent: Option<f32>,
}

/// Reading a listed process failed. Both cases are expected churn, not errors.
///
/// `SysinfoSampler` only ever reports `Vanished`: sysinfo leaves attributes it
/// cannot read empty instead of failing, and those become defaults below.
/// `AccessDenied` is for samplers whose backend surfaces permission errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessReadError {
    Vanished(u32),
    AccessDenied(u32),
}

/// Drop unreadable entries, fill in defaults for missing fields and return
/// the rest in pid order, so equal-CPU ties rank the same way every cycle.
pub fn collect_processes<I>(entries: I) -> Vec<ProcessInfo>
where
    I: IntoIterator<Item = Result<ProcessEntry, ProcessReadError>>,
{
    let mut procs: Vec<ProcessInfo> = entries
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(e) => Some(ProcessInfo {
                pid: e.pid,
                name: e
                    .name
                    .filter(|n| !n.is_empty())
                    .unwrap_or_else(|| UNKNOWN_PROCESS.to_string()),
                cpu_percent: e.cpu_percent.unwrap_or(0.0),
                mem_percent: e.mem_percent.unwrap_or(0.0),
            }),
            Err(ProcessReadError::Vanished(pid)) => {
                trace!(pid, "process exited during enumeration");
                None
            }
            Err(ProcessReadError::AccessDenied(pid)) => {
                trace!(pid, "process attributes not readable");
                None
            }
        })
        .collect();
    // The OS table is a hash map; its iteration order changes between refreshes.
    procs.sort_unstable_by_key(|p| p.pid);
    procs
}

/// Percentage of `total` that is not `available`; `None` when `total` is 0.
pub(crate) fn used_percent(total: u64, available: u64) -> Option<f32> {
    if total == 0 {
        return None;
    }
    let used = total.saturating_sub(available);
    Some((used as f64 / total as f64 * 100.0) as f32)
}

pub struct SysinfoSampler {
    sys: System,
    disks: Disks,
    networks: Networks,
    cpu_window: Duration,
    normalize_cpu: bool,
}

impl SysinfoSampler {
    pub fn new(cpu_window: Duration) -> Self {
        let refresh_kind = RefreshKind::nothing()
            .with_cpu(CpuRefreshKind::everything())
            .with_memory(MemoryRefreshKind::everything());
        Self {
            sys: System::new_with_specifics(refresh_kind),
            disks: Disks::new_with_refreshed_list(),
            // Keep Networks alive across cycles so totals stay monotonic per interface
            networks: Networks::new_with_refreshed_list(),
            cpu_window,
            normalize_cpu: true,
        }
    }

    /// Divide per-process CPU by the logical core count so a saturated
    /// multi-core process reads 100% rather than N*100%.
    pub fn with_normalized_cpu(mut self, on: bool) -> Self {
        self.normalize_cpu = on;
        self
    }
}

impl MetricSampler for SysinfoSampler {
    fn sample_cpu(&mut self) -> Result<f32, SampleError> {
        // Two refreshes across the window give an interval average instead of a spike.
        self.sys.refresh_cpu_usage();
        thread::sleep(self.cpu_window);
        self.sys.refresh_cpu_usage();
        if self.sys.cpus().is_empty() {
            return Err(SampleError::Unavailable { metric: "cpu" });
        }
        Ok(self.sys.global_cpu_usage().clamp(0.0, 100.0))
    }

    fn sample_ram(&mut self) -> Result<f32, SampleError> {
        self.sys.refresh_memory();
        used_percent(self.sys.total_memory(), self.sys.available_memory())
            .ok_or(SampleError::Unavailable { metric: "memory" })
    }

    fn sample_disk(&mut self, path: &Path) -> Result<f32, SampleError> {
        self.disks.refresh(true);
        // The mount point with the longest matching prefix owns the path.
        let disk = self
            .disks
            .list()
            .iter()
            .filter(|d| path.starts_with(d.mount_point()))
            .max_by_key(|d| d.mount_point().as_os_str().len())
            .ok_or_else(|| SampleError::DiskNotFound {
                path: PathBuf::from(path),
            })?;
        used_percent(disk.total_space(), disk.available_space())
            .ok_or(SampleError::Unavailable { metric: "disk" })
    }

    fn sample_network(&mut self) -> Result<NetCounterSnapshot, SampleError> {
        self.networks.refresh(true);
        let (sent, recv) = self
            .networks
            .iter()
            .fold((0u64, 0u64), |(tx, rx), (_, data)| {
                (
                    tx.saturating_add(data.total_transmitted()),
                    rx.saturating_add(data.total_received()),
                )
            });
        Ok(NetCounterSnapshot::new(sent, recv, Instant::now()))
    }

    fn enumerate_processes(&mut self) -> Result<Vec<ProcessInfo>, SampleError> {
        self.sys.refresh_processes_specifics(
            ProcessesToUpdate::All,
            true,
            ProcessRefreshKind::nothing().with_cpu().with_memory(),
        );
        let total_mem = self.sys.total_memory();
        let cores = self.sys.cpus().len().max(1) as f32;
        let normalize = self.normalize_cpu;

        let entries = self.sys.processes().values().map(|p| {
            let pid = p.pid().as_u32();
            if !p.exists() {
                return Err(ProcessReadError::Vanished(pid));
            }
            let raw = p.cpu_usage();
            let cpu = if normalize {
                (raw / cores).clamp(0.0, 100.0)
            } else {
                raw
            };
            let mem = (total_mem > 0).then(|| (p.memory() as f64 / total_mem as f64 * 100.0) as f32);
            Ok(ProcessEntry {
                pid,
                name: Some(p.name().to_string_lossy().into_owned()),
                cpu_percent: Some(cpu),
                mem_percent: mem,
            })
        });
        Ok(collect_processes(entries))
    }
}
