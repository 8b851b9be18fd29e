//! Scripted sampler shared by the cycle and poller tests.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::path::Path;
use std::time::{Duration, Instant};

use sysmon_core::{MetricSampler, NetCounterSnapshot, ProcessInfo, SampleError};

#[derive(Debug, Clone, Default)]
pub struct Reading {
    pub cpu: f32,
    pub ram: f32,
    pub disk: f32,
    pub sent: u64,
    pub recv: u64,
    pub processes: Vec<ProcessInfo>,
}

impl Reading {
    pub fn new(cpu: f32, ram: f32, disk: f32) -> Self {
        Self {
            cpu,
            ram,
            disk,
            ..Default::default()
        }
    }

    pub fn net(mut self, sent: u64, recv: u64) -> Self {
        self.sent = sent;
        self.recv = recv;
        self
    }

    pub fn procs(mut self, processes: Vec<ProcessInfo>) -> Self {
        self.processes = processes;
        self
    }
}

/// Each cycle consumes one scripted step (at `sample_cpu`); once the script is
/// exhausted the last good reading repeats. Network snapshots advance a
/// synthetic clock by `step` per call, starting from `base` for the priming call.
pub struct FakeSampler {
    script: VecDeque<Result<Reading, SampleError>>,
    current: Reading,
    initial: (u64, u64),
    base: Instant,
    step: Duration,
    net_calls: u32,
}

impl FakeSampler {
    pub fn new(initial_sent: u64, initial_recv: u64, step: Duration) -> Self {
        Self {
            script: VecDeque::new(),
            current: Reading::default().net(initial_sent, initial_recv),
            initial: (initial_sent, initial_recv),
            base: Instant::now(),
            step,
            net_calls: 0,
        }
    }

    pub fn then(mut self, reading: Reading) -> Self {
        self.script.push_back(Ok(reading));
        self
    }

    pub fn then_fail(mut self, err: SampleError) -> Self {
        self.script.push_back(Err(err));
        self
    }
}

impl MetricSampler for FakeSampler {
    fn sample_cpu(&mut self) -> Result<f32, SampleError> {
        if let Some(next) = self.script.pop_front() {
            self.current = next?;
        }
        Ok(self.current.cpu)
    }

    fn sample_ram(&mut self) -> Result<f32, SampleError> {
        Ok(self.current.ram)
    }

    fn sample_disk(&mut self, _path: &Path) -> Result<f32, SampleError> {
        Ok(self.current.disk)
    }

    fn sample_network(&mut self) -> Result<NetCounterSnapshot, SampleError> {
        let at = self.base + self.step * self.net_calls;
        let (sent, recv) = if self.net_calls == 0 {
            self.initial
        } else {
            (self.current.sent, self.current.recv)
        };
        self.net_calls += 1;
        Ok(NetCounterSnapshot::new(sent, recv, at))
    }

    fn enumerate_processes(&mut self) -> Result<Vec<ProcessInfo>, SampleError> {
        Ok(self.current.processes.clone())
    }
}

pub fn proc(pid: u32, name: &str, cpu: f32) -> ProcessInfo {
    ProcessInfo {
        pid,
        name: name.to_string(),
        cpu_percent: cpu,
        mem_percent: 1.0,
    }
}
