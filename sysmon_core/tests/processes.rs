//! Process enumeration tolerates entries that disappear mid-read.
use sysmon_core::metrics::{collect_processes, ProcessEntry, ProcessReadError, UNKNOWN_PROCESS};
use sysmon_core::rank;

fn entry(pid: u32, name: &str, cpu: f32, mem: f32) -> Result<ProcessEntry, ProcessReadError> {
    Ok(ProcessEntry {
        pid,
        name: Some(name.to_string()),
        cpu_percent: Some(cpu),
        mem_percent: Some(mem),
    })
}

#[test]
fn vanished_process_is_skipped_without_error() {
    let procs = collect_processes(vec![
        entry(1, "init", 0.1, 0.2),
        Err(ProcessReadError::Vanished(2)),
        entry(3, "sshd", 1.5, 0.7),
    ]);
    let pids: Vec<u32> = procs.iter().map(|p| p.pid).collect();
    assert_eq!(pids, vec![1, 3]);
}

#[test]
fn access_denied_is_skipped_too() {
    let procs = collect_processes(vec![
        Err(ProcessReadError::AccessDenied(7)),
        entry(8, "bash", 0.0, 0.1),
    ]);
    assert_eq!(procs.len(), 1);
    assert_eq!(procs[0].name, "bash");
}

#[test]
fn missing_fields_get_defaults() {
    let procs = collect_processes(vec![
        Ok(ProcessEntry {
            pid: 42,
            name: None,
            cpu_percent: None,
            mem_percent: None,
        }),
        Ok(ProcessEntry {
            pid: 43,
            name: Some(String::new()),
            cpu_percent: Some(2.0),
            mem_percent: None,
        }),
    ]);
    assert_eq!(procs[0].name, UNKNOWN_PROCESS);
    assert_eq!(procs[0].cpu_percent, 0.0);
    assert_eq!(procs[0].mem_percent, 0.0);
    assert_eq!(procs[1].name, "Unknown");
    assert_eq!(procs[1].cpu_percent, 2.0);
}

#[test]
fn all_vanished_yields_empty_list() {
    let procs = collect_processes((0..5).map(|pid| Err(ProcessReadError::Vanished(pid))));
    assert!(procs.is_empty());
}

#[test]
fn output_is_in_pid_order_whatever_the_input_order() {
    let procs = collect_processes(vec![
        entry(4763, "a", 0.0, 0.1),
        entry(18, "b", 0.0, 0.1),
        Err(ProcessReadError::Vanished(30)),
        entry(1736, "c", 0.0, 0.1),
        entry(29, "d", 0.0, 0.1),
    ]);
    let pids: Vec<u32> = procs.iter().map(|p| p.pid).collect();
    assert_eq!(pids, vec![18, 29, 1736, 4763]);
}

#[test]
fn idle_ties_rank_by_pid() {
    let shuffled = |order: &[u32]| {
        collect_processes(
            order
                .iter()
                .map(|&pid| entry(pid, "idle", 0.0, 0.1))
                .chain(std::iter::once(entry(900, "busy", 12.0, 0.1))),
        )
    };
    let a = rank(shuffled(&[58, 1736, 38, 31, 4763, 18]), 4);
    let b = rank(shuffled(&[4763, 18, 31, 58, 38, 1736]), 4);
    let pids: Vec<u32> = a.iter().map(|p| p.pid).collect();
    assert_eq!(pids, vec![900, 18, 31, 38]);
    assert_eq!(a, b);
}
