//! Threshold evaluation.
use sysmon_core::{evaluate, Alert, AlertKind, AlertThresholds};

fn kinds(alerts: &[Alert]) -> Vec<AlertKind> {
    alerts.iter().map(|a| a.kind).collect()
}

#[test]
fn default_thresholds() {
    let t = AlertThresholds::default();
    assert_eq!((t.cpu, t.ram, t.disk), (80.0, 80.0, 90.0));
}

#[test]
fn only_cpu_above_threshold() {
    let fired = evaluate(81.0, 50.0, 50.0, &AlertThresholds::default());
    assert_eq!(kinds(&fired), vec![AlertKind::CpuHigh]);
    assert_eq!(fired[0].value, 81.0);
}

#[test]
fn boundary_values_do_not_alert() {
    assert!(evaluate(80.0, 80.0, 90.0, &AlertThresholds::default()).is_empty());
}

#[test]
fn everything_high_fires_all_three_once() {
    let fired = evaluate(95.0, 95.0, 95.0, &AlertThresholds::default());
    assert_eq!(
        kinds(&fired),
        vec![AlertKind::CpuHigh, AlertKind::RamHigh, AlertKind::DiskHigh]
    );
}

#[test]
fn disk_uses_its_own_threshold() {
    let fired = evaluate(10.0, 10.0, 85.0, &AlertThresholds::default());
    assert!(fired.is_empty(), "85% disk is under the 90% threshold");
    let fired = evaluate(10.0, 10.0, 90.5, &AlertThresholds::default());
    assert_eq!(kinds(&fired), vec![AlertKind::DiskHigh]);
}

#[test]
fn stateless_across_calls() {
    let t = AlertThresholds::default();
    // Same persisting condition fires every time it is evaluated.
    for _ in 0..3 {
        assert_eq!(kinds(&evaluate(10.0, 99.0, 10.0, &t)), vec![AlertKind::RamHigh]);
    }
}

#[test]
fn messages_match_display_and_log_formats() {
    let a = Alert {
        kind: AlertKind::CpuHigh,
        value: 81.04,
    };
    assert_eq!(a.message(), "CPU usage high: 81.0%");
    assert_eq!(a.log_line(), "CPU usage alert: 81.0%");
    let d = Alert {
        kind: AlertKind::DiskHigh,
        value: 93.26,
    };
    assert_eq!(d.message(), "Disk usage high: 93.3%");
}
