//! Rate calculation between two network counter snapshots.
use std::time::{Duration, Instant};

use sysmon_core::{compute_rate, NetCounterSnapshot, NetRate, RateTracker};

fn snap(sent: u64, recv: u64, base: Instant, secs: f64) -> NetCounterSnapshot {
    NetCounterSnapshot::new(sent, recv, base + Duration::from_secs_f64(secs))
}

#[test]
fn two_second_window_divides_deltas() {
    let t0 = Instant::now();
    let prev = snap(1000, 2000, t0, 0.0);
    let curr = snap(3000, 2500, t0, 2.0);
    assert_eq!(
        compute_rate(&prev, &curr),
        NetRate {
            sent: 1000.0,
            recv: 250.0
        }
    );
}

#[test]
fn rate_is_exact_delta_over_elapsed() {
    let t0 = Instant::now();
    for (dt, ds, dr) in [(0.5, 100u64, 0u64), (1.0, 4096, 1), (3.0, 9, 27), (10.0, 0, 0)] {
        let prev = snap(500, 700, t0, 0.0);
        let curr = snap(500 + ds, 700 + dr, t0, dt);
        let r = compute_rate(&prev, &curr);
        assert_eq!(r.sent, ds as f64 / dt);
        assert_eq!(r.recv, dr as f64 / dt);
    }
}

#[test]
fn zero_elapsed_is_zero_rate() {
    let t0 = Instant::now();
    let prev = snap(0, 0, t0, 0.0);
    let curr = snap(10_000, 20_000, t0, 0.0);
    assert_eq!(compute_rate(&prev, &curr), NetRate::default());
}

#[test]
fn negative_elapsed_is_zero_rate() {
    let t0 = Instant::now();
    let prev = snap(0, 0, t0, 5.0);
    let curr = snap(10_000, 20_000, t0, 1.0);
    let r = compute_rate(&prev, &curr);
    assert_eq!(r, NetRate::default());
    assert!(!r.sent.is_nan() && !r.recv.is_nan());
}

// Counter resets are passed through literally; this documents the sign, it is not an endorsement.
#[test]
fn counter_reset_produces_negative_rate_by_default() {
    let t0 = Instant::now();
    let prev = snap(5_000, 8_000, t0, 0.0);
    let curr = snap(1_000, 8_000, t0, 2.0);
    let r = compute_rate(&prev, &curr);
    assert_eq!(r.sent, -2_000.0);
    assert_eq!(r.recv, 0.0);
}

#[test]
fn tracker_can_clamp_counter_reset() {
    let t0 = Instant::now();
    let mut tracker = RateTracker::new(snap(5_000, 8_000, t0, 0.0)).with_clamp_on_reset(true);
    let r = tracker.advance(snap(1_000, 9_000, t0, 2.0));
    assert_eq!(r.sent, 0.0);
    assert_eq!(r.recv, 500.0);
}

#[test]
fn tracker_replaces_previous_snapshot() {
    let t0 = Instant::now();
    let mut tracker = RateTracker::new(snap(0, 0, t0, 0.0));

    let first = tracker.advance(snap(2_000, 1_000, t0, 2.0));
    assert_eq!(first, NetRate { sent: 1_000.0, recv: 500.0 });
    assert_eq!(tracker.previous(), &snap(2_000, 1_000, t0, 2.0));

    // Measured against the replaced snapshot, not the original one.
    let second = tracker.advance(snap(2_400, 1_000, t0, 4.0));
    assert_eq!(second, NetRate { sent: 200.0, recv: 0.0 });
}

#[test]
fn tracker_replaces_snapshot_even_when_elapsed_is_zero() {
    let t0 = Instant::now();
    let mut tracker = RateTracker::new(snap(0, 0, t0, 1.0));
    assert_eq!(tracker.advance(snap(50, 50, t0, 1.0)), NetRate::default());
    assert_eq!(tracker.previous().bytes_sent, 50);
}
