//! Bounded buffers for the recent-notices panel.

use std::collections::VecDeque;

pub fn push_capped<T>(dq: &mut VecDeque<T>, v: T, cap: usize) {
    if cap == 0 {
        return;
    }
    if dq.len() == cap {
        dq.pop_front();
    }
    dq.push_back(v);
}
