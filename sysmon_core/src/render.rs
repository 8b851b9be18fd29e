//! Display strings for a sample: the four summary lines and the process rows.

use crate::types::{ProcessInfo, Sample};

pub fn cpu_line(sample: &Sample) -> String {
    format!("CPU Usage: {:.1}%", sample.cpu_percent)
}

pub fn ram_line(sample: &Sample) -> String {
    format!("RAM Usage: {:.1}%", sample.ram_percent)
}

pub fn disk_line(sample: &Sample) -> String {
    format!("Disk Usage: {:.1}%", sample.disk_percent)
}

pub fn net_line(sample: &Sample) -> String {
    format!(
        "Network: Sent {:.0} B/s, Recv {:.0} B/s",
        sample.net_sent_rate, sample.net_recv_rate
    )
}

/// CPU, RAM, Disk, Network, in display order.
pub fn summary_lines(sample: &Sample) -> [String; 4] {
    [
        cpu_line(sample),
        ram_line(sample),
        disk_line(sample),
        net_line(sample),
    ]
}

pub const PROCESS_HEADERS: [&str; 4] = ["PID", "Name", "CPU%", "Memory%"];

pub fn process_row(p: &ProcessInfo) -> [String; 4] {
    [
        p.pid.to_string(),
        p.name.clone(),
        format!("{:.1}", p.cpu_percent),
        format!("{:.1}", p.mem_percent),
    ]
}

/// Human-readable byte rate, e.g. "1.5 MB/s".
pub fn human_rate(bytes_per_sec: f64) -> String {
    const K: f64 = 1024.0;
    let sign = if bytes_per_sec < 0.0 { "-" } else { "" };
    let b = bytes_per_sec.abs();
    if b < K {
        return format!("{sign}{b:.0} B/s");
    }
    let kb = b / K;
    if kb < K {
        return format!("{sign}{kb:.1} KB/s");
    }
    let mb = kb / K;
    if mb < K {
        return format!("{sign}{mb:.1} MB/s");
    }
    format!("{sign}{:.2} GB/s", mb / K)
}
