//! Headless presenter: prints each sample (text or JSON lines) and notices to the terminal.

use std::io::{self, Write};
use std::sync::Arc;

use sysmon_core::render::{process_row, summary_lines, PROCESS_HEADERS};
use sysmon_core::{Notice, Sample};
use tokio::sync::{mpsc, watch};

pub async fn run(
    mut samples: watch::Receiver<Option<Arc<Sample>>>,
    mut notices: mpsc::UnboundedReceiver<Notice>,
    json: bool,
) -> anyhow::Result<()> {
    loop {
        tokio::select! {
            changed = samples.changed() => {
                if changed.is_err() {
                    break;
                }
                let latest = samples.borrow_and_update().clone();
                if let Some(s) = latest {
                    print_sample(&mut io::stdout().lock(), &s, json)?;
                }
            }
            Some(n) = notices.recv() => {
                eprintln!("[{}] {}", n.at().format("%H:%M:%S"), n.message());
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }
    Ok(())
}

fn print_sample(out: &mut impl Write, s: &Sample, json: bool) -> io::Result<()> {
    if json {
        serde_json::to_writer(&mut *out, s)?;
        writeln!(out)?;
        return out.flush();
    }
    writeln!(out, "{} | {}", s.timestamp.format("%H:%M:%S"), summary_lines(s).join(" | "))?;
    let [pid, name, cpu, mem] = PROCESS_HEADERS;
    writeln!(out, "  {pid:>7}  {name:<24} {cpu:>6} {mem:>8}")?;
    for p in &s.processes {
        let [pid, name, cpu, mem] = process_row(p);
        writeln!(out, "  {pid:>7}  {name:<24.24} {cpu:>6} {mem:>8}")?;
    }
    out.flush()
}
