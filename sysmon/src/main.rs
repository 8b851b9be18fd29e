//! Entry point for sysmon. Parses args, loads config, starts the poller and a presenter.

mod app;
mod headless;
mod history;
mod ui;

use std::env;
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::Context;
use app::App;
use sysmon_core::{
    spawn_poller, AlertLog, ChannelNotifier, Config, Monitor, Notifiers, SysinfoSampler,
};
use tokio::sync::{mpsc, watch};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "Usage: sysmon [--interval MS|-i MS] [--disk PATH|-d PATH] [--log-file PATH] [--headless] [--json]";

#[derive(Debug, Default, PartialEq)]
struct ParsedArgs {
    interval_ms: Option<u64>,
    disk: Option<String>,
    log_file: Option<String>,
    headless: bool,
    json: bool,
}

#[derive(Debug, PartialEq)]
enum Cli {
    Run(ParsedArgs),
    Help,
}

fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<Cli, String> {
    let mut it = args.into_iter();
    let _ = it.next(); // program name
    let mut parsed = ParsedArgs::default();

    while let Some(arg) = it.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(Cli::Help),
            "--interval" | "-i" => parsed.interval_ms = Some(parse_interval(it.next())?),
            "--disk" | "-d" => parsed.disk = Some(required(&arg, it.next())?),
            "--log-file" => parsed.log_file = Some(required(&arg, it.next())?),
            "--headless" => parsed.headless = true,
            "--json" => {
                // JSON output only makes sense without the dashboard
                parsed.json = true;
                parsed.headless = true;
            }
            _ if arg.starts_with("--interval=") => {
                parsed.interval_ms = Some(parse_interval(arg.split_once('=').map(|(_, v)| v.to_string()))?);
            }
            _ if arg.starts_with("--disk=") => {
                parsed.disk = arg.split_once('=').map(|(_, v)| v.to_string()).filter(|v| !v.is_empty());
            }
            _ if arg.starts_with("--log-file=") => {
                parsed.log_file = arg.split_once('=').map(|(_, v)| v.to_string()).filter(|v| !v.is_empty());
            }
            _ => return Err(format!("Unexpected argument '{arg}'. {USAGE}")),
        }
    }
    Ok(Cli::Run(parsed))
}

fn required(flag: &str, v: Option<String>) -> Result<String, String> {
    v.filter(|s| !s.is_empty())
        .ok_or_else(|| format!("{flag} needs a value. {USAGE}"))
}

fn parse_interval(v: Option<String>) -> Result<u64, String> {
    match v.as_deref().map(str::parse::<u64>) {
        Some(Ok(ms)) if ms > 0 => Ok(ms),
        _ => Err(format!("--interval needs a positive number of milliseconds. {USAGE}")),
    }
}

impl ParsedArgs {
    fn apply(&self, cfg: &mut Config) {
        if let Some(ms) = self.interval_ms {
            cfg.interval_ms = ms;
        }
        if let Some(d) = &self.disk {
            cfg.disk_path = PathBuf::from(d);
        }
        if let Some(p) = &self.log_file {
            cfg.alert_log = PathBuf::from(p);
        }
    }
}

/// Open (append) the trace log, creating its directory like the alert log does.
fn open_trace_file(path: &Path) -> anyhow::Result<File> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .with_context(|| format!("creating trace log directory {}", dir.display()))?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening trace log {}", path.display()))
}

fn init_tracing(trace_file: Option<&Path>) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "sysmon=info,sysmon_core=info".into());
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match trace_file {
        // The dashboard owns the terminal, so diagnostics go to a file.
        Some(path) => {
            let file = open_trace_file(path)?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        None => builder.with_writer(std::io::stderr).init(),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let parsed = match parse_args(env::args()).map_err(anyhow::Error::msg)? {
        Cli::Run(p) => p,
        Cli::Help => {
            println!("{USAGE}");
            return Ok(());
        }
    };

    let mut cfg = Config::load().context("loading configuration")?;
    parsed.apply(&mut cfg);
    cfg.validate()?;

    let trace_file = (!parsed.headless).then(|| cfg.alert_log.with_file_name("sysmon.trace.log"));
    init_tracing(trace_file.as_deref())?;
    tracing::info!(
        interval_ms = cfg.interval_ms,
        disk = %cfg.disk_path.display(),
        alert_log = %cfg.alert_log.display(),
        "starting sysmon"
    );

    let sampler =
        SysinfoSampler::new(cfg.cpu_window()).with_normalized_cpu(cfg.normalize_process_cpu);
    let monitor = Monitor::new(sampler, &cfg).context("reading initial network counters")?;
    let alert_log = AlertLog::open(&cfg.alert_log)
        .with_context(|| format!("opening alert log {}", cfg.alert_log.display()))?;

    let (sample_tx, sample_rx) = watch::channel(None);
    let (notice_tx, notice_rx) = mpsc::unbounded_channel();
    let notifier = Notifiers::new()
        .with(alert_log)
        .with(ChannelNotifier::new(notice_tx));
    let poller = spawn_poller(monitor, cfg.interval(), sample_tx, notifier);

    let res = if parsed.headless {
        headless::run(sample_rx, notice_rx, parsed.json).await
    } else {
        let mut app = App::new(cfg.thresholds);
        app.run(sample_rx, notice_rx, poller.refresh_handle()).await
    };
    poller.shutdown();
    res
}
