//! Notification interface plus the two stock consumers: a channel into the
//! presenter and the append-only alert log.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Local, SecondsFormat};
use tokio::sync::mpsc::UnboundedSender;
use tracing::warn;

use crate::alerts::Alert;

#[derive(Debug, Clone, PartialEq)]
pub struct AlertEvent {
    pub alert: Alert,
    pub at: DateTime<Local>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    Alert(AlertEvent),
    SamplingFailed { message: String, at: DateTime<Local> },
}

impl Notice {
    pub fn message(&self) -> String {
        match self {
            Notice::Alert(ev) => ev.alert.message(),
            Notice::SamplingFailed { message, .. } => format!("Sampling failed: {message}"),
        }
    }

    pub fn at(&self) -> DateTime<Local> {
        match self {
            Notice::Alert(ev) => ev.at,
            Notice::SamplingFailed { at, .. } => *at,
        }
    }
}

/// Receives alerts and failures. Must not block waiting for a user.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: &Notice);
}

impl<N: Notifier + ?Sized> Notifier for Arc<N> {
    fn notify(&self, notice: &Notice) {
        (**self).notify(notice)
    }
}

/// Forwards notices to a presenter task.
#[derive(Clone)]
pub struct ChannelNotifier(UnboundedSender<Notice>);

impl ChannelNotifier {
    pub fn new(tx: UnboundedSender<Notice>) -> Self {
        Self(tx)
    }
}

impl Notifier for ChannelNotifier {
    fn notify(&self, notice: &Notice) {
        // A presenter that has gone away is not the monitor's problem.
        let _ = self.0.send(notice.clone());
    }
}

/// Appends `<RFC3339 timestamp> - <message>` for every fired alert.
pub struct AlertLog {
    path: PathBuf,
    file: Mutex<File>,
}

impl AlertLog {
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self {
            path,
            file: Mutex::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format_line(event: &AlertEvent) -> String {
        format!(
            "{} - {}",
            event.at.to_rfc3339_opts(SecondsFormat::Millis, false),
            event.alert.log_line()
        )
    }
}

impl Notifier for AlertLog {
    fn notify(&self, notice: &Notice) {
        let Notice::Alert(event) = notice else { return };
        let line = Self::format_line(event);
        let res = match self.file.lock() {
            Ok(mut f) => writeln!(f, "{line}").and_then(|_| f.flush()),
            Err(_) => Err(io::Error::other("alert log lock poisoned")),
        };
        if let Err(e) = res {
            warn!(path = %self.path.display(), "failed to write alert log: {e}");
        }
    }
}

/// Delivers each notice to every inner notifier, in order.
#[derive(Default, Clone)]
pub struct Notifiers(Vec<Arc<dyn Notifier>>);

impl Notifiers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, n: impl Notifier + 'static) -> Self {
        self.0.push(Arc::new(n));
        self
    }
}

impl Notifier for Notifiers {
    fn notify(&self, notice: &Notice) {
        for n in &self.0 {
            n.notify(notice);
        }
    }
}
