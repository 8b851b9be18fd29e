//! Runtime configuration: defaults, then an optional JSON file, then `SYSMON_*` env vars.
//! File lives under XDG config dir: $XDG_CONFIG_HOME/sysmon/config.json (fallback ~/.config/sysmon/config.json)

use serde::{Deserialize, Serialize};
use std::{fs, io, path::PathBuf, str::FromStr, time::Duration};

use crate::alerts::AlertThresholds;
use crate::error::ConfigError;
use crate::ranker::TOP_PROCESSES;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub interval_ms: u64,
    pub cpu_window_ms: u64,
    pub disk_path: PathBuf,
    pub top_n: usize,
    pub thresholds: AlertThresholds,
    pub alert_log: PathBuf,
    pub clamp_counter_reset: bool,
    pub normalize_process_cpu: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            interval_ms: 2_000,
            cpu_window_ms: 100,
            disk_path: PathBuf::from("/"),
            top_n: TOP_PROCESSES,
            thresholds: AlertThresholds::default(),
            alert_log: PathBuf::from("system_monitor.log"),
            clamp_counter_reset: false,
            normalize_process_cpu: true,
        }
    }
}

pub fn config_dir() -> PathBuf {
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
        PathBuf::from(xdg).join("sysmon")
    } else {
        dirs_next::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("sysmon")
    }
}

pub fn config_path() -> PathBuf {
    config_dir().join("config.json")
}

impl Config {
    /// Defaults, overlaid with the config file (if present) and the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        let mut cfg = Self::from_file(&config_path())?.unwrap_or_default();
        cfg.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(cfg)
    }

    /// `Ok(None)` when the file does not exist.
    pub fn from_file(path: &std::path::Path) -> Result<Option<Self>, ConfigError> {
        let text = match fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        serde_json::from_str(&text)
            .map(Some)
            .map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })
    }

    /// Apply `SYSMON_*` overrides looked up through `var`.
    pub fn apply_overrides<F>(&mut self, var: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = parsed(&var, "SYSMON_INTERVAL_MS")? {
            self.interval_ms = v;
        }
        if let Some(v) = parsed(&var, "SYSMON_CPU_WINDOW_MS")? {
            self.cpu_window_ms = v;
        }
        if let Some(v) = var("SYSMON_DISK_PATH").filter(|v| !v.is_empty()) {
            self.disk_path = PathBuf::from(v);
        }
        if let Some(v) = parsed(&var, "SYSMON_TOP_N")? {
            self.top_n = v;
        }
        if let Some(v) = parsed(&var, "SYSMON_CPU_THRESHOLD")? {
            self.thresholds.cpu = v;
        }
        if let Some(v) = parsed(&var, "SYSMON_RAM_THRESHOLD")? {
            self.thresholds.ram = v;
        }
        if let Some(v) = parsed(&var, "SYSMON_DISK_THRESHOLD")? {
            self.thresholds.disk = v;
        }
        if let Some(v) = var("SYSMON_ALERT_LOG").filter(|v| !v.is_empty()) {
            self.alert_log = PathBuf::from(v);
        }
        if let Some(v) = flag(&var, "SYSMON_CLAMP_COUNTER_RESET")? {
            self.clamp_counter_reset = v;
        }
        if let Some(v) = flag(&var, "SYSMON_NORMALIZE_CPU")? {
            self.normalize_process_cpu = v;
        }
        self.validate()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.interval_ms == 0 {
            return Err(ConfigError::InvalidValue {
                key: "interval_ms".into(),
                value: "0".into(),
            });
        }
        if self.disk_path.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "disk_path".into(),
                value: String::new(),
            });
        }
        Ok(())
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn cpu_window(&self) -> Duration {
        Duration::from_millis(self.cpu_window_ms)
    }
}

fn parsed<F, T>(var: &F, key: &str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match var(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue {
                key: key.to_string(),
                value: raw,
            }),
    }
}

/// `1`/`true` or `0`/`false`, case-insensitive.
fn flag<F>(var: &F, key: &str) -> Result<Option<bool>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = var(key) else {
        return Ok(None);
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" => Ok(Some(true)),
        "0" | "false" => Ok(Some(false)),
        _ => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: raw,
        }),
    }
}
