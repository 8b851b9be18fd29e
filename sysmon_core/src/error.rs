//! Error types for sampling, configuration and render sinks.

use std::path::PathBuf;
use thiserror::Error;

/// An OS-level sampling call failed. Distinct from a legitimate 0% reading.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SampleError {
    #[error("{metric} metrics are unavailable on this host")]
    Unavailable { metric: &'static str },
    #[error("no mounted disk contains {}", path.display())]
    DiskNotFound { path: PathBuf },
    #[error("sampling worker failed: {0}")]
    Worker(String),
}

impl From<tokio::task::JoinError> for SampleError {
    fn from(e: tokio::task::JoinError) -> Self {
        SampleError::Worker(e.to_string())
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid value {value:?} for {key}")]
    InvalidValue { key: String, value: String },
}

/// The consumer on the other side of a render sink has gone away.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("render sink closed")]
pub struct SinkClosed;
