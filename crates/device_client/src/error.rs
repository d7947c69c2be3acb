use std::{path::PathBuf, time::Duration};

use reqwest::StatusCode;
use shared::error::FailureKind;
use thiserror::Error;

/// Why one catalog source produced nothing. Never leaves the resolver on its own.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("no answer within {0:?}")]
    Timeout(Duration),
    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("unexpected status {0}")]
    Status(StatusCode),
    #[error("malformed catalog payload: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("failed to read snapshot '{}': {source}", path.display())]
    Snapshot {
        path: PathBuf,
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
#[error("no catalog available: live source failed ({live}); snapshot failed ({fallback})")]
pub struct SourceUnavailable {
    pub live: SourceError,
    pub fallback: SourceError,
}

impl SourceUnavailable {
    pub fn kind(&self) -> FailureKind {
        FailureKind::SourceUnavailable
    }
}

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("light controller did not respond within {0:?}")]
    Timeout(Duration),
    #[error("light controller rejected the request with status {status}: {body}")]
    DeviceRejected { status: u16, body: String },
    #[error("light controller unreachable: {0}")]
    TransportFailure(#[source] reqwest::Error),
    #[error("request aborted before the light controller answered")]
    Aborted,
}

impl CommandError {
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Timeout(_) => FailureKind::Timeout,
            Self::DeviceRejected { .. } => FailureKind::DeviceRejected,
            Self::TransportFailure(_) | Self::Aborted => FailureKind::TransportFailure,
        }
    }
}
